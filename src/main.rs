#![forbid(unsafe_code)]

use clap::{ArgGroup, Parser};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{self, Command, Stdio};
use std::sync::LazyLock;

static PAGE_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]+)(\((\d+)\)|)").unwrap());

#[derive(Debug, Parser)]
#[command(name = "man2html", version)]
#[command(about = "Translates documentation from man-format to html-format")]
#[command(group(ArgGroup::new("source").required(true)))]
struct Cli {
    /// Read man-page source from a file
    #[arg(short = 'f', long = "file", value_name = "PATH", group = "source")]
    file: Option<PathBuf>,

    /// Look up an installed man page, given as `name` or `name(N)`
    #[arg(short = 'n', long = "name", value_name = "PAGE", group = "source")]
    name: Option<String>,

    /// Title of the html-page
    #[arg(short = 't', long = "title", value_name = "TITLE", default_value = "Man")]
    title: String,

    /// Name of the output file, written as <NAME>.html
    #[arg(
        short = 'o',
        long = "output",
        value_name = "NAME",
        default_value = "output"
    )]
    output: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let input = if let Some(path) = &cli.file {
        fs::read_to_string(path)?
    } else {
        look_up_page(cli.name.as_deref().unwrap_or_default())?
    };
    let html = man2html::convert(&input, &cli.title)?;
    fs::write(format!("{}.html", cli.output), html)?;
    Ok(())
}

/// Resolve an installed man page to its source text. Failures are operator
/// exit conditions, distinct from conversion errors: exit 1 on unsupported
/// hosts, exit 2 when no page matches.
fn look_up_page(reference: &str) -> Result<String, Box<dyn std::error::Error>> {
    if !cfg!(unix) {
        eprintln!("Man page search is available only for Unix hosts");
        process::exit(1);
    }
    let Some((name, section)) = parse_page_reference(reference) else {
        return Err(format!("invalid man page reference '{reference}'").into());
    };
    let located = Command::new("man")
        .args(["-w", &section, &name])
        .stderr(Stdio::null())
        .output()?;
    if !located.status.success() {
        eprintln!("No such man file found");
        process::exit(2);
    }
    let path = String::from_utf8_lossy(&located.stdout).trim().to_string();
    let decompressed = Command::new("gzip")
        .args(["-c", "-d", &path])
        .stderr(Stdio::null())
        .output()?;
    if decompressed.status.success() {
        Ok(String::from_utf8_lossy(&decompressed.stdout).into_owned())
    } else {
        // Some systems install pages uncompressed.
        Ok(fs::read_to_string(path)?)
    }
}

fn parse_page_reference(reference: &str) -> Option<(String, String)> {
    let captures = PAGE_REFERENCE_RE.captures(reference)?;
    let section = captures
        .get(3)
        .map_or_else(|| "1".to_string(), |m| m.as_str().to_string());
    Some((captures[1].to_string(), section))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_reference_defaults_to_section_one() {
        assert_eq!(
            parse_page_reference("grep"),
            Some(("grep".to_string(), "1".to_string()))
        );
    }

    #[test]
    fn page_reference_parses_explicit_section() {
        assert_eq!(
            parse_page_reference("mount(8)"),
            Some(("mount".to_string(), "8".to_string()))
        );
    }

    #[test]
    fn page_reference_rejects_garbage() {
        assert_eq!(parse_page_reference("123"), None);
    }
}
