#![forbid(unsafe_code)]
//! Man2html translates man-page source (roff directives) into an HTML document.
//!
//! # Example
//!
//! ```
//! let source = ".TH GREP 1 \"2017-06-21\" \"GNU grep 3.1\" \"User Commands\"\n\
//!               .SH NAME\n\
//!               grep - print lines that match patterns\n";
//! let html = man2html::convert(source, "Man")?;
//! assert!(html.contains("<h2>NAME</h2>"));
//! # Ok::<(), man2html::ConvertError>(())
//! ```

use regex::Regex;
use std::error::Error;
use std::fmt;
use std::str::Lines;
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\.URL|\.MTO) (\S+)( "([^"]+)"| \S+|)"#).unwrap());

/// Directive kinds the interpreter knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    /// Alternate two inline styles across the whitespace-separated tokens of
    /// the line; the letters name the even/odd styles (`B`, `I`, `S`, else roman).
    Joint(char, char),
    Bold,
    Italic,
    SmallCaps,
    IndentedParagraph,
    Break,
    VerbatimBegin,
    Link,
    Section,
    Subsection,
    Header,
    HangingParagraph,
    IndentStart,
    IndentEnd,
}

/// Ordered prefix table; the first entry whose prefix matches a line wins.
/// Entries that share a representational prefix (`.BR ` before `.B `, `.PP`
/// before `.P`, `.TP ` before `.TP`) rely on this order to disambiguate.
const REGISTRY: &[(&str, Directive)] = &[
    (".BR ", Directive::Joint('B', 'R')),
    (".BI ", Directive::Joint('B', 'I')),
    (".RB ", Directive::Joint('R', 'B')),
    (".RI ", Directive::Joint('R', 'I')),
    (".IB ", Directive::Joint('I', 'B')),
    (".IR ", Directive::Joint('I', 'R')),
    (".SB ", Directive::Joint('S', 'B')),
    (".B ", Directive::Bold),
    (".I ", Directive::Italic),
    (".SM", Directive::SmallCaps),
    (".IP ", Directive::IndentedParagraph),
    (".PP", Directive::Break),
    (".LP", Directive::Break),
    (".P", Directive::Break),
    (".br", Directive::Break),
    (".Sp", Directive::Break),
    (".Vb ", Directive::VerbatimBegin),
    (".MTO", Directive::Link),
    (".URL", Directive::Link),
    (".SH ", Directive::Section),
    (".SS ", Directive::Subsection),
    (".TH ", Directive::Header),
    (".TP ", Directive::HangingParagraph),
    (".TP", Directive::HangingParagraph),
    (".RS", Directive::IndentStart),
    (".RE", Directive::IndentEnd),
];

/// Unmatched lines starting with one of these are roff noise and are dropped.
const DROPPED_PREFIXES: &[&str] = &[".", "'", r"\{", r"\fI\|\\$1", r"\\$2"];

/// Literal replacements applied once over the serialized document, in order.
/// The order is observable: the paired-quote removals must run before the
/// generic `&quot;` removal at the end, and `\-\^\-` before `\-`.
const SYMBOL_TABLE: &[(&str, &str)] = &[
    (r#"\*(L&quot;"#, "\""),
    (r#"\*(R&quot;"#, "\""),
    (r"\*R", "&reg;"),
    (r"\*(Tm", "&trade;"),
    (r"\*(lq", "&laquo;"),
    (r"\*(rq", "&raquo;"),
    (r"\|.", "."),
    (r"\-\^\-", "--"),
    (r"\-", "-"),
    (r"\&", ""),
    (r"\(en", "-"),
    (r"\(bu", "&bull;"),
    (r"\ ", " "),
    (r"\fB", r#"<span class="bold">"#),
    (r"\fI", r#"<span class="italic">"#),
    (r"\f(CW", r#"<span style="font-family: monospace;">"#),
    (r"\fR", "</span>"),
    (r"\fP", "</span>"),
    (r"\(aq", "'"),
    (r"\(dq", "\""),
    (r"\*(C+", "C++"),
    (r"\s-1", ""),
    (r"\s0", ""),
    (r"\|_", "_"),
    ("C`", "\""),
    ("C'", "\""),
    (r"\|", ""),
    (r"\e", "\\"),
    ("amp;", ""),
    (r"\,", ""),
    (r"\/", ""),
    ("&quot;, &quot;", ", "),
    (r"\*(", ""),
    (r"\(co", "&copy;"),
    ("&quot;", ""),
];

#[derive(Debug)]
pub enum ConvertError {
    Link(String),
    Header(String),
    Indent(String),
    Structure(String),
    Input(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Link(msg) => write!(f, "malformed link directive: {msg}"),
            ConvertError::Header(msg) => write!(f, "malformed title header: {msg}"),
            ConvertError::Indent(msg) => write!(f, "malformed indent directive: {msg}"),
            ConvertError::Structure(msg) => write!(f, "structural error: {msg}"),
            ConvertError::Input(msg) => write!(f, "input error: {msg}"),
        }
    }
}

impl Error for ConvertError {}

pub type Result<T> = std::result::Result<T, ConvertError>;

fn lookup(line: &str) -> Option<(&'static str, Directive)> {
    REGISTRY
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .copied()
}

/// Remove the first registered prefix matching `line` and trim spaces and
/// newlines from both ends; lines with no matching prefix are trimmed at the
/// end only. Tokens re-dispatched from `.IP`/`.TP` terms go through the same
/// path, so a bolded term loses its `.B ` prefix before rendering.
fn strip_directive(line: &str) -> &str {
    for (prefix, _) in REGISTRY {
        if let Some(rest) = line.strip_prefix(prefix) {
            return rest.trim_matches([' ', '\n']);
        }
    }
    line.trim_end_matches([' ', '\n'])
}

/// Split on whitespace while keeping double-quoted substrings (quotes
/// included) as single tokens.
fn select_quotes(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in input.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if in_quotes {
        return Err(ConvertError::Input(format!(
            "unterminated double quote in '{input}'"
        )));
    }
    if !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

fn parse_indent(token: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| ConvertError::Indent(format!("expected a numeric width, found '{token}'")))
}

/// Apply the symbol table to the serialized document. Idempotent on already
/// substituted text: no entry matches its own replacement.
pub fn substitute_symbols(text: &str) -> String {
    SYMBOL_TABLE
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Append-only HTML element arena. Children interleave nested elements and
/// raw text; serialization escapes text and attribute values.
#[derive(Debug, Default)]
pub struct HtmlTree {
    nodes: Vec<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Child>,
}

#[derive(Debug)]
enum Child {
    Element(NodeId),
    Text(String),
}

const VOID_TAGS: &[&str] = &["meta", "link", "br"];

impl HtmlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_element(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag,
            attrs: attrs
                .iter()
                .map(|(name, value)| (*name, value.to_string()))
                .collect(),
            children: Vec::new(),
        });
        id
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
    ) -> NodeId {
        let id = self.new_element(tag, attrs);
        self.nodes[parent.0].children.push(Child::Element(id));
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        self.nodes[parent.0]
            .children
            .push(Child::Text(text.to_string()));
    }

    pub fn serialize(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write_element(root, &mut out);
        out
    }

    fn write_element(&self, id: NodeId, out: &mut String) {
        let element = &self.nodes[id.0];
        out.push('<');
        out.push_str(element.tag);
        for (name, value) in &element.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&element.tag) {
            return;
        }
        for child in &element.children {
            match child {
                Child::Element(child) => self.write_element(*child, out),
                Child::Text(text) => out.push_str(&escape(text)),
            }
        }
        out.push_str("</");
        out.push_str(element.tag);
        out.push('>');
    }
}

// Double quotes become `&quot;` alongside the markup-significant characters;
// several symbol-table entries match on that entity form.
fn escape(text: &str) -> String {
    html_escape::encode_text(text).replace('"', "&quot;")
}

/// Single-pass directive interpreter. Walks the input lines once, keeping the
/// innermost open container (body, section, subsection) plus the open
/// paragraph-like node, and appends to the tree as a side effect of each line.
#[derive(Debug)]
pub struct Converter {
    tree: HtmlTree,
    root: NodeId,
    body: NodeId,
    paragraph: Option<NodeId>,
    section: Option<NodeId>,
    subsection: Option<NodeId>,
    page_label: Option<String>,
    date: Option<String>,
    program: Option<String>,
    /// Width watermark for `.IP`/`.TP` terms; persists until redefined.
    indent: usize,
    /// Left-margin offset in em set by `.RS`, cleared by `.RE` and `.SH`.
    margin: Option<String>,
}

impl Converter {
    pub fn new(title: &str) -> Self {
        let mut tree = HtmlTree::new();
        let root = tree.new_element("html", &[("lang", "en")]);
        let head = tree.append_element(root, "head", &[]);
        tree.append_element(head, "meta", &[("charset", "utf-8")]);
        let title_element = tree.append_element(head, "title", &[]);
        tree.append_text(title_element, title);
        tree.append_element(
            head,
            "link",
            &[("rel", "stylesheet"), ("href", "styles.css")],
        );
        let body = tree.append_element(root, "body", &[]);
        Self {
            tree,
            root,
            body,
            paragraph: None,
            section: None,
            subsection: None,
            page_label: None,
            date: None,
            program: None,
            indent: 0,
            margin: None,
        }
    }

    /// Consume the whole input in one forward pass. Handlers for `.TP` and
    /// `.Vb` pull extra lines from the same cursor.
    pub fn translate(&mut self, input: &str) -> Result<()> {
        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            if self.dispatch(line, &mut lines)? {
                continue;
            }
            if DROPPED_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
                continue;
            }
            if line.is_empty() {
                self.line_break();
            } else {
                self.plain_text(line);
            }
        }
        if let Some(label) = self.page_label.clone() {
            match (self.program.clone(), self.date.clone()) {
                (Some(program), Some(date)) => self.title_row(&program, &date, &label),
                (None, Some(date)) => self.title_row("", &date, &label),
                _ => self.title_row("", "", &label),
            }
        }
        Ok(())
    }

    /// Serialize the tree and apply the symbol table.
    pub fn render(self) -> String {
        substitute_symbols(&self.tree.serialize(self.root))
    }

    fn dispatch(&mut self, line: &str, lines: &mut Lines<'_>) -> Result<bool> {
        let Some((_, directive)) = lookup(line) else {
            return Ok(false);
        };
        match directive {
            Directive::Joint(first, second) => self.joint_styles(first, second, line)?,
            Directive::Bold => self.bold(line),
            Directive::Italic => self.italics(line),
            Directive::SmallCaps => self.small_caps(line),
            Directive::IndentedParagraph => self.indented_paragraph(line, lines)?,
            Directive::Break => self.line_break(),
            Directive::VerbatimBegin => self.verbatim_block(lines)?,
            Directive::Link => self.link(line)?,
            Directive::Section => self.section_header(line),
            Directive::Subsection => self.subsection_header(line)?,
            Directive::Header => self.header_metadata(line)?,
            Directive::HangingParagraph => self.hanging_paragraph(line, lines)?,
            Directive::IndentStart => self.indent_start(line),
            Directive::IndentEnd => self.margin = None,
        }
        Ok(true)
    }

    /// Innermost open container: subsection, else section, else body.
    fn innermost(&self) -> NodeId {
        self.subsection.or(self.section).unwrap_or(self.body)
    }

    /// The open paragraph, creating one under the innermost container if
    /// needed. An active `.RS` region becomes an inline margin style.
    fn ensure_paragraph(&mut self) -> NodeId {
        if let Some(paragraph) = self.paragraph {
            return paragraph;
        }
        let parent = self.innermost();
        let paragraph = match &self.margin {
            Some(offset) => {
                let style = format!("margin-left: {offset}em;");
                self.tree.append_element(parent, "p", &[("style", &style)])
            }
            None => self.tree.append_element(parent, "p", &[]),
        };
        self.paragraph = Some(paragraph);
        paragraph
    }

    // The leading newline is a join artifact carried over from line-oriented
    // input; only the trailing newline is trimmed.
    fn plain_text(&mut self, line: &str) {
        let paragraph = self.ensure_paragraph();
        self.tree
            .append_text(paragraph, &format!("\n{}", line.trim_end_matches('\n')));
    }

    fn bold(&mut self, line: &str) {
        let paragraph = self.ensure_paragraph();
        let span = self.tree.append_element(paragraph, "b", &[]);
        self.tree.append_text(span, strip_directive(line));
    }

    fn italics(&mut self, line: &str) {
        let paragraph = self.ensure_paragraph();
        let span = self.tree.append_element(paragraph, "i", &[]);
        self.tree.append_text(span, strip_directive(line));
    }

    fn small_caps(&mut self, line: &str) {
        let paragraph = self.ensure_paragraph();
        let span = self.tree.append_element(paragraph, "small", &[]);
        self.tree.append_text(span, strip_directive(line));
    }

    fn joint_styles(&mut self, first: char, second: char, line: &str) -> Result<()> {
        let words = select_quotes(strip_directive(line))?;
        for (index, word) in words.iter().enumerate() {
            let style = if index % 2 == 0 { first } else { second };
            match style {
                'B' => self.bold(word),
                'I' => self.italics(word),
                'S' => self.small_caps(word),
                _ => self.plain_text(word),
            }
        }
        Ok(())
    }

    /// Break inside the open paragraph when there is one, so consecutive
    /// breaks accumulate instead of opening new paragraphs.
    fn line_break(&mut self) {
        let target = self.paragraph.unwrap_or_else(|| self.innermost());
        self.tree.append_element(target, "br", &[]);
    }

    fn indented_paragraph(&mut self, line: &str, lines: &mut Lines<'_>) -> Result<()> {
        let words = select_quotes(strip_directive(line))?;
        let Some(term) = words.first() else {
            return Err(ConvertError::Indent(format!("missing term in '{line}'")));
        };
        if let Some(width) = words.get(1) {
            self.indent = parse_indent(width)?;
        }
        self.paragraph = None;
        let parent = self.innermost();
        let list = self.tree.append_element(parent, "dl", &[]);
        self.paragraph = Some(self.definition_term(list, term.chars().count()));
        if !self.dispatch(term, lines)? {
            self.plain_text(term);
        }
        self.paragraph = Some(self.tree.append_element(list, "dd", &[("class", "indent")]));
        Ok(())
    }

    fn hanging_paragraph(&mut self, line: &str, lines: &mut Lines<'_>) -> Result<()> {
        let argument = strip_directive(line);
        if !argument.is_empty() {
            self.indent = parse_indent(argument)?;
        }
        self.paragraph = None;
        let parent = self.innermost();
        let list = self.tree.append_element(parent, "dl", &[]);
        let Some(term) = lines.next() else {
            return Err(ConvertError::Input(
                "end of input while reading the term line of .TP".to_string(),
            ));
        };
        let width = strip_directive(term).chars().count();
        self.paragraph = Some(self.definition_term(list, width));
        if !self.dispatch(term, lines)? {
            self.plain_text(term);
        }
        self.paragraph = Some(self.tree.append_element(list, "dd", &[("class", "indent")]));
        Ok(())
    }

    /// Terms narrower than the current indent threshold get the `short`
    /// class; the decision is made here and never revisited.
    fn definition_term(&mut self, list: NodeId, width: usize) -> NodeId {
        if width < self.indent {
            self.tree.append_element(list, "dt", &[("class", "short")])
        } else {
            self.tree.append_element(list, "dt", &[])
        }
    }

    fn verbatim_block(&mut self, lines: &mut Lines<'_>) -> Result<()> {
        let paragraph = self.ensure_paragraph();
        self.tree.append_element(paragraph, "br", &[]);
        loop {
            let Some(next) = lines.next() else {
                return Err(ConvertError::Input(
                    "end of input inside a .Vb block, no closing .Ve".to_string(),
                ));
            };
            if next.starts_with(".Ve") {
                break;
            }
            if !self.dispatch(next, lines)? {
                self.plain_text(next);
            }
            let paragraph = self.ensure_paragraph();
            self.tree.append_element(paragraph, "br", &[]);
        }
        Ok(())
    }

    fn link(&mut self, line: &str) -> Result<()> {
        let captures = LINK_RE
            .captures(line)
            .ok_or_else(|| ConvertError::Link(format!("cannot parse '{line}'")))?;
        let address = &captures[2];
        let label = captures.get(4).map_or("", |m| m.as_str());
        let trailing = captures.get(3).map_or("", |m| m.as_str().trim());
        let text = if !label.is_empty() {
            label
        } else if !trailing.is_empty() {
            trailing
        } else {
            address
        };
        let href = if &captures[1] == ".MTO" {
            format!("mailto:{address}")
        } else {
            address.to_string()
        };
        let paragraph = self.ensure_paragraph();
        let anchor = self.tree.append_element(paragraph, "a", &[("href", &href)]);
        self.tree.append_text(anchor, text);
        Ok(())
    }

    fn section_header(&mut self, line: &str) {
        self.paragraph = None;
        self.subsection = None;
        self.section = None;
        // A new section deactivates any open .RS region.
        self.margin = None;
        let text = line[4..].trim_matches(['"', '\n']);
        let heading = self.tree.append_element(self.body, "h2", &[]);
        self.tree.append_text(heading, text);
        self.section = Some(
            self.tree
                .append_element(self.body, "div", &[("class", "content")]),
        );
    }

    fn subsection_header(&mut self, line: &str) -> Result<()> {
        self.paragraph = None;
        self.subsection = None;
        let Some(section) = self.section else {
            return Err(ConvertError::Structure(
                "subsection header with no open section".to_string(),
            ));
        };
        let text = line[4..].trim_matches(['"', '\n']);
        let heading = self.tree.append_element(section, "h4", &[]);
        self.tree.append_text(heading, text);
        self.subsection = Some(
            self.tree
                .append_element(section, "div", &[("class", "content")]),
        );
        Ok(())
    }

    fn header_metadata(&mut self, line: &str) -> Result<()> {
        let words = select_quotes(strip_directive(line))?;
        let (Some(name), Some(section)) = (words.first(), words.get(1)) else {
            return Err(ConvertError::Header(format!(
                "expected page name and section in '{line}'"
            )));
        };
        let label = format!("{name}({section})");
        self.date = words.get(2).cloned().filter(|word| !word.is_empty());
        self.program = words.get(3).cloned().filter(|word| !word.is_empty());
        let manual_title = words.get(4).cloned().unwrap_or_default();
        self.title_row(&label, &manual_title, &label);
        self.page_label = Some(label);
        Ok(())
    }

    /// Three-column identity row, rendered under body at the top (from `.TH`)
    /// and again at the bottom after the input is exhausted.
    fn title_row(&mut self, left: &str, center: &str, right: &str) {
        let row = self.tree.append_element(self.body, "div", &[("class", "row")]);
        for (text, position) in [(left, "left"), (center, "center"), (right, "right")] {
            let class = format!("column {position}");
            let column = self.tree.append_element(row, "div", &[("class", &class)]);
            let paragraph = self.tree.append_element(column, "p", &[]);
            self.tree.append_text(paragraph, text);
        }
    }

    fn indent_start(&mut self, line: &str) {
        let argument = strip_directive(line).trim();
        self.margin = Some(if argument.is_empty() {
            "0.5".to_string()
        } else {
            argument.to_string()
        });
    }
}

/// Convert a full man-page source into the final HTML text.
pub fn convert(input: &str, title: &str) -> Result<String> {
    let mut converter = Converter::new(title);
    converter.translate(input)?;
    Ok(converter.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_longer_shared_prefixes() {
        assert_eq!(lookup(".PP").map(|(p, _)| p), Some(".PP"));
        assert_eq!(lookup(".P").map(|(p, _)| p), Some(".P"));
        assert_eq!(lookup(".TP 7").map(|(p, _)| p), Some(".TP "));
        assert_eq!(lookup(".TP").map(|(p, _)| p), Some(".TP"));
        assert_eq!(lookup(".BR grep 1").map(|(p, _)| p), Some(".BR "));
        assert_eq!(lookup(".B grep").map(|(p, _)| p), Some(".B "));
    }

    #[test]
    fn lookup_misses_plain_text_and_unknown_dot_lines() {
        assert!(lookup("plain text").is_none());
        assert!(lookup(".nf").is_none());
        assert!(lookup(".Ve").is_none());
    }

    #[test]
    fn strip_directive_trims_matched_prefix() {
        assert_eq!(strip_directive(".B  hello "), "hello");
        assert_eq!(strip_directive(".SM caps"), "caps");
        assert_eq!(strip_directive("no directive  "), "no directive");
        assert_eq!(strip_directive(".TP 7"), "7");
    }

    #[test]
    fn select_quotes_keeps_quoted_tokens_whole() {
        let words = select_quotes(r#"GREP 1 "2017-06-21" "GNU grep 3.1""#).expect("tokens");
        assert_eq!(
            words,
            vec![
                "GREP".to_string(),
                "1".to_string(),
                "\"2017-06-21\"".to_string(),
                "\"GNU grep 3.1\"".to_string(),
            ]
        );
    }

    #[test]
    fn select_quotes_rejects_unterminated_quote() {
        let err = select_quotes(r#"a "b c"#).expect_err("expected error");
        assert!(matches!(err, ConvertError::Input(_)));
    }

    #[test]
    fn symbol_substitution_handles_font_escapes() {
        let substituted = substitute_symbols(r"\fBbold\fR and \fIitalic\fP");
        assert_eq!(
            substituted,
            r#"<span class="bold">bold</span> and <span class="italic">italic</span>"#
        );
    }

    #[test]
    fn symbol_substitution_orders_dash_escapes() {
        assert_eq!(substitute_symbols(r"a\-\^\-b"), "a--b");
        assert_eq!(substitute_symbols(r"a\-b"), "a-b");
    }

    #[test]
    fn symbol_substitution_is_idempotent() {
        let once = substitute_symbols(r#"\*(lqquoted\*(rq \fBx\fR &quot;drop&quot; \(bu"#);
        let twice = substitute_symbols(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn serializer_escapes_text_and_skips_void_closing_tags() {
        let mut tree = HtmlTree::new();
        let root = tree.new_element("p", &[]);
        tree.append_text(root, "a < b & \"c\"");
        tree.append_element(root, "br", &[]);
        assert_eq!(
            tree.serialize(root),
            "<p>a &lt; b &amp; &quot;c&quot;<br></p>"
        );
    }

    #[test]
    fn bad_indent_argument_is_an_error() {
        let err = convert(".IP foo bar\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Indent(_)));

        let err = convert(".TP x\nterm\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Indent(_)));
    }

    #[test]
    fn subsection_without_section_is_an_error() {
        let err = convert(".SS Orphan\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Structure(_)));
    }

    #[test]
    fn truncated_lookahead_is_an_error() {
        let err = convert(".TP 4\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Input(_)));

        let err = convert(".Vb 2\nline\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Input(_)));
    }

    #[test]
    fn malformed_link_line_is_an_error() {
        let err = convert(".URL\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Link(_)));
    }

    #[test]
    fn header_without_section_number_is_an_error() {
        let err = convert(".TH GREP\n", "Man").expect_err("expected error");
        assert!(matches!(err, ConvertError::Header(_)));
    }
}
