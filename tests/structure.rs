use man2html::convert;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn assert_balanced(html: &str, tag: &str) {
    let opens = count(html, &format!("<{tag}>")) + count(html, &format!("<{tag} "));
    let closes = count(html, &format!("</{tag}>"));
    assert_eq!(opens, closes, "unbalanced <{tag}> in: {html}");
}

#[test]
fn output_has_exactly_one_root_element() {
    let source = "\
.TH BASH 1 \"2016-08-26\" \"GNU Bash 4.4\"
.SH NAME
grep, egrep, fgrep, rgrep
.SS Simple Commands
.br
A simple command
.TP
Interpret
.IP %% 7
A literal
";
    let html = convert(source, "Man").expect("convert");
    assert!(html.starts_with("<html lang=\"en\">"));
    assert!(html.ends_with("</html>"));
    assert_eq!(count(&html, "<html"), 1);
}

#[test]
fn output_markup_is_balanced() {
    let source = "\
.TH GREP 1 \"2017-06-21\" \"GNU grep 3.1\" \"User Commands\"
.SH NAME
grep - print lines
.SH OPTIONS
.TP 7
-x
Select lines.
.IP bullet 4
Item body.
.SS Matching Control
.Vb 2
pattern one
pattern two
.Ve
.URL http://example.com \"example\"
";
    let html = convert(source, "Man").expect("convert");
    for tag in ["html", "head", "body", "div", "p", "dl", "dt", "dd", "h2", "h4", "a", "small"] {
        assert_balanced(&html, tag);
    }
}

#[test]
fn structured_document_matches_expected_layout() {
    let source = "\
.TH BASH 1 \"2016-08-26\" \"GNU Bash 4.4\"
.SH NAME
grep, egrep, fgrep, rgrep
.SS Simple Commands
.br
A simple command
.TP 7
Interpret
.IP %% 7
A literal
";
    let html = convert(source, "Man").expect("convert");

    // Top row carries the page label with an empty manual title.
    assert!(html.contains(
        "<div class=\"row\">\
         <div class=\"column left\"><p>BASH(1)</p></div>\
         <div class=\"column center\"><p></p></div>\
         <div class=\"column right\"><p>BASH(1)</p></div>\
         </div>"
    ));

    // The subsection holds the break, the paragraph, and both definitions.
    assert!(html.contains("<h4>Simple Commands</h4>"));
    assert!(html.contains("<br><p>\nA simple command</p>"));
    assert!(html.contains("<dl><dt>\nInterpret</dt><dd class=\"indent\"></dd></dl>"));
    assert!(html.contains("<dl><dt class=\"short\">\n%%</dt><dd class=\"indent\">\nA literal</dd></dl>"));

    // Bottom row uses program and date captured from the header.
    assert!(html.contains(
        "<div class=\"column left\"><p>GNU Bash 4.4</p></div>\
         <div class=\"column center\"><p>2016-08-26</p></div>\
         <div class=\"column right\"><p>BASH(1)</p></div>"
    ));
}
