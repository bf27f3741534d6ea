/// Literal delimiter line for the preserved header region.
pub const HEADER_DELIMITER: &str = "---";

/// Splits `text` into an optional header and the body that follows it.
///
/// A header exists only when the very first line is `---` and a later line
/// is also `---`. The returned header includes the closing delimiter line and
/// its line ending, so `header + body == text` always holds.
pub fn split_header(text: &str) -> (Option<&str>, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text);
    };
    if !is_delimiter(first) || !first.ends_with('\n') {
        return (None, text);
    }

    let mut end = first.len();
    for line in lines {
        end += line.len();
        if is_delimiter(line) {
            return (Some(&text[..end]), &text[end..]);
        }
    }

    (None, text)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == HEADER_DELIMITER
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_with_closing_line() {
        let (header, body) = split_header("---\ntitle: x\n---\nBody text");
        assert_eq!(header, Some("---\ntitle: x\n---\n"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn header_closing_line_at_end_of_text() {
        let (header, body) = split_header("---\ntitle: x\n---");
        assert_eq!(header, Some("---\ntitle: x\n---"));
        assert_eq!(body, "");
    }

    #[test]
    fn crlf_delimiters() {
        let (header, body) = split_header("---\r\na: 1\r\n---\r\nrest");
        assert_eq!(header, Some("---\r\na: 1\r\n---\r\n"));
        assert_eq!(body, "rest");
    }

    #[test]
    fn unclosed_header_is_body() {
        let text = "---\ntitle: x\nno closing line";
        assert_eq!(split_header(text), (None, text));
    }

    #[test]
    fn delimiter_must_be_at_offset_zero() {
        let text = "\n---\ntitle: x\n---\n";
        assert_eq!(split_header(text), (None, text));
    }

    #[test]
    fn thematic_break_later_is_not_a_header() {
        let text = "Intro\n\n---\n\nMore";
        assert_eq!(split_header(text), (None, text));
    }
}
