//! Line splitting that keeps terminators intact.

/// One physical line with its terminator split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// `"\n"`, `"\r\n"` or `""` for a final unterminated line
    pub ending: &'a str,
}

impl<'a> Line<'a> {
    fn from_raw(raw: &'a str) -> Self {
        let (text, ending) = if let Some(stripped) = raw.strip_suffix("\r\n") {
            (stripped, "\r\n")
        } else if let Some(stripped) = raw.strip_suffix('\n') {
            (stripped, "\n")
        } else {
            (raw, "")
        };
        Self { text, ending }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split `content` into lines, keeping each terminator.
///
/// Concatenating `text + ending` for every line reproduces the input.
pub fn split_lines(content: &str) -> Vec<Line<'_>> {
    content.split_inclusive('\n').map(Line::from_raw).collect()
}

/// The line terminator a file predominantly uses.
pub fn dominant_ending(content: &str) -> &'static str {
    let crlf = content.matches("\r\n").count();
    let lf = content.matches('\n').count();
    if crlf > 0 && crlf * 2 >= lf { "\r\n" } else { "\n" }
}

/// Byte offset where trailing spaces and tabs start, if the line has any.
pub fn trailing_whitespace_start(text: &str) -> Option<usize> {
    let trimmed = text.trim_end_matches([' ', '\t']);
    (trimmed.len() < text.len()).then_some(trimmed.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_round_trips() {
        let content = "a\r\nb\n\nc";
        let lines = split_lines(content);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], Line { text: "a", ending: "\r\n" });
        assert_eq!(lines[3], Line { text: "c", ending: "" });
        let rebuilt: String = lines.iter().map(|l| format!("{}{}", l.text, l.ending)).collect();
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_trailing_whitespace_start() {
        assert_eq!(trailing_whitespace_start("Line 1   "), Some(6));
        assert_eq!(trailing_whitespace_start("Line 2\t"), Some(6));
        assert_eq!(trailing_whitespace_start("clean"), None);
        assert_eq!(trailing_whitespace_start("→  "), Some(3));
    }

    #[test]
    fn test_dominant_ending() {
        assert_eq!(dominant_ending("a\r\nb\r\n"), "\r\n");
        assert_eq!(dominant_ending("a\nb\n"), "\n");
        assert_eq!(dominant_ending("single line"), "\n");
    }
}
