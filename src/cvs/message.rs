//! Commit message accumulation and separator disambiguation.
//!
//! A line of dashes or equals signs is either a section boundary or literal
//! message text. Separators are held back until the next line decides: a
//! boundary drops them, message content folds them into the message.

/// Pending separator lines of one kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeparatorBuffer {
    pending: Option<String>,
}

impl SeparatorBuffer {
    pub fn push(&mut self, line: &str) {
        match &mut self.pending {
            Some(text) => {
                text.push('\n');
                text.push_str(line);
            }
            None => self.pending = Some(line.to_string()),
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Append the pending text to `message` (newline-terminated) and clear.
    fn fold_into(&mut self, message: &mut String) {
        if let Some(text) = self.pending.take() {
            message.push_str(&text);
            message.push('\n');
        }
    }
}

/// Append a blank line, unless the message has not started yet.
pub fn append_blank(message: &mut String) {
    if !message.is_empty() {
        message.push('\n');
    }
}

/// Append a content line, first folding any pending separators into the
/// message since they turned out to be text.
pub fn append_content(
    message: &mut String,
    rev_separator: &mut SeparatorBuffer,
    file_separator: &mut SeparatorBuffer,
    line: &str,
) {
    rev_separator.fold_into(message);
    file_separator.fold_into(message);
    message.push_str(line);
    message.push('\n');
}

/// Drop the single trailing character left by the last append.
pub fn trim_final(message: &mut String) {
    message.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_before_content_is_skipped() {
        let mut message = String::new();
        append_blank(&mut message);
        assert_eq!(message, "");

        message.push_str("first\n");
        append_blank(&mut message);
        assert_eq!(message, "first\n\n");
    }

    #[test]
    fn test_content_folds_pending_separators() {
        let mut message = String::new();
        let mut rev = SeparatorBuffer::default();
        let mut file = SeparatorBuffer::default();

        append_content(&mut message, &mut rev, &mut file, "intro");
        rev.push("-----");
        file.push("=====");
        append_content(&mut message, &mut rev, &mut file, "after");

        assert_eq!(message, "intro\n-----\n=====\nafter\n");
        assert_eq!(rev, SeparatorBuffer::default());
        assert_eq!(file, SeparatorBuffer::default());
    }

    #[test]
    fn test_repeated_separators_keep_each_line() {
        let mut message = String::new();
        let mut rev = SeparatorBuffer::default();
        let mut file = SeparatorBuffer::default();

        rev.push("---");
        rev.push("----");
        append_content(&mut message, &mut rev, &mut file, "x");

        assert_eq!(message, "---\n----\nx\n");
    }

    #[test]
    fn test_trim_final_guards_empty_message() {
        let mut message = String::new();
        trim_final(&mut message);
        assert_eq!(message, "");

        let mut message = "fix bug\n".to_string();
        trim_final(&mut message);
        assert_eq!(message, "fix bug");
    }
}
