use std::fmt;

/// Counters shown in the status bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl DocumentStats {
    pub fn of(text: &str) -> Self {
        let lines = if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        };

        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            lines,
        }
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chars: {}  Words: {}  Lines: {}",
            self.chars, self.words, self.lines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        assert_eq!(DocumentStats::of(""), DocumentStats::default());
    }

    #[test]
    fn blank_text_has_no_words() {
        let stats = DocumentStats::of("  \n\t ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.chars, 5);
    }

    #[test]
    fn counts_words_and_lines() {
        let stats = DocumentStats::of("one two\r\nthree\n");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.chars, 15);
    }

    #[test]
    fn chars_not_bytes() {
        assert_eq!(DocumentStats::of("héllo").chars, 5);
    }

    #[test]
    fn display() {
        let stats = DocumentStats::of("a b\nc");
        assert_eq!(stats.to_string(), "Chars: 5  Words: 3  Lines: 2");
    }
}
