use crate::domain::models::CopyStats;

const TOKEN_PUNCTUATION: [char; 8] = [';', '{', '}', '(', ')', '[', ']', ','];

fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub fn count_chars(content: &str) -> usize {
    content.chars().count()
}

pub fn count_lines(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    content.matches('\n').count() + 1
}

pub fn count_words(content: &str) -> usize {
    content
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// Coarse token estimate: one per word plus one per bracket, brace, paren,
/// semicolon or comma.
pub fn estimate_tokens(content: &str) -> usize {
    let punctuation = content
        .chars()
        .filter(|c| TOKEN_PUNCTUATION.contains(c))
        .count();
    count_words(content) + punctuation
}

impl CopyStats {
    pub fn record(&mut self, content: &str) {
        self.chars += count_chars(content);
        self.lines += count_lines(content);
        self.words += count_words(content);
        self.tokens += estimate_tokens(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("one\ntwo\nthree"), 3);
        assert_eq!(count_words("  spaced\t\tout  \r\n"), 2);
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("x"), 1);
        assert_eq!(count_lines("hello\nworld"), 2);
        assert_eq!(count_lines("trailing\n"), 2);
    }

    #[test]
    fn test_count_chars_counts_scalar_values() {
        assert_eq!(count_chars("abc"), 3);
        assert_eq!(count_chars("héllo"), 5);
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("foo(bar, baz);"), 6);
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("fn main() {}"), 7);
        assert_eq!(estimate_tokens("[[]]"), 5);
    }

    #[test]
    fn test_record_accumulates() {
        let mut stats = CopyStats::default();
        stats.record("hello\nworld");
        stats.record("x");

        assert_eq!(stats.chars, 12);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.words, 3);
        assert_eq!(stats.tokens, 3);
        assert_eq!(stats.file_count, 0);
    }
}
