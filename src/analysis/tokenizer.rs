use crate::analysis::token::Token;
use unicode_segmentation::UnicodeSegmentation;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;
}

/// Standard Unicode word-boundary tokenizer
#[derive(Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = 0u32;

        for (offset, word) in text.unicode_word_indices() {
            if word.len() <= self.max_token_length {
                tokens.push(Token::new(word.to_string(), position, offset));
                position += 1;
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }
}

/// Emits the whole input as a single token. Used for exact-value fields
/// (user names, categorical values, discretized dates).
#[derive(Clone, Default)]
pub struct KeywordTokenizer;

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let offset = text.len() - text.trim_start().len();
        vec![Token::new(trimmed.to_string(), 0, offset)]
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_splits_on_word_boundaries() {
        let tokens = StandardTokenizer::default().tokenize("Hibernate Validator, v6!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Hibernate", "Validator", "v6"]);
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].offset, 10);
    }

    #[test]
    fn keyword_emits_single_token() {
        let tokens = KeywordTokenizer.tokenize("  thjanssen123 ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "thjanssen123");
        assert_eq!(tokens[0].offset, 2);
    }

    #[test]
    fn keyword_skips_blank_input() {
        assert!(KeywordTokenizer.tokenize("   ").is_empty());
    }
}
