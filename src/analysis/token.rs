use serde::{Serialize, Deserialize};

/// Normalized token emitted by the analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: u32,     // Position within the field (for phrase-style checks)
    pub offset: usize,     // Byte offset in the original text
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        Token {
            text,
            position,
            offset,
        }
    }
}
