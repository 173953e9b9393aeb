#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryReason {
    ControlCharacters,
    InvalidUtf8,
}

impl std::fmt::Display for BinaryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryReason::ControlCharacters => write!(f, "contains control characters"),
            BinaryReason::InvalidUtf8 => write!(f, "not valid UTF-8, use --binary to decode lossily"),
        }
    }
}

pub fn is_binary(text: &str) -> bool {
    text.chars()
        .any(|ch| ch.is_control() && !matches!(ch, '\r' | '\n' | '\t'))
}

/// With `allow_binary` the bytes are always decoded, lossily if need be.
pub fn decode_text(bytes: &[u8], allow_binary: bool) -> Result<String, BinaryReason> {
    match std::str::from_utf8(bytes) {
        Ok(text) if allow_binary || !is_binary(text) => Ok(text.to_string()),
        Ok(_) => Err(BinaryReason::ControlCharacters),
        Err(_) if allow_binary => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Err(_) => Err(BinaryReason::InvalidUtf8),
    }
}
