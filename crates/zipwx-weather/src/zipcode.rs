//! Postal code validation.
//!
//! `validate_input` runs on every keystroke; `ZipCode` can only be built from
//! text that passes it.

use serde::{Deserialize, Serialize};

/// Number of digits in a postal code.
pub const ZIP_LEN: usize = 5;

/// Advisory shown under the input while the text is not a valid postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMessage {
    TooFew,
    TooMany,
    DigitsOnly,
}

/// Outcome of validating the current input text.
///
/// Checks are independent, so several messages can be present at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputValidation {
    pub messages: Vec<InputMessage>,
    pub submit_enabled: bool,
}

impl InputValidation {
    pub fn is_valid(&self) -> bool {
        self.submit_enabled
    }
}

/// Validate postal code input as typed.
///
/// Empty input produces no messages but keeps submit disabled.
pub fn validate_input(text: &str) -> InputValidation {
    let len = text.chars().count();
    let digits_only = text.chars().all(|c| c.is_ascii_digit());

    let mut messages = Vec::new();
    if len > 0 {
        if len < ZIP_LEN {
            messages.push(InputMessage::TooFew);
        }
        if len > ZIP_LEN {
            messages.push(InputMessage::TooMany);
        }
        if !digits_only {
            messages.push(InputMessage::DigitsOnly);
        }
    }

    InputValidation {
        messages,
        submit_enabled: len == ZIP_LEN && digits_only,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid postal code {input:?}: {messages:?}")]
pub struct ZipCodeError {
    pub input: String,
    pub messages: Vec<InputMessage>,
}

/// A 5-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(text: &str) -> Result<Self, ZipCodeError> {
        let validation = validate_input(text);
        if validation.submit_enabled {
            Ok(Self(text.to_string()))
        } else {
            Err(ZipCodeError {
                input: text.to_string(),
                messages: validation.messages,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ZipCode {
    type Error = ZipCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_characters() {
        let v = validate_input("1234");
        assert_eq!(v.messages, vec![InputMessage::TooFew]);
        assert!(!v.submit_enabled);
    }

    #[test]
    fn too_many_characters() {
        let v = validate_input("123456");
        assert_eq!(v.messages, vec![InputMessage::TooMany]);
        assert!(!v.submit_enabled);
    }

    #[test]
    fn digits_only() {
        let v = validate_input("12a45");
        assert_eq!(v.messages, vec![InputMessage::DigitsOnly]);
        assert!(!v.submit_enabled);
    }

    #[test]
    fn valid_code_enables_submit() {
        let v = validate_input("12345");
        assert!(v.messages.is_empty());
        assert!(v.submit_enabled);
    }

    #[test]
    fn violations_are_additive() {
        let v = validate_input("1a");
        assert_eq!(v.messages, vec![InputMessage::TooFew, InputMessage::DigitsOnly]);

        let v = validate_input("1234567x");
        assert_eq!(v.messages, vec![InputMessage::TooMany, InputMessage::DigitsOnly]);
    }

    #[test]
    fn empty_input_is_silent_but_disabled() {
        let v = validate_input("");
        assert!(v.messages.is_empty());
        assert!(!v.submit_enabled);
    }

    #[test]
    fn whitespace_and_signs_are_not_digits() {
        assert!(!validate_input(" 1234").submit_enabled);
        assert!(!validate_input("1.234").submit_enabled);
        assert!(!validate_input("-1234").submit_enabled);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let v = validate_input("1234ä");
        assert_eq!(v.messages, vec![InputMessage::DigitsOnly]);
    }

    #[test]
    fn zipcode_parse() {
        assert_eq!(ZipCode::parse("10115").unwrap().as_str(), "10115");
        let err = ZipCode::parse("1011").unwrap_err();
        assert_eq!(err.messages, vec![InputMessage::TooFew]);
    }

    #[test]
    fn zipcode_serde_rejects_invalid() {
        let zip: ZipCode = serde_json::from_str("\"80331\"").unwrap();
        assert_eq!(zip.to_string(), "80331");
        assert_eq!(serde_json::to_string(&zip).unwrap(), "\"80331\"");
        assert!(serde_json::from_str::<ZipCode>("\"8033x\"").is_err());
    }
}
