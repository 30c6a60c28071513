//! Creation Form Validation
//!
//! Field rules checked on blur. Results only drive the error text under a
//! field; the native `minlength`/`maxlength` attributes are what actually
//! gate submission.

use crate::error::ValidationError;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 50;
pub const BODY_MIN_LEN: usize = 10;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = char_len(title);
    if len < TITLE_MIN_LEN {
        Err(ValidationError::TitleTooShort { min: TITLE_MIN_LEN })
    } else if len > TITLE_MAX_LEN {
        Err(ValidationError::TitleTooLong { max: TITLE_MAX_LEN })
    } else {
        Ok(())
    }
}

pub fn validate_body(body: &str) -> Result<(), ValidationError> {
    if char_len(body) < BODY_MIN_LEN {
        Err(ValidationError::BodyTooShort { min: BODY_MIN_LEN })
    } else {
        Ok(())
    }
}

/// Error text shown under a field; empty when valid
pub fn feedback(result: Result<(), ValidationError>) -> String {
    result.err().map(|e| e.to_string()).unwrap_or_default()
}

/// Characters left before the title limit
pub fn remaining_title_chars(title: &str) -> usize {
    TITLE_MAX_LEN.saturating_sub(char_len(title))
}
