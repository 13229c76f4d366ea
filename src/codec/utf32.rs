//! UTF-32: a scalar value is already its own code unit. Provided for symmetry with
//! [`super::utf8`] and [`super::utf16`], and used by collator/search code that wants a flat
//! `&[u32]` view without re-deriving validity checks.

use super::is_valid_scalar;
use crate::error::{ErrorKind, TextError};

pub fn encode(scalar: char) -> u32 {
    scalar as u32
}

pub fn decode(unit: u32) -> Result<char, TextError> {
    if !is_valid_scalar(unit) {
        return Err(TextError::new(
            ErrorKind::InvalidScalarValue,
            "UTF32_INVALID_SCALAR",
            format!("U+{unit:04X} is not a valid scalar value"),
        ));
    }
    char::from_u32(unit).ok_or_else(|| {
        TextError::new(
            ErrorKind::InvalidScalarValue,
            "UTF32_INVALID_SCALAR",
            format!("U+{unit:04X} is not a valid scalar value"),
        )
    })
}
