//! Length-prefixed strings.
//!
//! Minecraft writes strings in Java's "modified UTF-8", which differs from
//! UTF-8 for NUL and for characters outside the Basic Multilingual Plane.
//! Strings are decoded as modified UTF-8 first, which also accepts any valid
//! UTF-8 unchanged. Data that is neither is handled by a [`TextPolicy`].

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::input::Cursor;

/// What to do with string data that is not valid text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Replace invalid sequences with U+FFFD REPLACEMENT CHARACTER.
    #[default]
    Lossy,
    /// Fail with [`InvalidText`][crate::error::ErrorKind::InvalidText].
    Strict,
}

/// Decode string bytes according to `policy`.
pub fn decode_text(data: &[u8], policy: TextPolicy) -> Result<Cow<'_, str>> {
    match cesu8::from_java_cesu8(data) {
        Ok(s) => Ok(s),
        Err(_) => match policy {
            TextPolicy::Lossy => Ok(String::from_utf8_lossy(data)),
            TextPolicy::Strict => Err(Error::invalid_text(data)),
        },
    }
}

/// Read a string prefixed by its `u16` byte length, in the cursor's byte
/// order.
pub fn read_string(input: &mut Cursor<'_>, policy: TextPolicy) -> Result<String> {
    let start = input.position();
    let len = input.read_u16()? as usize;
    let data = input.consume(len)?;

    decode_text(data, policy)
        .map(Cow::into_owned)
        .map_err(|e| e.at(start))
}
