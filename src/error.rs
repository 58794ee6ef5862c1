//! Contains the Error and Result type used by the decoder.

/// Decoding failure. Every error aborts the decode; no partial value is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
    offset: Option<usize>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Fewer bytes remained than a primitive, string, array or list required.
    Truncated,

    /// A list or array declared a negative element count.
    NegativeLength(i32),

    /// A list declared element type `End` with a non-zero length.
    InvalidElementType,

    /// A tag byte outside of the valid range of 0 to 12.
    UnknownTagType(u8),

    /// Lists and compounds were nested deeper than the configured maximum,
    /// which is contained.
    TooDeeplyNested(usize),

    /// String data was not valid UTF-8 or Java CESU-8. Only produced with
    /// [`TextPolicy::Strict`][crate::TextPolicy::Strict]. Contained bytes are
    /// the invalid data.
    InvalidText(Vec<u8>),

    /// Compressed input could not be inflated.
    Decompress,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset into the input where the error was detected, if known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub(crate) fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind,
            offset: None,
        }
    }

    pub(crate) fn truncated(needed: usize, remaining: usize) -> Self {
        Self::new(
            ErrorKind::Truncated,
            format!(
                "eof: needed {} bytes but only {} remain",
                needed, remaining
            ),
        )
    }

    pub(crate) fn negative_length(len: i32) -> Self {
        Self::new(
            ErrorKind::NegativeLength(len),
            format!("negative length: {}", len),
        )
    }

    pub(crate) fn invalid_element_type(len: i32) -> Self {
        Self::new(
            ErrorKind::InvalidElementType,
            format!("list of type 'end' with non-zero length: {}", len),
        )
    }

    pub(crate) fn unknown_tag(tag: u8) -> Self {
        Self::new(
            ErrorKind::UnknownTagType(tag),
            format!("invalid nbt tag value: {}", tag),
        )
    }

    pub(crate) fn gzip_magic() -> Self {
        Self::new(
            ErrorKind::UnknownTagType(0x1f),
            "invalid nbt tag value: 31, input looks gzip compressed, decompress it first",
        )
    }

    pub(crate) fn too_deep(max: usize) -> Self {
        Self::new(
            ErrorKind::TooDeeplyNested(max),
            format!("nbt nested deeper than the maximum depth of {}", max),
        )
    }

    pub(crate) fn invalid_text(data: &[u8]) -> Self {
        Self::new(
            ErrorKind::InvalidText(data.to_vec()),
            format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
        )
    }

    pub(crate) fn decompress(msg: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Decompress, format!("decompression failed: {}", msg))
    }

    /// Whether this error was caused by running out of input.
    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::Truncated)
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} (at byte {})", self.msg, offset),
            None => f.write_str(&self.msg),
        }
    }
}
