//! nbtree decodes NBT data from *Minecraft: Java Edition* (and the
//! little-endian variant used elsewhere) into an owned tree of [`Value`]s.
//!
//! * For the decoder and its options see [`de`].
//! * For the value tree see [`Value`] and [`Compound`].
//! * For inflating gzip/zlib input before decoding see [`compress`].
//!
//! ```toml
//! [dependencies]
//! nbtree = "0.1"
//! ```
//!
//! # Quick example
//!
//! This example reads a player dat file, which is gzip compressed, and prints
//! the player's data version.
//!
//!```no_run
//! use nbtree::error::Result;
//! use nbtree::{compress, DeOpts, Value};
//!
//! fn main() -> Result<()> {
//!     let args: Vec<_> = std::env::args().skip(1).collect();
//!     let data = std::fs::read(&args[0]).expect("could not read file");
//!
//!     let player = compress::from_compressed_bytes(&data, DeOpts::new())?;
//!
//!     if let Some(Value::Int(version)) = player.get("DataVersion") {
//!         println!("data version: {}", version);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Untrusted input
//!
//! The decoder never reads past the end of the input, never allocates more
//! elements than the remaining input could possibly hold, and limits nesting
//! to [`DeOpts::max_depth`] levels. Malformed input always results in an
//! [`Error`][error::Error], never a panic.

pub mod compress;
pub mod de;
pub mod error;
pub mod input;
pub mod text;

mod value;

pub use de::{from_bytes, from_bytes_named, from_bytes_with_opts, DeOpts};
pub use input::Endian;
pub use text::TextPolicy;
pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all elements share one tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl Tag {
    /// The fewest bytes a payload of this tag can occupy on the wire. Used to
    /// reject element counts the remaining input could never satisfy.
    pub(crate) fn min_payload_size(self) -> usize {
        match self {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 4,
            Tag::Long => 8,
            Tag::Float => 4,
            Tag::Double => 8,
            // i32 length prefix.
            Tag::ByteArray | Tag::IntArray | Tag::LongArray => 4,
            // u16 length prefix.
            Tag::String => 2,
            // element tag and i32 length.
            Tag::List => 5,
            // the terminating end tag.
            Tag::Compound => 1,
        }
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually. The tags will very rarely change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

/// Decode a complete NBT document with the default options: big-endian,
/// lossy strings, and a nesting limit of [`de::DEFAULT_MAX_DEPTH`].
///
/// The name of the root tag is discarded, use [`from_bytes_named`] to keep
/// it.
///
/// ```
/// use nbtree::Value;
///
/// // An empty, unnamed root compound.
/// let v = nbtree::parse(&[10, 0, 0, 0]).unwrap();
/// assert_eq!(v, Value::Compound(Default::default()));
/// ```
pub fn parse(raw: &[u8]) -> error::Result<Value> {
    from_bytes(raw)
}
