//! This module contains the decoder, which turns a complete NBT document held
//! in memory into an owned [`Value`] tree.
//!
//! Decoding is a single pass over the input. Each tag's payload is decoded
//! recursively: compounds and lists decode their children before returning.
//! The whole tree is built before anything is returned, and a failure
//! anywhere discards everything decoded so far.
//!
//! # Options
//!
//! [`DeOpts`] configures the decoder:
//!
//! | Option | Default | Meaning |
//! | ------ | ------- | ------- |
//! | [`endian`][DeOpts::endian] | [`Endian::Big`] | byte order of every multi-byte field, including string lengths |
//! | [`max_depth`][DeOpts::max_depth] | [`DEFAULT_MAX_DEPTH`] | how deeply lists and compounds may nest |
//! | [`text_policy`][DeOpts::text_policy] | [`TextPolicy::Lossy`] | what to do with strings that are not valid text |
//!
//! # Quirks
//!
//! Some behaviour which may not be obvious:
//! * If a compound contains the same name twice, the later value wins. The
//!   entry keeps the position of the first occurrence. Data written by
//!   existing tools may rely on this, so it is not an error.
//! * A list of element type `End` is accepted only when empty. Some old
//!   chunks store empty lists this way.
//! * A document whose root tag is `End` has no name and decodes to
//!   [`Value::End`].
//! * Bytes after the end of the root tag are ignored.
//!
//! ```
//! use nbtree::{DeOpts, Endian, Value};
//!
//! // A little-endian root compound named "hi" holding one short.
//! let input = [10, 2, 0, b'h', b'i', 2, 1, 0, b's', 0x39, 0x05, 0];
//! let (name, v) = nbtree::from_bytes_named(&input, DeOpts::new().endian(Endian::Little)).unwrap();
//!
//! assert_eq!(name, "hi");
//! assert_eq!(v.get("s"), Some(&Value::Short(0x0539)));
//! ```

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::input::{Cursor, Endian};
use crate::text::{read_string, TextPolicy};
use crate::{Compound, Tag, Value};

/// Default limit on nesting of lists and compounds. This matches the limit
/// Minecraft itself applies when reading NBT.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for customizing decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeOpts {
    pub(crate) endian: Endian,
    pub(crate) max_depth: usize,
    pub(crate) text_policy: TextPolicy,
}

impl DeOpts {
    /// Create new options. This object follows a builder pattern.
    pub fn new() -> Self {
        Self {
            endian: Endian::Big,
            max_depth: DEFAULT_MAX_DEPTH,
            text_policy: TextPolicy::Lossy,
        }
    }

    /// Byte order of the document. Java Edition data is big-endian.
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Maximum nesting of lists and compounds. A root compound is depth 1, so
    /// a limit of 0 rejects any document whose root is a list or compound.
    ///
    /// Nesting is decoded recursively, and every level costs stack. Debug
    /// builds use roughly 2 KiB per level, release builds far less. The
    /// default fits comfortably in the 2 MiB stack of a spawned thread;
    /// limits above about 800 can overflow such a thread in a debug build.
    /// Raise the limit only on a thread with a correspondingly larger stack.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// How to treat string data that is not valid text.
    pub fn text_policy(mut self, text_policy: TextPolicy) -> Self {
        self.text_policy = text_policy;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes tag payloads from a [`Cursor`].
///
/// Most users want [`from_bytes`] instead. The decoder is exposed for
/// decoding payloads that are not wrapped in a document, such as the body of
/// a network packet where the tag type is known ahead of time.
pub struct Decoder<'a> {
    input: Cursor<'a>,
    opts: DeOpts,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8], opts: DeOpts) -> Self {
        Self {
            input: Cursor::new(input, opts.endian),
            opts,
            depth: 0,
        }
    }

    /// The underlying cursor, positioned after everything decoded so far.
    pub fn input(&self) -> &Cursor<'a> {
        &self.input
    }

    /// Read a tag byte.
    pub fn consume_tag(&mut self) -> Result<Tag> {
        let offset = self.input.position();
        let tag = self.input.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::unknown_tag(tag).at(offset))
    }

    /// Read a tag byte, then decode the payload of that tag.
    pub fn decode_prefixed_type(&mut self) -> Result<Value> {
        let tag = self.consume_tag()?;
        self.decode_known_type(tag)
    }

    /// Decode a payload whose tag is already known. `End` has no payload and
    /// consumes nothing.
    pub fn decode_known_type(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::List => self.nested(Self::decode_list)?,
            Tag::Compound => self.nested(Self::decode_compound)?,
            Tag::End => Value::End,
            Tag::Byte => Value::Byte(self.input.read_i8()?),
            Tag::Short => Value::Short(self.input.read_i16()?),
            Tag::Int => Value::Int(self.input.read_i32()?),
            Tag::Long => Value::Long(self.input.read_i64()?),
            Tag::Float => Value::Float(self.input.read_f32()?),
            Tag::Double => Value::Double(self.input.read_f64()?),
            Tag::String => self.decode_string()?,
            Tag::ByteArray => self.decode_byte_array()?,
            Tag::IntArray => self.decode_int_array()?,
            Tag::LongArray => self.decode_long_array()?,
        })
    }

    fn nested(&mut self, decode: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        self.enter()?;
        let value = decode(self);
        self.depth -= 1;
        value
    }

    // The helpers below are kept out of decode_known_type so the recursive
    // path has a small stack frame.

    #[inline(never)]
    fn decode_string(&mut self) -> Result<Value> {
        read_string(&mut self.input, self.opts.text_policy).map(Value::String)
    }

    #[inline(never)]
    fn decode_byte_array(&mut self) -> Result<Value> {
        let len = self.consume_len(Tag::Byte)?;
        let bs = self.input.consume(len)?;
        Ok(Value::ByteArray(bs.iter().map(|&b| b as i8).collect()))
    }

    #[inline(never)]
    fn decode_int_array(&mut self) -> Result<Value> {
        let len = self.consume_len(Tag::Int)?;
        let mut data = vec![0; len];
        self.input.read_i32_into(&mut data)?;
        Ok(Value::IntArray(data))
    }

    #[inline(never)]
    fn decode_long_array(&mut self) -> Result<Value> {
        let len = self.consume_len(Tag::Long)?;
        let mut data = vec![0; len];
        self.input.read_i64_into(&mut data)?;
        Ok(Value::LongArray(data))
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            return Err(Error::too_deep(self.opts.max_depth).at(self.input.position()));
        }
        self.depth += 1;
        Ok(())
    }

    /// Read an `i32` element count and check that the remaining input could
    /// hold that many `element` payloads. This keeps a hostile count from
    /// causing a huge allocation.
    fn consume_len(&mut self, element: Tag) -> Result<usize> {
        let offset = self.input.position();
        let len = self.input.read_i32()?;
        let len: usize = len
            .try_into()
            .map_err(|_| Error::negative_length(len).at(offset))?;

        // Can overflow on 32-bit targets.
        let needed = len.saturating_mul(element.min_payload_size());
        if needed > self.input.remaining() {
            return Err(Error::truncated(needed, self.input.remaining()).at(self.input.position()));
        }
        Ok(len)
    }

    fn decode_list(&mut self) -> Result<Value> {
        let offset = self.input.position();
        let element_tag = self.consume_tag()?;
        let len = self.consume_len(element_tag)?;

        // End values have no payload, so a long list of them would cost no
        // input but plenty of memory.
        if element_tag == Tag::End && len != 0 {
            return Err(Error::invalid_element_type(len as i32).at(offset));
        }

        trace!("list of {} {:?} at byte {}", len, element_tag, offset);

        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.decode_known_type(element_tag)?);
        }

        Ok(Value::List(element_tag, items))
    }

    fn decode_compound(&mut self) -> Result<Value> {
        trace!("compound at byte {}", self.input.position());

        let mut entries = Compound::new();
        loop {
            let tag = self.consume_tag()?;
            if tag == Tag::End {
                break;
            }

            let name = read_string(&mut self.input, self.opts.text_policy)?;
            let value = self.decode_known_type(tag)?;
            if let Some(previous) = entries.insert(name, value) {
                trace!("duplicate compound entry replaced {:?}", previous.tag());
            }
        }

        Ok(Value::Compound(entries))
    }

    /// Decode a whole document: the root tag, its name and its payload.
    pub fn decode_document(&mut self) -> Result<(String, Value)> {
        let start = self.input.position();
        let root = match self.input.read_u8()? {
            // Reading gzip data by mistake is an easy error, give a hint.
            0x1f if start == 0 => return Err(Error::gzip_magic().at(start)),
            tag => Tag::try_from(tag).map_err(|_| Error::unknown_tag(tag).at(start))?,
        };

        if root == Tag::End {
            debug!("document is a lone end tag");
            return Ok((String::new(), Value::End));
        }

        let name = read_string(&mut self.input, self.opts.text_policy)?;
        debug!("root {:?} named {:?}", root, name);

        let value = self.decode_known_type(root)?;

        if self.input.remaining() > 0 {
            debug!(
                "ignoring {} bytes after the root tag",
                self.input.remaining()
            );
        }

        Ok((name, value))
    }
}

/// Decode a document with the default options. The root name is discarded.
///
/// ```
/// use nbtree::{Tag, Value};
///
/// // An unnamed root list of two bytes.
/// let input = [9, 0, 0, 1, 0, 0, 0, 2, 7, 8];
/// let v = nbtree::from_bytes(&input).unwrap();
///
/// assert_eq!(v, Value::List(Tag::Byte, vec![Value::Byte(7), Value::Byte(8)]));
/// ```
pub fn from_bytes(input: &[u8]) -> Result<Value> {
    from_bytes_with_opts(input, DeOpts::new())
}

/// Decode a document with the given options. The root name is discarded.
pub fn from_bytes_with_opts(input: &[u8], opts: DeOpts) -> Result<Value> {
    from_bytes_named(input, opts).map(|(_, v)| v)
}

/// Decode a document with the given options, returning the root tag's name
/// alongside its value.
pub fn from_bytes_named(input: &[u8], opts: DeOpts) -> Result<(String, Value)> {
    Decoder::new(input, opts).decode_document()
}
