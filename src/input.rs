//! Bounds-checked reading of primitives from an in-memory buffer.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Byte order of the multi-byte fields in a document. Java Edition NBT is
/// big-endian; Bedrock Edition writes the same grammar little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

// Read a fixed width value in the cursor's byte order.
macro_rules! read_ordered {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $read:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> Result<$ty> {
            let bs = self.consume(std::mem::size_of::<$ty>())?;
            Ok(match self.endian {
                Endian::Big => BigEndian::$read(bs),
                Endian::Little => LittleEndian::$read(bs),
            })
        }
    };
}

/// A read position over an immutable byte slice.
///
/// Every read checks that enough input remains before consuming anything. On
/// failure the position is left where it was and a
/// [`Truncated`][crate::error::ErrorKind::Truncated] error is returned.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte order used for every multi-byte read.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Consume exactly `n` bytes, borrowing them from the input.
    pub fn consume(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::truncated(n, self.remaining()).at(self.pos));
        }

        let bs = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bs)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_ordered!(read_u16, u16, read_u16);
    read_ordered!(read_i16, i16, read_i16);
    read_ordered!(read_i32, i32, read_i32);
    read_ordered!(read_i64, i64, read_i64);
    read_ordered!(read_f32, f32, read_f32);
    read_ordered!(read_f64, f64, read_f64);

    /// Fill `dst` with consecutive `i32`s. The whole run is bounds checked up
    /// front.
    pub fn read_i32_into(&mut self, dst: &mut [i32]) -> Result<()> {
        let bs = self.consume(dst.len() * std::mem::size_of::<i32>())?;
        match self.endian {
            Endian::Big => BigEndian::read_i32_into(bs, dst),
            Endian::Little => LittleEndian::read_i32_into(bs, dst),
        }
        Ok(())
    }

    /// Fill `dst` with consecutive `i64`s. The whole run is bounds checked up
    /// front.
    pub fn read_i64_into(&mut self, dst: &mut [i64]) -> Result<()> {
        let bs = self.consume(dst.len() * std::mem::size_of::<i64>())?;
        match self.endian {
            Endian::Big => BigEndian::read_i64_into(bs, dst),
            Endian::Little => LittleEndian::read_i64_into(bs, dst),
        }
        Ok(())
    }
}
