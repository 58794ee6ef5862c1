//! Inflating compressed NBT before decoding.
//!
//! Minecraft stores most NBT compressed: level and player dat files with
//! gzip, chunks inside region files with zlib. The decoder itself only works
//! on uncompressed data; these helpers sit in front of it.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};
use log::debug;

use crate::de::{from_bytes_with_opts, DeOpts};
use crate::error::{Error, Result};
use crate::Value;

/// Compression scheme of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Guess the compression of `data` from its first bytes.
    ///
    /// Uncompressed NBT starts with a tag byte of at most 12, which can never
    /// be mistaken for the gzip magic or a zlib header.
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x1f, 0x8b, ..] => Compression::Gzip,
            // zlib with a 32K window, header checksum a multiple of 31.
            [0x78, flg, ..] if (0x7800 | u16::from(*flg)) % 31 == 0 => Compression::Zlib,
            _ => Compression::None,
        }
    }
}

/// Inflate `data` if it looks compressed, otherwise borrow it unchanged.
pub fn decompress(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    let compression = Compression::detect(data);
    debug!("input compression: {:?}", compression);

    let mut out = vec![];
    match compression {
        Compression::None => return Ok(Cow::Borrowed(data)),
        Compression::Gzip => GzDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(Error::decompress)?,
        Compression::Zlib => ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(Error::decompress)?,
    };

    Ok(Cow::Owned(out))
}

/// Inflate `data` if needed, then decode it as a document. The root name is
/// discarded.
pub fn from_compressed_bytes(data: &[u8], opts: DeOpts) -> Result<Value> {
    let data = decompress(data)?;
    from_bytes_with_opts(&data, opts)
}
