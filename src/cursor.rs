// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For reading bit-packed fields from a single metadata block's payload
//!
//! Each metadata block is fed to its own [`BitCursor`], which knows
//! exactly how many bits the block contains.  Any read which
//! would go past the end of the block fails with
//! [`Error::TruncatedRead`] without touching the payload.
//!
//! Most blocks are big-endian, but the VORBIS_COMMENT block's
//! length fields are little-endian, so the cursor's
//! endianness is part of its type.

use crate::Error;
use bitstream_io::{BigEndian, BitRead, BitReader, Endianness, Integer, LittleEndian};

/// A stateful reader over a fully-loaded block payload
///
/// # Example
/// ```
/// use flac_meta::cursor::BitCursor;
/// use flac_meta::Error;
///
/// let data: &[u8] = &[0b1_0000011, 0x00, 0x00, 0x12];
/// let mut c = BitCursor::big_endian(data);
/// assert_eq!(c.read_bit().unwrap(), true);
/// assert_eq!(c.read_uint(7).unwrap(), 3);
/// assert_eq!(c.read_uint(24).unwrap(), 0x12);
/// assert!(matches!(c.read_uint(1), Err(Error::TruncatedRead)));
/// ```
pub struct BitCursor<'p, E: Endianness> {
    reader: BitReader<&'p [u8], E>,
    remaining: u64,
    consumed: u64,
}

impl<'p> BitCursor<'p, BigEndian> {
    /// Builds a big-endian cursor over the given payload
    pub fn big_endian(payload: &'p [u8]) -> Self {
        Self::new(payload)
    }
}

impl<'p> BitCursor<'p, LittleEndian> {
    /// Builds a little-endian cursor over the given payload
    pub fn little_endian(payload: &'p [u8]) -> Self {
        Self::new(payload)
    }
}

impl<'p, E: Endianness> BitCursor<'p, E> {
    /// Builds a cursor over the given payload
    pub fn new(payload: &'p [u8]) -> Self {
        Self {
            remaining: (payload.len() as u64) * 8,
            consumed: 0,
            reader: BitReader::new(payload),
        }
    }

    /// Number of bits not yet read
    pub fn remaining_bits(&self) -> u64 {
        self.remaining
    }

    /// Number of bits read so far
    pub fn consumed_bits(&self) -> u64 {
        self.consumed
    }

    // reserves the given number of bits before any read occurs
    fn claim(&mut self, bits: u64) -> Result<(), Error> {
        self.remaining = self
            .remaining
            .checked_sub(bits)
            .ok_or(Error::TruncatedRead)?;
        self.consumed += bits;
        Ok(())
    }

    /// Reads a single bit
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if no bits remain.
    pub fn read_bit(&mut self) -> Result<bool, Error> {
        self.claim(1)?;
        Ok(self.reader.read_bit()?)
    }

    /// Reads an unsigned integer of the given width, from 1 to 64 bits
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBitWidth`] for widths outside that range
    /// and [`Error::TruncatedRead`] if too few bits remain.
    pub fn read_uint(&mut self, bits: u32) -> Result<u64, Error> {
        if !(1..=64).contains(&bits) {
            return Err(Error::InvalidBitWidth(bits));
        }
        self.claim(bits.into())?;
        Ok(self.reader.read_var::<u64>(bits)?)
    }

    /// Reads a fixed-width value whose width is known at compile-time
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if too few bits remain.
    pub fn read<const BITS: u32, I: Integer>(&mut self) -> Result<I, Error> {
        self.claim(BITS.into())?;
        Ok(self.reader.read::<BITS, I>()?)
    }

    /// Reads a fixed number of whole bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if too few bits remain.
    pub fn read_array<const BYTES: usize>(&mut self) -> Result<[u8; BYTES], Error> {
        self.claim((BYTES as u64) * 8)?;
        let mut bytes = [0; BYTES];
        self.reader.read_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads the given number of bits as a run of bytes
    ///
    /// Returns `bits` / 8 bytes, rounded up.
    /// Should `bits` not be a multiple of 8, the final byte
    /// holds the leftover bits as an unsigned value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if too few bits remain.
    pub fn read_bytes(&mut self, bits: u64) -> Result<Vec<u8>, Error> {
        self.claim(bits)?;
        let whole = usize::try_from(bits / 8).map_err(|_| Error::TruncatedRead)?;
        let mut bytes = self.reader.read_to_vec(whole)?;
        match (bits % 8) as u32 {
            0 => {}
            partial => bytes.push(self.reader.read_var::<u8>(partial)?),
        }
        Ok(bytes)
    }

    /// Reads the given number of bits as text
    ///
    /// Text is kept as raw bytes without any charset validation,
    /// and any embedded NUL bytes are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if too few bits remain.
    pub fn read_text(&mut self, bits: u64) -> Result<Text, Error> {
        self.read_bytes(bits).map(Text)
    }

    /// Advances the cursor without returning any data
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRead`] if too few bits remain.
    pub fn skip(&mut self, bits: u32) -> Result<(), Error> {
        self.claim(bits.into())?;
        Ok(self.reader.skip(bits)?)
    }

    /// Parses a record from the cursor
    pub fn parse<F: FromCursor<E>>(&mut self) -> Result<F, Error> {
        F::from_cursor(self)
    }
}

/// Implemented by records which can be read from a [`BitCursor`]
pub trait FromCursor<E: Endianness>: Sized {
    /// Reads ourself from the cursor
    fn from_cursor(c: &mut BitCursor<'_, E>) -> Result<Self, Error>;
}

/// Text stored as raw bytes
///
/// FLAC metadata text fields are not guaranteed to be UTF-8
/// and fixed-size fields are often padded with NUL bytes,
/// so the bytes are kept exactly as read.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Text(Vec<u8>);

impl Text {
    /// Our raw bytes, including any NUL padding
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Our bytes as a string, if valid UTF-8
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Our bytes with any trailing NUL bytes removed
    pub fn trim_nulls(&self) -> &[u8] {
        let mut s = self.0.as_slice();
        while let [rest @ .., 0] = s {
            s = rest;
        }
        s
    }

    /// Our length, in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether we contain no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts ourself into our raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&String::from_utf8_lossy(&self.0), f)
    }
}

impl std::fmt::Debug for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(&String::from_utf8_lossy(&self.0), f)
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::borrow::Borrow<[u8]> for Text {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Text {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unaligned_reads() {
        let data: &[u8] = &[0b101_11001, 0b1100_0011, 0xff];
        let mut c = BitCursor::big_endian(data);

        assert_eq!(c.read_uint(3).unwrap(), 0b101);
        assert_eq!(c.read::<9, u16>().unwrap(), 0b11001_1100);
        assert_eq!(c.consumed_bits(), 12);
        assert_eq!(c.remaining_bits(), 12);
        assert_eq!(c.read_bytes(8).unwrap(), vec![0b0011_1111]);
        assert!(c.read_bit().unwrap());
        c.skip(3).unwrap();
        assert_eq!(c.remaining_bits(), 0);
    }

    #[test]
    fn test_partial_byte() {
        let data: &[u8] = &[0xab, 0b1011_0000];
        let mut c = BitCursor::big_endian(data);
        assert_eq!(c.read_bytes(12).unwrap(), vec![0xab, 0b1011]);
        assert_eq!(c.remaining_bits(), 4);
    }

    #[test]
    fn test_little_endian() {
        let data: &[u8] = &[0x20, 0x00, 0x00, 0x00, 0x01];
        let mut c = BitCursor::little_endian(data);
        assert_eq!(c.read::<32, u32>().unwrap(), 0x20);
        assert_eq!(c.read_uint(8).unwrap(), 1);
    }

    #[test]
    fn test_little_endian_partial_byte() {
        // low bits of the trailing byte come first
        let data: &[u8] = &[0xab, 0b1011_0101];
        let mut c = BitCursor::little_endian(data);
        assert_eq!(c.read_bytes(12).unwrap(), vec![0xab, 0b0101]);
        assert_eq!(c.remaining_bits(), 4);
        assert_eq!(c.read_uint(4).unwrap(), 0b1011);
    }

    #[test]
    fn test_underrun() {
        let data: &[u8] = &[0x01, 0x02];
        let mut c = BitCursor::big_endian(data);

        assert!(matches!(c.read_uint(17), Err(Error::TruncatedRead)));
        // a failed read consumes nothing
        assert_eq!(c.remaining_bits(), 16);
        assert!(matches!(c.read_bytes(24), Err(Error::TruncatedRead)));
        assert!(matches!(c.read_text(24), Err(Error::TruncatedRead)));
        assert!(matches!(c.skip(17), Err(Error::TruncatedRead)));
        assert!(matches!(c.read_array::<3>(), Err(Error::TruncatedRead)));
        assert_eq!(c.read_uint(16).unwrap(), 0x0102);
    }

    #[test]
    fn test_invalid_width() {
        let data: &[u8] = &[0; 16];
        let mut c = BitCursor::big_endian(data);
        assert!(matches!(c.read_uint(0), Err(Error::InvalidBitWidth(0))));
        assert!(matches!(c.read_uint(65), Err(Error::InvalidBitWidth(65))));
        assert_eq!(c.read_uint(64).unwrap(), 0);
    }

    #[test]
    fn test_text() {
        let data: &[u8] = b"ab\0\0";
        let mut c = BitCursor::big_endian(data);
        let text = c.read_text(32).unwrap();
        assert_eq!(text.len(), 4);
        assert_eq!(text.as_bytes(), b"ab\0\0");
        assert_eq!(text.trim_nulls(), b"ab");
        assert_eq!(text.to_str(), Some("ab\0\0"));
        assert_eq!(text, "ab\0\0");
    }
}
