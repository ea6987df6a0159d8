// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A decoder for the metadata section of FLAC files
//!
//! A FLAC file begins with the `fLaC` marker, a mandatory
//! STREAMINFO block and any number of optional metadata blocks.
//! This crate reads that section into a [`stream::Container`]
//! and leaves the audio frames which follow untouched.
//!
//! # Example
//!
//! ```
//! use flac_meta::stream::Container;
//! use flac_meta::metadata::Metadata;
//!
//! let data: &[u8] = &[
//!     0x66, 0x4c, 0x61, 0x43,  // "fLaC"
//!     0x80, 0x00, 0x00, 0x22,  // last STREAMINFO block, 34 bytes
//!     0x10, 0x00,
//!     0x10, 0x00,
//!     0x00, 0x00, 0x0c,
//!     0x00, 0x00, 0x0c,
//!     0b00001010, 0b11000100, 0b0100_000_0, 0b1111_0000,
//!     0b00000000, 0b00000000, 0b00000000, 0b01010000,
//!     0xf5, 0x3f, 0x86, 0x87, 0x6d, 0xcd, 0x77, 0x83,
//!     0x22, 0x5c, 0x93, 0xba, 0x8a, 0x93, 0x8c, 0x7d,
//! ];
//!
//! let container = Container::parse(data).unwrap();
//! assert_eq!(container.sample_rate(), 44100);
//! assert_eq!(container.channel_count(), 1);
//! assert_eq!(container.bits_per_sample(), 16);
//! assert_eq!(container.total_samples(), Some(80));
//! assert!(container.blocks.is_empty());
//! ```

#![warn(missing_docs)]

pub mod cursor;
pub mod metadata;
pub mod stream;

use metadata::BlockType;

/// A possible error when decoding FLAC metadata
#[derive(Debug)]
pub enum Error {
    /// A general I/O error from the underlying source
    Io(std::io::Error),
    /// The stream does not start with the `fLaC` marker
    BadMarker,
    /// Fewer than 4 bytes remain for a block header
    TruncatedHeader,
    /// A field needs more bits than remain in its block
    TruncatedRead,
    /// A block header uses the forbidden block type 127
    InvalidBlockType,
    /// A VORBIS_COMMENT entry has no `=` separator
    MalformedVorbisComment,
    /// The first metadata block is not STREAMINFO
    MissingStreamInfo,
    /// A STREAMINFO block occurs after the first block
    MultipleStreamInfo,
    /// An integer read was requested outside of 1 to 64 bits
    InvalidBitWidth(u32),
    /// A block decoder finished without consuming its whole payload
    UnconsumedPayload {
        /// The type of block being decoded
        block_type: BlockType,
        /// The number of bits left over
        bits: u64,
    },
    /// The decode deadline passed between blocks
    DeadlineExceeded,
    /// Decoding was cancelled between blocks
    Cancelled,
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::BadMarker => "missing FLAC marker".fmt(f),
            Self::TruncatedHeader => "truncated metadata block header".fmt(f),
            Self::TruncatedRead => "metadata block field exceeds block size".fmt(f),
            Self::InvalidBlockType => "invalid metadata block type".fmt(f),
            Self::MalformedVorbisComment => "VORBIS_COMMENT entry missing '='".fmt(f),
            Self::MissingStreamInfo => "STREAMINFO block not first in file".fmt(f),
            Self::MultipleStreamInfo => "multiple STREAMINFO blocks found in file".fmt(f),
            Self::InvalidBitWidth(bits) => write!(f, "invalid integer width of {bits} bits"),
            Self::UnconsumedPayload { block_type, bits } => {
                write!(f, "{bits} unread bits at end of {block_type} block")
            }
            Self::DeadlineExceeded => "metadata decode deadline exceeded".fmt(f),
            Self::Cancelled => "metadata decode cancelled".fmt(f),
        }
    }
}
