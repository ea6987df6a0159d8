// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For decoding a FLAC file's metadata blocks
//!
//! Many items are capitalized simply because they were capitalized
//! in the original FLAC format documentation.
//!
//! # Metadata Blocks
//!
//! FLAC supports seven different metadata block types
//!
//! | Block Type | Purpose |
//! |-----------:|---------|
//! | [STREAMINFO](`StreamInfo`) | stream information such as sample rate, channel count, etc. |
//! | [PADDING](`Padding`) | empty data which can easily be resized as needed |
//! | [APPLICATION](`Application`) | application-specific data such as foreign RIFF WAVE chunks |
//! | [SEEKTABLE](`SeekTable`) | to allow for more efficient seeking within a FLAC file |
//! | [VORBIS_COMMENT](`VorbisComment`) | textual metadata such as track title, artist name, album name, etc. |
//! | [CUESHEET](`CueSheet`) | the original disc's layout, for CD images |
//! | [PICTURE](`Picture`) | embedded image files such as cover art |
//!
//! Block types 7 through 126 are undefined and are kept
//! verbatim as [`Reserved`] blocks.  Block type 127 is invalid.

use crate::Error;
use crate::cursor::{BitCursor, FromCursor, Text};
use bitstream_io::{BigEndian, BitRead, BitReader, Endianness, FromBitStream, LittleEndian};
use std::collections::HashMap;

/// Types related to the CUESHEET metadata block
pub mod cuesheet;

pub use cuesheet::{CueSheet, CueSheetTrack, CueSheetTrackIndex};

/// A trait for indicating various pieces of FLAC stream metadata
pub trait Metadata {
    /// Returns channel count
    ///
    /// From 1 to 8
    fn channel_count(&self) -> u8;

    /// Returns sample rate, in Hz
    fn sample_rate(&self) -> u32;

    /// Returns bits-per-sample
    ///
    /// From 4 to 32
    fn bits_per_sample(&self) -> u32;

    /// Returns total number of channel-independent samples, if known
    fn total_samples(&self) -> Option<u64> {
        None
    }

    /// Returns MD5 of entire decoded stream, if known
    fn md5(&self) -> Option<&[u8; 16]> {
        None
    }

    /// Returns total length of decoded file, in bytes
    fn decoded_len(&self) -> Option<u64> {
        self.total_samples().map(|s| {
            s * u64::from(self.channel_count()) * u64::from(self.bits_per_sample().div_ceil(8))
        })
    }

    /// Returns duration of file, if known
    fn duration(&self) -> Option<std::time::Duration> {
        const NANOS_PER_SEC: u64 = 1_000_000_000;

        let sample_rate = u64::from(self.sample_rate());

        self.total_samples()
            .filter(|_| sample_rate > 0)
            .map(|s| {
                std::time::Duration::new(
                    s / sample_rate,
                    u32::try_from(((s % sample_rate) * NANOS_PER_SEC) / sample_rate)
                        .unwrap_or_default(),
                )
            })
    }
}

/// A FLAC metadata block header
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 1    | `last` | final metadata block in file |
/// | 7    | `block_type` | type of block |
/// | 24   | `data_length` | block payload size, in bytes |
///
/// # Example
/// ```
/// use bitstream_io::{BitReader, BitRead, BigEndian};
/// use flac_meta::metadata::{BlockHeader, BlockType};
///
/// let data: &[u8] = &[0b1_0000000, 0x00, 0x00, 0x22];
/// let mut r = BitReader::endian(data, BigEndian);
/// assert_eq!(
///     r.parse::<BlockHeader>().unwrap(),
///     BlockHeader {
///         last: true,                         // 0b1
///         block_type: BlockType::StreamInfo,  // 0b0000000
///         data_length: 0x00_00_22u16.into(), // 0x00, 0x00, 0x22
///     },
/// );
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlockHeader {
    /// Whether we are the final block
    pub last: bool,
    /// Our block type
    pub block_type: BlockType,
    /// Our payload size, in bytes
    pub data_length: BlockSize,
}

impl BlockHeader {
    /// Size of a block header, in bytes
    pub const SIZE: usize = 4;

    /// Reads a block header directly from the given byte source
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedHeader`] if fewer than
    /// 4 bytes remain in the source.
    pub fn read<R: std::io::Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let mut header = [0; Self::SIZE];
        r.read_exact(&mut header).map_err(|err| match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::TruncatedHeader,
            _ => Error::Io(err),
        })?;
        Ok(BitReader::endian(header.as_slice(), BigEndian).parse()?)
    }
}

impl FromBitStream for BlockHeader {
    type Error = std::io::Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        Ok(Self {
            last: r.read::<1, _>()?,
            block_type: r.parse()?,
            data_length: r.parse()?,
        })
    }
}

/// A FLAC metadata block type
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum BlockType {
    /// The STREAMINFO block
    StreamInfo,
    /// The PADDING block
    Padding,
    /// The APPLICATION block
    Application,
    /// The SEEKTABLE block
    SeekTable,
    /// The VORBIS_COMMENT block
    VorbisComment,
    /// The CUESHEET block
    CueSheet,
    /// The PICTURE block
    Picture,
    /// An undefined block type, from 7 to 126
    Reserved(u8),
    /// The forbidden block type 127
    Invalid,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::StreamInfo => "STREAMINFO".fmt(f),
            Self::Padding => "PADDING".fmt(f),
            Self::Application => "APPLICATION".fmt(f),
            Self::SeekTable => "SEEKTABLE".fmt(f),
            Self::VorbisComment => "VORBIS_COMMENT".fmt(f),
            Self::CueSheet => "CUESHEET".fmt(f),
            Self::Picture => "PICTURE".fmt(f),
            Self::Reserved(t) => write!(f, "RESERVED ({t})"),
            Self::Invalid => "INVALID".fmt(f),
        }
    }
}

impl From<u8> for BlockType {
    fn from(tag: u8) -> Self {
        match tag & 0b111_1111 {
            0 => Self::StreamInfo,
            1 => Self::Padding,
            2 => Self::Application,
            3 => Self::SeekTable,
            4 => Self::VorbisComment,
            5 => Self::CueSheet,
            6 => Self::Picture,
            127 => Self::Invalid,
            t => Self::Reserved(t),
        }
    }
}

impl From<BlockType> for u8 {
    fn from(block_type: BlockType) -> u8 {
        match block_type {
            BlockType::StreamInfo => 0,
            BlockType::Padding => 1,
            BlockType::Application => 2,
            BlockType::SeekTable => 3,
            BlockType::VorbisComment => 4,
            BlockType::CueSheet => 5,
            BlockType::Picture => 6,
            BlockType::Reserved(t) => t,
            BlockType::Invalid => 127,
        }
    }
}

impl FromBitStream for BlockType {
    type Error = std::io::Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        r.read::<7, u8>().map(Self::from)
    }
}

/// A 24-bit block size value
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BlockSize(u32);

impl BlockSize {
    /// A value of 0
    pub const ZERO: BlockSize = BlockSize(0);

    /// The largest possible block size (2²⁴ - 1)
    pub const MAX: u32 = (1 << 24) - 1;

    /// Our current value, in bytes
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Our current value, in bits
    pub fn bits(&self) -> u64 {
        u64::from(self.0) * 8
    }
}

impl std::fmt::Display for BlockSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromBitStream for BlockSize {
    type Error = std::io::Error;

    fn from_reader<R: BitRead + ?Sized>(r: &mut R) -> Result<Self, Self::Error> {
        r.read::<24, _>().map(Self)
    }
}

impl From<u8> for BlockSize {
    fn from(u: u8) -> Self {
        Self(u.into())
    }
}

impl From<u16> for BlockSize {
    fn from(u: u16) -> Self {
        Self(u.into())
    }
}

impl TryFrom<u32> for BlockSize {
    type Error = BlockSizeOverflow;

    fn try_from(u: u32) -> Result<Self, Self::Error> {
        (u <= Self::MAX).then_some(Self(u)).ok_or(BlockSizeOverflow)
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = BlockSizeOverflow;

    fn try_from(u: usize) -> Result<Self, Self::Error> {
        u32::try_from(u)
            .map_err(|_| BlockSizeOverflow)
            .and_then(Self::try_from)
    }
}

impl From<BlockSize> for u32 {
    #[inline]
    fn from(size: BlockSize) -> u32 {
        size.0
    }
}

/// An error that occurs when trying to build an overly large `BlockSize`
#[derive(Copy, Clone, Debug)]
pub struct BlockSizeOverflow;

impl std::error::Error for BlockSizeOverflow {}

impl std::fmt::Display for BlockSizeOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        "value too large for BlockSize".fmt(f)
    }
}

/// A metadata block's payload decoder
///
/// Each implementation reads its fields from a [`BitCursor`]
/// fed with exactly the block's payload.
pub trait FromPayload: Sized {
    /// The byte order of the block's fields
    type Endianness: Endianness;

    /// Reads the block's fields, given its header
    fn from_payload(
        c: &mut BitCursor<'_, Self::Endianness>,
        header: &BlockHeader,
    ) -> Result<Self, Error>;

    /// Decodes a complete payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnconsumedPayload`] if the decoder
    /// does not consume every bit of the payload.
    fn decode(header: &BlockHeader, payload: &[u8]) -> Result<Self, Error> {
        let mut c = BitCursor::new(payload);
        let block = Self::from_payload(&mut c, header)?;
        match c.remaining_bits() {
            0 => Ok(block),
            bits => Err(Error::UnconsumedPayload {
                block_type: header.block_type,
                bits,
            }),
        }
    }
}

/// Any possible FLAC metadata block
///
/// Each block consists of a [`BlockHeader`] followed by the block's contents.
///
/// ```text
/// ┌──────────┬────────┬┄┄┄┄┄┄┄┄┬┄┄┄┬────────┬┄┄┄┄┄┄┄┄┬┄┄┄╮
/// │ FLAC Tag │ Block₀ │ Block₁ ┆ … ┆ Frame₀ │ Frame₁ ┆ … ┆ FLAC File
/// └──────────┼────────┼┄┄┄┄┄┄┄┄┴┄┄┄┴────────┴┄┄┄┄┄┄┄┄┴┄┄┄╯
/// ╭──────────╯        ╰────────────────────────╮
/// ├──────────────┬─────────────────────────────┤
/// │ Block Header │     Metadata Block Data     │           Metadata Block
/// └──────────────┴─────────────────────────────┘
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Block {
    /// The STREAMINFO block
    StreamInfo(StreamInfo),
    /// The PADDING block
    Padding(Padding),
    /// The APPLICATION block
    Application(Application),
    /// The SEEKTABLE block
    SeekTable(SeekTable),
    /// The VORBIS_COMMENT block
    VorbisComment(VorbisComment),
    /// The CUESHEET block
    CueSheet(CueSheet),
    /// The PICTURE block
    Picture(Picture),
    /// An undefined block
    Reserved(Reserved),
}

impl Block {
    /// Our block type
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::StreamInfo(_) => BlockType::StreamInfo,
            Self::Padding(_) => BlockType::Padding,
            Self::Application(_) => BlockType::Application,
            Self::SeekTable(_) => BlockType::SeekTable,
            Self::VorbisComment(_) => BlockType::VorbisComment,
            Self::CueSheet(_) => BlockType::CueSheet,
            Self::Picture(_) => BlockType::Picture,
            Self::Reserved(r) => BlockType::Reserved(r.block_type),
        }
    }

    /// Decodes a block's payload according to its header's type
    ///
    /// The payload must be exactly the header's `data_length` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBlockType`] for block type 127,
    /// or any error from the block's own decoder.
    pub fn decode(header: &BlockHeader, payload: &[u8]) -> Result<Self, Error> {
        match header.block_type {
            BlockType::StreamInfo => StreamInfo::decode(header, payload).map(Self::StreamInfo),
            BlockType::Padding => Padding::decode(header, payload).map(Self::Padding),
            BlockType::Application => Application::decode(header, payload).map(Self::Application),
            BlockType::SeekTable => SeekTable::decode(header, payload).map(Self::SeekTable),
            BlockType::VorbisComment => {
                VorbisComment::decode(header, payload).map(Self::VorbisComment)
            }
            BlockType::CueSheet => CueSheet::decode(header, payload).map(Self::CueSheet),
            BlockType::Picture => Picture::decode(header, payload).map(Self::Picture),
            BlockType::Reserved(_) => Reserved::decode(header, payload).map(Self::Reserved),
            BlockType::Invalid => Err(Error::InvalidBlockType),
        }
    }
}

/// Implemented by each of the decoded block types
pub trait TypedBlock: Sized + Into<Block> + TryFrom<Block> {
    /// Returns ourself if the block is of our type
    fn from_block(block: &Block) -> Option<&Self>;
}

macro_rules! block {
    ($t:ty, $v:ident) => {
        impl TypedBlock for $t {
            fn from_block(block: &Block) -> Option<&Self> {
                match block {
                    Block::$v(block) => Some(block),
                    _ => None,
                }
            }
        }

        impl From<$t> for Block {
            fn from(b: $t) -> Self {
                Self::$v(b)
            }
        }

        impl TryFrom<Block> for $t {
            type Error = ();

            fn try_from(block: Block) -> Result<Self, ()> {
                match block {
                    Block::$v(block) => Ok(block),
                    _ => Err(()),
                }
            }
        }
    };
}

block!(StreamInfo, StreamInfo);
block!(Padding, Padding);
block!(Application, Application);
block!(SeekTable, SeekTable);
block!(VorbisComment, VorbisComment);
block!(CueSheet, CueSheet);
block!(Picture, Picture);
block!(Reserved, Reserved);

/// A decoded block along with the header it was read with
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MetadataBlock<B = Block> {
    /// The block's header, as found on disk
    pub header: BlockHeader,
    /// The block's decoded contents
    pub block: B,
}

impl<B> MetadataBlock<B> {
    /// Whether this is the final metadata block
    pub fn is_last(&self) -> bool {
        self.header.last
    }
}

/// A STREAMINFO metadata block
///
/// This block contains metadata about the stream's contents.
///
/// It must *always* be present in a FLAC file,
/// must *always* be the first metadata block in the stream,
/// and must *not* be present more than once.
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 16   | `minimum_block_size` | minimum block size (in samples) in the stream
/// | 16   | `maximum_block_size` | maximum block size (in samples) in the stream
/// | 24   | `minimum_frame_size` | minimum frame size (in bytes) in the stream
/// | 24   | `maximum_frame_size` | maximum frame size (in bytes) in the stream
/// | 20   | `sample_rate` | stream's sample rate, in Hz
/// | 3    | `channels` | stream's channel count (+1)
/// | 5    | `bits_per_sample` | stream's bits-per-sample (+1)
/// | 36   | `total_samples` | stream's total channel-independent samples
/// | 16×8 | `md5` | decoded stream's MD5 sum hash
///
/// # Example
/// ```
/// use flac_meta::metadata::{BlockHeader, BlockType, FromPayload, StreamInfo};
///
/// let data: &[u8] = &[
///     0x10, 0x00,
///     0x10, 0x00,
///     0x00, 0x00, 0x0c,
///     0x00, 0x00, 0x0c,
///     0b00001010, 0b11000100, 0b0100_000_0, 0b1111_0000,
///     0b00000000, 0b00000000, 0b00000000, 0b01010000,
///     0xf5, 0x3f, 0x86, 0x87, 0x6d, 0xcd, 0x77, 0x83,
///     0x22, 0x5c, 0x93, 0xba, 0x8a, 0x93, 0x8c, 0x7d,
/// ];
///
/// let header = BlockHeader {
///     last: true,
///     block_type: BlockType::StreamInfo,
///     data_length: 0x22u8.into(),
/// };
///
/// assert_eq!(
///     StreamInfo::decode(&header, data).unwrap(),
///     StreamInfo {
///         minimum_block_size: 0x10_00,                    // 4096 samples
///         maximum_block_size: 0x10_00,                    // 4096 samples
///         minimum_frame_size: 0x00_00_0c,                 // 12 bytes
///         maximum_frame_size: 0x00_00_0c,                 // 12 bytes
///         sample_rate: 0b00001010_11000100_0100,          // 44100 Hz
///         channels: 0b000 + 1,                            // 1 channel
///         bits_per_sample: 0b0_1111 + 1,                  // 16 bps
///         total_samples: 0b0000_00000000_00000000_00000000_01010000,  // 80 samples
///         md5: [
///             0xf5, 0x3f, 0x86, 0x87, 0x6d, 0xcd, 0x77, 0x83,
///             0x22, 0x5c, 0x93, 0xba, 0x8a, 0x93, 0x8c, 0x7d,
///         ],
///     },
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StreamInfo {
    /// The minimum block size (in samples) used in the stream,
    /// excluding the last block.
    pub minimum_block_size: u16,
    /// The maximum block size (in samples) used in the stream,
    /// excluding the last block.
    pub maximum_block_size: u16,
    /// The minimum framesize (in bytes) used in the stream.
    ///
    /// 0 indicates the value is unknown.
    pub minimum_frame_size: u32,
    /// The maximum framesize (in bytes) used in the stream.
    ///
    /// 0 indicates the value is unknown.
    pub maximum_frame_size: u32,
    /// Sample rate in Hz
    ///
    /// 0 indicates a non-audio stream.
    pub sample_rate: u32,
    /// Number of channels, from 1 to 8
    pub channels: u8,
    /// Number of bits-per-sample, from 4 to 32
    pub bits_per_sample: u8,
    /// Total number of interchannel samples in stream.
    ///
    /// 0 indicates the value is unknown.
    pub total_samples: u64,
    /// MD5 hash of unencoded audio data.
    ///
    /// All 0 bytes indicates the value is unknown.
    pub md5: [u8; 16],
}

impl StreamInfo {
    /// Defined size of STREAMINFO block, in bytes
    pub const SIZE: u32 = 0x22;
}

impl Metadata for StreamInfo {
    fn channel_count(&self) -> u8 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample.into()
    }

    fn total_samples(&self) -> Option<u64> {
        (self.total_samples > 0).then_some(self.total_samples)
    }

    fn md5(&self) -> Option<&[u8; 16]> {
        self.md5.iter().any(|b| *b != 0).then_some(&self.md5)
    }
}

impl FromPayload for StreamInfo {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, _: &BlockHeader) -> Result<Self, Error> {
        Ok(Self {
            minimum_block_size: c.read::<16, _>()?,
            maximum_block_size: c.read::<16, _>()?,
            minimum_frame_size: c.read::<24, _>()?,
            maximum_frame_size: c.read::<24, _>()?,
            sample_rate: c.read::<20, _>()?,
            channels: c.read::<3, u8>()? + 1,
            bits_per_sample: c.read::<5, u8>()? + 1,
            total_samples: c.read::<36, _>()?,
            md5: c.read_array()?,
        })
    }
}

/// A PADDING metadata block
///
/// Padding blocks are empty blocks whose contents
/// carry no meaning, so only their size is kept.
///
/// This block may occur multiple times in a FLAC file.
///
/// # Example
///
/// ```
/// use flac_meta::metadata::{BlockHeader, BlockType, FromPayload, Padding};
///
/// let data: &[u8] = &[0x00; 10];
///
/// let header = BlockHeader {
///     last: true,
///     block_type: BlockType::Padding,
///     data_length: 0x0au8.into(),
/// };
///
/// assert_eq!(
///     Padding::decode(&header, data).unwrap(),
///     Padding {
///         size: 0x0au8.into(),
///     },
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Padding {
    /// The size of the padding, in bytes
    pub size: BlockSize,
}

impl FromPayload for Padding {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, header: &BlockHeader) -> Result<Self, Error> {
        c.skip(header.data_length.get() * 8)?;
        Ok(Self {
            size: header.data_length,
        })
    }
}

/// An APPLICATION metadata block
///
/// This block is for handling application-specific binary metadata,
/// such as foreign RIFF WAVE tags.
///
/// This block may occur multiple times in a FLAC file.
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 32   | `id` | registered application ID, in ASCII
/// | rest of block | `data` | application-specific data
///
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Application {
    /// A registered application ID
    pub id: Text,
    /// Application-specific data
    pub data: Vec<u8>,
}

impl FromPayload for Application {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, header: &BlockHeader) -> Result<Self, Error> {
        let id = c.read_text(32)?;
        Ok(Self {
            id,
            data: c.read_bytes(header.data_length.bits().saturating_sub(32))?,
        })
    }
}

/// A SEEKTABLE metadata block
///
/// Because FLAC frames do not store their compressed length,
/// a seek table is used for random access within a FLAC file.
/// By mapping a sample number to a byte offset,
/// one can quickly reach different parts of the file
/// without decoding the whole thing.
///
/// Also note that seek point byte offsets are
/// relative to the start of the first FLAC frame,
/// and *not* relative to the start of the entire file.
///
/// Its seek points occupy the entire block, 18 bytes apiece.
/// Any trailing bytes too short to form a whole seek point
/// are skipped.
///
/// # Example
/// ```
/// use flac_meta::metadata::{BlockHeader, BlockType, FromPayload, SeekTable, SeekPoint};
///
/// let data: &[u8] = &[
///     // seekpoint 0
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
///     0x00, 0x14,
///     // seekpoint 1
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14,
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0c,
///     0x00, 0x14,
/// ];
///
/// let header = BlockHeader {
///     last: true,
///     block_type: BlockType::SeekTable,
///     data_length: 0x24u8.into(),
/// };
///
/// assert_eq!(
///     SeekTable::decode(&header, data).unwrap().points,
///     vec![
///         SeekPoint {
///             sample_offset: 0x00,
///             byte_offset: 0x00,
///             frame_samples: 0x14,
///         },
///         SeekPoint {
///             sample_offset: 0x14,
///             byte_offset: 0x0c,
///             frame_samples: 0x14,
///         },
///     ],
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct SeekTable {
    /// The seek table's individual seek points
    pub points: Vec<SeekPoint>,
}

impl FromPayload for SeekTable {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, header: &BlockHeader) -> Result<Self, Error> {
        let size = header.data_length.get();

        let points = (0..size / SeekPoint::SIZE)
            .map(|_| c.parse())
            .collect::<Result<Vec<_>, _>>()?;

        match size % SeekPoint::SIZE {
            0 => {}
            remainder => {
                log::warn!("skipping {remainder} trailing SEEKTABLE bytes");
                c.skip(remainder * 8)?;
            }
        }

        Ok(Self { points })
    }
}

/// An individual SEEKTABLE seek point
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 64   | `sample_offset` | sample number of first sample in target frame
/// | 64   | `byte_offset` | offset, in bytes, from first frame to target frame's header
/// | 16   | `frame_samples` | number of samples in target frame
///
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SeekPoint {
    /// The sample number of the first sample in the target frame
    pub sample_offset: u64,
    /// Offset, in bytes, from the first byte of the first frame header
    /// to the first byte in the target frame's header
    pub byte_offset: u64,
    /// Number of samples in the target frame
    pub frame_samples: u16,
}

impl SeekPoint {
    /// Size of a single seek point, in bytes
    pub const SIZE: u32 = (64 + 64 + 16) / 8;

    /// Sample offset reserved for placeholder points
    pub const PLACEHOLDER: u64 = u64::MAX;

    /// Whether this is a placeholder point
    pub fn is_placeholder(&self) -> bool {
        self.sample_offset == Self::PLACEHOLDER
    }
}

impl FromCursor<BigEndian> for SeekPoint {
    fn from_cursor(c: &mut BitCursor<'_, BigEndian>) -> Result<Self, Error> {
        Ok(Self {
            sample_offset: c.read::<64, _>()?,
            byte_offset: c.read::<64, _>()?,
            frame_samples: c.read::<16, _>()?,
        })
    }
}

/// A VORBIS_COMMENT metadata block
///
/// This block contains metadata such as track name,
/// artist name, album name, etc.  Its contents are
/// `=`-delimited text fields
/// with a field name followed by value,
/// such as:
///
/// ```text
/// TITLE=Track Title
/// ```
///
/// Field names may occur multiple times within the same comment
/// (a track may have multiple artists and choose to
/// store an "ARTIST" field for each one).
///
/// # Byte Order
///
/// Unlike the rest of a FLAC file, the Vorbis comment's
/// length fields are stored in little-endian byte order.
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 32   | vendor string len | length of vendor string, in bytes
/// | `vendor string len`×8 | `vendor_string` | vendor string
/// | 32   | field count | number of fields
/// | 32   | field₀ len | length of field₀, in bytes
/// | `field₀ len`×8 | `fields₀` | first field value
/// | 32   | field₁ len | length of field₁, in bytes
/// | `field₁ len`×8 | `fields₁` | second field value
/// | | | ⋮
///
/// # Example
/// ```
/// use flac_meta::metadata::{BlockHeader, BlockType, FromPayload, VorbisComment};
///
/// let data: &[u8] = &[
///     0x20, 0x00, 0x00, 0x00,  // 32 byte vendor string
///     0x72, 0x65, 0x66, 0x65, 0x72, 0x65, 0x6e, 0x63,
///     0x65, 0x20, 0x6c, 0x69, 0x62, 0x46, 0x4c, 0x41,
///     0x43, 0x20, 0x31, 0x2e, 0x34, 0x2e, 0x33, 0x20,
///     0x32, 0x30, 0x32, 0x33, 0x30, 0x36, 0x32, 0x33,
///     0x02, 0x00, 0x00, 0x00,  // 2 fields
///     0x0d, 0x00, 0x00, 0x00,  // 13 byte field 1
///     0x54, 0x49, 0x54, 0x4c, 0x45, 0x3d, 0x54, 0x65,
///     0x73, 0x74, 0x69, 0x6e, 0x67,
///     0x10, 0x00, 0x00, 0x00,  // 16 byte field 2
///     0x41, 0x4c, 0x42, 0x55, 0x4d, 0x3d, 0x54, 0x65,
///     0x73, 0x74, 0x20, 0x41, 0x6c, 0x62, 0x75, 0x6d,
/// ];
///
/// let header = BlockHeader {
///     last: true,
///     block_type: BlockType::VorbisComment,
///     data_length: 0x4du8.into(),
/// };
///
/// let comment = VorbisComment::decode(&header, data).unwrap();
///
/// assert_eq!(comment.vendor_string, "reference libFLAC 1.4.3 20230623");
/// assert_eq!(comment.comments["TITLE"], ["Testing"]);
/// assert_eq!(comment.comments["ALBUM"], ["Test Album"]);
/// assert_eq!(comment.comments.get("ARTIST"), None);
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct VorbisComment {
    /// The vendor string
    pub vendor_string: Text,
    /// The individual comments, grouped by key
    pub comments: Comments,
}

impl FromPayload for VorbisComment {
    type Endianness = LittleEndian;

    fn from_payload(
        c: &mut BitCursor<'_, LittleEndian>,
        _: &BlockHeader,
    ) -> Result<Self, Error> {
        let vendor_string = read_prefixed(c).map(Text::from)?;
        let count = c.read::<32, u32>()?;

        let mut comments = Comments::default();
        for _ in 0..count {
            let entry = read_prefixed(c)?;
            let split = entry
                .iter()
                .position(|b| *b == b'=')
                .ok_or(Error::MalformedVorbisComment)?;
            comments.insert(
                Text::from(&entry[0..split]),
                Text::from(&entry[split + 1..]),
            );
        }

        Ok(Self {
            vendor_string,
            comments,
        })
    }
}

/// Vorbis comment entries grouped by key
///
/// Keys are kept in the order they first appear,
/// and each key's values are kept in the order they appear.
///
/// # Example
/// ```
/// use flac_meta::metadata::Comments;
///
/// let mut comments = Comments::default();
/// comments.insert("ARTIST".into(), "Artist 1".into());
/// comments.insert("TITLE".into(), "Title".into());
/// comments.insert("ARTIST".into(), "Artist 2".into());
///
/// assert_eq!(comments.len(), 2);
/// assert_eq!(comments["ARTIST"], ["Artist 1", "Artist 2"]);
/// assert_eq!(comments.first("TITLE").unwrap(), "Title");
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Comments {
    entries: Vec<(Text, Vec<Text>)>,
    // key to position in entries
    index: HashMap<Text, usize>,
}

impl Comments {
    /// Appends value to the given key's list of values
    pub fn insert(&mut self, key: Text, value: Text) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// Returns all values of the given key, if any
    pub fn get(&self, key: &str) -> Option<&[Text]> {
        self.index
            .get(key.as_bytes())
            .map(|i| self.entries[*i].1.as_slice())
    }

    /// Returns the first value of the given key, if any
    pub fn first(&self, key: &str) -> Option<&Text> {
        self.get(key).and_then(|values| values.first())
    }

    /// Iterates over all keys, in order of first appearance
    pub fn keys(&self) -> impl Iterator<Item = &Text> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over all keys along with their values
    pub fn iter(&self) -> impl Iterator<Item = (&Text, &[Text])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// The number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no comments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::ops::Index<&str> for Comments {
    type Output = [Text];

    fn index(&self, key: &str) -> &[Text] {
        match self.get(key) {
            Some(values) => values,
            None => panic!("no comment with key {key:?}"),
        }
    }
}

// a 32-bit length followed by that many bytes
fn read_prefixed<E: Endianness>(c: &mut BitCursor<'_, E>) -> Result<Vec<u8>, Error> {
    let size = c.read::<32, u32>()?;
    c.read_bytes(u64::from(size) * 8)
}

/// A PICTURE metadata block
///
/// Picture blocks are for embedding artwork
/// into the FLAC file itself, much like the `APIC` frame
/// in ID3v2 tags.
///
/// This block may occur multiple times in a FLAC file.
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 32   | `picture_type` | picture type
/// | 32   | media type len | media type length, in bytes
/// | `media type len`×8 | `media_type` | picture's MIME type
/// | 32   | description len | description length, in bytes
/// | `description len`×8 | `description` | description of picture
/// | 32   | `width` | picture's width, in pixels
/// | 32   | `height` | picture's height, in pixels
/// | 32   | `color_depth` | picture's color depth, in bits-per-pixel
/// | 32   | `colors_used` | for indexed-color pictures, number of colors used
/// | 32   | data len | length of picture data, in bytes
/// | `data len`×8 | `data` | raw picture data
///
/// The `md5` field is not stored in the block
/// but is calculated from the picture data when decoded.
///
/// # Example
/// ```
/// use flac_meta::metadata::{BlockHeader, BlockType, FromPayload, Picture, PictureType};
///
/// let data: &[u8] = &[
///     0x00, 0x00, 0x00, 0x03,  // picture type
///     0x00, 0x00, 0x00, 0x09,  // media type len (9 bytes)
///     0x69, 0x6d, 0x61, 0x67, 0x65, 0x2f, 0x70, 0x6e, 0x67,
///     0x00, 0x00, 0x00, 0x00,  // description len (0 bytes)
///     0x00, 0x00, 0x00, 0x10,  // width
///     0x00, 0x00, 0x00, 0x09,  // height
///     0x00, 0x00, 0x00, 0x18,  // color depth
///     0x00, 0x00, 0x00, 0x00,  // color count
///     0x00, 0x00, 0x00, 0x03,  // data len (3 bytes)
///     0x61, 0x62, 0x63,
/// ];
///
/// let header = BlockHeader {
///     last: true,
///     block_type: BlockType::Picture,
///     data_length: 0x2cu8.into(),
/// };
///
/// let picture = Picture::decode(&header, data).unwrap();
/// assert_eq!(picture.picture_type, PictureType::FrontCover);
/// assert_eq!(picture.media_type, "image/png");
/// assert!(picture.description.is_empty());
/// assert_eq!((picture.width, picture.height), (16, 9));
/// assert_eq!(picture.data, b"abc");
/// assert_eq!(
///     picture.md5,
///     [
///         0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0,
///         0xd6, 0x96, 0x3f, 0x7d, 0x28, 0xe1, 0x7f, 0x72,
///     ],
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Picture {
    /// The picture type
    pub picture_type: PictureType,
    /// The media type string as specified by RFC2046
    pub media_type: Text,
    /// The description of the picture
    pub description: Text,
    /// The width of the picture in pixels
    pub width: u32,
    /// The height of the picture in pixels
    pub height: u32,
    /// The color depth of the picture in bits per pixel
    pub color_depth: u32,
    /// For indexed-color pictures, the number of colors used
    pub colors_used: u32,
    /// The binary picture data
    pub data: Vec<u8>,
    /// MD5 digest of the binary picture data
    pub md5: [u8; 16],
}

impl FromPayload for Picture {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, _: &BlockHeader) -> Result<Self, Error> {
        let picture_type = c.read::<32, u32>().map(PictureType::from)?;
        let media_type = read_prefixed(c).map(Text::from)?;
        let description = read_prefixed(c).map(Text::from)?;
        let width = c.read::<32, _>()?;
        let height = c.read::<32, _>()?;
        let color_depth = c.read::<32, _>()?;
        let colors_used = c.read::<32, _>()?;
        let data = read_prefixed(c)?;

        Ok(Self {
            picture_type,
            media_type,
            description,
            width,
            height,
            color_depth,
            colors_used,
            md5: md5::compute(&data).0,
            data,
        })
    }
}

/// Defined variants of PICTURE type
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PictureType {
    /// Other
    Other,
    /// PNG file icon of 32x32 pixels
    Png32x32,
    /// General file icon
    GeneralFileIcon,
    /// Front cover
    FrontCover,
    /// Back cover
    BackCover,
    /// Liner notes page
    LinerNotes,
    /// Media label (e.g., CD, Vinyl or Cassette label)
    MediaLabel,
    /// Lead artist, lead performer, or soloist
    LeadArtist,
    /// Artist or performer
    Artist,
    /// Conductor
    Conductor,
    /// Band or orchestra
    Band,
    /// Composer
    Composer,
    /// Lyricist or text writer
    Lyricist,
    /// Recording location
    RecordingLocation,
    /// During recording
    DuringRecording,
    /// During performance
    DuringPerformance,
    /// Movie or video screen capture
    ScreenCapture,
    /// A bright colored fish
    Fish,
    /// Illustration
    Illustration,
    /// Band or artist logotype
    BandLogo,
    /// Publisher or studio logotype
    PublisherLogo,
    /// A picture type not defined by the format
    Undefined(u32),
}

impl std::fmt::Display for PictureType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Other => "Other".fmt(f),
            Self::Png32x32 => "32×32 PNG Icon".fmt(f),
            Self::GeneralFileIcon => "General File Icon".fmt(f),
            Self::FrontCover => "Cover (front)".fmt(f),
            Self::BackCover => "Cover (back)".fmt(f),
            Self::LinerNotes => "Liner Notes".fmt(f),
            Self::MediaLabel => "Media Label".fmt(f),
            Self::LeadArtist => "Lead Artist".fmt(f),
            Self::Artist => "Artist".fmt(f),
            Self::Conductor => "Conductor".fmt(f),
            Self::Band => "Band or Orchestra".fmt(f),
            Self::Composer => "Composer".fmt(f),
            Self::Lyricist => "Lyricist or Text Writer".fmt(f),
            Self::RecordingLocation => "Recording Location".fmt(f),
            Self::DuringRecording => "During Recording".fmt(f),
            Self::DuringPerformance => "During Performance".fmt(f),
            Self::ScreenCapture => "Movie or Video Screen Capture".fmt(f),
            Self::Fish => "A Bright Colored Fish".fmt(f),
            Self::Illustration => "Illustration".fmt(f),
            Self::BandLogo => "Band or Artist Logotype".fmt(f),
            Self::PublisherLogo => "Publisher or Studio Logotype".fmt(f),
            Self::Undefined(t) => write!(f, "Undefined ({t})"),
        }
    }
}

impl From<u32> for PictureType {
    fn from(t: u32) -> Self {
        match t {
            0 => Self::Other,
            1 => Self::Png32x32,
            2 => Self::GeneralFileIcon,
            3 => Self::FrontCover,
            4 => Self::BackCover,
            5 => Self::LinerNotes,
            6 => Self::MediaLabel,
            7 => Self::LeadArtist,
            8 => Self::Artist,
            9 => Self::Conductor,
            10 => Self::Band,
            11 => Self::Composer,
            12 => Self::Lyricist,
            13 => Self::RecordingLocation,
            14 => Self::DuringRecording,
            15 => Self::DuringPerformance,
            16 => Self::ScreenCapture,
            17 => Self::Fish,
            18 => Self::Illustration,
            19 => Self::BandLogo,
            20 => Self::PublisherLogo,
            t => Self::Undefined(t),
        }
    }
}

/// A metadata block of an undefined type
///
/// Its contents are kept verbatim.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reserved {
    /// The block's type, from 7 to 126
    pub block_type: u8,
    /// The block's raw contents
    pub data: Vec<u8>,
}

impl FromPayload for Reserved {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, header: &BlockHeader) -> Result<Self, Error> {
        Ok(Self {
            block_type: header.block_type.into(),
            data: c.read_bytes(header.data_length.bits())?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn header(block_type: BlockType, payload: &[u8]) -> BlockHeader {
        BlockHeader {
            last: false,
            block_type,
            data_length: payload.len().try_into().unwrap(),
        }
    }

    #[test]
    fn test_header() {
        let mut data: &[u8] = &[0x84, 0x00, 0x01, 0x02, 0xff];
        assert_eq!(
            BlockHeader::read(&mut data).unwrap(),
            BlockHeader {
                last: true,
                block_type: BlockType::VorbisComment,
                data_length: 0x0102u16.into(),
            }
        );
        assert_eq!(data, &[0xff]);

        let mut data: &[u8] = &[0x7f, 0x00, 0x00, 0x00];
        assert_eq!(
            BlockHeader::read(&mut data).unwrap().block_type,
            BlockType::Invalid
        );

        let mut data: &[u8] = &[0x07, 0xff, 0xff, 0xff];
        let header = BlockHeader::read(&mut data).unwrap();
        assert_eq!(header.block_type, BlockType::Reserved(7));
        assert_eq!(header.data_length.get(), BlockSize::MAX);

        let mut data: &[u8] = &[0x00, 0x00, 0x22];
        assert!(matches!(BlockHeader::read(&mut data), Err(Error::TruncatedHeader)));
    }

    #[test]
    fn test_block_types() {
        for tag in 0..=127u8 {
            let block_type = BlockType::from(tag);
            assert_eq!(u8::from(block_type), tag);
            match tag {
                7..=126 => assert_eq!(block_type, BlockType::Reserved(tag)),
                127 => assert_eq!(block_type, BlockType::Invalid),
                _ => assert!(!matches!(
                    block_type,
                    BlockType::Reserved(_) | BlockType::Invalid
                )),
            }
        }
    }

    #[test]
    fn test_streaminfo_fields() {
        let mut data = vec![0; 34];
        // 20-bit sample rate, 3-bit channels, 5-bit bps
        // 88200 Hz = 0x15888
        data[10] = 0x15;
        data[11] = 0x88;
        data[12] = 0b1000_001_1;
        data[13] = 0b0111_0000;
        // 36-bit total samples of 793287 = 0xc1ac7
        data[15] = 0x0c;
        data[16] = 0x1a;
        data[17] = 0xc7;

        let streaminfo =
            StreamInfo::decode(&header(BlockType::StreamInfo, &data), &data).unwrap();
        assert_eq!(streaminfo.sample_rate, 88200);
        assert_eq!(streaminfo.channels, 2);
        assert_eq!(streaminfo.bits_per_sample, 24);
        assert_eq!(streaminfo.total_samples, 793287);
        assert_eq!(streaminfo.md5(), None);
        assert_eq!(
            streaminfo.duration(),
            Some(std::time::Duration::from_nanos(8_994_183_673))
        );
    }

    #[test]
    fn test_streaminfo_size() {
        let data = [0; 33];
        assert!(matches!(
            StreamInfo::decode(&header(BlockType::StreamInfo, &data), &data),
            Err(Error::TruncatedRead)
        ));

        let data = [0; 35];
        assert!(matches!(
            StreamInfo::decode(&header(BlockType::StreamInfo, &data), &data),
            Err(Error::UnconsumedPayload {
                block_type: BlockType::StreamInfo,
                bits: 8
            })
        ));
    }

    #[test]
    fn test_application() {
        let data = b"ATCHC@K3";
        let application =
            Application::decode(&header(BlockType::Application, data), data).unwrap();
        assert_eq!(application.id, "ATCH");
        assert_eq!(application.data, b"C@K3");

        let data = b"ATC";
        assert!(matches!(
            Application::decode(&header(BlockType::Application, data), data),
            Err(Error::TruncatedRead)
        ));
    }

    #[test]
    fn test_seektable_remainder() {
        let mut data = vec![0; 18 * 2 + 5];
        data[16] = 0x10; // 4096 samples
        data[18..26].copy_from_slice(&u64::MAX.to_be_bytes());

        let seektable = SeekTable::decode(&header(BlockType::SeekTable, &data), &data).unwrap();
        assert_eq!(seektable.points.len(), 2);
        assert_eq!(
            seektable.points[0],
            SeekPoint {
                sample_offset: 0,
                byte_offset: 0,
                frame_samples: 4096,
            }
        );
        assert!(!seektable.points[0].is_placeholder());
        assert!(seektable.points[1].is_placeholder());

        let data = [0; 17];
        assert!(
            SeekTable::decode(&header(BlockType::SeekTable, &data), &data)
                .unwrap()
                .points
                .is_empty()
        );
    }

    fn vorbis_payload(vendor: &str, entries: &[&[u8]]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend((vendor.len() as u32).to_le_bytes());
        payload.extend(vendor.as_bytes());
        payload.extend((entries.len() as u32).to_le_bytes());
        for entry in entries {
            payload.extend((entry.len() as u32).to_le_bytes());
            payload.extend(*entry);
        }
        payload
    }

    #[test]
    fn test_vorbis_comment() {
        let data = vorbis_payload(
            "reference libFLAC 1.1.4 20070213",
            &[b"example=fish".as_slice(), b"ARTIST=A", b"ARTIST=B", b"EQ=a=b", b"EMPTY="],
        );
        let comment =
            VorbisComment::decode(&header(BlockType::VorbisComment, &data), &data).unwrap();

        assert_eq!(comment.vendor_string, "reference libFLAC 1.1.4 20070213");
        assert_eq!(comment.comments.len(), 4);
        assert_eq!(comment.comments["example"], ["fish"]);
        assert_eq!(comment.comments["ARTIST"], ["A", "B"]);
        assert_eq!(comment.comments["EQ"], ["a=b"]);
        assert_eq!(comment.comments["EMPTY"], [""]);
        assert_eq!(comment.comments.get("artist"), None);
        assert_eq!(
            comment.comments.keys().collect::<Vec<_>>(),
            vec!["example", "ARTIST", "EQ", "EMPTY"]
        );
    }

    #[test]
    fn test_malformed_vorbis_comment() {
        let data = vorbis_payload("vendor", &[b"GOOD=1".as_slice(), b"no separator"]);
        assert!(matches!(
            VorbisComment::decode(&header(BlockType::VorbisComment, &data), &data),
            Err(Error::MalformedVorbisComment)
        ));

        // claims more entries than are present
        let mut data = vorbis_payload("vendor", &[b"GOOD=1".as_slice()]);
        data[10] = 2;
        assert!(matches!(
            VorbisComment::decode(&header(BlockType::VorbisComment, &data), &data),
            Err(Error::TruncatedRead)
        ));
    }

    #[test]
    fn test_reserved() {
        let data = [1, 2, 3, 4, 5];
        let header = header(BlockType::Reserved(99), &data);
        assert_eq!(
            Block::decode(&header, &data).unwrap(),
            Block::Reserved(Reserved {
                block_type: 99,
                data: data.to_vec(),
            })
        );
        assert_eq!(
            Block::decode(&header, &data).unwrap().block_type(),
            BlockType::Reserved(99)
        );
    }

    #[test]
    fn test_invalid() {
        let header = BlockHeader {
            last: true,
            block_type: BlockType::Invalid,
            data_length: BlockSize::ZERO,
        };
        assert!(matches!(Block::decode(&header, &[]), Err(Error::InvalidBlockType)));
    }

    #[test]
    fn test_picture_types() {
        assert_eq!(PictureType::from(3), PictureType::FrontCover);
        assert_eq!(PictureType::from(20), PictureType::PublisherLogo);
        assert_eq!(PictureType::from(21), PictureType::Undefined(21));
        assert_eq!(PictureType::FrontCover.to_string(), "Cover (front)");
    }
}
