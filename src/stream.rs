// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! For reading the metadata section of a FLAC stream
//!
//! Decoding proceeds through a fixed series of states:
//!
//! | State | Reads | Next State |
//! |------:|-------|------------|
//! | [`State::ExpectMarker`] | the `fLaC` marker | `ExpectStreamInfo` |
//! | [`State::ExpectStreamInfo`] | the STREAMINFO block | `ExpectMetadataBlock` or `Done` |
//! | [`State::ExpectMetadataBlock`] | any other block | itself or `Done` |
//! | [`State::Done`] | nothing | |
//!
//! Any error is terminal; no further blocks are read
//! and no partial [`Container`] is returned.

use crate::Error;
use crate::metadata::{
    Application, Block, BlockHeader, BlockType, CueSheet, Metadata, MetadataBlock, Padding,
    Picture, Reserved, SeekTable, StreamInfo, TypedBlock, VorbisComment,
};
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The marker at the start of every FLAC stream
pub const FLAC_TAG: &[u8; 4] = b"fLaC";

/// Where a decode currently stands
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum State {
    /// The `fLaC` marker has not been read
    ExpectMarker,
    /// The mandatory STREAMINFO block has not been read
    ExpectStreamInfo,
    /// Additional metadata blocks remain
    ExpectMetadataBlock,
    /// The final metadata block has been read
    Done,
}

/// Metadata decoding options
///
/// Limits are only checked between blocks,
/// so a block which has started decoding always finishes.
///
/// # Example
/// ```
/// use flac_meta::stream::Options;
/// use std::sync::{Arc, atomic::AtomicBool};
/// use std::time::Duration;
///
/// let cancel = Arc::new(AtomicBool::new(false));
///
/// let options = Options::default()
///     .timeout(Duration::from_secs(5))
///     .cancel_on(cancel.clone());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Options {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Options {
    /// Stops decoding with [`Error::DeadlineExceeded`]
    /// if the given instant passes
    pub fn deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Stops decoding with [`Error::DeadlineExceeded`]
    /// if decoding takes longer than the given duration from now
    pub fn timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.deadline(deadline),
            None => self,
        }
    }

    /// Stops decoding with [`Error::Cancelled`]
    /// once the given flag is set
    pub fn cancel_on(self, cancel: Arc<AtomicBool>) -> Self {
        Self {
            cancel: Some(cancel),
            ..self
        }
    }

    fn check(&self) -> Result<(), Error> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
        {
            Err(Error::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Err(Error::DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}

/// An iterator over FLAC metadata blocks
///
/// The STREAMINFO block is always yielded first.
/// After the first error, the iterator yields nothing more.
pub struct BlockIterator<R: std::io::Read> {
    reader: R,
    options: Options,
    state: State,
    failed: bool,
}

impl<R: std::io::Read> BlockIterator<R> {
    /// Creates an iterator over something that implements `Read`.
    /// Because this may perform many small reads,
    /// performance is greatly improved by buffering reads
    /// when reading from a raw `File`.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Options::default())
    }

    /// Creates an iterator with the given decoding options
    pub fn with_options(reader: R, options: Options) -> Self {
        Self {
            reader,
            options,
            state: State::ExpectMarker,
            failed: false,
        }
    }

    /// Our current decoding state
    ///
    /// Should an error occur, this remains at the state
    /// in which it occurred.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns our inner reader
    ///
    /// Once [`State::Done`] is reached, the reader
    /// is positioned at the first audio frame.
    pub fn into_reader(self) -> R {
        self.reader
    }

    fn read_marker(&mut self) -> Result<(), Error> {
        let mut tag = [0; 4];
        self.reader
            .read_exact(&mut tag)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::UnexpectedEof => Error::BadMarker,
                _ => Error::Io(err),
            })?;

        match &tag {
            FLAC_TAG => Ok(()),
            _ => Err(Error::BadMarker),
        }
    }

    fn read_block(&mut self) -> Result<MetadataBlock, Error> {
        self.options.check()?;

        let header = BlockHeader::read(&mut self.reader)?;
        log::trace!(
            "read {} block header, {} bytes, last={}",
            header.block_type,
            header.data_length,
            header.last
        );

        match (self.state, header.block_type) {
            (_, BlockType::Invalid) => return Err(Error::InvalidBlockType),
            (State::ExpectStreamInfo, BlockType::StreamInfo) => {}
            (State::ExpectStreamInfo, _) => return Err(Error::MissingStreamInfo),
            (_, BlockType::StreamInfo) => return Err(Error::MultipleStreamInfo),
            _ => {}
        }

        let size = u64::from(header.data_length.get());
        let mut payload = Vec::new();
        self.reader
            .by_ref()
            .take(size)
            .read_to_end(&mut payload)?;
        if (payload.len() as u64) < size {
            return Err(Error::TruncatedRead);
        }

        let block = Block::decode(&header, &payload)?;
        log::debug!("decoded {} block of {} bytes", header.block_type, size);

        Ok(MetadataBlock { header, block })
    }
}

impl<R: std::io::Read> Iterator for BlockIterator<R> {
    type Item = Result<MetadataBlock, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            // once we hit an error, stop any further reads
            return None;
        }

        let result = match self.state {
            State::Done => return None,
            State::ExpectMarker => match self.read_marker() {
                Ok(()) => {
                    self.state = State::ExpectStreamInfo;
                    return self.next();
                }
                Err(err) => Err(err),
            },
            State::ExpectStreamInfo | State::ExpectMetadataBlock => self.read_block(),
        };

        match result {
            Ok(block) => {
                self.state = match block.is_last() {
                    true => {
                        log::debug!("finished reading metadata blocks");
                        State::Done
                    }
                    false => State::ExpectMetadataBlock,
                };
                Some(Ok(block))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: std::io::Read> std::iter::FusedIterator for BlockIterator<R> {}

/// Returns iterator of blocks from the given reader
///
/// The reader should be positioned at the start of the FLAC
/// file.
///
/// Because this may perform many small reads,
/// using a buffered reader may greatly improve performance
/// when reading from a raw `File`.
///
/// # Example
///
/// ```
/// use flac_meta::stream::{read_blocks, State};
/// use flac_meta::metadata::{Block, BlockType};
///
/// let mut data = b"fLaC".to_vec();
/// data.extend([0x00, 0x00, 0x00, 0x22]);  // STREAMINFO header
/// data.extend([0x00; 10]);
/// data.extend([0x0a, 0xc4, 0x40, 0xf0]);  // 44100 Hz, 1 channel, 16 bps
/// data.extend([0x00; 20]);
/// data.extend([0x81, 0x00, 0x00, 0x04]);  // last PADDING header
/// data.extend([0x00; 4]);
///
/// let mut blocks = read_blocks(data.as_slice());
///
/// assert_eq!(
///     blocks.next().unwrap().unwrap().header.block_type,
///     BlockType::StreamInfo,
/// );
/// assert_eq!(blocks.state(), State::ExpectMetadataBlock);
///
/// let padding = blocks.next().unwrap().unwrap();
/// assert!(padding.is_last());
/// assert!(matches!(padding.block, Block::Padding(_)));
/// assert_eq!(blocks.state(), State::Done);
///
/// assert!(blocks.next().is_none());
/// ```
pub fn read_blocks<R: std::io::Read>(r: R) -> BlockIterator<R> {
    BlockIterator::new(r)
}

/// Returns iterator of blocks from the given reader
/// using the given decoding options
pub fn read_blocks_with<R: std::io::Read>(r: R, options: Options) -> BlockIterator<R> {
    BlockIterator::with_options(r, options)
}

/// The decoded metadata section of a FLAC file
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Container {
    /// The stream's marker
    pub marker: [u8; 4],
    /// The mandatory STREAMINFO block
    pub streaminfo: MetadataBlock<StreamInfo>,
    /// All blocks following STREAMINFO, in file order
    pub blocks: Vec<MetadataBlock>,
}

impl Container {
    /// Reads the metadata section from the given reader
    ///
    /// The reader is consumed and dropped once decoding
    /// finishes, whether or not decoding succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn read<R: std::io::Read>(reader: R) -> Result<Self, Error> {
        Self::read_with(reader, Options::default())
    }

    /// Reads the metadata section using the given decoding options
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn read_with<R: std::io::Read>(reader: R, options: Options) -> Result<Self, Error> {
        let mut blocks = read_blocks_with(reader, options);

        let streaminfo = match blocks.next() {
            Some(Ok(MetadataBlock {
                header,
                block: Block::StreamInfo(streaminfo),
            })) => MetadataBlock {
                header,
                block: streaminfo,
            },
            Some(Err(err)) => return Err(err),
            Some(Ok(_)) | None => return Err(Error::MissingStreamInfo),
        };

        Ok(Self {
            marker: *FLAC_TAG,
            streaminfo,
            blocks: blocks.collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// Reads the metadata section from a byte slice
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        Self::read(data)
    }

    /// Our STREAMINFO block
    pub fn streaminfo(&self) -> &StreamInfo {
        &self.streaminfo.block
    }

    /// Iterates over all blocks of the given type, in file order
    ///
    /// # Example
    /// ```
    /// use flac_meta::stream::Container;
    /// use flac_meta::metadata::Padding;
    ///
    /// let mut data = b"fLaC".to_vec();
    /// data.extend([0x00, 0x00, 0x00, 0x22]);
    /// data.extend([0x00; 10]);
    /// data.extend([0x0a, 0xc4, 0x40, 0xf0]);
    /// data.extend([0x00; 20]);
    /// data.extend([0x01, 0x00, 0x00, 0x02, 0x00, 0x00]);
    /// data.extend([0x81, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00]);
    ///
    /// let container = Container::parse(&data).unwrap();
    /// assert_eq!(
    ///     container.blocks_of::<Padding>().map(|p| p.size.get()).collect::<Vec<_>>(),
    ///     vec![2, 3],
    /// );
    /// ```
    pub fn blocks_of<'a, B: TypedBlock + 'a>(&'a self) -> impl Iterator<Item = &'a B> {
        self.blocks.iter().filter_map(|b| B::from_block(&b.block))
    }

    /// Returns the first block of the given type, if any
    pub fn block_of<'a, B: TypedBlock + 'a>(&'a self) -> Option<&'a B> {
        self.blocks_of().next()
    }

    /// Our SEEKTABLE block, if any
    pub fn seek_table(&self) -> Option<&SeekTable> {
        self.block_of()
    }

    /// Our VORBIS_COMMENT block, if any
    pub fn vorbis_comment(&self) -> Option<&VorbisComment> {
        self.block_of()
    }

    /// Our CUESHEET block, if any
    pub fn cue_sheet(&self) -> Option<&CueSheet> {
        self.block_of()
    }

    /// Our PICTURE blocks
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.blocks_of::<Picture>()
    }

    /// Our APPLICATION blocks
    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.blocks_of::<Application>()
    }

    /// Our PADDING blocks
    pub fn paddings(&self) -> impl Iterator<Item = &Padding> {
        self.blocks_of::<Padding>()
    }

    /// Our blocks of undefined types
    pub fn reserved(&self) -> impl Iterator<Item = &Reserved> {
        self.blocks_of::<Reserved>()
    }
}

impl Metadata for Container {
    fn channel_count(&self) -> u8 {
        self.streaminfo().channel_count()
    }

    fn sample_rate(&self) -> u32 {
        self.streaminfo().sample_rate()
    }

    fn bits_per_sample(&self) -> u32 {
        self.streaminfo().bits_per_sample()
    }

    fn total_samples(&self) -> Option<u64> {
        self.streaminfo().total_samples()
    }

    fn md5(&self) -> Option<&[u8; 16]> {
        self.streaminfo().md5()
    }
}
