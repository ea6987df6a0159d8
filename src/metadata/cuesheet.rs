// Copyright 2025 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{BlockHeader, FromPayload};
use crate::Error;
use crate::cursor::{BitCursor, FromCursor, Text};
use bitstream_io::BigEndian;

/// A CUESHEET metadata block
///
/// A cue sheet stores a disc's original layout
/// for all the tracks it contains.
///
/// This block may occur only once in a FLAC file.
///
/// | Bits      | Field | Meaning |
/// |----------:|------:|---------|
/// | 128×8     | `catalog_number` | media catalog number, in ASCII
/// | 64        | `lead_in_samples` | number of lead-in samples
/// | 1         | `is_cdda` | whether cuesheet corresponds to CD-DA
/// | 7+258×8   | padding | all 0 bits
/// | 8         | track count | number of cuesheet tracks
/// |           | `tracks` | cuesheet track₀, cuesheet track₁, …
///
/// The catalog number is kept exactly as stored,
/// including any NUL padding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CueSheet {
    /// Media catalog number
    pub catalog_number: Text,
    /// Number of lead-in samples
    ///
    /// Only meaningful for CD-DA cue sheets.
    pub lead_in_samples: u64,
    /// Whether the cue sheet corresponds to a compact disc
    pub is_cdda: bool,
    /// The cue sheet's tracks, including the lead-out track
    pub tracks: Vec<CueSheetTrack>,
}

impl CueSheet {
    /// Size of the catalog number field, in bytes
    pub const CATALOG_NUMBER_SIZE: usize = 128;

    /// Lead-out track number for CD-DA cue sheets
    pub const LEAD_OUT_CDDA: u8 = 170;

    /// Lead-out track number for non-CD-DA cue sheets
    pub const LEAD_OUT_NON_CDDA: u8 = 255;

    /// Returns the cue sheet's lead-out track, if present
    pub fn lead_out(&self) -> Option<&CueSheetTrack> {
        let number = match self.is_cdda {
            true => Self::LEAD_OUT_CDDA,
            false => Self::LEAD_OUT_NON_CDDA,
        };
        self.tracks.last().filter(|t| t.track_number == number)
    }

    /// Iterates over all tracks except the lead-out
    pub fn audio_tracks(&self) -> impl Iterator<Item = &CueSheetTrack> {
        let lead_out = usize::from(self.lead_out().is_some());
        self.tracks[..self.tracks.len() - lead_out].iter()
    }

    /// Returns the track with the given track number, if any
    pub fn track(&self, track_number: u8) -> Option<&CueSheetTrack> {
        self.tracks.iter().find(|t| t.track_number == track_number)
    }
}

impl FromPayload for CueSheet {
    type Endianness = BigEndian;

    fn from_payload(c: &mut BitCursor<'_, BigEndian>, _: &BlockHeader) -> Result<Self, Error> {
        let catalog_number = c.read_text(Self::CATALOG_NUMBER_SIZE as u64 * 8)?;
        let lead_in_samples = c.read::<64, _>()?;
        let is_cdda = c.read_bit()?;
        c.skip(7 + 258 * 8)?;
        let track_count = c.read::<8, u8>()?;

        Ok(Self {
            catalog_number,
            lead_in_samples,
            is_cdda,
            tracks: (0..track_count)
                .map(|_| c.parse())
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// An individual CUESHEET track
///
/// | Bits  | Field | Meaning |
/// |------:|------:|---------|
/// | 64    | `offset` | offset of first index point, in samples
/// | 8     | `track_number` | track number
/// | 12×8  | `isrc` | track's ISRC, in ASCII
/// | 1     | non-audio | whether track is non-audio
/// | 1     | `pre_emphasis` | whether track has pre-emphasis
/// | 6+13×8 | padding | all 0 bits
/// | 8     | index count | number of index points
/// |       | `indices` | index point₀, index point₁, …
///
/// The flag stored on disc marks *non*-audio tracks,
/// so `is_audio` is `true` when that bit is 0.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CueSheetTrack {
    /// Offset of first index point
    ///
    /// In samples relative to the beginning of the FLAC audio stream.
    pub offset: u64,
    /// Track number
    pub track_number: u8,
    /// Track's ISRC, possibly all NUL bytes
    pub isrc: Text,
    /// Whether track contains audio
    pub is_audio: bool,
    /// Whether track has pre-emphasis
    pub pre_emphasis: bool,
    /// Track's index points, in stored order
    pub indices: Vec<CueSheetTrackIndex>,
}

impl CueSheetTrack {
    /// Size of the ISRC field, in bytes
    pub const ISRC_SIZE: usize = 12;

    /// Returns the index point with the given number, if any
    pub fn index(&self, index_number: u8) -> Option<&CueSheetTrackIndex> {
        self.indices.iter().find(|i| i.index_number == index_number)
    }
}

impl FromCursor<BigEndian> for CueSheetTrack {
    fn from_cursor(c: &mut BitCursor<'_, BigEndian>) -> Result<Self, Error> {
        let offset = c.read::<64, _>()?;
        let track_number = c.read::<8, _>()?;
        let isrc = c.read_text(Self::ISRC_SIZE as u64 * 8)?;
        let is_audio = !c.read_bit()?;
        let pre_emphasis = c.read_bit()?;
        c.skip(6 + 13 * 8)?;
        let index_count = c.read::<8, u8>()?;

        Ok(Self {
            offset,
            track_number,
            isrc,
            is_audio,
            pre_emphasis,
            indices: (0..index_count)
                .map(|_| c.parse())
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// An individual CUESHEET track index point
///
/// | Bits | Field | Meaning |
/// |-----:|------:|---------|
/// | 64   | `offset` | index point offset, in samples
/// | 8    | `index_number` | index point number
/// | 3×8  | padding  | all 0 bits
///
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CueSheetTrackIndex {
    /// Offset in samples from beginning of track
    pub offset: u64,
    /// Track index point number
    pub index_number: u8,
}

impl FromCursor<BigEndian> for CueSheetTrackIndex {
    fn from_cursor(c: &mut BitCursor<'_, BigEndian>) -> Result<Self, Error> {
        let offset = c.read::<64, _>()?;
        let index_number = c.read::<8, _>()?;
        c.skip(3 * 8)?;
        Ok(Self {
            offset,
            index_number,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metadata::{BlockSize, BlockType};

    fn track(offset: u64, number: u8, flags: u8, indices: &[(u64, u8)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(offset.to_be_bytes());
        data.push(number);
        data.extend([0; 12]);
        data.push(flags);
        data.extend([0; 13]);
        data.push(indices.len() as u8);
        for (offset, number) in indices {
            data.extend(offset.to_be_bytes());
            data.push(*number);
            data.extend([0; 3]);
        }
        data
    }

    fn cuesheet(catalog: &[u8], is_cdda: bool, tracks: &[Vec<u8>]) -> Vec<u8> {
        let mut data = catalog.to_vec();
        data.resize(128, 0);
        data.extend(88200u64.to_be_bytes());
        data.push(if is_cdda { 0x80 } else { 0x00 });
        data.extend([0; 258]);
        data.push(tracks.len() as u8);
        for track in tracks {
            data.extend(track);
        }
        data
    }

    fn decode(data: &[u8]) -> Result<CueSheet, Error> {
        CueSheet::decode(
            &BlockHeader {
                last: false,
                block_type: BlockType::CueSheet,
                data_length: BlockSize::try_from(data.len()).unwrap(),
            },
            data,
        )
    }

    #[test]
    fn test_cuesheet() {
        let data = cuesheet(
            b"1234567890123",
            true,
            &[
                track(0, 1, 0b00_000000, &[(0, 1)]),
                track(588 * 10, 2, 0b01_000000, &[(0, 0), (588, 1)]),
                track(588 * 20, 3, 0b10_000000, &[(0, 1)]),
                track(588 * 30, 170, 0b00_000000, &[]),
            ],
        );
        assert_eq!(data.len(), 396 + 36 * 4 + 12 * 4);

        let cuesheet = decode(&data).unwrap();
        assert_eq!(cuesheet.catalog_number.len(), 128);
        assert_eq!(cuesheet.catalog_number.trim_nulls(), b"1234567890123");
        assert_eq!(cuesheet.lead_in_samples, 88200);
        assert!(cuesheet.is_cdda);
        assert_eq!(cuesheet.tracks.len(), 4);

        let track1 = cuesheet.track(1).unwrap();
        assert!(track1.is_audio);
        assert!(!track1.pre_emphasis);
        assert_eq!(track1.isrc.as_bytes(), &[0; 12]);

        let track2 = cuesheet.track(2).unwrap();
        assert!(track2.is_audio);
        assert!(track2.pre_emphasis);
        assert_eq!(track2.offset, 5880);
        assert_eq!(
            track2.indices,
            vec![
                CueSheetTrackIndex {
                    offset: 0,
                    index_number: 0
                },
                CueSheetTrackIndex {
                    offset: 588,
                    index_number: 1
                },
            ]
        );
        assert_eq!(track2.index(1).unwrap().offset, 588);

        let track3 = cuesheet.track(3).unwrap();
        assert!(!track3.is_audio);
        assert!(!track3.pre_emphasis);

        let lead_out = cuesheet.lead_out().unwrap();
        assert_eq!(lead_out.offset, 588 * 30);
        assert!(lead_out.indices.is_empty());
        assert_eq!(cuesheet.audio_tracks().count(), 3);
    }

    #[test]
    fn test_non_cdda() {
        let data = cuesheet(b"", false, &[track(0, 1, 0, &[(0, 1)])]);
        let cuesheet = decode(&data).unwrap();
        assert!(!cuesheet.is_cdda);
        assert!(cuesheet.lead_out().is_none());
        assert_eq!(cuesheet.audio_tracks().count(), 1);
    }

    #[test]
    fn test_truncated_track() {
        let mut data = cuesheet(b"", true, &[track(0, 1, 0, &[(0, 1)])]);
        data.truncate(data.len() - 1);
        assert!(matches!(decode(&data), Err(Error::TruncatedRead)));
    }
}
