#![allow(dead_code)]

//! Builds FLAC metadata sections in memory

pub const PICTURE_DATA: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// Assembles a FLAC metadata section block by block
#[derive(Default)]
pub struct Fixture {
    blocks: Vec<(u8, Vec<u8>)>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block_type: u8, payload: Vec<u8>) -> Self {
        self.blocks.push((block_type, payload));
        self
    }

    /// Builds the file, with the last-block flag set on the final block
    pub fn build(&self) -> Vec<u8> {
        let mut data = b"fLaC".to_vec();
        for (i, (block_type, payload)) in self.blocks.iter().enumerate() {
            let last = if i + 1 == self.blocks.len() { 0x80 } else { 0x00 };
            let size = (payload.len() as u32).to_be_bytes();
            data.push(last | block_type);
            data.extend(&size[1..]);
            data.extend(payload);
        }
        data
    }
}

pub fn streaminfo() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(4096u16.to_be_bytes());
    data.extend(4096u16.to_be_bytes());
    data.extend(&7822u32.to_be_bytes()[1..]);
    data.extend(&17848u32.to_be_bytes()[1..]);
    // 20-bit sample rate, 3-bit channels - 1, 5-bit bps - 1, 36-bit total samples
    data.extend(((88200u64 << 44) | (1 << 41) | (23 << 36) | 793287).to_be_bytes());
    data.extend(hex::decode("29499b5e67ae77df6f8491329c4deb93").unwrap());
    data
}

pub fn seektable(points: &[(u64, u64, u16)]) -> Vec<u8> {
    let mut data = Vec::new();
    for (sample, offset, samples) in points {
        data.extend(sample.to_be_bytes());
        data.extend(offset.to_be_bytes());
        data.extend(samples.to_be_bytes());
    }
    data
}

pub fn application(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = id.to_vec();
    data.extend(payload);
    data
}

pub fn vorbis_comment(vendor: &str, entries: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend((vendor.len() as u32).to_le_bytes());
    data.extend(vendor.as_bytes());
    data.extend((entries.len() as u32).to_le_bytes());
    for entry in entries {
        data.extend((entry.len() as u32).to_le_bytes());
        data.extend(entry.as_bytes());
    }
    data
}

pub struct Track {
    pub offset: u64,
    pub number: u8,
    pub non_audio: bool,
    pub pre_emphasis: bool,
    pub indices: Vec<(u64, u8)>,
}

impl Track {
    pub fn audio(offset: u64, number: u8, indices: &[(u64, u8)]) -> Self {
        Self {
            offset,
            number,
            non_audio: false,
            pre_emphasis: false,
            indices: indices.to_vec(),
        }
    }
}

pub fn cuesheet(catalog: &[u8], lead_in: u64, is_cdda: bool, tracks: &[Track]) -> Vec<u8> {
    let mut data = catalog.to_vec();
    data.resize(128, 0);
    data.extend(lead_in.to_be_bytes());
    data.push(u8::from(is_cdda) << 7);
    data.extend([0; 258]);
    data.push(tracks.len() as u8);
    for track in tracks {
        data.extend(track.offset.to_be_bytes());
        data.push(track.number);
        data.extend([0; 12]);
        data.push((u8::from(track.non_audio) << 7) | (u8::from(track.pre_emphasis) << 6));
        data.extend([0; 13]);
        data.push(track.indices.len() as u8);
        for (offset, number) in &track.indices {
            data.extend(offset.to_be_bytes());
            data.push(*number);
            data.extend([0; 3]);
        }
    }
    data
}

pub fn picture(picture_type: u32, media_type: &str, size: (u32, u32), image: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(picture_type.to_be_bytes());
    data.extend((media_type.len() as u32).to_be_bytes());
    data.extend(media_type.as_bytes());
    data.extend(0u32.to_be_bytes()); // no description
    data.extend(size.0.to_be_bytes());
    data.extend(size.1.to_be_bytes());
    data.extend(24u32.to_be_bytes());
    data.extend(0u32.to_be_bytes());
    data.extend((image.len() as u32).to_be_bytes());
    data.extend(image);
    data
}

/// A file laid out like a typical tagged FLAC file
pub fn sample() -> Vec<u8> {
    Fixture::new()
        .block(0, streaminfo())
        .block(3, seektable(&[(0, 0, 4096)]))
        .block(2, application(b"ATCH", b"C@K3"))
        .block(
            4,
            vorbis_comment("reference libFLAC 1.1.4 20070213", &["example=fish"]),
        )
        .block(
            5,
            cuesheet(
                &[],
                0,
                false,
                &[
                    Track::audio(0, 1, &[(0, 0)]),
                    Track::audio(3528, 2, &[(0, 0)]),
                    Track::audio(4704, 3, &[(0, 0)]),
                    Track::audio(793287, 255, &[]),
                ],
            ),
        )
        .block(6, picture(3, "image/jpeg", (2448, 3264), PICTURE_DATA))
        .block(1, vec![0; 7596])
        .build()
}
