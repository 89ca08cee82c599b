//! Header, track and pattern types.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::tempo::Tempo;

/// Size of the fixed header record in bytes.
pub const HEADER_LEN: usize = 50;

/// Size of the block that opens every track record.
pub const TRACK_ID_LEN: usize = 5;

/// Sixteenth-note steps per track: 4 beats of 4 steps.
pub const STEPS: usize = 16;

/// Fixed-layout file header. Read once, never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Title field (usually `SPLICE`, may carry padding)
    pub title: [u8; 6],
    /// Unused bytes following the title
    pub reserved: [u8; 7],
    /// Unused byte before the version string
    pub unknown: u8,
    /// Hardware version string, NUL-padded on the right
    pub version: [u8; 11],
    /// Packed tempo field, NUL-padded on the left
    pub tempo: [u8; 25],
}

impl Header {
    /// An all-zero header.
    pub const fn empty() -> Self {
        Self {
            title: [0; 6],
            reserved: [0; 7],
            unknown: 0,
            version: [0; 11],
            tempo: [0; 25],
        }
    }

    /// Title with trailing NUL padding removed.
    pub fn title(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(trim_trailing_nul(&self.title))
    }

    /// Version string with trailing NUL padding removed.
    pub fn version(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(trim_trailing_nul(&self.version))
    }

    /// Decode the packed tempo field.
    pub fn tempo(&self) -> Tempo {
        Tempo::decode(&self.tempo)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::empty()
    }
}

fn trim_trailing_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// One bar of sixteenth-note steps. `0x01` is a hit, anything else a rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepGrid(pub [u8; STEPS]);

impl StepGrid {
    /// Raw value marking a hit.
    pub const HIT: u8 = 0x01;

    /// Build a grid from hit flags.
    pub fn from_hits(hits: [bool; STEPS]) -> Self {
        let mut raw = [0u8; STEPS];
        for (byte, hit) in raw.iter_mut().zip(hits) {
            *byte = if hit { Self::HIT } else { 0 };
        }
        Self(raw)
    }

    /// Returns true if `step` is a hit.
    pub fn is_hit(&self, step: usize) -> bool {
        self.0[step] == Self::HIT
    }

    /// Hit flags in step order.
    pub fn hits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().map(|&b| b == Self::HIT)
    }

    pub fn as_bytes(&self) -> &[u8; STEPS] {
        &self.0
    }
}

/// One instrument line: id block, raw name and step grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// Identifier block; only the first byte (the numeric id) is meaningful
    pub id_block: [u8; TRACK_ID_LEN],
    /// Name bytes exactly as stored, without the terminating byte
    pub name: Vec<u8>,
    pub steps: StepGrid,
}

impl Track {
    pub fn new(id_block: [u8; TRACK_ID_LEN], name: Vec<u8>, steps: StepGrid) -> Self {
        Self { id_block, name, steps }
    }

    /// Numeric track id.
    pub fn id(&self) -> u8 {
        self.id_block[0]
    }

    /// Name as text. Invalid UTF-8 is replaced, valid bytes pass through untouched.
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// A decoded pattern file: display name, header and tracks in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Display name supplied by the caller (typically the file name)
    pub name: String,
    pub header: Header,
    pub tracks: Vec<Track>,
}

impl Pattern {
    pub fn new(name: &str, header: Header) -> Self {
        Self {
            name: String::from(name),
            header,
            tracks: Vec::new(),
        }
    }

    /// Append a track, preserving decode order.
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn tempo(&self) -> Tempo {
        self.header.tempo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_trimmed_on_the_right_only() {
        let mut header = Header::empty();
        header.version[..11].copy_from_slice(b"0.808-alpha");
        assert_eq!(header.version(), "0.808-alpha");

        header.version = *b"0.909\0\0\0\0\0\0";
        assert_eq!(header.version(), "0.909");
    }

    #[test]
    fn empty_version_renders_empty() {
        assert_eq!(Header::empty().version(), "");
    }

    #[test]
    fn step_grid_hits() {
        let mut raw = [0u8; STEPS];
        raw[0] = 0x01;
        raw[5] = 0x02;
        raw[15] = 0x01;
        let grid = StepGrid(raw);
        assert!(grid.is_hit(0));
        assert!(!grid.is_hit(5), "only 0x01 counts as a hit");
        assert!(grid.is_hit(15));
        assert_eq!(grid.hits().filter(|&h| h).count(), 2);
    }

    #[test]
    fn track_id_is_first_byte() {
        let track = Track::new([7, 0, 0, 0, 9], b"kick".to_vec(), StepGrid::default());
        assert_eq!(track.id(), 7);
        assert_eq!(track.name_lossy(), "kick");
    }

    #[test]
    fn tracks_keep_insertion_order() {
        let mut pattern = Pattern::new("p", Header::empty());
        for id in [3u8, 1, 2] {
            pattern.push_track(Track::new([id, 0, 0, 0, 0], Vec::new(), StepGrid::default()));
        }
        let ids: Vec<u8> = pattern.tracks.iter().map(Track::id).collect();
        assert_eq!(ids, alloc::vec![3, 1, 2]);
    }
}
