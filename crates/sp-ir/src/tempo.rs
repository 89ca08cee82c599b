//! Packed tempo field decoding.
//!
//! The 25-byte tempo field is left-padded with NULs. After stripping the
//! padding, the last remaining byte is a tag that selects how the bytes in
//! front of it turn into beats per minute.

use core::fmt;

/// Format tag found in the last used byte of the tempo field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempoTag {
    /// `0x42` ('B')
    Half,
    /// `0x43` ('C')
    Offset,
    /// `0x44` ('D')
    Sum,
}

impl TempoTag {
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x42 => Some(TempoTag::Half),
            0x43 => Some(TempoTag::Offset),
            0x44 => Some(TempoTag::Sum),
            _ => None,
        }
    }

    pub const fn as_byte(self) -> u8 {
        match self {
            TempoTag::Half => 0x42,
            TempoTag::Offset => 0x43,
            TempoTag::Sum => 0x44,
        }
    }
}

/// Decoded tempo.
///
/// Every variant except [`Tempo::Fractional`] and [`Tempo::Unknown`] carries
/// an integer BPM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tempo {
    /// Tag `0x42` with exactly one byte before it: `byte / 2`.
    Half(u32),
    /// Tag `0x42` with any other number of used bytes.
    ///
    /// Always renders as the literal `98.4`. The multi-byte form under this
    /// tag is not decoded; this is the only value seen in the wild and no
    /// general formula is known.
    Fractional,
    /// Tag `0x43`: `(first_byte + 8) * 2`.
    Offset(u32),
    /// Tag `0x44`: `(sum of bytes before the tag + 20) * 3`.
    Sum(u32),
    /// Empty field or unrecognized tag. Renders as an empty string.
    Unknown,
}

/// Literal rendered for [`Tempo::Fractional`].
pub const FRACTIONAL_TEMPO: &str = "98.4";

impl Tempo {
    /// Decode a tempo field. Total: malformed input yields [`Tempo::Unknown`].
    pub fn decode(field: &[u8]) -> Self {
        let start = field.iter().position(|&b| b != 0).unwrap_or(field.len());
        let used = &field[start..];

        let Some((&tag, payload)) = used.split_last() else {
            return Tempo::Unknown;
        };

        match TempoTag::from_byte(tag) {
            Some(TempoTag::Half) if used.len() == 2 => Tempo::Half(used[0] as u32 / 2),
            Some(TempoTag::Half) => Tempo::Fractional,
            // A lone tag byte is its own first byte here.
            Some(TempoTag::Offset) => Tempo::Offset((used[0] as u32 + 8) * 2),
            Some(TempoTag::Sum) => {
                let sum: u32 = payload.iter().map(|&b| b as u32).sum();
                Tempo::Sum((sum + 20) * 3)
            }
            None => Tempo::Unknown,
        }
    }

    /// Integer BPM, if this tempo has one.
    pub fn bpm(self) -> Option<u32> {
        match self {
            Tempo::Half(v) | Tempo::Offset(v) | Tempo::Sum(v) => Some(v),
            Tempo::Fractional | Tempo::Unknown => None,
        }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tempo::Half(v) | Tempo::Offset(v) | Tempo::Sum(v) => write!(f, "{}", v),
            Tempo::Fractional => f.write_str(FRACTIONAL_TEMPO),
            Tempo::Unknown => Ok(()),
        }
    }
}
