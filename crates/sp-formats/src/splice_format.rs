//! Splice drum-machine pattern parser.
//!
//! Layout: a fixed 50-byte header, then track records until end of input
//! or a sentinel id block. Each track is a 5-byte id block, a name running
//! up to the first `0x00`/`0x01` byte, and a 16-byte step grid that starts
//! with that byte.

use binrw::io::Cursor;
use binrw::BinRead;
use sp_ir::{Header, Pattern, StepGrid, Track, HEADER_LEN, STEPS, TRACK_ID_LEN};
use tracing::{debug, trace};

use crate::byte_reader::ByteReader;
use crate::{DecodeError, ReadError};

/// Leading id byte (`'S'`) that ends the track list early.
pub const SENTINEL: u8 = 0x53;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[derive(BinRead)]
#[br(little)]
struct RawHeader {
    title: [u8; 6],
    reserved: [u8; 7],
    unknown: u8,
    version: [u8; 11],
    tempo: [u8; 25],
}

impl From<RawHeader> for Header {
    fn from(raw: RawHeader) -> Self {
        Header {
            title: raw.title,
            reserved: raw.reserved,
            unknown: raw.unknown,
            version: raw.version,
            tempo: raw.tempo,
        }
    }
}

fn read_header(reader: &mut ByteReader<'_>) -> Result<Header, DecodeError> {
    let bytes = reader
        .read_exact::<HEADER_LEN>()
        .map_err(DecodeError::TruncatedHeader)?;
    // Exactly HEADER_LEN bytes of fixed arrays, so the field mapping cannot run short.
    let raw = RawHeader::read(&mut Cursor::new(&bytes[..])).map_err(|_| {
        DecodeError::TruncatedHeader(ReadError::Truncated {
            wanted: HEADER_LEN,
            available: bytes.len(),
        })
    })?;
    Ok(raw.into())
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

/// Why the track list ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EndOfTracks {
    /// Input ran out exactly at a record boundary
    EndOfInput,
    /// A sentinel id block was consumed
    Sentinel,
}

/// Outcome of reading the next track id block.
#[derive(Debug)]
enum NextTrack {
    Track([u8; TRACK_ID_LEN]),
    End(EndOfTracks),
}

fn next_track(reader: &mut ByteReader<'_>) -> Result<NextTrack, DecodeError> {
    let offset = reader.position();
    match reader.read_exact::<TRACK_ID_LEN>() {
        Ok(block) if block[0] == SENTINEL => Ok(NextTrack::End(EndOfTracks::Sentinel)),
        Ok(block) => Ok(NextTrack::Track(block)),
        Err(ReadError::EndOfInput) => Ok(NextTrack::End(EndOfTracks::EndOfInput)),
        Err(source) => Err(DecodeError::CorruptTrackHeader { offset, source }),
    }
}

/// Scan a name up to (not including) the first `0x00`/`0x01` byte.
/// The stop byte is pushed back for the step grid.
fn read_name(reader: &mut ByteReader<'_>) -> Result<Vec<u8>, DecodeError> {
    let offset = reader.position();
    let mut name = Vec::new();
    loop {
        let b = reader
            .read_u8()
            .map_err(|_| DecodeError::UnterminatedName { offset })?;
        if b == 0x00 || b == 0x01 {
            reader.push_back(b);
            return Ok(name);
        }
        name.push(b);
    }
}

fn read_track(reader: &mut ByteReader<'_>, id_block: [u8; TRACK_ID_LEN]) -> Result<Track, DecodeError> {
    let name = read_name(reader)?;
    let steps = reader
        .read_exact::<STEPS>()
        .map_err(|source| DecodeError::TruncatedStepGrid { track: id_block[0], source })?;
    Ok(Track::new(id_block, name, StepGrid(steps)))
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Decode a pattern from `reader`, labelling it `name`.
///
/// Nothing partial is returned: any error discards the tracks read so far.
pub fn decode(reader: &mut ByteReader<'_>, name: &str) -> Result<Pattern, DecodeError> {
    let header = read_header(reader)?;
    debug!(name, version = %header.version(), tempo = %header.tempo(), "decoded header");

    let mut pattern = Pattern::new(name, header);
    loop {
        match next_track(reader)? {
            NextTrack::Track(id_block) => {
                let track = read_track(reader, id_block)?;
                trace!(id = track.id(), name = %track.name_lossy(), "decoded track");
                pattern.push_track(track);
            }
            NextTrack::End(reason) => {
                debug!(?reason, tracks = pattern.tracks.len(), offset = reader.position(), "end of tracks");
                break;
            }
        }
    }

    Ok(pattern)
}

/// Decode a pattern held entirely in memory.
pub fn decode_bytes(data: &[u8], name: &str) -> Result<Pattern, DecodeError> {
    decode(&mut ByteReader::new(data), name)
}
