//! Core types for decoded drum-machine patterns.
//!
//! The format parsers in `sp-formats` produce a [`Pattern`]; everything
//! needed to turn it back into the canonical text form lives here too.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod pattern;
mod render;
mod tempo;

pub use pattern::{Header, Pattern, StepGrid, Track, HEADER_LEN, STEPS, TRACK_ID_LEN};
pub use render::render;
pub use tempo::{Tempo, TempoTag, FRACTIONAL_TEMPO};
