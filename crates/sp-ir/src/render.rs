//! Canonical text rendering of a decoded pattern.
//!
//! ```text
//! Saved with HW Version: 0.808-alpha
//! Tempo: 120
//! (0) kick	|x---|x---|x---|x---|
//! ```

use alloc::string::{String, ToString};
use core::fmt;

use crate::pattern::{Pattern, StepGrid, Track};

/// Steps between bar separators.
const STEPS_PER_BEAT: usize = 4;

/// Render a pattern to its canonical text form.
pub fn render(pattern: &Pattern) -> String {
    pattern.to_string()
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved with HW Version: {}", self.header.version())?;
        writeln!(f, "Tempo: {}", self.header.tempo())?;
        for track in &self.tracks {
            write!(f, "{}", track)?;
        }
        Ok(())
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}\t{}", self.id(), self.name_lossy(), self.steps)
    }
}

/// `|x---|x---|x---|x---|` followed by a newline.
impl fmt::Display for StepGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hit) in self.hits().enumerate() {
            if i % STEPS_PER_BEAT == 0 {
                f.write_str("|")?;
            }
            f.write_str(if hit { "x" } else { "-" })?;
        }
        f.write_str("|\n")
    }
}
