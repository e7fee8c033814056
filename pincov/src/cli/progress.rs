//! Console spinner shown while a log is being consumed

use std::io::{self, Write};

const FRAMES: [char; 4] = ['-', '\\', '|', '/'];

/// Redraw interval in lines; one redraw per line is slower than parsing.
const LINES_PER_FRAME: usize = 4096;

/// Carriage-return spinner on stdout, kept off the report sink.
pub struct Spinner<W: Write> {
    out: W,
    frame: usize,
    enabled: bool,
}

impl Spinner<io::Stdout> {
    /// Spinner on stdout, silent when `enabled` is false.
    #[must_use]
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> Spinner<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, frame: 0, enabled }
    }

    /// Advance for line `line_no` (1-based).
    pub fn tick(&mut self, line_no: usize) {
        if !self.enabled || line_no.saturating_sub(1) % LINES_PER_FRAME != 0 {
            return;
        }
        write!(self.out, "{}\r", FRAMES[self.frame]).ok();
        self.out.flush().ok();
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Erase the spinner character.
    pub fn clear(&mut self) {
        if self.enabled {
            write!(self.out, " \r").ok();
            self.out.flush().ok();
        }
    }
}
