// src/cli/display.rs

use std::io::Write;

/// The display surface the dispatcher writes to. Formatting happens in the
/// handlers; the surface only prints already-rendered blocks and clears.
pub trait DisplaySurface {
    fn print(&mut self, text: &str);
    fn clear(&mut self);
}

/// Stdout-backed display. Clearing uses the same ANSI escapes a terminal
/// `clear` performs (erase screen, cursor to 1;1).
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDisplay;

impl DisplaySurface for TerminalDisplay {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn clear(&mut self) {
        print!("\x1b[2J\x1b[1;1H");
        let _ = std::io::stdout().flush();
    }
}

/// Records output for assertions. Clears are recorded as a marker line so
/// tests can check that `cls` reached the surface.
#[cfg(test)]
#[derive(Debug)]
pub struct RecordingDisplay {
    lines: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl RecordingDisplay {
    pub const CLEAR_MARKER: &'static str = "<cls>";

    /// Returns the display and a shared handle onto everything it prints.
    pub fn new() -> (Self, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let lines = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        (Self { lines: lines.clone() }, lines)
    }
}

#[cfg(test)]
impl DisplaySurface for RecordingDisplay {
    fn print(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }

    fn clear(&mut self) {
        self.lines.borrow_mut().push(Self::CLEAR_MARKER.to_string());
    }
}
