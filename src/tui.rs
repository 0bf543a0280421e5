use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Plain-text terminal output that redraws the whole screen on every frame.
pub struct Screen<W: Write> {
    out: W,
}

impl Screen<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    /// Clears the screen and writes `frame` in a single flush.
    pub fn draw(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Print(frame))?;
        self.out.flush()
    }

    /// Clears the screen and leaves `message` as the only output.
    pub fn exit_with(&mut self, message: &str) -> io::Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
