//! TerminalRenderer: puts composed lattice frames on a real terminal.
//!
//! Half-block cells carry two pixels each, so a running simulation changes
//! colors on most cells every step while the glyph stays `▀`. Output is
//! therefore driven by style changes: the frame is diffed against the one on
//! screen, and within each changed run only the color channels that differ
//! from the previous cell are re-sent.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    pending: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            pending: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.pending.clear();
        self.pending
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_pending()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.pending.clear();
        self.pending
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_pending()?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Redraw everything on the next frame (terminal resized or clobbered).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previously shown frame in its place.
    ///
    /// The host keeps one `FrameBuffer` and recomposes into whatever this
    /// returns, so steady-state frames never allocate.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.pending.clear();
        self.pending.queue(terminal::BeginSynchronizedUpdate)?;
        let mut previous = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, &mut self.pending)?;
                shown
            }
            _ => {
                encode_full_into(fb, &mut self.pending)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.pending.queue(terminal::EndSynchronizedUpdate)?;
        self.flush_pending()?;

        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.pending)
            .context("write frame to terminal")?;
        self.stdout.flush().context("flush terminal")
    }
}

/// Encode a clear-screen redraw of every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut writer = CellWriter::new(out);
    for y in 0..fb.height() {
        writer.run(fb, 0, y, fb.width())?;
    }
    writer.finish()
}

/// Encode only the runs of `next` that differ from `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut writer = CellWriter::new(out);
    for_each_changed_run(prev, next, |x, y, len| writer.run(next, x, y, len))?;
    writer.finish()
}

/// Queues cells and remembers the terminal's current style.
struct CellWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> CellWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    /// Write `len` cells of row `y` starting at column `x`.
    fn run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        let row = row_cells(fb, y);
        let start = (x as usize).min(row.len());
        let end = start.saturating_add(len as usize).min(row.len());
        if start == end {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in &row[start..end] {
            self.cell(cell)?;
        }
        Ok(())
    }

    fn cell(&mut self, cell: &Cell) -> Result<()> {
        let next = cell.style;
        match self.style {
            Some(cur) if cur.bold == next.bold => {
                if cur.fg != next.fg {
                    self.out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
                }
                if cur.bg != next.bg {
                    self.out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
                }
            }
            // Bold can only be cleared by a full attribute reset.
            _ => {
                self.out.queue(SetAttribute(Attribute::Reset))?;
                if next.bold {
                    self.out.queue(SetAttribute(Attribute::Bold))?;
                }
                self.out
                    .queue(SetForegroundColor(rgb_to_color(next.fg)))?
                    .queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
            }
        }
        self.style = Some(next);
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn row_cells(fb: &FrameBuffer, y: u16) -> &[Cell] {
    let w = fb.width() as usize;
    let start = (y as usize) * w;
    fb.cells().get(start..start + w).unwrap_or(&[])
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    for y in 0..next.height() {
        let (a, b) = (row_cells(prev, y), row_cells(next, y));
        let mut x = 0;
        while x < b.len() {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < b.len() && a[x] != b[x] {
                x += 1;
            }
            f(start as u16, y, (x - start) as u16)?;
        }
    }

    Ok(())
}
