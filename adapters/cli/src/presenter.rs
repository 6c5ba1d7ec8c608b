use std::io::Write;

use anyhow::{Context, Result};
use torus_life_rendering::{FramePresenter, GlyphStyle, Scene};

const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[1;1H";

/// Terminal backend that repaints frames in place with ANSI cursor control.
pub(crate) struct AnsiPresenter<W: Write> {
    out: W,
    style: GlyphStyle,
}

impl<W: Write> AnsiPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            style: GlyphStyle::default(),
        }
    }

    /// Clears the terminal once before the first frame.
    pub(crate) fn clear(&mut self) -> Result<()> {
        write!(self.out, "{CLEAR_SCREEN}").context("failed to clear the terminal")
    }
}

impl<W: Write> FramePresenter for AnsiPresenter<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        write!(self.out, "{CURSOR_HOME}").context("failed to home the cursor")?;
        write!(self.out, "{}", scene.render_with(self.style))
            .context("failed to write the frame")?;
        writeln!(self.out, "generation {}", scene.generation())
            .context("failed to write the frame footer")?;
        self.out.flush().context("failed to flush the frame")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_homes_the_cursor_and_writes_glyph_rows() {
        let mut sink = Vec::new();
        let scene = Scene::new(1, 3, 2, vec![true, false, true]).expect("matching flag count");

        {
            let mut presenter = AnsiPresenter::new(&mut sink);
            presenter.clear().expect("clear succeeds");
            presenter.present(&scene).expect("present succeeds");
        }

        let output = String::from_utf8(sink).expect("valid utf-8");
        assert_eq!(output, "\x1b[2J\x1b[1;1H*   * \ngeneration 2\n");
    }
}
