#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Torus Life adapters.
//!
//! Adapters build a [`Scene`] snapshot from world queries and hand it to a
//! [`FramePresenter`] backend. The contracts know nothing about terminals or
//! windows; backends live with the adapters that own the output device.

use std::{error::Error, fmt};

use anyhow::Result as AnyResult;
use torus_life_core::Cell;

/// Glyphs used when presenting a scene as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphStyle {
    /// Glyph drawn for an alive cell.
    pub alive: char,
    /// Glyph drawn for a dead cell.
    pub dead: char,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            alive: '*',
            dead: ' ',
        }
    }
}

/// Immutable snapshot of the grid prepared for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    rows: u32,
    columns: u32,
    generation: u64,
    alive: Vec<bool>,
}

impl Scene {
    /// Creates a scene from row-major alive flags.
    ///
    /// The flag count must match the dimensions exactly.
    pub fn new(
        rows: u32,
        columns: u32,
        generation: u64,
        alive: Vec<bool>,
    ) -> Result<Self, SceneError> {
        let expected = rows as usize * columns as usize;
        if alive.len() != expected {
            return Err(SceneError::CellCountMismatch {
                expected,
                received: alive.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            generation,
            alive,
        })
    }

    /// Creates a scene from a row-major cell iterator.
    pub fn from_cells<'a, I>(
        rows: u32,
        columns: u32,
        generation: u64,
        cells: I,
    ) -> Result<Self, SceneError>
    where
        I: Iterator<Item = &'a Cell>,
    {
        Self::new(
            rows,
            columns,
            generation,
            cells.map(Cell::is_alive).collect(),
        )
    }

    /// Scene dimensions as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Generation index the snapshot was taken at.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Renders the scene as newline-terminated rows of glyphs.
    ///
    /// Each cell is followed by a space so neighboring glyphs stay legible in
    /// a terminal's tall character grid.
    #[must_use]
    pub fn render_with(&self, style: GlyphStyle) -> String {
        let columns = self.columns as usize;
        let mut out = String::with_capacity(self.alive.len() * 2 + self.rows as usize);
        for (index, alive) in self.alive.iter().enumerate() {
            out.push(if *alive { style.alive } else { style.dead });
            out.push(' ');
            if index % columns == columns - 1 {
                out.push('\n');
            }
        }
        out
    }
}

/// Rendering backend capable of presenting Torus Life scenes.
pub trait FramePresenter {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur while constructing scenes.
#[derive(Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The provided alive flags do not cover the grid exactly.
    CellCountMismatch {
        /// Number of flags the dimensions call for.
        expected: usize,
        /// Number of flags actually provided.
        received: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCountMismatch { expected, received } => {
                write!(
                    f,
                    "scene requires exactly {expected} cell flags (received {received})"
                )
            }
        }
    }
}

impl Error for SceneError {}
