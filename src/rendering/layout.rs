/// Print sheet geometry
///
/// A sheet is a 1691x2178 canvas holding card faces at fixed anchors. The
/// anchor of a face depends only on its 1-based slot within the batch.
/// Recto columns run left to right; verso columns are mirrored so that a
/// duplex print lines fronts up with their backs.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::{Face, FACE_SIZE};
use crate::{Error, Result};

pub const SHEET_WIDTH: u32 = 1691;
pub const SHEET_HEIGHT: u32 = 2178;
/// Distance from the top edge to the first row of faces
pub const SHEET_TOP_MARGIN: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Arrangement of faces on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SheetLayout {
    /// `rows` x `cols` grid, filled row by row
    Grid { rows: u32, cols: u32 },
    /// A single row of `slots` faces
    Row { slots: u32 },
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::Grid { rows: 4, cols: 4 }
    }
}

impl SheetLayout {
    fn dims(&self) -> (u32, u32) {
        match *self {
            SheetLayout::Grid { rows, cols } => (rows, cols),
            SheetLayout::Row { slots } => (1, slots),
        }
    }

    /// Number of faces a sheet can hold. Saturates for layouts too large to
    /// pass [`SheetLayout::validate`].
    pub fn capacity(&self) -> u32 {
        let (rows, cols) = self.dims();
        rows.saturating_mul(cols)
    }

    /// Check that every anchor keeps its face inside the sheet
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.dims();
        if rows == 0 || cols == 0 {
            return Err(Error::Config(format!("layout {} has no slots", self)));
        }
        if SHEET_WIDTH / cols < FACE_SIZE {
            return Err(Error::Config(format!(
                "layout {}: {} columns of {}px faces do not fit in {}px",
                self, cols, FACE_SIZE, SHEET_WIDTH
            )));
        }
        if SHEET_HEIGHT / rows < FACE_SIZE {
            return Err(Error::Config(format!(
                "layout {}: {} rows of {}px faces do not fit in {}px",
                self, rows, FACE_SIZE, SHEET_HEIGHT
            )));
        }
        let last_row_bottom = SHEET_TOP_MARGIN + (SHEET_HEIGHT / rows) * (rows - 1) + FACE_SIZE;
        if last_row_bottom > SHEET_HEIGHT {
            return Err(Error::Config(format!(
                "layout {}: {} rows overflow the {}px sheet",
                self, rows, SHEET_HEIGHT
            )));
        }
        Ok(())
    }

    /// Top-left corner of the face in 1-based `slot` for `face`
    pub fn anchor(&self, face: Face, slot: u32) -> Result<(u32, u32)> {
        self.validate()?;
        let (rows, cols) = self.dims();
        if slot == 0 || slot > self.capacity() {
            return Err(Error::InvalidInput(format!(
                "slot {} outside layout {} (1..={})",
                slot,
                self,
                self.capacity()
            )));
        }
        let col = (slot - 1) % cols;
        let row = (slot - 1) / cols;
        let column_right = (SHEET_WIDTH / cols) * (col + 1);
        let x = match face {
            Face::Recto => column_right - FACE_SIZE,
            Face::Verso => SHEET_WIDTH - column_right,
        };
        let y = SHEET_TOP_MARGIN + (SHEET_HEIGHT / rows) * row;
        Ok((x, y))
    }

    /// Area covered by the face in `slot`
    pub fn slot_rect(&self, face: Face, slot: u32) -> Result<Rect> {
        let (x, y) = self.anchor(face, slot)?;
        Ok(Rect {
            x,
            y,
            width: FACE_SIZE,
            height: FACE_SIZE,
        })
    }
}

impl fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetLayout::Grid { rows, cols } => write!(f, "{}x{}", rows, cols),
            SheetLayout::Row { slots } => write!(f, "row:{}", slots),
        }
    }
}

impl FromStr for SheetLayout {
    type Err = Error;

    /// `4x4` for a grid of rows x cols, `row:3` for a single row
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| Error::Config(format!("invalid layout {:?}", s)))
        };
        let layout = if let Some(n) = s.strip_prefix("row:") {
            SheetLayout::Row { slots: parse(n)? }
        } else if let Some((rows, cols)) = s.split_once('x') {
            SheetLayout::Grid {
                rows: parse(rows)?,
                cols: parse(cols)?,
            }
        } else {
            return Err(Error::Config(format!("invalid layout {:?}", s)));
        };
        layout.validate()?;
        Ok(layout)
    }
}
