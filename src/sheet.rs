//! Print sheets: one batch of cards tiled on a recto and a verso canvas.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use log::{info, warn};

use crate::catalog::{Card, CardType};
use crate::rendering::layout::{SHEET_HEIGHT, SHEET_WIDTH};
use crate::rendering::{face, paint, raster, Assets, Face, SheetLayout};
use crate::{Error, Result};

/// File name of one side of the sheet for ids `start..=end`
pub fn sheet_file_name(start: u32, end: u32, face: Face) -> String {
    format!("cards_{}_{}_{}.jpeg", start, end, face)
}

/// A composed pair of sheets
#[derive(Debug, Clone)]
pub struct PrintSheet {
    /// Requested id range of the batch, inclusive
    pub start: u32,
    pub end: u32,
    pub layout: SheetLayout,
    /// Card ids in slot order (slot 1 first)
    pub card_ids: Vec<u32>,
    pub recto: RgbaImage,
    pub verso: RgbaImage,
}

/// One encoded sheet side
#[derive(Debug, Clone)]
pub struct EncodedSheet {
    pub face: Face,
    pub file_name: String,
    pub jpeg: Vec<u8>,
}

impl PrintSheet {
    /// Render both faces of every card in `batch` and tile them.
    ///
    /// Cards are placed by ascending id; the first card takes slot 1. All
    /// ids must lie in `start..=end` and the batch must fit the layout.
    pub fn compose(
        assets: &Assets,
        start: u32,
        end: u32,
        mut batch: Vec<(Card, CardType)>,
        layout: SheetLayout,
    ) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        layout.validate()?;
        if batch.len() > layout.capacity() as usize {
            return Err(Error::InvalidInput(format!(
                "{} cards do not fit on a {} sheet",
                batch.len(),
                layout
            )));
        }
        if let Some((card, _)) = batch.iter().find(|(c, _)| c.id < start || c.id > end) {
            return Err(Error::InvalidInput(format!(
                "card {} outside sheet range {}..={}",
                card.id, start, end
            )));
        }
        batch.sort_by_key(|(card, _)| card.id);
        if batch.is_empty() {
            warn!("No cards in {}..={}, sheet stays blank", start, end);
        }

        let mut recto = blank_sheet();
        let mut verso = blank_sheet();
        let mut card_ids = Vec::with_capacity(batch.len());
        for (slot, (card, card_type)) in (1u32..).zip(batch.iter()) {
            let front = face::generate_recto_card(assets, card, card_type)?;
            let back = face::generate_verso_card(assets, card, card_type)?;
            let (rx, ry) = layout.anchor(Face::Recto, slot)?;
            let (vx, vy) = layout.anchor(Face::Verso, slot)?;
            paint::paste(&mut recto, &front.image, rx as i64, ry as i64);
            paint::paste(&mut verso, &back.image, vx as i64, vy as i64);
            card_ids.push(card.id);
        }

        Ok(Self {
            start,
            end,
            layout,
            card_ids,
            recto,
            verso,
        })
    }

    pub fn canvas(&self, face: Face) -> &RgbaImage {
        match face {
            Face::Recto => &self.recto,
            Face::Verso => &self.verso,
        }
    }

    /// Convert both sides to CMYK JPEG, recto first
    pub fn encode(&self, quality: u8) -> Result<[EncodedSheet; 2]> {
        let encode = |face: Face| -> Result<EncodedSheet> {
            Ok(EncodedSheet {
                face,
                file_name: sheet_file_name(self.start, self.end, face),
                jpeg: raster::encode_cmyk_jpeg(self.canvas(face), quality)?,
            })
        };
        Ok([encode(Face::Recto)?, encode(Face::Verso)?])
    }

    /// Encode and write both sides into `dir`, returning the written paths
    pub fn save(&self, dir: &Path, quality: u8) -> Result<[PathBuf; 2]> {
        let [recto, verso] = self.encode(quality)?;
        Ok([write_sheet(dir, &recto)?, write_sheet(dir, &verso)?])
    }
}

pub(crate) fn write_sheet(dir: &Path, sheet: &EncodedSheet) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&sheet.file_name);
    fs::write(&path, &sheet.jpeg)?;
    info!("Wrote {} ({} bytes)", path.display(), sheet.jpeg.len());
    Ok(path)
}

fn blank_sheet() -> RgbaImage {
    RgbaImage::from_pixel(SHEET_WIDTH, SHEET_HEIGHT, Rgba([255, 255, 255, 255]))
}
