//! Press configuration
//!
//! Defaults reproduce the production setup: assets under `assets/`, the
//! Chewy font, a 4x4 print grid and generated files under `generated/`.
//! A TOML file can override any field:
//!
//! ```toml
//! assets_dir = "/srv/cards/assets"
//! batch_size = 11
//!
//! [layout]
//! kind = "grid"
//! rows = 4
//! cols = 4
//!
//! [font]
//! kind = "block"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::rendering::SheetLayout;
use crate::{Error, Result};

/// Where the font used for card text comes from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// A TrueType/OpenType file, relative paths resolve against `assets_dir`
    TrueType { path: PathBuf },
    /// The built-in block face (no font file needed)
    Block,
}

impl Default for FontSource {
    fn default() -> Self {
        FontSource::TrueType {
            path: PathBuf::from("fonts/Chewy-Regular.ttf"),
        }
    }
}

/// Template asset locations. Relative paths resolve against `assets_dir`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub assets_dir: PathBuf,
    /// Card outline painted in the contour marker color
    pub contour: PathBuf,
    /// Rule drawn under the recto title
    pub separator: PathBuf,
    /// Logo on the verso
    pub logo: PathBuf,
    /// One difficulty pip painted in the glyph marker color (white)
    pub difficulty_glyph: PathBuf,
    pub font: FontSource,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            contour: PathBuf::from("Contour.png"),
            separator: PathBuf::from("CardSeparator2X.png"),
            logo: PathBuf::from("Logo2X.png"),
            difficulty_glyph: PathBuf::from("Difficulty10X.png"),
            font: FontSource::default(),
        }
    }
}

impl AssetConfig {
    /// Assets found in `dir` under their default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir.join(path)
        }
    }
}

/// Configuration for a [`crate::CardPress`]
///
/// The defaults match the production print shop:
/// - 4x4 sheets, 16 cards per batch
/// - JPEG quality 90
/// - per-card PNG cache enabled
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    #[serde(flatten)]
    pub assets: AssetConfig,
    /// Per-card PNG cache (`card_{id}_{face}.png`)
    pub cache_dir: PathBuf,
    /// Whether rendered faces are cached on disk
    pub cache_enabled: bool,
    /// Sheet JPEGs (`cards_{start}_{end}_{face}.jpeg`)
    pub prints_dir: PathBuf,
    /// Print run archives
    pub archive_dir: PathBuf,
    pub layout: SheetLayout,
    /// Cards per sheet; `None` uses the layout capacity
    pub batch_size: Option<u32>,
    pub jpeg_quality: u8,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            assets: AssetConfig::default(),
            cache_dir: PathBuf::from("generated/cards"),
            cache_enabled: true,
            prints_dir: PathBuf::from("generated/prints"),
            archive_dir: PathBuf::from("generated"),
            layout: SheetLayout::default(),
            batch_size: None,
            jpeg_quality: 90,
        }
    }
}

impl PressConfig {
    /// Read a TOML config file. Missing fields keep their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: PressConfig = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Put every generated file under `root`
    pub fn with_output_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.cache_dir = root.join("cards");
        self.prints_dir = root.join("prints");
        self.archive_dir = root.to_path_buf();
        self
    }

    /// Effective number of cards per sheet
    pub fn effective_batch_size(&self) -> u32 {
        self.batch_size.unwrap_or_else(|| self.layout.capacity())
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        let batch = self.effective_batch_size();
        if batch == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if batch > self.layout.capacity() {
            return Err(Error::Config(format!(
                "batch_size {} exceeds the {} slots of layout {}",
                batch,
                self.layout.capacity(),
                self.layout
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
