//! Cardpress
//!
//! Card face compositor and print-sheet layout engine for a card game
//! catalog. Card faces are built from a handful of template images that are
//! recolored per card type; print runs tile those faces onto duplex sheets
//! and ship them as a `tar.gz` archive.
//!
//! # Features
//!
//! - **Exact color remapping** of template assets, no tolerance
//! - **Recto and verso faces** at 400x400 with measured, centered text
//! - **Print sheets** laid out on an explicit [`SheetLayout`], CMYK JPEG output
//! - **Face cache** on disk, kept consistent by the typed catalog operations
//!
//! # Example
//!
//! ```no_run
//! use cardpress::{Face, MemoryCatalog, PressConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = MemoryCatalog::load_json("catalog.json".as_ref())?;
//! let press = cardpress::new_press(PressConfig::default(), catalog)?;
//!
//! let png = press.render_face(1, Face::Recto)?;
//! std::fs::write("card_1_recto.png", png)?;
//!
//! let archive = press.build_print_run(1, 32)?;
//! println!("Archive: {} ({:?})", archive.download_name, archive.entries);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod cache;
pub mod catalog;
pub mod color;
pub mod config;
pub mod print_run;
pub mod rendering;
pub mod service;
pub mod sheet;

pub use cache::FaceCache;
pub use catalog::{Card, CardStore, CardType, Extension, MemoryCatalog};
pub use config::{AssetConfig, FontSource, PressConfig};
pub use print_run::{PrintArchive, PrintRun};
pub use rendering::{Assets, Face, RenderedFace, SheetLayout};
pub use service::CardPress;
pub use sheet::PrintSheet;

/// Build a press over `store`, loading the assets named by `config`
pub fn new_press<S: CardStore>(config: PressConfig, store: S) -> Result<CardPress<S>> {
    CardPress::new(config, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PressConfig::default();
        assert_eq!(config.layout.capacity(), 16);
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_missing_assets_fail_construction() {
        let dir = tempfile::tempdir().unwrap();
        let config = PressConfig {
            assets: AssetConfig {
                font: FontSource::Block,
                ..AssetConfig::in_dir(dir.path())
            },
            ..Default::default()
        };
        let err = new_press(config, MemoryCatalog::new()).err().unwrap();
        assert!(err.is_fatal());
    }
}
