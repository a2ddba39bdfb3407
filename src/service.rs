//! The press: assets, cache and a card store wired together
//!
//! [`CardPress`] exposes the three boundary operations used by the catalog
//! backend (face image, type preview and print run). When it owns a
//! [`MemoryCatalog`] it also offers the typed edit operations, which keep
//! the face cache in step with the catalog.

use log::{debug, info};
use rand::Rng;

use crate::cache::FaceCache;
use crate::catalog::{Card, CardStore, CardType, MemoryCatalog};
use crate::config::PressConfig;
use crate::print_run::{PrintArchive, PrintRun};
use crate::rendering::{face, Assets, Face, SheetLayout};
use crate::Result;

/// Name shown on type previews
pub const SAMPLE_CARD_NAME: &str = "Template";

/// Placeholder card used to preview a card type
pub fn sample_card(card_type: &CardType, difficulty: u32) -> Card {
    Card {
        id: 0,
        name: SAMPLE_CARD_NAME.to_string(),
        description: String::new(),
        difficulty,
        card_type: card_type.id,
        extension: 0,
    }
}

pub struct CardPress<S: CardStore> {
    config: PressConfig,
    assets: Assets,
    cache: FaceCache,
    store: S,
}

impl<S: CardStore> CardPress<S> {
    /// Validate `config` and load every asset it names
    pub fn new(config: PressConfig, store: S) -> Result<Self> {
        config.validate()?;
        let assets = Assets::load(&config.assets)?;
        Ok(Self::with_assets(config, assets, store))
    }

    /// Use already loaded assets
    pub fn with_assets(config: PressConfig, assets: Assets, store: S) -> Self {
        let cache = FaceCache::new(config.cache_dir.clone(), config.cache_enabled);
        Self {
            config,
            assets,
            cache,
            store,
        }
    }

    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn cache(&self) -> &FaceCache {
        &self.cache
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access. Edits made here bypass cache invalidation.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Override the sheet layout and batch size used by print runs
    pub fn set_layout(&mut self, layout: SheetLayout, batch_size: Option<u32>) -> Result<()> {
        let mut config = self.config.clone();
        config.layout = layout;
        config.batch_size = batch_size;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Render one face of the given card as PNG, bypassing the cache
    pub fn render_card(&self, card: &Card, card_type: &CardType, face: Face) -> Result<Vec<u8>> {
        face::render_face(&self.assets, card, card_type, face)?.to_png()
    }

    /// PNG of one face of a stored card, served from the cache when present
    pub fn render_face(&self, card_id: u32, face: Face) -> Result<Vec<u8>> {
        let (card, card_type) = self.store.card(card_id)?;
        self.cache
            .get_or_render(card_id, face, || self.render_card(&card, &card_type, face))
    }

    /// Preview of a card type on a placeholder card with a random difficulty
    pub fn render_type_sample(&self, type_id: u32, face: Face) -> Result<Vec<u8>> {
        let difficulty = rand::thread_rng().gen_range(1..5);
        self.render_type_sample_with_difficulty(type_id, face, difficulty)
    }

    /// Preview of a card type with a fixed difficulty. Never cached.
    pub fn render_type_sample_with_difficulty(
        &self,
        type_id: u32,
        face: Face,
        difficulty: u32,
    ) -> Result<Vec<u8>> {
        let card_type = self.store.card_type(type_id)?;
        debug!(
            "Rendering {} sample of type {} with difficulty {}",
            face, card_type.name, difficulty
        );
        self.render_card(&sample_card(&card_type, difficulty), &card_type, face)
    }

    /// Render every card in `start..=end` onto sheets and archive them
    pub fn build_print_run(&self, start: u32, end: u32) -> Result<PrintArchive> {
        let run = PrintRun {
            store: &self.store,
            assets: &self.assets,
            layout: self.config.layout,
            batch_size: self.config.effective_batch_size(),
            jpeg_quality: self.config.jpeg_quality,
            prints_dir: &self.config.prints_dir,
            archive_dir: &self.config.archive_dir,
        };
        run.build(start, end)
    }

    /// Drop the cached faces of a card
    pub fn invalidate(&self, card_id: u32) -> Result<usize> {
        self.cache.invalidate(card_id)
    }
}

// Cached faces are dropped before the store changes. If that fails the edit
// is refused, so the store never moves ahead of a stale cache.
impl CardPress<MemoryCatalog> {
    pub fn create_card(&mut self, card: Card) -> Result<()> {
        // A reused id may still have faces on disk
        self.cache.invalidate(card.id)?;
        self.store.create_card(card)
    }

    pub fn update_card(&mut self, card: Card) -> Result<()> {
        self.cache.invalidate(card.id)?;
        self.store.update_card(card)
    }

    pub fn delete_card(&mut self, id: u32) -> Result<Card> {
        self.cache.invalidate(id)?;
        self.store.delete_card(id)
    }

    /// Update a card type and drop the cached faces of all its cards
    pub fn update_type(&mut self, card_type: CardType) -> Result<()> {
        let type_id = card_type.id;
        let ids = self.store.card_ids_of_type(type_id);
        let mut removed = 0;
        for &id in &ids {
            removed += self.cache.invalidate(id)?;
        }
        self.store.update_type(card_type)?;
        info!(
            "Card type {} changed, dropped {} cached face(s) across {} card(s)",
            type_id,
            removed,
            ids.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_card_is_a_named_placeholder() {
        let t = CardType::new(5, "Peril", Some("red"));
        let card = sample_card(&t, 3);
        assert_eq!(card.name, "Template");
        assert_eq!(card.card_type, 5);
        assert_eq!(card.difficulty, 3);
    }
}
