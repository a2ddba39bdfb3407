//! Card catalog records and the storage seam used by the compositor
//!
//! The compositor only reads plain values out of the catalog. Persistence
//! is someone else's job: anything implementing [`CardStore`] can feed the
//! renderer. [`MemoryCatalog`] is a typed, in-memory implementation used by
//! the CLI (loaded from a JSON file) and by tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{color, Error, Result};

/// A card type. Its color drives every recolored element of its cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl CardType {
    pub fn new(id: u32, name: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.map(str::to_string),
        }
    }

    /// Parsed type color, `None` when the type has no color set
    pub fn rgb(&self) -> Result<Option<Rgb<u8>>> {
        match self.color.as_deref() {
            Some(raw) => color::parse_color(raw),
            None => Ok(None),
        }
    }
}

/// A card extension (set). Only carried for catalog completeness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub id: u32,
    pub name: String,
}

/// A playable card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: u32,
    pub card_type: u32,
    pub extension: u32,
}

impl Card {
    /// Name as it should be laid out: `\n` escapes become line breaks and
    /// surrounding whitespace is dropped.
    pub fn display_name(&self) -> String {
        unescape_name(&self.name)
    }
}

/// Turn the two-character `\n` escape into a real line break and trim.
pub fn unescape_name(raw: &str) -> String {
    raw.replace("\\n", "\n").trim().to_string()
}

/// Read access the compositor needs from storage
pub trait CardStore {
    /// Cards with `start <= id <= end` joined with their type, by ascending id
    fn fetch_cards_in_range(&self, start: u32, end: u32) -> Result<Vec<(Card, CardType)>>;

    /// A single card joined with its type
    fn card(&self, id: u32) -> Result<(Card, CardType)>;

    /// A single card type
    fn card_type(&self, id: u32) -> Result<CardType>;
}

/// Serialized form of a catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<CardType>,
    #[serde(default)]
    extensions: Vec<Extension>,
    #[serde(default)]
    cards: Vec<Card>,
}

/// In-memory catalog with typed per-entity operations
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    types: BTreeMap<u32, CardType>,
    extensions: BTreeMap<u32, Extension>,
    cards: BTreeMap<u32, Card>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file with `types`, `extensions` and `cards` arrays.
    ///
    /// Records are inserted through the same checks as the typed operations,
    /// so duplicate names or dangling references fail the load.
    pub fn load_json(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("catalog {}: {}", path.display(), e)))?;
        Self::from_records(file.types, file.extensions, file.cards)
    }

    pub fn from_records(
        types: Vec<CardType>,
        extensions: Vec<Extension>,
        cards: Vec<Card>,
    ) -> Result<Self> {
        let mut catalog = Self::new();
        for t in types {
            catalog.create_type(t)?;
        }
        for e in extensions {
            catalog.create_extension(e)?;
        }
        for c in cards {
            catalog.create_card(c)?;
        }
        Ok(catalog)
    }

    /// Write the catalog back to a JSON file
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = CatalogFile {
            types: self.types.values().cloned().collect(),
            extensions: self.extensions.values().cloned().collect(),
            cards: self.cards.values().cloned().collect(),
        };
        let data = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::Encode(format!("catalog: {}", e)))?;
        fs::write(path, data)?;
        Ok(())
    }

    // --- card types ---

    pub fn create_type(&mut self, card_type: CardType) -> Result<()> {
        card_type.rgb()?;
        if self.types.values().any(|t| t.name == card_type.name) {
            return Err(Error::InvalidInput(format!(
                "'{}' type already exists",
                card_type.name
            )));
        }
        if self.types.contains_key(&card_type.id) {
            return Err(Error::InvalidInput(format!("type id {} already used", card_type.id)));
        }
        self.types.insert(card_type.id, card_type);
        Ok(())
    }

    pub fn types(&self) -> impl Iterator<Item = &CardType> {
        self.types.values()
    }

    pub fn update_type(&mut self, card_type: CardType) -> Result<()> {
        card_type.rgb()?;
        if self
            .types
            .values()
            .any(|t| t.name == card_type.name && t.id != card_type.id)
        {
            return Err(Error::InvalidInput(format!(
                "'{}' type already exists",
                card_type.name
            )));
        }
        let slot = self
            .types
            .get_mut(&card_type.id)
            .ok_or_else(|| Error::NotFound(format!("card type {}", card_type.id)))?;
        *slot = card_type;
        Ok(())
    }

    /// Delete a card type. Fails while cards still reference it.
    pub fn delete_type(&mut self, id: u32) -> Result<CardType> {
        if self.cards.values().any(|c| c.card_type == id) {
            return Err(Error::InvalidInput(format!("card type {} still has cards", id)));
        }
        self.types
            .remove(&id)
            .ok_or_else(|| Error::NotFound(format!("card type {}", id)))
    }

    /// Ids of every card of the given type
    pub fn card_ids_of_type(&self, type_id: u32) -> Vec<u32> {
        self.cards
            .values()
            .filter(|c| c.card_type == type_id)
            .map(|c| c.id)
            .collect()
    }

    // --- extensions ---

    pub fn create_extension(&mut self, extension: Extension) -> Result<()> {
        if self.extensions.values().any(|e| e.name == extension.name) {
            return Err(Error::InvalidInput(format!(
                "'{}' extension already exists",
                extension.name
            )));
        }
        if self.extensions.contains_key(&extension.id) {
            return Err(Error::InvalidInput(format!("extension id {} already used", extension.id)));
        }
        self.extensions.insert(extension.id, extension);
        Ok(())
    }

    pub fn extension(&self, id: u32) -> Result<&Extension> {
        self.extensions
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("extension {}", id)))
    }

    pub fn update_extension(&mut self, extension: Extension) -> Result<()> {
        let slot = self
            .extensions
            .get_mut(&extension.id)
            .ok_or_else(|| Error::NotFound(format!("extension {}", extension.id)))?;
        *slot = extension;
        Ok(())
    }

    pub fn delete_extension(&mut self, id: u32) -> Result<Extension> {
        if self.cards.values().any(|c| c.extension == id) {
            return Err(Error::InvalidInput(format!("extension {} still has cards", id)));
        }
        self.extensions
            .remove(&id)
            .ok_or_else(|| Error::NotFound(format!("extension {}", id)))
    }

    // --- cards ---

    pub fn create_card(&mut self, card: Card) -> Result<()> {
        self.check_card(&card)?;
        if self.cards.values().any(|c| c.name == card.name) {
            return Err(Error::InvalidInput(format!("'{}' card already exists", card.name)));
        }
        if self.cards.contains_key(&card.id) {
            return Err(Error::InvalidInput(format!("card id {} already used", card.id)));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn update_card(&mut self, card: Card) -> Result<()> {
        self.check_card(&card)?;
        if self
            .cards
            .values()
            .any(|c| c.name == card.name && c.id != card.id)
        {
            return Err(Error::InvalidInput(format!("'{}' card already exists", card.name)));
        }
        let slot = self
            .cards
            .get_mut(&card.id)
            .ok_or_else(|| Error::NotFound(format!("card {}", card.id)))?;
        *slot = card;
        Ok(())
    }

    pub fn delete_card(&mut self, id: u32) -> Result<Card> {
        self.cards
            .remove(&id)
            .ok_or_else(|| Error::NotFound(format!("card {}", id)))
    }

    fn check_card(&self, card: &Card) -> Result<()> {
        if card.difficulty == 0 {
            return Err(Error::InvalidInput(format!(
                "card '{}' must have a difficulty of at least 1",
                card.name
            )));
        }
        if !self.types.contains_key(&card.card_type) {
            return Err(Error::NotFound(format!("card type {}", card.card_type)));
        }
        if !self.extensions.contains_key(&card.extension) {
            return Err(Error::NotFound(format!("extension {}", card.extension)));
        }
        Ok(())
    }

    fn joined(&self, card: &Card) -> Result<(Card, CardType)> {
        let card_type = self.card_type(card.card_type)?;
        Ok((card.clone(), card_type))
    }
}

impl CardStore for MemoryCatalog {
    fn fetch_cards_in_range(&self, start: u32, end: u32) -> Result<Vec<(Card, CardType)>> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        self.cards
            .range(start..=end)
            .map(|(_, card)| self.joined(card))
            .collect()
    }

    fn card(&self, id: u32) -> Result<(Card, CardType)> {
        let card = self
            .cards
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("card {}", id)))?;
        self.joined(card)
    }

    fn card_type(&self, id: u32) -> Result<CardType> {
        self.types
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("card type {}", id)))
    }
}
