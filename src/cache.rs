//! On-disk cache of rendered faces
//!
//! One PNG per `(card_id, face)`, named `card_{id}_{index}.png`. The cache
//! never decides freshness itself: whoever edits or deletes a card must
//! call [`FaceCache::invalidate`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::rendering::Face;
use crate::Result;

#[derive(Debug, Clone)]
pub struct FaceCache {
    dir: PathBuf,
    enabled: bool,
}

impl FaceCache {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn file_name(card_id: u32, face: Face) -> String {
        format!("card_{}_{}.png", card_id, face.index())
    }

    pub fn path(&self, card_id: u32, face: Face) -> PathBuf {
        self.dir.join(Self::file_name(card_id, face))
    }

    /// Cached PNG bytes, if any
    pub fn get(&self, card_id: u32, face: Face) -> Result<Option<Vec<u8>>> {
        if !self.enabled {
            return Ok(None);
        }
        let path = self.path(card_id, face);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Cache hit for card {} {}", card_id, face);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn put(&self, card_id: u32, face: Face, png: &[u8]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(card_id, face), png)?;
        Ok(())
    }

    /// Cached bytes, or render, store and return them
    pub fn get_or_render<F>(&self, card_id: u32, face: Face, render: F) -> Result<Vec<u8>>
    where
        F: FnOnce() -> Result<Vec<u8>>,
    {
        if let Some(bytes) = self.get(card_id, face)? {
            return Ok(bytes);
        }
        let png = render()?;
        self.put(card_id, face, &png)?;
        Ok(png)
    }

    /// Drop both faces of a card. Returns how many files were removed.
    ///
    /// Runs even when caching is disabled so that files left by an earlier
    /// run cannot be served once it is turned back on. A face that is
    /// already gone is not an error; any other removal failure is, since the
    /// stale face would otherwise keep being served.
    pub fn invalidate(&self, card_id: u32) -> Result<usize> {
        let mut removed = 0;
        for face in Face::ALL {
            match fs::remove_file(self.path(card_id, face)) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        if removed > 0 {
            debug!("Invalidated {} cached face(s) of card {}", removed, card_id);
        }
        Ok(removed)
    }
}
