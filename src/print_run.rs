//! Print runs: an id range split into sheets and packed into one archive.
//!
//! Every sheet is rendered and encoded in memory before anything touches
//! the disk. If one batch fails the whole run fails and no archive is
//! produced.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;

use crate::catalog::CardStore;
use crate::rendering::{Assets, SheetLayout};
use crate::sheet::{self, EncodedSheet, PrintSheet};
use crate::{Error, Result};

/// Split `start..=end` into consecutive inclusive ranges of `batch_size` ids.
/// The last range may be shorter.
pub fn batch_ranges(start: u32, end: u32, batch_size: u32) -> Result<Vec<(u32, u32)>> {
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    if batch_size == 0 {
        return Err(Error::Config("batch size must be at least 1".into()));
    }
    let mut ranges = Vec::new();
    let mut s = start;
    loop {
        let e = s.saturating_add(batch_size - 1).min(end);
        ranges.push((s, e));
        if e == end {
            break;
        }
        s = e + 1;
    }
    Ok(ranges)
}

/// Stored archive name for a run started at `at`
pub fn archive_file_name(start: u32, end: u32, at: DateTime<Utc>) -> String {
    format!(
        "generated_prints_{}_{}_{}.{:06}.tar.gz",
        start,
        end,
        at.timestamp(),
        at.timestamp_subsec_micros()
    )
}

/// Name offered to whoever downloads the archive
pub fn download_name(start: u32, end: u32) -> String {
    format!("generated_prints_{}_{}.tar.gz", start, end)
}

/// A finished print run archive on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintArchive {
    pub path: PathBuf,
    pub download_name: String,
    /// Entry names in archive order
    pub entries: Vec<String>,
    /// Sheet JPEGs written next to the archive
    pub sheet_paths: Vec<PathBuf>,
}

impl PrintArchive {
    /// Open the archive for streaming
    pub fn open(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }
}

/// Builds print runs from a card store
pub struct PrintRun<'a, S: CardStore + ?Sized> {
    pub store: &'a S,
    pub assets: &'a Assets,
    pub layout: SheetLayout,
    pub batch_size: u32,
    pub jpeg_quality: u8,
    pub prints_dir: &'a Path,
    pub archive_dir: &'a Path,
}

impl<S: CardStore + ?Sized> PrintRun<'_, S> {
    /// Render, encode and archive every batch of `start..=end`
    pub fn build(&self, start: u32, end: u32) -> Result<PrintArchive> {
        if self.batch_size > self.layout.capacity() {
            return Err(Error::Config(format!(
                "batch size {} exceeds the {} slots of layout {}",
                self.batch_size,
                self.layout.capacity(),
                self.layout
            )));
        }
        let ranges = batch_ranges(start, end, self.batch_size)?;

        let mut sheets: Vec<EncodedSheet> = Vec::with_capacity(ranges.len() * 2);
        for &(s, e) in &ranges {
            let batch = self.store.fetch_cards_in_range(s, e)?;
            let count = batch.len();
            let composed = PrintSheet::compose(self.assets, s, e, batch, self.layout)?;
            sheets.extend(composed.encode(self.jpeg_quality)?);
            info!("Composed sheets {}..={} with {} card(s)", s, e, count);
        }

        let now = Utc::now();
        let archive_bytes = pack_archive(&sheets, now)?;

        let sheet_paths = sheets
            .iter()
            .map(|s| sheet::write_sheet(self.prints_dir, s))
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(self.archive_dir)?;
        let path = self.archive_dir.join(archive_file_name(start, end, now));
        fs::write(&path, &archive_bytes)?;
        info!(
            "Print run {}..={}: {} batch(es), archive {} ({} bytes)",
            start,
            end,
            ranges.len(),
            path.display(),
            archive_bytes.len()
        );

        Ok(PrintArchive {
            path,
            download_name: download_name(start, end),
            entries: sheets.into_iter().map(|s| s.file_name).collect(),
            sheet_paths,
        })
    }
}

/// Pack encoded sheets into a gzip-compressed tar held in memory
pub fn pack_archive(sheets: &[EncodedSheet], at: DateTime<Utc>) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mtime = u64::try_from(at.timestamp()).unwrap_or(0);
    for sheet in sheets {
        let mut header = tar::Header::new_gnu();
        header.set_size(sheet.jpeg.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        builder.append_data(&mut header, &sheet.file_name, sheet.jpeg.as_slice())?;
    }
    let encoder = builder.into_inner()?;
    Ok(encoder.finish()?)
}
