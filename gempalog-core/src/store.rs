use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::{self, OpenOptions},
    io,
    num::NonZeroU32,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

use crate::time::WibTimestamp;

/// Column names of the aid CSV, in on-disk order.
pub const HEADER: [&str; 5] = ["Nama", "Jenis Bantuan", "Jumlah", "Lokasi", "Waktu"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AidType {
    #[serde(rename = "Makanan")]
    Food,
    #[serde(rename = "Obat-obatan")]
    Medicine,
    #[serde(rename = "Pakaian")]
    Clothing,
    #[serde(rename = "Tenda")]
    Tent,
    #[serde(rename = "Lainnya")]
    Other,
}

impl AidType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AidType::Food => "Makanan",
            AidType::Medicine => "Obat-obatan",
            AidType::Clothing => "Pakaian",
            AidType::Tent => "Tenda",
            AidType::Other => "Lainnya",
        }
    }

    pub const fn all() -> &'static [AidType] {
        &[AidType::Food, AidType::Medicine, AidType::Clothing, AidType::Tent, AidType::Other]
    }
}

impl fmt::Display for AidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AidType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim();

        AidType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown aid type '{value}'. Supported types: Makanan, Obat-obatan, Pakaian, Tenda, Lainnya."
                )
            })
    }
}

/// One logged aid submission, serialized in [`HEADER`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AidRecord {
    #[serde(rename = "Nama")]
    pub sender_name: String,
    #[serde(rename = "Jenis Bantuan")]
    pub aid_type: AidType,
    #[serde(rename = "Jumlah")]
    pub quantity: NonZeroU32,
    #[serde(rename = "Lokasi")]
    pub destination: String,
    #[serde(rename = "Waktu")]
    pub submitted_at: WibTimestamp,
}

/// What the aid form captures before it is stamped with a submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AidSubmission {
    pub sender_name: String,
    pub aid_type: AidType,
    pub quantity: NonZeroU32,
    pub destination: String,
}

impl AidSubmission {
    pub fn into_record(self, submitted_at: WibTimestamp) -> AidRecord {
        AidRecord {
            sender_name: self.sender_name,
            aid_type: self.aid_type,
            quantity: self.quantity,
            destination: self.destination,
            submitted_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare aid store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read or write aid store at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Append-only CSV file of [`AidRecord`]s.
///
/// Appends are not locked; the store assumes one submitting user at a time.
#[derive(Debug, Clone)]
pub struct AidStore {
    path: PathBuf,
}

impl AidStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write a header-only file if none exists yet. Never touches an existing file.
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| self.csv_error(e))?;
        writer.write_record(HEADER).map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|source| self.io_error(source))?;

        info!(path = %self.path.display(), "initialized aid store");
        Ok(())
    }

    /// Append one row after the existing content.
    pub fn append_record(&self, record: &AidRecord) -> Result<(), StoreError> {
        self.ensure_initialized()?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record).map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|source| self.io_error(source))?;

        info!(
            sender = %record.sender_name,
            aid_type = %record.aid_type,
            quantity = record.quantity.get(),
            "appended aid record"
        );
        Ok(())
    }

    /// Every stored record in submission order. A missing file is an empty store.
    pub fn load_all(&self) -> Result<Vec<AidRecord>, StoreError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_error(e))?;

        reader
            .deserialize()
            .collect::<Result<Vec<AidRecord>, _>>()
            .map_err(|e| self.csv_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv { path: self.path.clone(), source }
    }
}

/// Number of records per aid type, most frequent first. Types with no records are left out.
pub fn aid_type_counts(records: &[AidRecord]) -> Vec<(AidType, usize)> {
    let mut counts: Vec<(AidType, usize)> = AidType::all()
        .iter()
        .map(|t| (*t, records.iter().filter(|r| r.aid_type == *t).count()))
        .filter(|(_, n)| *n > 0)
        .collect();

    // Stable sort keeps enum order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(second: u32) -> WibTimestamp {
        WibTimestamp::from(Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, second).unwrap())
    }

    fn record(name: &str, aid_type: AidType, quantity: u32, destination: &str) -> AidRecord {
        AidRecord {
            sender_name: name.to_string(),
            aid_type,
            quantity: NonZeroU32::new(quantity).unwrap(),
            destination: destination.to_string(),
            submitted_at: at(quantity % 60),
        }
    }

    #[test]
    fn ensure_initialized_twice_writes_one_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = AidStore::new(dir.path().join("data").join("bantuan.csv"));

        store.ensure_initialized().unwrap();
        store.ensure_initialized().unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Nama,Jenis Bantuan,Jumlah,Lokasi,Waktu\n");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn ensure_initialized_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = AidStore::new(dir.path().join("bantuan.csv"));
        store.append_record(&record("Siti", AidType::Tent, 2, "Cianjur")).unwrap();

        store.ensure_initialized().unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn load_all_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AidStore::new(dir.path().join("missing.csv"));

        assert!(!store.exists());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_load_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = AidStore::new(dir.path().join("bantuan.csv"));

        let records = vec![
            record("Budi", AidType::Food, 5, "Padang"),
            record("Ani, S.Pd.", AidType::Medicine, 12, "Palu \"Kota\""),
            record("Rudi", AidType::Other, 1, "Lombok"),
        ];
        for r in &records {
            store.append_record(r).unwrap();
        }

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, records);
        assert_eq!(loaded[1].quantity.get(), 12);
    }

    #[test]
    fn rows_use_indonesian_labels_and_wib_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = AidStore::new(dir.path().join("bantuan.csv"));

        store.append_record(&record("Budi", AidType::Food, 5, "Padang")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Budi,Makanan,5,Padang,2026-10-19 10:00:05 WIB");
    }

    #[test]
    fn zero_quantity_row_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bantuan.csv");
        fs::write(
            &path,
            "Nama,Jenis Bantuan,Jumlah,Lokasi,Waktu\nBudi,Makanan,0,Padang,2026-10-19 10:00:05 WIB\n",
        )
        .unwrap();

        let err = AidStore::new(&path).load_all().unwrap_err();
        assert!(matches!(err, StoreError::Csv { .. }));
    }

    #[test]
    fn counts_group_by_type_most_frequent_first() {
        let records = vec![
            record("a", AidType::Tent, 1, "x"),
            record("b", AidType::Food, 1, "x"),
            record("c", AidType::Tent, 1, "x"),
            record("d", AidType::Clothing, 1, "x"),
        ];

        assert_eq!(
            aid_type_counts(&records),
            vec![(AidType::Tent, 2), (AidType::Food, 1), (AidType::Clothing, 1)]
        );
        assert!(aid_type_counts(&[]).is_empty());
    }

    #[test]
    fn aid_type_parses_labels_case_insensitively() {
        for t in AidType::all() {
            assert_eq!(AidType::try_from(t.as_str()).unwrap(), *t);
        }
        assert_eq!(AidType::try_from("obat-obatan").unwrap(), AidType::Medicine);
        assert!(AidType::try_from("Senjata").is_err());
    }
}
