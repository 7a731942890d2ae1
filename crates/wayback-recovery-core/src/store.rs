//! On-disk storage of recovered records
//!
//! One directory per item, named after its title, holding `metadata.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::ItemRecord;

/// File name of the record inside each item directory
pub const METADATA_FILE: &str = "metadata.json";

/// Longest directory name produced by [`safe_name`], in characters
const MAX_NAME_CHARS: usize = 80;

/// Makes a string safe to use as a directory name
///
/// Keeps alphanumerics and ` ._-()`, replaces everything else with `_`
/// and truncates to 80 characters.
///
/// # Example
/// ```
/// use wayback_recovery_core::store::safe_name;
/// assert_eq!(safe_name("Harbour film: reel 1/2"), "Harbour film_ reel 1_2");
/// ```
pub fn safe_name(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || " ._-()".contains(c) {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_CHARS)
        .collect()
}

/// Writes recovered records below an output directory
#[derive(Debug, Clone)]
pub struct ItemStore {
    root: PathBuf,
}

impl ItemStore {
    /// Create a store rooted at `root`; nothing is created until [`save`](Self::save)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a record: its safe title, or `item_<index>` when untitled
    pub fn item_dir(&self, record: &ItemRecord, index: usize) -> PathBuf {
        let name = if record.title.is_empty() {
            format!("item_{}", index)
        } else {
            record.title.clone()
        };
        self.root.join(safe_name(&name))
    }

    /// Writes `metadata.json` for a record and returns its path
    ///
    /// # Errors
    /// - `Io` if the directory or file cannot be written
    /// - `Json` if serialization fails
    pub fn save(&self, record: &ItemRecord, index: usize) -> Result<PathBuf> {
        let dir = self.item_dir(record, index);
        fs::create_dir_all(&dir)?;

        let path = dir.join(METADATA_FILE);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Reads a record back from a `metadata.json` file
    pub fn load(path: &Path) -> Result<ItemRecord> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryError;
    use crate::types::{FieldMap, SectionMap};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn record(title: &str) -> ItemRecord {
        let mut fields = FieldMap::new();
        fields.insert("Creator".to_string(), "Jane R. Doe".to_string());
        let mut sections = SectionMap::new();
        sections.insert("Identity area".to_string(), fields);

        ItemRecord {
            source_url: "https://web.archive.org/web/2020/http://original.org/harbour".to_string(),
            title: title.to_string(),
            sections,
            archive_links: BTreeSet::new(),
            media_links: BTreeSet::from(["http://original.org/a.mp4".to_string()]),
        }
    }

    #[test]
    fn test_safe_name_replaces_unsafe_chars() {
        assert_eq!(safe_name("a/b\\c:d*e?"), "a_b_c_d_e_");
        assert_eq!(safe_name("Reel (1) - v2.0"), "Reel (1) - v2.0");
    }

    #[test]
    fn test_safe_name_keeps_unicode_letters() {
        assert_eq!(safe_name("Přístav 1962"), "Přístav 1962");
    }

    #[test]
    fn test_safe_name_truncates() {
        let long = "x".repeat(200);
        assert_eq!(safe_name(&long).chars().count(), 80);
    }

    #[test]
    fn test_item_dir_falls_back_to_index() {
        let store = ItemStore::new("/tmp/out");
        assert_eq!(store.item_dir(&record(""), 7), PathBuf::from("/tmp/out/item_7"));
        assert_eq!(
            store.item_dir(&record("Harbour film | Archives"), 7),
            PathBuf::from("/tmp/out/Harbour film _ Archives")
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::new(dir.path());
        let original = record("Harbour film");

        let path = store.save(&original, 1).unwrap();
        assert_eq!(path, dir.path().join("Harbour film").join(METADATA_FILE));

        let loaded = ItemStore::load(&path).unwrap();
        assert_eq!(loaded, original);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"descriptive_metadata\""));
        assert!(raw.contains("\"internet_archive\": []"));
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ItemStore::new(dir.path());

        store.save(&record("Same"), 1).unwrap();
        let mut second = record("Same");
        second.media_links.clear();
        let path = store.save(&second, 2).unwrap();

        assert_eq!(ItemStore::load(&path).unwrap(), second);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ItemStore::load(Path::new("/nonexistent/metadata.json"));
        assert!(matches!(result, Err(RecoveryError::Io(_))));
    }

    proptest! {
        #[test]
        fn prop_safe_name_only_safe_chars(s in ".{0,200}") {
            let name = safe_name(&s);
            prop_assert!(name.chars().count() <= 80);
            prop_assert!(name.chars().all(|c| c.is_alphanumeric() || " ._-()".contains(c)));
        }
    }
}
