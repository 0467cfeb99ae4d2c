//! The local fallback database of supplier notes, keyed by SKU.
//!
//! The snapshot is a plain JSON object (`{"SKU": "note", ...}`) uploaded to the bot via Telegram
//! or provisioned on disk. It backs up the marketplace's private notes for products that carry
//! none.

use std::{collections::BTreeMap, path::Path};

use log::*;

#[derive(Debug, Clone, Default)]
pub struct NotesFallbackStore {
    notes: BTreeMap<String, String>,
}

impl NotesFallbackStore {
    /// Load the snapshot at `path`. Any read or parse failure is logged and yields an empty
    /// store; the processor keeps running without fallback data.
    pub fn load(path: &Path) -> Self {
        let notes = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(notes) => notes,
                Err(e) => {
                    error!("📒 Could not parse the fallback notes snapshot at {}: {e}", path.display());
                    BTreeMap::new()
                },
            },
            Err(e) => {
                warn!("📒 No fallback notes snapshot at {} ({e}). Continuing without fallback data.", path.display());
                BTreeMap::new()
            },
        };
        if !notes.is_empty() {
            info!("📒 Loaded {} fallback notes from {}", notes.len(), path.display());
        }
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Look up the note for a SKU. Tries an exact match first; failing that, size/colour variants
    /// share the supplier info of their siblings, so the SKU is trimmed at its last `-` and the
    /// first stored key with that prefix wins. Keys are kept sorted, so the fuzzy match always
    /// returns the lexicographically smallest candidate.
    pub fn lookup(&self, sku: &str) -> Option<&str> {
        if let Some(note) = self.notes.get(sku) {
            return Some(note.as_str());
        }
        let (base, _) = sku.rsplit_once('-')?;
        debug!("📒 No exact match for SKU {sku}. Trying siblings of {base}...");
        self.notes
            .range(base.to_string()..)
            .next()
            .filter(|(key, _)| key.starts_with(base))
            .map(|(key, note)| {
                debug!("📒 Fuzzy match: SKU {sku} resolved via sibling {key}");
                note.as_str()
            })
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn store_from(entries: &[(&str, &str)]) -> NotesFallbackStore {
        let notes = entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        NotesFallbackStore { notes }
    }

    #[test]
    fn exact_match_wins() {
        let store = store_from(&[("MIN-123-1", "noteA"), ("MIN-123-4", "noteB")]);
        assert_eq!(store.lookup("MIN-123-4"), Some("noteB"));
    }

    #[test]
    fn fuzzy_match_finds_sibling_variants() {
        let store = store_from(&[("MIN-123-1", "noteA")]);
        assert_eq!(store.lookup("MIN-123-4"), Some("noteA"));
        assert_eq!(store.lookup("MIN-999-1"), None);
    }

    #[test]
    fn fuzzy_match_is_deterministic_on_ties() {
        // Two siblings share the base; the lexicographically smallest key wins.
        let store = store_from(&[("MIN-123-2", "noteB"), ("MIN-123-1", "noteA")]);
        assert_eq!(store.lookup("MIN-123-9"), Some("noteA"));
    }

    #[test]
    fn sku_without_separator_has_no_fuzzy_path() {
        let store = store_from(&[("ABC1", "noteA")]);
        assert_eq!(store.lookup("ABC2"), None);
    }

    #[test]
    fn load_missing_or_malformed_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = NotesFallbackStore::load(&dir.path().join("nope.json"));
        assert!(store.is_empty());

        let path = dir.path().join("bad.json");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "this is not json").unwrap();
        let store = NotesFallbackStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn load_reads_a_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prom_import_data.json");
        std::fs::write(&path, r#"{"MIN-123-1": "Price: 100 | Acme", "ZZZ-9": "Art: Z"}"#).unwrap();
        let store = NotesFallbackStore::load(&path);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("MIN-123-1"), Some("Price: 100 | Acme"));
    }
}
