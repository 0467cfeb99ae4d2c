//! The processed-order ledger: a durable set of order ids that have already been notified (or
//! deliberately suppressed during startup). Guarantees at-most-one notification per order across
//! restarts.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use log::*;

#[derive(Debug)]
pub struct ProcessedOrderLedger {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl ProcessedOrderLedger {
    /// Load the ledger from `path`. A missing or unreadable file yields an empty ledger.
    pub fn load(path: &Path) -> Self {
        let ids = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<BTreeSet<String>>(&contents) {
                Ok(ids) => ids,
                Err(e) => {
                    error!("📗 Could not parse the processed-order ledger at {}: {e}", path.display());
                    BTreeSet::new()
                },
            },
            Err(_) => BTreeSet::new(),
        };
        if !ids.is_empty() {
            info!("📗 Loaded {} processed order ids from {}", ids.len(), path.display());
        }
        Self { path: path.to_path_buf(), ids }
    }

    pub fn contains(&self, order_id: &str) -> bool {
        self.ids.contains(order_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Record an order id and persist the full set immediately. Idempotent. The set stays small,
    /// so overwrite-on-write beats an append-only log here.
    pub fn add(&mut self, order_id: &str) {
        self.ids.insert(order_id.to_string());
        self.save();
    }

    /// Bulk insert with a single write. Used for first-run seeding.
    pub fn add_all<I: IntoIterator<Item = String>>(&mut self, order_ids: I) {
        self.ids.extend(order_ids);
        self.save();
    }

    fn save(&self) {
        // A write failure costs at worst one duplicate notification after a restart.
        match serde_json::to_string(&self.ids) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    error!("📗 Could not persist the processed-order ledger to {}: {e}", self.path.display());
                }
            },
            Err(e) => error!("📗 Could not serialize the processed-order ledger: {e}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_is_idempotent_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_orders.json");
        let mut ledger = ProcessedOrderLedger::load(&path);
        assert!(ledger.is_empty());
        ledger.add("1001");
        ledger.add("1001");
        assert!(ledger.contains("1001"));
        assert_eq!(ledger.len(), 1);

        let on_disk: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec!["1001".to_string()]);
    }

    #[test]
    fn survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_orders.json");
        let mut ledger = ProcessedOrderLedger::load(&path);
        ledger.add_all(["7".to_string(), "8".to_string(), "7".to_string()]);
        drop(ledger);

        let ledger = ProcessedOrderLedger::load(&path);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("7"));
        assert!(ledger.contains("8"));
        assert!(!ledger.contains("9"));
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_orders.json");
        std::fs::write(&path, "{not json").unwrap();
        let ledger = ProcessedOrderLedger::load(&path);
        assert!(ledger.is_empty());
    }
}
