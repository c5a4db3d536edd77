//! Storage collaborator
//!
//! The archive proper lives in a relational database behind the admin
//! application; this crate only needs lookups by reference, surname search,
//! and the reference snapshot used by the generator. `MemoryStore` backs the
//! bundled server and the tests from a JSON records file.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StoreError;
use crate::model::ObituaryRecord;
use crate::reference::generate_reference;

/// Query surface the renderers and the API depend on.
pub trait ObituaryStore: Send + Sync {
    /// Look up a fully-hydrated record by its 8-character reference.
    fn find_by_reference(&self, reference: &str) -> Option<ObituaryRecord>;

    /// Case-insensitive substring search over surname, given names, maiden
    /// name and also-known-as entries, sorted by surname then given names.
    fn search(&self, query: &str) -> Vec<ObituaryRecord>;

    /// Snapshot of every reference currently in the store; this is the
    /// input to reference generation.
    fn references(&self) -> Vec<String>;

    /// Insert a record, enforcing reference uniqueness.
    fn insert(&mut self, record: ObituaryRecord) -> Result<(), StoreError>;
}

/// In-memory store keyed by reference.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, ObituaryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a JSON array file.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Load(format!("{}: {e}", path.display())))?;
        let records: Vec<ObituaryRecord> = serde_json::from_str(&data)
            .map_err(|e| StoreError::Load(format!("{}: {e}", path.display())))?;

        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        log::info!("Loaded {} records", store.records.len());
        Ok(store)
    }

    /// Record-creation flow: derive the reference from the current snapshot,
    /// stamp it on the record, and insert.
    pub fn create(&mut self, mut record: ObituaryRecord) -> Result<String, StoreError> {
        let reference = generate_reference(&record.surname, self.references())?;
        record.reference = reference.clone();
        self.insert(record)?;
        Ok(reference)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ObituaryStore for MemoryStore {
    fn find_by_reference(&self, reference: &str) -> Option<ObituaryRecord> {
        self.records.get(reference).cloned()
    }

    fn search(&self, query: &str) -> Vec<ObituaryRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ObituaryRecord> = self
            .records
            .values()
            .filter(|r| record_matches(r, &needle))
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            (a.surname.to_lowercase(), a.given_names.clone().unwrap_or_default())
                .cmp(&(b.surname.to_lowercase(), b.given_names.clone().unwrap_or_default()))
        });
        hits
    }

    fn references(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    // A collision here is the last line of defense against the generator's
    // check-then-act race; it surfaces instead of silently overwriting.
    fn insert(&mut self, record: ObituaryRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.reference) {
            return Err(StoreError::DuplicateReference(record.reference));
        }
        self.records.insert(record.reference.clone(), record);
        Ok(())
    }
}

fn record_matches(record: &ObituaryRecord, needle: &str) -> bool {
    let mut fields: Vec<&str> = vec![&record.surname];
    if let Some(ref g) = record.given_names {
        fields.push(g);
    }
    if let Some(ref m) = record.maiden_name {
        fields.push(m);
    }
    for aka in &record.also_known_as {
        if let Some(ref s) = aka.surname {
            fields.push(s);
        }
        if let Some(ref o) = aka.other_names {
            fields.push(o);
        }
    }
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(surname: &str, given: Option<&str>) -> ObituaryRecord {
        ObituaryRecord {
            surname: surname.to_string(),
            given_names: given.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_sequential_references() {
        let mut store = MemoryStore::new();
        assert_eq!(store.create(record("Ericksen", None)).unwrap(), "ERIC0001");
        assert_eq!(store.create(record("Erickson", None)).unwrap(), "ERIC0002");
        assert_eq!(store.create(record("Smith", None)).unwrap(), "SMIT0001");
    }

    #[test]
    fn references_snapshot_feeds_generation() {
        let mut store = MemoryStore::new();
        store.create(record("Ericksen", None)).unwrap();
        store.create(record("Smith", None)).unwrap();

        assert_eq!(
            store.references(),
            vec!["ERIC0001".to_string(), "SMIT0001".to_string()]
        );
        // The next create reads the same snapshot the trait exposes.
        assert_eq!(store.create(record("Ericson", None)).unwrap(), "ERIC0002");
    }

    #[test]
    fn duplicate_reference_is_rejected() {
        let mut store = MemoryStore::new();
        let mut a = record("Ericksen", None);
        a.reference = "ERIC0001".into();
        store.insert(a.clone()).unwrap();
        assert!(matches!(
            store.insert(a),
            Err(StoreError::DuplicateReference(r)) if r == "ERIC0001"
        ));
    }

    #[test]
    fn search_is_case_insensitive_and_covers_maiden_and_aka() {
        let mut store = MemoryStore::new();
        let mut a = record("Ericksen", Some("Anna"));
        a.maiden_name = Some("Lindqvist".into());
        store.create(a).unwrap();
        let mut b = record("Smith", Some("John"));
        b.also_known_as.push(crate::model::AlsoKnownAs {
            surname: Some("Smythe".into()),
            other_names: None,
        });
        store.create(b).unwrap();

        assert_eq!(store.search("lindqvist").len(), 1);
        assert_eq!(store.search("SMYTHE").len(), 1);
        assert_eq!(store.search("anna").len(), 1);
        assert!(store.search("unknown").is_empty());
        assert!(store.search("  ").is_empty());
    }

    #[test]
    fn search_results_are_sorted_by_surname_then_given_names() {
        let mut store = MemoryStore::new();
        store.create(record("Smith", Some("Robert"))).unwrap();
        store.create(record("Ericksen", Some("Anna"))).unwrap();
        store.create(record("Smith", Some("Alice"))).unwrap();

        let hits = store.search("s");
        let names: Vec<_> = hits
            .iter()
            .map(|r| (r.surname.as_str(), r.given_names.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            names,
            vec![("Ericksen", "Anna"), ("Smith", "Alice"), ("Smith", "Robert")]
        );
    }
}
