use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fully-hydrated obituary record.
///
/// The storage layer resolves every relation (periodical, cemetery, file box,
/// relatives, aliases) before handing the record to a renderer; the renderers
/// never query anything themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObituaryRecord {
    /// 8-character reference code, e.g. `ERIC0004`. Immutable natural key.
    pub reference: String,

    // Personal fields
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub given_names: Option<String>,
    pub surname: String,
    #[serde(default)]
    pub maiden_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    #[serde(default)]
    pub death_place: Option<String>,
    #[serde(default)]
    pub cemetery: Option<String>,

    // Publication fields
    #[serde(default)]
    pub periodical: Option<String>,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub file_box: Option<String>,

    #[serde(default)]
    pub relatives: Vec<Relative>,
    #[serde(default)]
    pub also_known_as: Vec<AlsoKnownAs>,

    /// Scanned clipping file names stored under this reference.
    #[serde(default)]
    pub image_files: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,

    // Proofreading metadata
    #[serde(default)]
    pub proofread: bool,
    #[serde(default)]
    pub proofread_date: Option<NaiveDate>,
    #[serde(default)]
    pub proofread_by: Option<String>,
}

impl ObituaryRecord {
    /// Display name: "Title Given Names Surname (nee Maiden)".
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(ref t) = self.title {
            parts.push(t);
        }
        if let Some(ref g) = self.given_names {
            parts.push(g);
        }
        parts.push(&self.surname);
        let mut name = parts.join(" ");
        if let Some(ref m) = self.maiden_name {
            name.push_str(&format!(" (nee {m})"));
        }
        name
    }
}

/// A relative named in the obituary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relative {
    pub name: String,
    /// Relationship label as printed ("wife", "son", "brother-in-law", ...).
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub predeceased: bool,
}

/// An alias the deceased was also known by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlsoKnownAs {
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub other_names: Option<String>,
}

impl AlsoKnownAs {
    pub fn display(&self) -> String {
        match (&self.other_names, &self.surname) {
            (Some(o), Some(s)) => format!("{o} {s}"),
            (Some(o), None) => o.clone(),
            (None, Some(s)) => s.clone(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_includes_all_present_parts() {
        let record = ObituaryRecord {
            reference: "ERIC0001".into(),
            title: Some("Mrs.".into()),
            given_names: Some("Anna Marie".into()),
            surname: "Ericksen".into(),
            maiden_name: Some("Lindqvist".into()),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "Mrs. Anna Marie Ericksen (nee Lindqvist)");
    }

    #[test]
    fn full_name_with_surname_only() {
        let record = ObituaryRecord {
            reference: "SMIT0001".into(),
            surname: "Smith".into(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "Smith");
    }

    #[test]
    fn record_deserializes_from_sparse_json() {
        let json = r#"{"reference":"NGXX0001","surname":"Ng"}"#;
        let record: ObituaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference, "NGXX0001");
        assert!(record.relatives.is_empty());
        assert!(!record.proofread);
    }
}
