//! Collapses repeated people in the accepted records and applies the limit.

use std::collections::HashSet;

use crate::domain::profile::ProfileRecord;

/// Keeps the first record of every person, in arrival order, up to `limit`.
///
/// People are identified by their trimmed, case-folded name. Later duplicates
/// are dropped without merging, as are records with an empty name.
pub fn dedupe(records: Vec<ProfileRecord>, limit: usize) -> Vec<ProfileRecord> {
    if limit == 0 {
        return vec![];
    }

    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let identity = record.identity();
            !identity.is_empty() && seen.insert(identity)
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{ConnectionLevel, ExperienceBand};

    fn record(id: usize, name: &str) -> ProfileRecord {
        ProfileRecord {
            id: id.to_string(),
            name: name.to_string(),
            role_title: String::new(),
            profile_url: format!("https://linkedin.com/in/{id}"),
            full_title: name.to_string(),
            snippet: String::new(),
            location: "Unknown".to_string(),
            connection_level: ConnectionLevel::Second,
            experience_band: ExperienceBand::ThreePlus,
            company: "Acme".to_string(),
        }
    }

    #[test]
    fn keeps_first_of_case_insensitive_duplicates() {
        let records = vec![
            record(1, "John Smith"),
            record(2, "Jane Doe"),
            record(3, " john SMITH "),
        ];

        let unique = dedupe(records, 10);

        let ids: Vec<&str> = unique.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn ids_are_not_renumbered() {
        let records = vec![record(1, "A"), record(2, "a"), record(3, "B")];

        let unique = dedupe(records, 10);

        assert_eq!(unique[1].id, "3");
    }

    #[test]
    fn truncates_after_deduplication() {
        let records = vec![
            record(1, "A"),
            record(2, "A"),
            record(3, "B"),
            record(4, "C"),
        ];

        let unique = dedupe(records, 2);

        let names: Vec<&str> = unique.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn zero_limit_is_empty() {
        assert!(dedupe(vec![record(1, "A")], 0).is_empty());
    }

    #[test]
    fn blank_names_are_dropped() {
        let unique = dedupe(vec![record(1, "  "), record(2, "A")], 10);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].name, "A");
    }
}
