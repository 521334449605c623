//! Built-in suites, addressable by name

use crate::fixtures::{db, test_case_test};
use anyhow::{bail, Result};
use tally_core::TestSuite;

/// A named suite constructor
#[derive(Debug)]
pub struct SuiteEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> TestSuite,
}

impl SuiteEntry {
    /// Build a fresh suite; every call gets new fixture instances.
    pub fn build(&self) -> TestSuite {
        (self.build)()
    }
}

/// Every built-in suite, in default run order
pub const SUITES: &[SuiteEntry] = &[
    SuiteEntry {
        name: "self",
        description: "the framework testing its own run protocol",
        build: test_case_test::suite,
    },
    SuiteEntry {
        name: "db",
        description: "database connection check against a stub connection",
        build: db::suite,
    },
];

pub fn find(name: &str) -> Option<&'static SuiteEntry> {
    SUITES.iter().find(|entry| entry.name == name)
}

/// Resolve suite names in the given order; no names means all suites.
pub fn select(names: &[String]) -> Result<Vec<&'static SuiteEntry>> {
    if names.is_empty() {
        return Ok(SUITES.iter().collect());
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match find(name) {
            Some(entry) => selected.push(entry),
            None => {
                let available: Vec<_> = SUITES.iter().map(|e| e.name).collect();
                bail!(
                    "unknown suite '{}' (available: {})",
                    name,
                    available.join(", ")
                );
            }
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&SuiteEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_select_all_by_default() {
        let entries = select(&[]).unwrap();
        assert_eq!(names(&entries), vec!["self", "db"]);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let entries = select(&["db".to_string(), "self".to_string()]).unwrap();
        assert_eq!(names(&entries), vec!["db", "self"]);
    }

    #[test]
    fn test_select_unknown_suite() {
        let err = select(&["network".to_string()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown suite 'network' (available: self, db)"
        );
    }

    #[test]
    fn test_build_gives_fresh_suites() {
        let entry = find("db").unwrap();
        assert_eq!(entry.build().len(), 1);
        assert_eq!(entry.build().name(), "db");
    }
}
