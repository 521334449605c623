//! List command - show the tests each suite would run

use crate::registry::{self, SuiteEntry};
use anyhow::Result;
use colored::*;
use tally_core::Test;

/// Print every selected suite and its test names
pub fn run(suites: &[String]) -> Result<()> {
    let entries = registry::select(suites)?;
    print!("{}", render(&entries));
    Ok(())
}

fn render(entries: &[&SuiteEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let suite = entry.build();
        out.push_str(&format!(
            "{} - {} ({} test{})\n",
            entry.name.bold(),
            entry.description,
            suite.count_test_cases(),
            if suite.count_test_cases() == 1 { "" } else { "s" }
        ));
        for name in suite.test_names() {
            out.push_str(&format!("    {}\n", name));
        }
    }
    out
}
