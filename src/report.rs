// src/report.rs
// =============================================================================
// Turns the finished crawl into something a person (or a script) can read.
//
// Two formats:
// - A table with one line per URL plus a summary (default)
// - A JSON array (--json), handy for CI pipelines
//
// Entries are always sorted by URL. Building and printing the report never
// changes the crawl results.
// =============================================================================

use crate::crawl::CrawlResult;
use serde::Serialize;
use std::fmt::Write;

/// URLs longer than this are shortened in the table
const URL_COLUMN: usize = 57;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<CrawlResult>,
}

// One JSON row: the result plus its pass/fail verdict
#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    result: &'a CrawlResult,
    ok: bool,
}

impl Report {
    /// Builds a report, sorting the entries by URL
    pub fn new(mut entries: Vec<CrawlResult>) -> Self {
        entries.sort_by(|a, b| a.url.cmp(&b.url));
        Self { entries }
    }

    pub fn entries(&self) -> &[CrawlResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ok_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.ok_count()
    }

    pub fn external_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_external).count()
    }

    pub fn internal_count(&self) -> usize {
        self.len() - self.external_count()
    }

    /// Looks up the entry for a URL
    pub fn get(&self, url: &str) -> Option<&CrawlResult> {
        self.entries
            .binary_search_by(|r| r.url.as_str().cmp(url))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let rows: Vec<_> = self
            .entries
            .iter()
            .map(|result| JsonEntry {
                result,
                ok: result.is_ok(),
            })
            .collect();
        serde_json::to_string_pretty(&rows)
    }

    // Renders the human-readable table and summary
    pub fn to_table(&self) -> String {
        let mut out = String::new();

        // writeln! into a String cannot fail
        let _ = writeln!(out, "{:<60} {:<30} {:<10} {:<10}", "URL", "STATUS", "RESULT", "SCOPE");
        let _ = writeln!(out, "{}", "=".repeat(113));

        for result in &self.entries {
            let _ = writeln!(
                out,
                "{:<60} {:<30} {:<10} {:<10}",
                truncate(&result.url, URL_COLUMN),
                result.status.to_string(),
                if result.is_ok() { "✅ OK" } else { "❌ FAILED" },
                if result.is_external { "external" } else { "internal" },
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "📊 Summary:");
        let _ = writeln!(out, "   ✅ OK: {}", self.ok_count());
        let _ = writeln!(out, "   ❌ Failed: {}", self.failed_count());
        let _ = writeln!(out, "   🏠 Internal: {}", self.internal_count());
        let _ = writeln!(out, "   🌐 External: {}", self.external_count());
        let _ = writeln!(out, "   📋 Total: {}", self.len());

        out
    }

    /// Prints the report to stdout, as JSON or as a table
    pub fn print(&self, json: bool) -> serde_json::Result<()> {
        if json {
            println!("{}", self.to_json()?);
        } else {
            print!("{}", self.to_table());
        }
        Ok(())
    }
}

// Shortens long text to `max` characters followed by "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
