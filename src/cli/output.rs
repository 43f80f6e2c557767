//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, ScriptureArgs};
use crate::document::source::LoadReport;
use crate::error::Result;
use crate::search::index::IndexStats;
use crate::store::view::{BookList, ChapterView, SearchResponse, TranslationList};

/// Result structure for the `check` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub report: LoadReport,
    pub index: IndexStats,
}

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn to_human(&self) -> String;
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &ScriptureArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &ScriptureArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ScriptureArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for TranslationList {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for id in &self.translations {
            let _ = writeln!(out, "{id}");
        }
        out
    }
}

impl HumanOutput for BookList {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for book in &self.books {
            let _ = writeln!(
                out,
                "{:<8} {} ({} chapters)",
                book.id, book.name, book.chapters_count
            );
        }
        out
    }
}

impl HumanOutput for ChapterView {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", self.book.name, self.chapter);
        let _ = writeln!(out, "─────────────");
        for verse in &self.verses {
            let _ = writeln!(out, "{:>3} {}", verse.v, verse.t);
        }
        out
    }
}

impl HumanOutput for SearchResponse {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for hit in &self.results {
            let _ = writeln!(
                out,
                "{} {}:{}  {}",
                hit.book_id, hit.chapter, hit.verse, hit.snippet
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Total hits: {}", self.results.len());
        out
    }
}

impl HumanOutput for CheckResult {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut out = String::new();
        let _ = writeln!(out, "Load Report:");
        let _ = writeln!(out, "════════════");
        let _ = writeln!(out, "Loaded at: {}", report.loaded_at.to_rfc3339());
        let _ = writeln!(out, "Duration: {}ms", report.duration_ms);
        let _ = writeln!(out, "Translations: {}", report.translations);
        let _ = writeln!(out, "Books: {}", report.books);
        let _ = writeln!(out, "Verses: {}", report.verses);

        if !report.loaded.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Loaded files:");
            for file in &report.loaded {
                let replaced = if file.replaced { " (replaced)" } else { "" };
                let _ = writeln!(
                    out,
                    "  {} -> {}: {} books, {} verses{}",
                    file.path.display(),
                    file.translation_id,
                    file.books,
                    file.verses,
                    replaced
                );
            }
        }

        if report.has_skipped() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Skipped files:");
            for file in &report.skipped {
                let _ = writeln!(out, "  {}: {}", file.path.display(), file.reason);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Index Statistics:");
        let _ = writeln!(out, "════════════════");
        let _ = writeln!(out, "Entries: {}", self.index.entries);
        let _ = writeln!(out, "Distinct tokens: {}", self.index.tokens);
        let _ = writeln!(out, "Postings: {}", self.index.postings);
        out
    }
}
