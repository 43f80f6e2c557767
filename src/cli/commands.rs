//! Command implementations for the scripture CLI.

use log::{debug, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ScriptureConfig;
use crate::error::{Result, ScriptureError};
use crate::store::CorpusStore;

/// Execute a CLI command.
pub fn execute_command(args: ScriptureArgs) -> Result<()> {
    let config = load_config(&args)?;
    debug!("Using configuration: {config:?}");
    let store = CorpusStore::new(&config);

    match &args.command {
        Command::Translations => list_translations(&store, &args),
        Command::Books(books_args) => list_books(&store, books_args, &args),
        Command::Chapter(chapter_args) => show_chapter(&store, chapter_args, &args),
        Command::Search(search_args) => search(&store, &config, search_args, &args),
        Command::Check => check(&store, &args),
    }
}

/// Read the configuration file, if any, and apply command line overrides.
pub fn load_config(args: &ScriptureArgs) -> Result<ScriptureConfig> {
    let mut config = match &args.config {
        Some(path) => ScriptureConfig::from_file(path)?,
        None => ScriptureConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Check a search request against the configured bounds and resolve its limit.
pub fn validate_search(search: &SearchArgs, config: &ScriptureConfig) -> Result<usize> {
    if search.query.chars().count() < config.min_query_len {
        return Err(ScriptureError::invalid_argument(format!(
            "query must be at least {} character(s)",
            config.min_query_len
        )));
    }

    let limit = search.limit.unwrap_or(config.default_limit);
    if limit == 0 || limit > config.max_limit {
        return Err(ScriptureError::invalid_argument(format!(
            "limit must be between 1 and {}",
            config.max_limit
        )));
    }
    Ok(limit)
}

fn list_translations(store: &CorpusStore, cli_args: &ScriptureArgs) -> Result<()> {
    store.ensure_loaded()?;
    output_result("Translations:", &store.translations(), cli_args)
}

fn list_books(store: &CorpusStore, args: &BooksArgs, cli_args: &ScriptureArgs) -> Result<()> {
    store.ensure_loaded()?;
    let books = store.books(&args.translation)?;
    output_result(&format!("Books of {}:", books.translation), &books, cli_args)
}

fn show_chapter(store: &CorpusStore, args: &ChapterArgs, cli_args: &ScriptureArgs) -> Result<()> {
    store.ensure_loaded()?;
    let chapter = store.chapter(&args.translation, &args.book, args.chapter)?;
    output_result(
        &format!("{} {} {}:", chapter.translation, chapter.book.name, chapter.chapter),
        &chapter,
        cli_args,
    )
}

fn search(
    store: &CorpusStore,
    config: &ScriptureConfig,
    args: &SearchArgs,
    cli_args: &ScriptureArgs,
) -> Result<()> {
    let limit = validate_search(args, config)?;
    store.ensure_loaded()?;
    let response = store.search(&args.translation, &args.query, limit)?;
    output_result(
        &format!("Results for \"{}\" in {}:", response.query, response.translation),
        &response,
        cli_args,
    )
}

fn check(store: &CorpusStore, cli_args: &ScriptureArgs) -> Result<()> {
    let report = store.reload()?;
    if report.has_skipped() {
        warn!("{} file(s) were skipped", report.skipped.len());
    }
    let stats = store.snapshot().index.stats();
    output_result(
        &format!("Loaded {}:", store.data_dir().display()),
        &CheckResult { report, index: stats },
        cli_args,
    )
}
