//! mergepdf - Assemble one PDF from PDFs and images, page by page.
//!
//! Resolves the inputs into an ordered page list, lets the user prune it,
//! and writes the remaining pages into a single document.

mod cli;
mod output;
mod prompt;
mod session;

use clap::Parser;
use std::io;
use std::process;

use crate::cli::Cli;
use crate::output::OutputFormatter;
use crate::prompt::TerminalPrompt;
use mergepdf::collection::PageCollection;
use mergepdf::config::Config;
use mergepdf::error::{MergePdfError, Result};
use mergepdf::export::{ExportStatistics, Exporter};
use mergepdf::review::run_review;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(cli) {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

/// Route `log` records to stderr; `RUST_LOG` overrides the default level.
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", mergepdf::NAME, mergepdf::VERSION));
        formatter.blank_line();
    }

    let mut prompt = TerminalPrompt::new(io::stdin().lock(), io::stderr());

    formatter.info("Collecting pages...");
    let mut collection = session::assemble(&config, &mut prompt, &formatter)?;

    if !config.remove.is_empty() {
        let removed = session::remove_positions(&mut collection, &config.remove)?;
        for page in &removed {
            formatter.debug(&format!("Removed {page}"));
        }
    }

    if config.review {
        run_review(&mut collection, &mut prompt)?;
    }

    if config.dry_run {
        return print_plan(&config, &collection, &formatter);
    }

    formatter.info(&format!(
        "Writing {} page(s) to: {}",
        collection.len(),
        config.output.display()
    ));
    let stats = Exporter::with_options(config.export_options()).export(&collection, &config.output)?;

    if config.json {
        print_json(&stats)?;
    } else {
        print_summary(&stats, &formatter);
    }

    Ok(())
}

fn print_plan(
    config: &Config,
    collection: &PageCollection,
    formatter: &OutputFormatter,
) -> Result<()> {
    if config.json {
        return print_json(&serde_json::json!({
            "output": config.output,
            "pages": collection.entries(),
        }));
    }

    formatter.section(&format!(
        "Pages ({} from {} source(s))",
        collection.len(),
        collection.source_count()
    ));
    formatter.page_list(collection.entries());
    formatter.blank_line();

    if collection.is_empty() {
        formatter.warning("No pages collected; export would fail");
    } else {
        formatter.success("Dry run completed successfully");
    }
    formatter.info(&format!("  Output would be: {}", config.output.display()));
    formatter.info("  Run without --dry-run to create the merged PDF");
    Ok(())
}

fn print_summary(stats: &ExportStatistics, formatter: &OutputFormatter) {
    if !formatter.should_print() {
        return;
    }

    formatter.blank_line();
    formatter.success(&format!(
        "Successfully created {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Pages", &stats.pages_written.to_string());
        formatter.detail("Sources", &stats.sources_opened.to_string());
        formatter.detail("Objects copied", &stats.objects_copied.to_string());
        formatter.detail("Output size", &stats.format_file_size());
        formatter.detail(
            "Export time",
            &format!("{:.2}s", stats.export_time.as_secs_f64()),
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| MergePdfError::other(format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}
