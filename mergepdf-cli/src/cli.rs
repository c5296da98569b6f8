//! CLI argument parsing for mergepdf.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! only depends on `clap` and the `mergepdf` library.

use clap::Parser;
use std::path::PathBuf;

use mergepdf::config::{Config, DEFAULT_IMAGE_DPI, ImportMode, OverwriteMode, PageRange};
use mergepdf::error::{MergePdfError, Result};
use mergepdf::utils::collect_paths_for_patterns;

/// Assemble one PDF from PDFs and images, page by page.
///
/// Inputs are taken in order. Images (PNG, JPEG) are converted to a
/// one-page PDF next to the image. For PDFs with several pages you are asked
/// whether to import all of them or a range, unless --all or --pages is
/// given. Other files are skipped.
#[derive(Parser, Debug)]
#[command(name = "mergepdf")]
#[command(version)]
#[command(about = "Assemble one PDF from PDFs and images, page by page", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files (PDF, PNG, JPG/JPEG), in order
    ///
    /// Glob patterns are expanded when the shell did not expand them.
    ///
    /// Examples:
    ///   mergepdf cover.png report.pdf -o out.pdf
    ///   mergepdf 'scans/*.jpg' -o scans.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Import every page of multi-page PDFs without asking
    #[arg(short, long, conflicts_with = "pages")]
    pub all: bool,

    /// Import this page range (e.g. "2-4" or "3") from every multi-page PDF
    ///
    /// Page numbers are 1-indexed and inclusive. A PDF the range does not
    /// fit is reported and skipped.
    #[arg(short, long, value_name = "RANGE")]
    pub pages: Option<String>,

    /// Remove the page at this position of the assembled list (1-indexed)
    ///
    /// May be repeated or comma-separated. Positions refer to the list
    /// before any removal.
    #[arg(short, long, value_name = "POS", value_delimiter = ',')]
    pub remove: Vec<usize>,

    /// Review the assembled pages interactively before export
    #[arg(long)]
    pub review: bool,

    /// Dry run - print the assembled page list without writing output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the page list or export statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Never overwrite an existing output file
    #[arg(long)]
    pub no_clobber: bool,

    /// Never overwrite PDFs generated next to images
    #[arg(long)]
    pub no_clobber_images: bool,

    /// Resolution used to size pages made from images
    #[arg(long, value_name = "DPI", default_value_t = DEFAULT_IMAGE_DPI)]
    pub dpi: f32,

    /// Write streams without compression
    #[arg(long)]
    pub no_compress: bool,

    /// Verbose output - show details and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Glob patterns among the inputs are expanded here.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern or the page range is invalid, or if the
    /// resulting configuration does not validate.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = collect_paths_for_patterns(&self.inputs)?;

        let import_mode = match (&self.pages, self.all) {
            (Some(pages), _) => ImportMode::Range(parse_range(pages)?),
            (None, true) => ImportMode::All,
            (None, false) => ImportMode::Ask,
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            import_mode,
            overwrite_mode: overwrite_mode(self.no_clobber),
            image_overwrite_mode: overwrite_mode(self.no_clobber_images),
            image_dpi: self.dpi,
            compress: !self.no_compress,
            remove: self.remove.clone(),
            review: self.review,
            dry_run: self.dry_run,
            json: self.json,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        config.validate().map_err(|e| {
            MergePdfError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no inputs, the page range does not
    /// parse, or a removal position is zero.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(MergePdfError::invalid_config("No input files specified"));
        }

        if let Some(ref pages) = self.pages {
            parse_range(pages)?;
        }

        if self.remove.contains(&0) {
            return Err(MergePdfError::invalid_config(
                "Page positions are 1-indexed; 0 is not a valid position",
            ));
        }

        Ok(())
    }
}

fn parse_range(pages: &str) -> Result<PageRange> {
    PageRange::parse(pages).map_err(|e| MergePdfError::invalid_config(e.to_string()))
}

fn overwrite_mode(no_clobber: bool) -> OverwriteMode {
    if no_clobber {
        OverwriteMode::NoClobber
    } else {
        OverwriteMode::Overwrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn create_test_cli(inputs: Vec<&str>, output: &str) -> Cli {
        Cli {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(output),
            all: false,
            pages: None,
            remove: Vec::new(),
            review: false,
            dry_run: false,
            json: false,
            no_clobber: false,
            no_clobber_images: false,
            dpi: DEFAULT_IMAGE_DPI,
            no_compress: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_basic_cli_to_config() {
        let cli = create_test_cli(vec!["a.pdf", "b.png"], "out.pdf");
        let config = cli.to_config().unwrap();

        assert_eq!(
            config.inputs,
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.png")]
        );
        assert_eq!(config.output, PathBuf::from("out.pdf"));
        assert_eq!(config.import_mode, ImportMode::Ask);
        assert_eq!(config.overwrite_mode, OverwriteMode::Overwrite);
        assert!(config.compress);
    }

    #[test]
    fn test_cli_import_modes() {
        let mut cli = create_test_cli(vec!["a.pdf"], "out.pdf");

        cli.all = true;
        assert_eq!(cli.to_config().unwrap().import_mode, ImportMode::All);

        cli.all = false;
        cli.pages = Some("2-4".to_string());
        assert_eq!(
            cli.to_config().unwrap().import_mode,
            ImportMode::Range(PageRange::new(2, 4))
        );
    }

    #[test]
    fn test_cli_invalid_page_range() {
        let mut cli = create_test_cli(vec!["a.pdf"], "out.pdf");
        cli.pages = Some("5-3".to_string());

        assert!(cli.validate().is_err());
        assert!(matches!(
            cli.to_config(),
            Err(MergePdfError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_cli_overwrite_modes() {
        let mut cli = create_test_cli(vec!["a.pdf"], "out.pdf");
        cli.no_clobber = true;

        let config = cli.to_config().unwrap();
        assert_eq!(config.overwrite_mode, OverwriteMode::NoClobber);
        assert_eq!(config.image_overwrite_mode, OverwriteMode::Overwrite);

        cli.no_clobber_images = true;
        let config = cli.to_config().unwrap();
        assert_eq!(config.image_overwrite_mode, OverwriteMode::NoClobber);
    }

    #[test]
    fn test_cli_validate_zero_position() {
        let mut cli = create_test_cli(vec!["a.pdf"], "out.pdf");
        cli.remove = vec![2, 0];

        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_rejects_output_among_inputs() {
        let cli = create_test_cli(vec!["a.pdf", "out.pdf"], "out.pdf");
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn test_parse_remove_list() {
        let cli = Cli::try_parse_from([
            "mergepdf", "a.pdf", "-o", "out.pdf", "--remove", "1,3", "-r", "5",
        ])
        .unwrap();
        assert_eq!(cli.remove, vec![1, 3, 5]);
    }

    #[test]
    fn test_all_conflicts_with_pages() {
        let result = Cli::try_parse_from([
            "mergepdf", "a.pdf", "-o", "out.pdf", "--all", "--pages", "1-2",
        ]);
        assert!(result.is_err());
    }
}
