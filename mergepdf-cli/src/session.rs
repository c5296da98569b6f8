//! Building and pruning the page collection from a configuration.

use log::debug;
use mergepdf::collection::PageCollection;
use mergepdf::config::{Config, ImportMode};
use mergepdf::convert::ImageConverter;
use mergepdf::error::{MergePdfError, Result};
use mergepdf::page::{EntryId, PageReference};
use mergepdf::resolve::{ImportChoice, ImportPrompt, PageSourceResolver, SourceKind};

use crate::output::OutputFormatter;

/// Resolve every input of `config`, in order, into one collection.
///
/// Multi-page PDFs are imported according to the configured import mode;
/// in ask mode `prompt` is consulted. A fixed range that does not fit a
/// file is reported and the file is skipped, and so is a missing or
/// unreadable input.
///
/// # Errors
///
/// Returns the first error that is neither a range problem nor a bad
/// input, e.g. a generated image PDF that may not be overwritten.
pub fn assemble<P>(
    config: &Config,
    prompt: &mut P,
    formatter: &OutputFormatter,
) -> Result<PageCollection>
where
    P: ImportPrompt + ?Sized,
{
    let converter = ImageConverter::new()
        .with_dpi(config.image_dpi)
        .with_overwrite_mode(config.image_overwrite_mode);
    let resolver = PageSourceResolver::new().with_converter(converter);

    let mut collection = PageCollection::new();
    for input in config.inputs() {
        if SourceKind::from_path(input) == SourceKind::Unsupported {
            formatter.warning(&format!("Skipping unsupported file: {}", input.display()));
            continue;
        }

        let resolved = match config.import_mode {
            ImportMode::Ask => resolver.resolve(input, prompt),
            ImportMode::All => resolver.resolve_with_choice(input, ImportChoice::All),
            ImportMode::Range(range) => {
                resolver.resolve_with_choice(input, ImportChoice::Range(range))
            }
        };

        match resolved {
            Ok(pages) => {
                formatter.debug(&format!("{}: {} page(s)", input.display(), pages.len()));
                collection.append_many(pages);
            }
            Err(err) if err.is_recoverable() || err.is_input_error() => {
                formatter.warning(&format!("Skipping {}: {err}", input.display()));
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "Assembled {} page(s) from {} input(s)",
        collection.len(),
        config.inputs().len()
    );
    Ok(collection)
}

/// Remove the pages at 1-based `positions`.
///
/// Positions refer to the collection as it is before this call; listing a
/// position twice removes it once.
///
/// # Errors
///
/// Returns [`MergePdfError::IndexOutOfRange`] if any position is outside the
/// collection, in which case nothing is removed.
pub fn remove_positions(
    collection: &mut PageCollection,
    positions: &[usize],
) -> Result<Vec<PageReference>> {
    let mut ids: Vec<EntryId> = Vec::with_capacity(positions.len());
    for &position in positions {
        let index = position.checked_sub(1).unwrap_or(usize::MAX);
        let entry = collection.get(index).ok_or(MergePdfError::IndexOutOfRange {
            index,
            len: collection.len(),
        })?;
        if !ids.contains(&entry.id) {
            ids.push(entry.id);
        }
    }

    ids.into_iter()
        .map(|id| collection.remove_by_id(id))
        .collect()
}
