//! The review step between import and export.
//!
//! A front end shows the collection and answers with a [`ReviewAction`]
//! until the user finishes or cancels. Clearing is confirmed through the
//! prompt before it happens; a bad position is reported and the review goes
//! on.

use log::debug;

use crate::collection::PageCollection;
use crate::error::{MergePdfError, Result};
use crate::page::EntryId;

/// One user decision during review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Remove the entry stored under this id.
    Remove(EntryId),
    /// Remove the entry at this zero-based position.
    RemoveAt(usize),
    /// Remove every page, after confirmation.
    Clear,
    /// Accept the collection as it is.
    Finish,
    /// Abandon the session.
    Cancel,
}

/// Collaborator driving the review step.
pub trait ReviewPrompt {
    /// Show `collection` and ask what to do next.
    fn next_action(&mut self, collection: &PageCollection) -> ReviewAction;

    /// Ask whether all `count` pages should really be removed.
    fn confirm_clear(&mut self, count: usize) -> bool;

    /// Tell the user an action was rejected.
    fn report(&mut self, error: &MergePdfError);
}

/// Run the review loop until the prompt finishes or cancels.
///
/// # Errors
///
/// Returns [`MergePdfError::Cancelled`] if the prompt cancels. Rejected
/// removals are reported to the prompt and do not end the review.
pub fn run_review<P>(collection: &mut PageCollection, prompt: &mut P) -> Result<()>
where
    P: ReviewPrompt + ?Sized,
{
    loop {
        let outcome = match prompt.next_action(collection) {
            ReviewAction::Remove(id) => collection.remove_by_id(id).map(|_| ()),
            ReviewAction::RemoveAt(index) => collection.remove_at(index).map(|_| ()),
            ReviewAction::Clear => {
                if collection.is_empty() || prompt.confirm_clear(collection.len()) {
                    collection.clear();
                }
                Ok(())
            }
            ReviewAction::Finish => {
                debug!("Review finished with {} page(s)", collection.len());
                return Ok(());
            }
            ReviewAction::Cancel => return Err(MergePdfError::Cancelled),
        };

        if let Err(err) = outcome {
            if !err.is_recoverable() {
                return Err(err);
            }
            prompt.report(&err);
        }
    }
}
