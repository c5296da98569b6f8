//! Terminal dialogs for importing and reviewing pages.
//!
//! Questions are written to one stream and answers read line by line from
//! another, so the prompt works on stdin/stderr as well as on in-memory
//! buffers in tests. End of input counts as an empty answer.

use mergepdf::collection::PageCollection;
use mergepdf::config::PageRange;
use mergepdf::error::MergePdfError;
use mergepdf::resolve::ImportPrompt;
use mergepdf::review::{ReviewAction, ReviewPrompt};
use std::io::{BufRead, Write};
use std::path::Path;

/// Line-oriented prompt over a reader and a writer.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Create a prompt reading answers from `input` and asking on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` and return the trimmed answer, `None` at end of input.
    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{question}").ok();
        self.output.flush().ok();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                writeln!(self.output).ok();
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, message: &str) {
        writeln!(self.output, "{message}").ok();
    }

    /// Ask for a page number until one parses; `None` skips.
    fn ask_page(&mut self, question: &str) -> Option<u32> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse() {
                Ok(page) => return Some(page),
                Err(_) => self.say(&format!("  '{answer}' is not a page number")),
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> ImportPrompt for TerminalPrompt<R, W> {
    fn confirm_import_all(&mut self, path: &Path, total_pages: u32) -> bool {
        let question = format!(
            "{} has {total_pages} pages. Import all pages? [Y/n]: ",
            path.display()
        );
        match self.ask(&question) {
            Some(answer) => answer.is_empty() || is_yes(&answer),
            None => false,
        }
    }

    fn page_range(
        &mut self,
        _path: &Path,
        total_pages: u32,
        previous_error: Option<&MergePdfError>,
    ) -> Option<PageRange> {
        if let Some(err) = previous_error {
            self.say(&format!("  {err}"));
        }
        let start = self.ask_page(&format!("Start page (1-{total_pages}, empty to skip): "))?;
        let end = self.ask_page(&format!("End page ({start}-{total_pages}, empty to skip): "))?;
        Some(PageRange::new(start, end))
    }
}

impl<R: BufRead, W: Write> ReviewPrompt for TerminalPrompt<R, W> {
    fn next_action(&mut self, collection: &PageCollection) -> ReviewAction {
        self.say("");
        if collection.is_empty() {
            self.say("  (no pages)");
        }
        for (position, entry) in collection.entries().iter().enumerate() {
            self.say(&format!("  {:>3}. {}", position + 1, entry.page));
        }

        loop {
            let Some(answer) =
                self.ask("Page number to remove, 'c' to clear, 'q' to cancel, Enter to finish: ")
            else {
                return ReviewAction::Finish;
            };

            match answer.to_lowercase().as_str() {
                "" => return ReviewAction::Finish,
                "q" | "quit" => return ReviewAction::Cancel,
                "c" | "clear" => return ReviewAction::Clear,
                other => match other.parse::<usize>() {
                    Ok(position) if position >= 1 => return ReviewAction::RemoveAt(position - 1),
                    _ => self.say(&format!("  '{answer}' is not a page position")),
                },
            }
        }
    }

    fn confirm_clear(&mut self, count: usize) -> bool {
        self.ask(&format!("Remove all {count} pages? [y/N]: "))
            .is_some_and(|answer| is_yes(&answer))
    }

    fn report(&mut self, error: &MergePdfError) {
        self.say(&format!("  {error}"));
    }
}
