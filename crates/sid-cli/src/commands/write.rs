use std::path::Path;

use crate::commands::common::{open_journal, resolve_entry_text};
use crate::error::CliError;

pub fn run_write(text_parts: &[String], data_dir: &Path) -> Result<(), CliError> {
    let text = resolve_entry_text(text_parts)?;

    let mut journal = open_journal(data_dir)?;
    journal.set_draft_text(text);
    let id = journal.commit_now().ok_or(CliError::EmptyContent)?;

    println!("{id}");
    Ok(())
}
