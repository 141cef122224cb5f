use std::path::Path;

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_content, open_journal, resolve_id_prefix,
};
use crate::error::CliError;

pub async fn run_edit(id: &str, text_parts: &[String], data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    let entry_id = resolve_id_prefix(id, journal.entries().iter().map(|entry| entry.id))?;

    journal.select_for_editing(&entry_id)?;
    let edited = match normalize_content(&text_parts.join(" ")) {
        Some(text) => Some(text),
        None => capture_editor_input_with_initial(journal.draft())?,
    };
    let Some(edited) = edited else {
        return Err(CliError::EmptyEditedContent);
    };

    journal.set_draft_text(edited);
    journal.run_until_idle().await;

    println!("{entry_id}");
    Ok(())
}
