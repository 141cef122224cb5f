use std::path::Path;

use sid_core::store::DeleteRequest;

use crate::commands::common::{open_journal, resolve_id_prefix};
use crate::error::CliError;

pub async fn run_delete(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    let entry_id = resolve_id_prefix(id, journal.entries().iter().map(|entry| entry.id))?;

    if journal.request_delete(&entry_id)? == DeleteRequest::Staged {
        journal.run_until_idle().await;
    }

    println!("{entry_id}");
    Ok(())
}
