use std::path::Path;

use chrono::Local;

use crate::commands::common::{
    format_history_lines, history_group_to_item, open_journal, HistoryGroupItem,
};
use crate::error::CliError;

pub fn run_history(as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let journal = open_journal(data_dir)?;
    let groups = journal.history_groups(&Local);

    if as_json {
        let json_items = groups
            .iter()
            .map(history_group_to_item)
            .collect::<Vec<HistoryGroupItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_history_lines(&groups, &Local) {
            println!("{line}");
        }
    }

    Ok(())
}
