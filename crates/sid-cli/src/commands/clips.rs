use std::path::Path;

use chrono::Local;

use crate::commands::common::{
    clip_to_item, format_clip_lines, open_journal, resolve_id_prefix, ClipItem,
};
use crate::error::CliError;

pub fn run_clips(as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let journal = open_journal(data_dir)?;

    if as_json {
        let json_items = journal
            .clips()
            .iter()
            .map(clip_to_item)
            .collect::<Vec<ClipItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_clip_lines(journal.clips(), &Local) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn run_clip_delete(id: &str, data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    let clip_id = resolve_id_prefix(id, journal.clips().iter().map(|clip| clip.id))?;

    journal.delete_clip(&clip_id);
    println!("{clip_id}");
    Ok(())
}
