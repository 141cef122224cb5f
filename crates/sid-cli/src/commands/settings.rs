use std::path::Path;

use sid_core::FontOption;

use crate::commands::common::{format_settings_lines, on_off, open_journal};
use crate::error::CliError;

pub fn run_font(option: FontOption, data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    journal.select_font(option);

    let settings = journal.settings();
    println!(
        "{} ({})",
        settings.font_label(settings.font_option),
        settings.editor_font_family()
    );
    Ok(())
}

pub fn run_size(data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    println!("{}", journal.cycle_font_size());
    Ok(())
}

pub fn run_backspace(data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    println!("backspace {}", on_off(journal.toggle_backspace()));
    Ok(())
}

pub fn run_theme(data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;
    let theme = if journal.toggle_dark_mode() {
        "dark"
    } else {
        "light"
    };
    println!("{theme}");
    Ok(())
}

pub fn run_settings(as_json: bool, data_dir: &Path) -> Result<(), CliError> {
    let journal = open_journal(data_dir)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(journal.settings())?);
    } else {
        for line in format_settings_lines(journal.settings()) {
            println!("{line}");
        }
    }

    Ok(())
}
