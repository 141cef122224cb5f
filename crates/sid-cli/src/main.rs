//! sid CLI - a quiet journal for the terminal
//!
//! Write entries, record voice clips and run the writing timer against the
//! same local journal files.

mod audio;
mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::clips::{run_clip_delete, run_clips};
use crate::commands::common::resolve_data_dir;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::history::run_history;
use crate::commands::record::run_record;
use crate::commands::settings::{run_backspace, run_font, run_settings, run_size, run_theme};
use crate::commands::timer::run_timer;
use crate::commands::write::run_write;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "sid=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell, output }) = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let data_dir = resolve_data_dir(cli.data_dir)?;

    match cli.command {
        Some(Commands::Write { text }) => run_write(&text, &data_dir)?,
        Some(Commands::Edit { id, text }) => run_edit(&id, &text, &data_dir).await?,
        Some(Commands::History { json }) => run_history(json, &data_dir)?,
        Some(Commands::Delete { id }) => run_delete(&id, &data_dir).await?,
        Some(Commands::Record { seconds }) => run_record(seconds, &data_dir).await?,
        Some(Commands::Clips { json }) => run_clips(json, &data_dir)?,
        Some(Commands::ClipDelete { id }) => run_clip_delete(&id, &data_dir)?,
        Some(Commands::Font { option }) => run_font(option.into(), &data_dir)?,
        Some(Commands::Size) => run_size(&data_dir)?,
        Some(Commands::Backspace) => run_backspace(&data_dir)?,
        Some(Commands::Theme) => run_theme(&data_dir)?,
        Some(Commands::Settings { json }) => run_settings(json, &data_dir)?,
        Some(Commands::Timer { command }) => run_timer(command, &data_dir).await?,
        Some(Commands::Completions { .. }) => {}
        None => {
            // Quick entry: sid "today was long"
            if cli.text.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_write(&cli.text, &data_dir)?;
            }
        }
    }

    Ok(())
}
