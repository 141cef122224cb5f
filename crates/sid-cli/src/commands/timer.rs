use std::io::{self, Write};
use std::path::Path;

use sid_core::Clock;

use crate::cli::TimerCommands;
use crate::commands::common::{open_journal, timer_status, CliJournal};
use crate::error::CliError;

pub async fn run_timer(command: TimerCommands, data_dir: &Path) -> Result<(), CliError> {
    let mut journal = open_journal(data_dir)?;

    match command {
        TimerCommands::Toggle => journal.toggle_timer(),
        TimerCommands::Reset => journal.reset_timer(),
        TimerCommands::Status => {}
        TimerCommands::Watch => return watch(&mut journal).await,
    }

    println!("{}", timer_status(journal.settings()));
    Ok(())
}

async fn watch(journal: &mut CliJournal) -> Result<(), CliError> {
    if !journal.settings().timer.is_running {
        journal.toggle_timer();
    }

    let mut stdout = io::stdout();
    write!(stdout, "\r{}", journal.settings().timer.label())?;
    stdout.flush()?;

    while journal.settings().timer.is_running {
        let Some(deadline) = journal.next_deadline() else {
            break;
        };
        let wait = deadline.saturating_duration_since(journal.clock().now());

        tokio::select! {
            () = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                journal.toggle_timer();
                break;
            }
        }

        journal.fire_due();
        write!(stdout, "\r{}", journal.settings().timer.label())?;
        stdout.flush()?;
    }

    writeln!(stdout)?;
    println!("{}", timer_status(journal.settings()));
    Ok(())
}
