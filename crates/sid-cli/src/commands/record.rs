use std::path::Path;
use std::time::Duration;

use sid_core::InputMode;

use crate::audio::StdinPcmDevice;
use crate::commands::common::open_journal_with_device;
use crate::error::CliError;

pub async fn run_record(seconds: Option<u64>, data_dir: &Path) -> Result<(), CliError> {
    let device = StdinPcmDevice::default();
    let input_closed = device.input_closed();
    let mut journal = open_journal_with_device(data_dir, device)?;

    journal.set_mode(InputMode::Voice).await;
    if let Err(error) = journal.start_capture().await {
        journal.set_mode(InputMode::Chat).await;
        return Err(error.into());
    }
    tracing::info!("Recording; close stdin or press Ctrl-C to stop");

    let limit = seconds.map_or(Duration::MAX, Duration::from_secs);
    tokio::select! {
        () = input_closed.notified() => {}
        () = tokio::time::sleep(limit) => {}
        _ = tokio::signal::ctrl_c() => {}
    }

    let stopped = journal.stop_capture().await;
    journal.set_mode(InputMode::Chat).await;

    let Some(clip_id) = stopped? else {
        return Err(CliError::EmptyRecording);
    };
    let label = journal
        .clips()
        .iter()
        .find(|clip| clip.id == clip_id)
        .map(sid_core::VoiceClip::duration_label)
        .unwrap_or_default();

    println!("{clip_id}  {label}");
    Ok(())
}
