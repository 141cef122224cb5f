use std::env;
use std::fmt::Display;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{SecondsFormat, TimeZone};
use serde::Serialize;
use sid_core::store::HistoryGroup;
use sid_core::{Entry, FileStore, InputMode, Journal, Settings, SystemClock, VoiceClip};

use crate::audio::StdinPcmDevice;
use crate::error::CliError;

pub type CliJournal = Journal<FileStore, SystemClock, StdinPcmDevice>;

#[derive(Debug, Serialize)]
pub struct EntryItem {
    pub id: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryGroupItem {
    pub day: String,
    pub label: String,
    pub entries: Vec<EntryItem>,
}

#[derive(Debug, Serialize)]
pub struct ClipItem {
    pub id: String,
    pub created_at: String,
    pub duration_ms: u64,
    pub duration_label: String,
    pub mime_type: Option<String>,
}

pub fn open_journal(data_dir: &Path) -> Result<CliJournal, CliError> {
    open_journal_with_device(data_dir, StdinPcmDevice::default())
}

pub fn open_journal_with_device(
    data_dir: &Path,
    device: StdinPcmDevice,
) -> Result<CliJournal, CliError> {
    let store = FileStore::open(data_dir)?;
    Ok(Journal::open(store, SystemClock, device))
}

pub fn resolve_data_dir(cli_data_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_data_dir
        .or_else(|| env::var_os("SID_DATA_DIR").map(PathBuf::from))
        .or_else(default_data_dir)
        .ok_or(CliError::NoDataDir)
}

pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("sid"))
}

/// Find the single id that equals or starts with `query`.
pub fn resolve_id_prefix<T, I>(query: &str, candidates: I) -> Result<T, CliError>
where
    T: Copy + Display,
    I: IntoIterator<Item = T>,
{
    let query = normalize_identifier(query)?.to_lowercase();
    let matching = candidates
        .into_iter()
        .filter(|id| id.to_string().starts_with(&query))
        .collect::<Vec<_>>();

    if let Some(exact) = matching.iter().find(|id| id.to_string() == query) {
        return Ok(*exact);
    }

    match matching.as_slice() {
        [] => Err(CliError::NotFound(query)),
        [only] => Ok(*only),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|id| short_id(&id.to_string()))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_history_lines<Tz>(groups: &[HistoryGroup<'_>], tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    for group in groups {
        lines.push(group.label.clone());
        for entry in &group.entries {
            let time = entry.created_at.with_timezone(tz).format("%H:%M");
            let short_id = short_id(&entry.id.to_string());
            let preview = entry.title_preview(40);
            lines.push(format!("  {short_id:<13}  {preview:<40}  {time}"));
        }
    }
    lines
}

pub fn history_group_to_item(group: &HistoryGroup<'_>) -> HistoryGroupItem {
    HistoryGroupItem {
        day: group.key(),
        label: group.label.clone(),
        entries: group.entries.iter().copied().map(entry_to_item).collect(),
    }
}

pub fn entry_to_item(entry: &Entry) -> EntryItem {
    EntryItem {
        id: entry.id.to_string(),
        text: entry.text.clone(),
        created_at: entry.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

pub fn format_clip_lines<Tz>(clips: &[VoiceClip], tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    clips
        .iter()
        .map(|clip| {
            let short_id = short_id(&clip.id.to_string());
            let created = clip.created_at.with_timezone(tz).format("%b %-d %H:%M");
            format!("{short_id:<13}  {}  {created}", clip.duration_label())
        })
        .collect()
}

pub fn clip_to_item(clip: &VoiceClip) -> ClipItem {
    ClipItem {
        id: clip.id.to_string(),
        created_at: clip.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        duration_ms: clip.duration_ms,
        duration_label: clip.duration_label(),
        mime_type: clip.mime_type().map(str::to_string),
    }
}

pub fn format_settings_lines(settings: &Settings) -> Vec<String> {
    let mode = match settings.mode {
        InputMode::Chat => "chat",
        InputMode::Voice => "voice",
    };
    vec![
        format!(
            "font       {} ({})",
            settings.font_label(settings.font_option),
            settings.editor_font_family()
        ),
        format!("size       {}", settings.font_size),
        format!("mode       {mode}"),
        format!("backspace  {}", on_off(settings.backspace_on)),
        format!(
            "theme      {}",
            if settings.dark_mode { "dark" } else { "light" }
        ),
        format!("timer      {}", timer_status(settings)),
    ]
}

pub fn timer_status(settings: &Settings) -> String {
    let state = if settings.timer.is_running {
        "running"
    } else {
        "paused"
    };
    format!("{} ({state})", settings.timer.label())
}

pub const fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn resolve_entry_text(text_parts: &[String]) -> Result<String, CliError> {
    if let Some(text) = normalize_content(&text_parts.join(" ")) {
        return Ok(text);
    }

    if let Some(text) = read_piped_stdin()? {
        return Ok(text);
    }

    if let Some(text) = capture_editor_input_with_initial("")? {
        return Ok(text);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_identifier(id: &str) -> Result<&str, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyId)
    } else {
        Ok(trimmed)
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(initial_text: &str) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_entry_file_path();
    std::fs::write(&temp_file, initial_text)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let text = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&text))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let status = Command::new(program).args(parts).arg(file_path).status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_entry_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("sid-entry-{}-{now}.txt", std::process::id()))
}
