//! Voice clip model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Shortest duration a clip may report, in milliseconds.
pub const MIN_CLIP_DURATION_MS: u64 = 500;

/// A unique identifier for a voice clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(Uuid);

impl ClipId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClipId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A recorded voice note. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceClip {
    pub id: ClipId,
    pub created_at: DateTime<Utc>,
    /// Capture length, never below [`MIN_CLIP_DURATION_MS`].
    #[serde(deserialize_with = "deserialize_duration_ms")]
    pub duration_ms: u64,
    /// Self-contained `data:<mime>;base64,<payload>` URL.
    pub audio_data_url: String,
}

impl VoiceClip {
    /// Build a clip, applying the minimum-duration floor.
    #[must_use]
    pub fn new(created_at: DateTime<Utc>, duration_ms: u64, audio_data_url: String) -> Self {
        Self {
            id: ClipId::new(),
            created_at,
            duration_ms: duration_ms.max(MIN_CLIP_DURATION_MS),
            audio_data_url,
        }
    }

    /// MIME type declared in the data URL, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.audio_data_url.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end]).filter(|mime| !mime.is_empty())
    }

    /// Duration rendered as `MM:SS`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        crate::util::format_voice_duration(self.duration_ms)
    }
}

/// Stored durations get the same floor as freshly captured ones.
fn deserialize_duration_ms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    u64::deserialize(deserializer).map(|duration_ms| duration_ms.max(MIN_CLIP_DURATION_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clip_floors_duration() {
        let clip = VoiceClip::new(Utc::now(), 120, "data:audio/wav;base64,AA==".to_string());
        assert_eq!(clip.duration_ms, MIN_CLIP_DURATION_MS);

        let clip = VoiceClip::new(Utc::now(), 4_200, "data:audio/wav;base64,AA==".to_string());
        assert_eq!(clip.duration_ms, 4_200);
    }

    #[test]
    fn mime_type_reads_data_url_prefix() {
        let clip = VoiceClip::new(
            Utc::now(),
            1_000,
            "data:audio/webm;codecs=opus;base64,AA==".to_string(),
        );
        assert_eq!(clip.mime_type(), Some("audio/webm"));

        let clip = VoiceClip::new(Utc::now(), 1_000, "not a data url".to_string());
        assert_eq!(clip.mime_type(), None);
    }

    #[test]
    fn serialized_fields_use_stored_names() {
        let clip = VoiceClip::new(Utc::now(), 900, "data:audio/wav;base64,AA==".to_string());
        let json = serde_json::to_value(&clip).unwrap();
        assert_eq!(json["durationMs"], 900);
        assert!(json.get("audioDataUrl").is_some());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn stored_short_duration_is_floored_on_load() {
        let raw = r#"{
            "id": "0192f0a1-7c3e-7000-8000-000000000001",
            "createdAt": "2026-10-19T10:00:00Z",
            "durationMs": 100,
            "audioDataUrl": "data:audio/webm;base64,AA=="
        }"#;

        let clip: VoiceClip = serde_json::from_str(raw).unwrap();
        assert_eq!(clip.duration_ms, MIN_CLIP_DURATION_MS);
    }
}
