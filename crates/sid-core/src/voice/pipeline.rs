//! Capture lifecycle: one session at a time, turned into a stored clip.

use std::time::Instant;

use super::{AudioDevice, CaptureSession};
use crate::clock::Clock;
use crate::error::CaptureError;
use crate::models::{ClipId, VoiceClip};

/// Externally observable capture state.
///
/// Encoding happens inside the transition back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
}

/// Releases the session when dropped, so every exit path frees the device.
struct SessionGuard<S: CaptureSession> {
    session: S,
    started_at: Instant,
}

impl<S: CaptureSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.session.release();
    }
}

/// Owns the audio device, the open session (if any) and the clip collection.
pub struct VoicePipeline<D: AudioDevice> {
    device: D,
    capture: Option<SessionGuard<D::Session>>,
    clips: Vec<VoiceClip>,
    last_error: Option<CaptureError>,
}

impl<D: AudioDevice> VoicePipeline<D> {
    pub fn new(device: D) -> Self {
        Self::with_clips(device, Vec::new())
    }

    /// Pipeline over previously persisted clips (newest first).
    pub const fn with_clips(device: D, clips: Vec<VoiceClip>) -> Self {
        Self {
            device,
            capture: None,
            clips,
            last_error: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.capture.is_some() {
            CaptureState::Recording
        } else {
            CaptureState::Idle
        }
    }

    pub fn clips(&self) -> &[VoiceClip] {
        &self.clips
    }

    /// Transient message from the last failed capture attempt.
    pub const fn last_error(&self) -> Option<&CaptureError> {
        self.last_error.as_ref()
    }

    /// Open a capture session and start recording.
    pub async fn start_capture<C: Clock>(&mut self, clock: &C) -> Result<(), CaptureError> {
        self.last_error = None;
        if self.capture.is_some() {
            return Err(self.record_error(CaptureError::AlreadyRecording));
        }

        match self.device.open().await {
            Ok(session) => {
                self.capture = Some(SessionGuard {
                    session,
                    started_at: clock.now(),
                });
                tracing::info!("Voice capture started");
                Ok(())
            }
            Err(error) => Err(self.record_error(error)),
        }
    }

    /// Stop the open session and store the resulting clip.
    ///
    /// Stopping while idle is a no-op and yields `Ok(None)`. An empty payload
    /// also yields `Ok(None)`. The device is released in every case.
    pub async fn stop_capture<C: Clock>(
        &mut self,
        clock: &C,
    ) -> Result<Option<ClipId>, CaptureError> {
        let Some(mut capture) = self.capture.take() else {
            tracing::debug!("No active capture session to stop");
            return Ok(None);
        };

        let stopped = capture.session.stop().await;
        let started_at = capture.started_at;
        drop(capture);

        let audio = match stopped {
            Ok(audio) => audio,
            Err(error) => return Err(self.record_error(error)),
        };
        if audio.is_empty() {
            tracing::warn!("Voice capture produced no audio; discarding");
            return Ok(None);
        }

        let elapsed = clock.now().saturating_duration_since(started_at);
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let clip = VoiceClip::new(clock.wall_now(), duration_ms, audio.to_data_url());
        let id = clip.id;
        tracing::info!(%id, duration_ms = clip.duration_ms, "Voice clip saved");
        self.clips.insert(0, clip);
        Ok(Some(id))
    }

    /// Remove a clip immediately. Returns `false` if no such clip exists.
    pub fn delete_clip(&mut self, id: &ClipId) -> bool {
        let before = self.clips.len();
        self.clips.retain(|clip| clip.id != *id);
        let removed = self.clips.len() != before;
        if removed {
            tracing::info!(%id, "Deleted voice clip");
        }
        removed
    }

    fn record_error(&mut self, error: CaptureError) -> CaptureError {
        tracing::warn!("Voice capture failed: {error}");
        self.last_error = Some(error.clone());
        error
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::voice::EncodedAudio;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scriptable device that counts opens and releases.
    #[derive(Clone, Default)]
    pub(crate) struct FakeDevice {
        pub open_error: Option<CaptureError>,
        pub stop_error: Option<CaptureError>,
        pub payload: Vec<u8>,
        pub opened: Arc<AtomicUsize>,
        pub released: Arc<AtomicUsize>,
    }

    impl FakeDevice {
        pub(crate) fn with_payload(payload: &[u8]) -> Self {
            Self {
                payload: payload.to_vec(),
                ..Self::default()
            }
        }

        pub(crate) fn releases(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    pub(crate) struct FakeSession {
        device: FakeDevice,
        released: bool,
    }

    impl AudioDevice for FakeDevice {
        type Session = FakeSession;

        async fn open(&mut self) -> Result<FakeSession, CaptureError> {
            if let Some(error) = self.open_error.clone() {
                return Err(error);
            }
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                device: self.clone(),
                released: false,
            })
        }
    }

    impl CaptureSession for FakeSession {
        async fn stop(&mut self) -> Result<EncodedAudio, CaptureError> {
            if let Some(error) = self.device.stop_error.clone() {
                return Err(error);
            }
            Ok(EncodedAudio::new("audio/webm", self.device.payload.clone()))
        }

        fn release(&mut self) {
            if !self.released {
                self.released = true;
                self.device.released.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn short_capture_is_floored_to_half_a_second() {
        let clock = ManualClock::default();
        let device = FakeDevice::with_payload(b"opus");
        let mut pipeline = VoicePipeline::new(device.clone());

        pipeline.start_capture(&clock).await.unwrap();
        assert_eq!(pipeline.state(), CaptureState::Recording);

        clock.advance_ms(100);
        let id = pipeline.stop_capture(&clock).await.unwrap().unwrap();

        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert_eq!(pipeline.clips().len(), 1);
        assert_eq!(pipeline.clips()[0].id, id);
        assert_eq!(pipeline.clips()[0].duration_ms, 500);
        assert_eq!(pipeline.clips()[0].audio_data_url, "data:audio/webm;base64,b3B1cw==");
        assert_eq!(device.releases(), 1);
    }

    #[tokio::test]
    async fn long_capture_keeps_measured_duration_and_prepends() {
        let clock = ManualClock::default();
        let mut pipeline = VoicePipeline::new(FakeDevice::with_payload(b"a"));

        pipeline.start_capture(&clock).await.unwrap();
        clock.advance_ms(2_400);
        let first = pipeline.stop_capture(&clock).await.unwrap().unwrap();

        pipeline.start_capture(&clock).await.unwrap();
        clock.advance_ms(800);
        let second = pipeline.stop_capture(&clock).await.unwrap().unwrap();

        let ids: Vec<ClipId> = pipeline.clips().iter().map(|clip| clip.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(pipeline.clips()[1].duration_ms, 2_400);
        assert_eq!(pipeline.clips()[0].duration_ms, 800);
    }

    #[tokio::test]
    async fn stop_while_idle_is_a_no_op() {
        let clock = ManualClock::default();
        let mut pipeline = VoicePipeline::new(FakeDevice::with_payload(b"a"));

        assert_eq!(pipeline.stop_capture(&clock).await.unwrap(), None);
        assert!(pipeline.clips().is_empty());
        assert_eq!(pipeline.last_error(), None);
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let clock = ManualClock::default();
        let device = FakeDevice::with_payload(b"a");
        let mut pipeline = VoicePipeline::new(device.clone());

        pipeline.start_capture(&clock).await.unwrap();
        let err = pipeline.start_capture(&clock).await.unwrap_err();

        assert_eq!(err, CaptureError::AlreadyRecording);
        assert_eq!(device.opened.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.state(), CaptureState::Recording);
    }

    #[tokio::test]
    async fn open_failures_surface_and_leave_pipeline_idle() {
        let clock = ManualClock::default();
        for error in [
            CaptureError::Unsupported,
            CaptureError::PermissionDenied("denied".to_string()),
        ] {
            let device = FakeDevice {
                open_error: Some(error.clone()),
                ..FakeDevice::default()
            };
            let mut pipeline = VoicePipeline::new(device);

            assert_eq!(pipeline.start_capture(&clock).await.unwrap_err(), error);
            assert_eq!(pipeline.state(), CaptureState::Idle);
            assert_eq!(pipeline.last_error(), Some(&error));
        }
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_message() {
        let clock = ManualClock::default();
        let mut device = FakeDevice {
            open_error: Some(CaptureError::Unsupported),
            ..FakeDevice::default()
        };
        let mut pipeline = VoicePipeline::new(device.clone());
        let _ = pipeline.start_capture(&clock).await;
        assert!(pipeline.last_error().is_some());

        device.open_error = None;
        pipeline.device = device;
        pipeline.start_capture(&clock).await.unwrap();
        assert_eq!(pipeline.last_error(), None);
    }

    #[tokio::test]
    async fn failed_or_empty_stop_still_releases_device() {
        let clock = ManualClock::default();

        let empty = FakeDevice::default();
        let mut pipeline = VoicePipeline::new(empty.clone());
        pipeline.start_capture(&clock).await.unwrap();
        assert_eq!(pipeline.stop_capture(&clock).await.unwrap(), None);
        assert_eq!(empty.releases(), 1);

        let failing = FakeDevice {
            stop_error: Some(CaptureError::Device("encoder crashed".to_string())),
            ..FakeDevice::with_payload(b"a")
        };
        let mut pipeline = VoicePipeline::new(failing.clone());
        pipeline.start_capture(&clock).await.unwrap();
        assert!(pipeline.stop_capture(&clock).await.is_err());
        assert_eq!(pipeline.state(), CaptureState::Idle);
        assert!(pipeline.clips().is_empty());
        assert_eq!(failing.releases(), 1);
    }

    #[tokio::test]
    async fn teardown_releases_open_session() {
        let clock = ManualClock::default();
        let device = FakeDevice::with_payload(b"a");
        {
            let mut pipeline = VoicePipeline::new(device.clone());
            pipeline.start_capture(&clock).await.unwrap();
            assert_eq!(device.releases(), 0);
        }
        assert_eq!(device.releases(), 1);
    }

    #[tokio::test]
    async fn delete_clip_is_immediate() {
        let clock = ManualClock::default();
        let mut pipeline = VoicePipeline::new(FakeDevice::with_payload(b"a"));
        pipeline.start_capture(&clock).await.unwrap();
        let id = pipeline.stop_capture(&clock).await.unwrap().unwrap();

        assert!(pipeline.delete_clip(&id));
        assert!(pipeline.clips().is_empty());
        assert!(!pipeline.delete_clip(&id));
    }
}
