//! Local capture devices and streams.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// One audio or video track of a capture stream
pub trait MediaTrack: Send + Sync {
    fn kind(&self) -> TrackKind;
    fn is_enabled(&self) -> bool;
    fn set_enabled(&self, enabled: bool);
    /// Release the device. Stopping twice is the caller's bug.
    fn stop(&self);
}

/// A capture stream: a handle plus its tracks
pub struct MediaStream {
    id: String,
    tracks: Vec<Arc<dyn MediaTrack>>,
}

impl MediaStream {
    pub fn new(id: impl Into<String>, tracks: Vec<Arc<dyn MediaTrack>>) -> Self {
        Self {
            id: id.into(),
            tracks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tracks(&self) -> &[Arc<dyn MediaTrack>] {
        &self.tracks
    }

    /// Enable or disable only the tracks of `kind`
    pub fn set_enabled(&self, kind: TrackKind, enabled: bool) {
        for track in self.tracks.iter().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
        }
    }

    /// Stop every track. Consumes the stream so no track is stopped twice.
    pub fn stop_all(self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

/// Camera/microphone and screen capture
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Combined audio + video capture
    async fn get_user_media(&self) -> Result<MediaStream, MediaError>;

    /// Screen capture
    async fn get_display_media(&self) -> Result<MediaStream, MediaError>;
}

/// In-memory track that records what was done to it
#[derive(Debug)]
pub struct SyntheticTrack {
    kind: TrackKind,
    enabled: AtomicBool,
    stops: AtomicUsize,
}

impl SyntheticTrack {
    pub fn new(kind: TrackKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            enabled: AtomicBool::new(true),
            stops: AtomicUsize::new(0),
        })
    }

    /// How many times `stop` was called
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl MediaTrack for SyntheticTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Devices backed by synthetic tracks, for hosts without real capture
#[derive(Debug, Default)]
pub struct SyntheticMediaDevices {
    streams: AtomicUsize,
}

impl SyntheticMediaDevices {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.streams.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl MediaDevices for SyntheticMediaDevices {
    async fn get_user_media(&self) -> Result<MediaStream, MediaError> {
        let audio: Arc<dyn MediaTrack> = SyntheticTrack::new(TrackKind::Audio);
        let video: Arc<dyn MediaTrack> = SyntheticTrack::new(TrackKind::Video);
        Ok(MediaStream::new(self.next_id("camera"), vec![audio, video]))
    }

    async fn get_display_media(&self) -> Result<MediaStream, MediaError> {
        let video: Arc<dyn MediaTrack> = SyntheticTrack::new(TrackKind::Video);
        Ok(MediaStream::new(self.next_id("screen"), vec![video]))
    }
}
