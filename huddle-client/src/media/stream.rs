use anyhow::{Context, Result};
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use webrtc::api::media_engine::MIME_TYPE_OPUS;
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;
use webrtc::track::track_remote::TrackRemote;

/// The captured microphone. Cloning shares the same underlying track.
#[derive(Clone)]
pub struct LocalStream {
    id: String,
    track: Arc<TrackLocalStaticSample>,
}

impl LocalStream {
    /// Opus, 48 kHz stereo: what browsers negotiate for voice.
    pub fn opus(stream_id: impl Into<String>) -> Self {
        let id = stream_id.into();
        let track = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                clock_rate: 48_000,
                channels: 2,
                sdp_fmtp_line: "minptime=10;useinbandfec=1".to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            id.clone(),
        ));

        Self { id, track }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn track(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }

    /// Push one encoded Opus frame to every connection the stream is attached to.
    pub async fn write_sample(&self, data: Bytes, duration: Duration) -> Result<()> {
        self.track
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await
            .context("Failed to write audio sample")
    }
}

impl fmt::Debug for LocalStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStream").field("id", &self.id).finish()
    }
}

/// Audio received from a remote peer, handed to the presenter's sink.
#[derive(Clone)]
pub struct RemoteStream {
    stream_id: String,
    track: Option<Arc<TrackRemote>>,
}

impl RemoteStream {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            track: None,
        }
    }

    pub fn from_track(track: Arc<TrackRemote>) -> Self {
        Self {
            stream_id: track.stream_id(),
            track: Some(track),
        }
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    /// RTP source to read packets from. Absent for streams built without a transport.
    pub fn track(&self) -> Option<&Arc<TrackRemote>> {
        self.track.as_ref()
    }
}

impl fmt::Debug for RemoteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStream")
            .field("stream_id", &self.stream_id)
            .field("has_track", &self.track.is_some())
            .finish()
    }
}
