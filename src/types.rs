use crate::{Result, ViconError};
use std::fmt;

/// Data-delivery policy negotiated with the DataStream server.
#[repr(i32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Frames are buffered server-side and fetched on demand by `frame()`.
    #[default]
    ClientPull = 0,
    /// Like `ClientPull`, but the next frame is pre-fetched in the background.
    ClientPullPreFetch = 1,
    /// The server pushes every frame as it is captured.
    ServerPush = 2,
}

impl StreamMode {
    /// Convert a raw mode integer (0, 1 or 2). Anything else fails with
    /// [`ViconError::InvalidStreamMode`] without touching the client.
    pub fn from_raw(raw: i32) -> Result<StreamMode> {
        match raw {
            0 => Ok(StreamMode::ClientPull),
            1 => Ok(StreamMode::ClientPullPreFetch),
            2 => Ok(StreamMode::ServerPush),
            other => Err(ViconError::InvalidStreamMode(other)),
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for StreamMode {
    type Error = ViconError;

    fn try_from(raw: i32) -> Result<StreamMode> {
        StreamMode::from_raw(raw)
    }
}

/// DataStream server version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub point: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.point)
    }
}

bitflags::bitflags! {
    /// Data feeds currently enabled on the client. Enables are one-way:
    /// the server exposes no disable calls.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Features: u32 {
        const SEGMENT_DATA = 1 << 0;
        const MARKER_DATA  = 1 << 1;
    }
}

/// One frame advance observed by a [`FrameStream`](crate::FrameStream).
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdate {
    /// Sequence number of the newly captured frame.
    pub frame_number: u32,
    /// Host steady-clock timestamp in seconds since the stream started.
    pub host_timestamp_s: f64,
}
