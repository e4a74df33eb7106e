use crate::client::ResultCode;

/// Errors raised by the session wrapper.
///
/// Routine soft failures (server unreachable, feature enable refused,
/// no new frame) are `false` returns on the corresponding operations,
/// never variants here.
#[derive(Debug, thiserror::Error)]
pub enum ViconError {
    #[error("already connected")]
    AlreadyConnected,

    #[error("not connected")]
    NotConnected,

    #[error("segment data not enabled, call enable_segment_data() first")]
    SegmentDataNotEnabled,

    #[error("marker data not enabled, call enable_marker_data() first")]
    MarkerDataNotEnabled,

    #[error("invalid stream mode {0}, expected 0, 1 or 2")]
    InvalidStreamMode(i32),

    #[error("invalid subject index {0}")]
    InvalidIndex(u32),

    #[error("invalid subject name '{0}'")]
    InvalidSubjectName(String),

    #[error("invalid segment name '{0}'")]
    InvalidSegmentName(String),

    #[error("{op}: unexpected result code {code:?}")]
    UnknownResult { op: &'static str, code: ResultCode },

    #[error("failed to start frame stream: {0}")]
    StreamSpawn(#[source] std::io::Error),

    #[error("frame stream stopped")]
    StreamStopped,

    #[error("timeout waiting for frame update")]
    Timeout,
}
