use crate::types::{StreamMode, Version};

/// Result code attached to every DataStream client reply.
///
/// Codes the session does not explicitly handle fold into
/// [`ViconError::UnknownResult`](crate::ViconError::UnknownResult) at
/// the wrapper boundary instead of propagating in native form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    ClientConnectionFailed,
    InvalidHostName,
    NotConnected,
    InvalidIndex,
    InvalidSubjectName,
    InvalidSegmentName,
    Unknown,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

/// A result code paired with the operation payload, mirroring the
/// vendor SDK's `Output_*` reply structs. The payload is only
/// meaningful when `result` is `Success`.
#[derive(Debug, Clone)]
pub struct Output<T> {
    pub result: ResultCode,
    pub value: T,
}

impl<T> Output<T> {
    pub fn success(value: T) -> Output<T> {
        Output {
            result: ResultCode::Success,
            value,
        }
    }
}

impl<T: Default> Output<T> {
    pub fn fail(result: ResultCode) -> Output<T> {
        Output {
            result,
            value: T::default(),
        }
    }
}

/// Capability set consumed from the external DataStream client.
///
/// Transport, frame buffering and stream-mode negotiation all live
/// behind this seam. A production implementation wraps the vendor SDK;
/// [`SimClient`](crate::SimClient) is an in-memory stand-in for tests
/// and demos. Implementations are stateful: the connection and the
/// enabled data feeds persist across calls on the same instance.
pub trait DataStreamClient {
    /// Open a connection to a DataStream server at `"host:port"`.
    fn connect(&mut self, address: &str) -> ResultCode;

    fn disconnect(&mut self) -> ResultCode;

    /// Live connection status, never cached by callers.
    fn is_connected(&self) -> bool;

    fn version(&self) -> Version;

    fn enable_segment_data(&mut self) -> ResultCode;

    fn enable_marker_data(&mut self) -> ResultCode;

    fn is_segment_data_enabled(&self) -> bool;

    fn is_marker_data_enabled(&self) -> bool;

    fn set_stream_mode(&mut self, mode: StreamMode) -> ResultCode;

    /// Number of subjects visible in the current frame.
    fn subject_count(&self) -> Output<u32>;

    /// Name of the subject at `index` in the current frame.
    fn subject_name(&self, index: u32) -> Output<String>;

    /// Global rotation of `segment` as a helical (axis-angle) vector.
    fn segment_global_rotation_helical(&self, subject: &str, segment: &str) -> Output<[f64; 3]>;

    /// Global translation of `segment` in millimeters.
    fn segment_global_translation(&self, subject: &str, segment: &str) -> Output<[f64; 3]>;

    /// Capture/advance to the latest available frame.
    fn get_frame(&mut self) -> ResultCode;

    /// Sequence number of the last captured frame.
    fn frame_number(&self) -> u32;

    /// Number of visible markers on `subject` in the current frame.
    fn marker_count(&self, subject: &str) -> Output<u32>;
}
