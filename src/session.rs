use crate::client::{DataStreamClient, Output, ResultCode};
use crate::stream::FrameStream;
use crate::types::{Features, StreamMode, Version};
use crate::{Result, ViconError};
use std::time::Duration;

/// A live DataStream session, the single owner of the external client
/// handle.
///
/// Every operation is a fresh round trip: validate arguments, forward
/// to the client, translate the result code, convert the payload. No
/// frame data is cached here. `connect`/`disconnect` switch the
/// logical connection state without recreating the handle.
///
/// The session holds no lock. Callers issue operations sequentially;
/// if it must cross threads, serialize access externally or hand the
/// whole session to a [`FrameStream`].
pub struct Session<C: DataStreamClient> {
    client: C,
}

impl<C: DataStreamClient> Session<C> {
    /// Wrap an external client handle for the session's lifetime.
    pub fn new(client: C) -> Session<C> {
        Session { client }
    }

    /// Unwrap the session and give the client handle back.
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Connect to a DataStream server at `"host:port"`.
    ///
    /// Returns `Ok(false)` when the server refuses or cannot be
    /// reached, a routine outcome when the server is not up yet.
    /// Connecting while already connected is a caller bug and fails
    /// with [`ViconError::AlreadyConnected`] regardless of the address.
    pub fn connect(&mut self, host_port: &str) -> Result<bool> {
        if self.client.is_connected() {
            return Err(ViconError::AlreadyConnected);
        }
        match self.client.connect(host_port) {
            ResultCode::Success => {
                log::info!("Connected to DataStream server at {}", host_port);
                Ok(true)
            }
            code => {
                log::warn!("Connect to {} failed: {:?}", host_port, code);
                Ok(false)
            }
        }
    }

    /// Drop the connection. Fails with [`ViconError::NotConnected`]
    /// when there is nothing to disconnect.
    pub fn disconnect(&mut self) -> Result<()> {
        if !self.client.is_connected() {
            return Err(ViconError::NotConnected);
        }
        self.client.disconnect();
        log::info!("Disconnected from DataStream server");
        Ok(())
    }

    /// Live connection status.
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// DataStream version triple. Idempotent within a session.
    pub fn version(&self) -> Version {
        self.client.version()
    }

    /// Ask the server to start delivering segment (pose) data.
    /// True iff the server accepted. Enables are one-way.
    pub fn enable_segment_data(&mut self) -> bool {
        self.client.enable_segment_data().is_success()
    }

    /// Ask the server to start delivering marker data.
    pub fn enable_marker_data(&mut self) -> bool {
        self.client.enable_marker_data().is_success()
    }

    /// Data feeds currently enabled on the client, queried live.
    pub fn enabled_features(&self) -> Features {
        let mut features = Features::empty();
        if self.client.is_segment_data_enabled() {
            features |= Features::SEGMENT_DATA;
        }
        if self.client.is_marker_data_enabled() {
            features |= Features::MARKER_DATA;
        }
        features
    }

    /// Select the server's data-delivery policy. True iff accepted.
    pub fn set_stream_mode(&mut self, mode: StreamMode) -> bool {
        self.client.set_stream_mode(mode).is_success()
    }

    /// Number of subjects visible in the current frame.
    pub fn subject_count(&self) -> u32 {
        self.client.subject_count().value
    }

    /// Name of the subject at `index` in the current frame.
    ///
    /// Indices are transient, valid only until the next [`frame`]
    /// call. Out-of-range indices are detected via the client's result
    /// code and fail with [`ViconError::InvalidIndex`].
    ///
    /// [`frame`]: Session::frame
    pub fn subject_name(&self, index: u32) -> Result<String> {
        let out = self.client.subject_name(index);
        match out.result {
            ResultCode::Success => Ok(out.value),
            ResultCode::InvalidIndex => Err(ViconError::InvalidIndex(index)),
            code => Err(ViconError::UnknownResult {
                op: "subject_name",
                code,
            }),
        }
    }

    /// All subject names in the current frame, in index order.
    ///
    /// Count and per-index names are separate round trips with no
    /// snapshot guarantee; a frame advance in between can skew the
    /// result. The client offers no operation to close that window.
    pub fn subjects(&self) -> Vec<String> {
        let count = self.client.subject_count().value;
        let mut subjects = Vec::with_capacity(count as usize);
        for index in 0..count {
            subjects.push(self.client.subject_name(index).value);
        }
        subjects
    }

    /// Global rotation of `subject`'s root segment as a helical
    /// (axis-angle) vector.
    ///
    /// The subject name doubles as the segment name at this surface;
    /// use [`segment_global_rotation`] to address an inner segment.
    /// Requires segment data, otherwise fails with
    /// [`ViconError::SegmentDataNotEnabled`] before the client is
    /// queried.
    ///
    /// [`segment_global_rotation`]: Session::segment_global_rotation
    pub fn global_rotation(&self, subject: &str) -> Result<[f64; 3]> {
        self.segment_global_rotation(subject, subject)
    }

    /// Global rotation of one segment of `subject`.
    pub fn segment_global_rotation(&self, subject: &str, segment: &str) -> Result<[f64; 3]> {
        if !self.client.is_segment_data_enabled() {
            return Err(ViconError::SegmentDataNotEnabled);
        }
        let out = self.client.segment_global_rotation_helical(subject, segment);
        translate_segment_result("segment_global_rotation", subject, segment, out)
    }

    /// Global translation of `subject`'s root segment, in millimeters.
    /// Same precondition and error taxonomy as [`global_rotation`].
    ///
    /// [`global_rotation`]: Session::global_rotation
    pub fn global_translation(&self, subject: &str) -> Result<[f64; 3]> {
        self.segment_global_translation(subject, subject)
    }

    /// Global translation of one segment of `subject`, in millimeters.
    pub fn segment_global_translation(&self, subject: &str, segment: &str) -> Result<[f64; 3]> {
        if !self.client.is_segment_data_enabled() {
            return Err(ViconError::SegmentDataNotEnabled);
        }
        let out = self.client.segment_global_translation(subject, segment);
        translate_segment_result("segment_global_translation", subject, segment, out)
    }

    /// Capture the latest available frame. True iff a new frame is in
    /// place.
    ///
    /// Frame-scoped queries (counts, names, poses) reflect new data
    /// only after this succeeds; sequencing is the caller's job.
    pub fn frame(&mut self) -> bool {
        self.client.get_frame().is_success()
    }

    /// Sequence number of the last captured frame. Monotonically
    /// increasing across successful [`frame`] calls.
    ///
    /// [`frame`]: Session::frame
    pub fn frame_number(&self) -> u32 {
        self.client.frame_number()
    }

    /// Number of visible markers on `subject` in the current frame.
    ///
    /// Requires marker data, otherwise fails with
    /// [`ViconError::MarkerDataNotEnabled`] before the client is
    /// queried.
    pub fn marker_count(&self, subject: &str) -> Result<u32> {
        if !self.client.is_marker_data_enabled() {
            return Err(ViconError::MarkerDataNotEnabled);
        }
        let out = self.client.marker_count(subject);
        match out.result {
            ResultCode::Success => Ok(out.value),
            ResultCode::InvalidSubjectName => {
                Err(ViconError::InvalidSubjectName(subject.to_string()))
            }
            code => Err(ViconError::UnknownResult {
                op: "marker_count",
                code,
            }),
        }
    }
}

impl<C: DataStreamClient + Send + 'static> Session<C> {
    /// Hand the session to a background reader that polls [`frame`] at
    /// `poll_interval` and delivers a
    /// [`FrameUpdate`](crate::FrameUpdate) for every frame advance.
    ///
    /// Fails with [`ViconError::NotConnected`] when there is no live
    /// connection to poll. [`FrameStream::stop`] gives the session
    /// back.
    ///
    /// [`frame`]: Session::frame
    pub fn start_stream(self, poll_interval: Duration) -> Result<FrameStream<C>> {
        if !self.client.is_connected() {
            return Err(ViconError::NotConnected);
        }
        FrameStream::start(self, poll_interval)
    }
}

fn translate_segment_result(
    op: &'static str,
    subject: &str,
    segment: &str,
    out: Output<[f64; 3]>,
) -> Result<[f64; 3]> {
    match out.result {
        ResultCode::Success => Ok(out.value),
        ResultCode::InvalidSegmentName => Err(ViconError::InvalidSegmentName(segment.to_string())),
        ResultCode::InvalidSubjectName => Err(ViconError::InvalidSubjectName(subject.to_string())),
        code => Err(ViconError::UnknownResult { op, code }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimClient, SimSubject};

    fn sim_with_subjects() -> SimClient {
        let mut sim = SimClient::new();
        sim.add_subject(
            SimSubject::new("Subject1")
                .translation([100.0, 50.0, 1200.0])
                .rotation([0.0, 1.5707963, 0.0])
                .markers(5),
        );
        sim.add_subject(SimSubject::new("Wand").markers(3));
        sim
    }

    fn connected_session() -> Session<SimClient> {
        let mut session = Session::new(sim_with_subjects());
        assert!(session.connect("localhost:801").unwrap());
        session
    }

    #[test]
    fn test_starts_disconnected() {
        let session = Session::new(SimClient::new());
        assert!(!session.is_connected());
    }

    #[test]
    fn test_connect_flips_status() {
        let mut session = Session::new(SimClient::new());
        assert!(session.connect("localhost:801").unwrap());
        assert!(session.is_connected());
    }

    #[test]
    fn test_connect_soft_fails_when_server_refuses() {
        let mut sim = SimClient::new();
        sim.refuse_connections = true;
        let mut session = Session::new(sim);
        assert!(!session.connect("localhost:801").unwrap());
        assert!(!session.is_connected());
    }

    #[test]
    fn test_connect_twice_is_a_usage_error() {
        let mut session = connected_session();
        match session.connect("elsewhere:801") {
            Err(ViconError::AlreadyConnected) => {}
            other => panic!("expected AlreadyConnected, got {:?}", other),
        }
        assert!(session.is_connected());
    }

    #[test]
    fn test_disconnect_without_connection_is_a_usage_error() {
        let mut session = Session::new(SimClient::new());
        match session.disconnect() {
            Err(ViconError::NotConnected) => {}
            other => panic!("expected NotConnected, got {:?}", other),
        }
    }

    #[test]
    fn test_disconnect_returns_to_disconnected() {
        let mut session = connected_session();
        session.disconnect().unwrap();
        assert!(!session.is_connected());
    }

    #[test]
    fn test_version_is_idempotent() {
        let session = connected_session();
        assert_eq!(session.version(), session.version());
    }

    #[test]
    fn test_enable_soft_fails_when_disconnected() {
        let mut session = Session::new(SimClient::new());
        assert!(!session.enable_segment_data());
        assert!(!session.enable_marker_data());
    }

    #[test]
    fn test_enabled_features_tracks_enables() {
        let mut session = connected_session();
        assert_eq!(session.enabled_features(), Features::empty());
        assert!(session.enable_segment_data());
        assert_eq!(session.enabled_features(), Features::SEGMENT_DATA);
        assert!(session.enable_marker_data());
        assert_eq!(
            session.enabled_features(),
            Features::SEGMENT_DATA | Features::MARKER_DATA
        );
    }

    #[test]
    fn test_set_stream_mode_reaches_the_client() {
        let mut session = connected_session();
        assert!(session.set_stream_mode(StreamMode::ServerPush));
        assert_eq!(
            session.into_inner().stream_mode(),
            StreamMode::ServerPush
        );
    }

    #[test]
    fn test_subjects_matches_count_in_index_order() {
        let mut session = connected_session();
        assert!(session.frame());
        let subjects = session.subjects();
        assert_eq!(subjects.len() as u32, session.subject_count());
        assert_eq!(subjects, vec!["Subject1", "Wand"]);
    }

    #[test]
    fn test_subject_name_in_range() {
        let mut session = connected_session();
        assert!(session.frame());
        assert_eq!(session.subject_name(1).unwrap(), "Wand");
    }

    #[test]
    fn test_subject_name_out_of_range_is_invalid_index() {
        let mut session = connected_session();
        assert!(session.frame());
        match session.subject_name(2) {
            Err(ViconError::InvalidIndex(2)) => {}
            other => panic!("expected InvalidIndex(2), got {:?}", other),
        }
    }

    #[test]
    fn test_codes_outside_the_taxonomy_fold_into_unknown() {
        // A disconnected client answers NotConnected, which the name
        // lookup does not map to a dedicated error.
        let session = Session::new(sim_with_subjects());
        match session.subject_name(0) {
            Err(ViconError::UnknownResult {
                op: "subject_name",
                code: ResultCode::NotConnected,
            }) => {}
            other => panic!("expected UnknownResult, got {:?}", other),
        }
    }

    #[test]
    fn test_rotation_requires_segment_data() {
        let session = connected_session();
        // Precondition fires before name validation.
        for name in ["Subject1", "NoSuchSubject"] {
            match session.global_rotation(name) {
                Err(ViconError::SegmentDataNotEnabled) => {}
                other => panic!("expected SegmentDataNotEnabled, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_translation_requires_segment_data() {
        let session = connected_session();
        match session.global_translation("Subject1") {
            Err(ViconError::SegmentDataNotEnabled) => {}
            other => panic!("expected SegmentDataNotEnabled, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_count_requires_marker_data() {
        let session = connected_session();
        match session.marker_count("Subject1") {
            Err(ViconError::MarkerDataNotEnabled) => {}
            other => panic!("expected MarkerDataNotEnabled, got {:?}", other),
        }
    }

    #[test]
    fn test_global_rotation_reads_the_pose() {
        let mut session = connected_session();
        assert!(session.enable_segment_data());
        assert!(session.frame());
        let rotation = session.global_rotation("Subject1").unwrap();
        assert_eq!(rotation, [0.0, 1.5707963, 0.0]);
    }

    #[test]
    fn test_global_translation_tracks_frames() {
        let mut session = connected_session();
        assert!(session.enable_segment_data());
        assert!(session.frame());
        // The sim drifts x by 1 mm per captured frame.
        assert_eq!(
            session.global_translation("Subject1").unwrap(),
            [101.0, 50.0, 1200.0]
        );
        assert!(session.frame());
        assert_eq!(
            session.global_translation("Subject1").unwrap(),
            [102.0, 50.0, 1200.0]
        );
    }

    #[test]
    fn test_unknown_subject_is_reported_not_a_crash() {
        let mut session = connected_session();
        assert!(session.enable_segment_data());
        assert!(session.frame());
        match session.global_rotation("Subject27") {
            Err(ViconError::InvalidSubjectName(name)) => assert_eq!(name, "Subject27"),
            other => panic!("expected InvalidSubjectName, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_segment_is_reported() {
        let mut session = connected_session();
        assert!(session.enable_segment_data());
        assert!(session.frame());
        match session.segment_global_rotation("Subject1", "LeftFoot") {
            Err(ViconError::InvalidSegmentName(name)) => assert_eq!(name, "LeftFoot"),
            other => panic!("expected InvalidSegmentName, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_advances_frame_number() {
        let mut session = connected_session();
        let before = session.frame_number();
        assert!(session.frame());
        assert!(session.frame());
        assert_eq!(session.frame_number(), before + 2);
    }

    #[test]
    fn test_frame_soft_fails_when_disconnected() {
        let mut session = Session::new(sim_with_subjects());
        assert!(!session.frame());
        assert_eq!(session.frame_number(), 0);
    }

    #[test]
    fn test_marker_count_for_known_and_unknown_subjects() {
        let mut session = connected_session();
        assert!(session.enable_marker_data());
        assert!(session.frame());
        assert_eq!(session.marker_count("Wand").unwrap(), 3);
        match session.marker_count("Ghost") {
            Err(ViconError::InvalidSubjectName(name)) => assert_eq!(name, "Ghost"),
            other => panic!("expected InvalidSubjectName, got {:?}", other),
        }
    }
}
