//! In-memory DataStream client for tests and server-less demos.

use crate::client::{DataStreamClient, Output, ResultCode};
use crate::types::{StreamMode, Version};

/// A subject tracked by the simulated server. The root segment shares
/// the subject's name, like a single-segment subject on a real server.
#[derive(Debug, Clone)]
pub struct SimSubject {
    name: String,
    translation: [f64; 3],
    rotation: [f64; 3],
    markers: u32,
}

impl SimSubject {
    pub fn new(name: &str) -> SimSubject {
        SimSubject {
            name: name.to_string(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            markers: 0,
        }
    }

    /// Starting global translation in millimeters.
    pub fn translation(mut self, mm: [f64; 3]) -> SimSubject {
        self.translation = mm;
        self
    }

    /// Global rotation as a helical (axis-angle) vector.
    pub fn rotation(mut self, helical: [f64; 3]) -> SimSubject {
        self.rotation = helical;
        self
    }

    /// Number of visible markers.
    pub fn markers(mut self, count: u32) -> SimSubject {
        self.markers = count;
        self
    }
}

/// [`DataStreamClient`] backed by nothing but memory: a fixed set of
/// subjects and a frame counter advanced by `get_frame()`.
///
/// Each captured frame drifts every subject's x translation by one
/// millimeter so consecutive frames are distinguishable. While
/// disconnected the sim answers like a real client: `NotConnected`
/// result codes and refused enables. Set `refuse_connections` to
/// script connection failures.
#[derive(Debug, Default)]
pub struct SimClient {
    /// When set, `connect()` answers `ClientConnectionFailed`.
    pub refuse_connections: bool,
    connected: bool,
    segment_data: bool,
    marker_data: bool,
    stream_mode: StreamMode,
    frame_number: u32,
    subjects: Vec<SimSubject>,
}

impl SimClient {
    pub fn new() -> SimClient {
        SimClient::default()
    }

    pub fn add_subject(&mut self, subject: SimSubject) {
        self.subjects.push(subject);
    }

    /// Stream mode last accepted via `set_stream_mode`.
    pub fn stream_mode(&self) -> StreamMode {
        self.stream_mode
    }

    fn find(&self, name: &str) -> Option<&SimSubject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    fn segment_query<F>(&self, subject: &str, segment: &str, field: F) -> Output<[f64; 3]>
    where
        F: Fn(&SimSubject) -> [f64; 3],
    {
        if !self.connected {
            return Output::fail(ResultCode::NotConnected);
        }
        let sub = match self.find(subject) {
            Some(s) => s,
            None => return Output::fail(ResultCode::InvalidSubjectName),
        };
        if segment != sub.name {
            return Output::fail(ResultCode::InvalidSegmentName);
        }
        Output::success(field(sub))
    }
}

impl DataStreamClient for SimClient {
    fn connect(&mut self, address: &str) -> ResultCode {
        if self.refuse_connections {
            return ResultCode::ClientConnectionFailed;
        }
        if !address.contains(':') {
            return ResultCode::InvalidHostName;
        }
        self.connected = true;
        ResultCode::Success
    }

    fn disconnect(&mut self) -> ResultCode {
        self.connected = false;
        ResultCode::Success
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn version(&self) -> Version {
        Version {
            major: 1,
            minor: 7,
            point: 0,
        }
    }

    fn enable_segment_data(&mut self) -> ResultCode {
        if !self.connected {
            return ResultCode::NotConnected;
        }
        self.segment_data = true;
        ResultCode::Success
    }

    fn enable_marker_data(&mut self) -> ResultCode {
        if !self.connected {
            return ResultCode::NotConnected;
        }
        self.marker_data = true;
        ResultCode::Success
    }

    fn is_segment_data_enabled(&self) -> bool {
        self.segment_data
    }

    fn is_marker_data_enabled(&self) -> bool {
        self.marker_data
    }

    fn set_stream_mode(&mut self, mode: StreamMode) -> ResultCode {
        if !self.connected {
            return ResultCode::NotConnected;
        }
        self.stream_mode = mode;
        ResultCode::Success
    }

    fn subject_count(&self) -> Output<u32> {
        if !self.connected {
            return Output::fail(ResultCode::NotConnected);
        }
        Output::success(self.subjects.len() as u32)
    }

    fn subject_name(&self, index: u32) -> Output<String> {
        if !self.connected {
            return Output::fail(ResultCode::NotConnected);
        }
        match self.subjects.get(index as usize) {
            Some(s) => Output::success(s.name.clone()),
            None => Output::fail(ResultCode::InvalidIndex),
        }
    }

    fn segment_global_rotation_helical(&self, subject: &str, segment: &str) -> Output<[f64; 3]> {
        self.segment_query(subject, segment, |s| s.rotation)
    }

    fn segment_global_translation(&self, subject: &str, segment: &str) -> Output<[f64; 3]> {
        self.segment_query(subject, segment, |s| s.translation)
    }

    fn get_frame(&mut self) -> ResultCode {
        if !self.connected {
            return ResultCode::NotConnected;
        }
        self.frame_number += 1;
        for subject in &mut self.subjects {
            subject.translation[0] += 1.0;
        }
        ResultCode::Success
    }

    fn frame_number(&self) -> u32 {
        self.frame_number
    }

    fn marker_count(&self, subject: &str) -> Output<u32> {
        if !self.connected {
            return Output::fail(ResultCode::NotConnected);
        }
        match self.find(subject) {
            Some(s) => Output::success(s.markers),
            None => Output::fail(ResultCode::InvalidSubjectName),
        }
    }
}
