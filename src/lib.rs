//! # vicon - Session layer for Vicon DataStream motion capture
//!
//! Thin stateful wrapper over an external DataStream client:
//! connect/disconnect lifecycle, stream-mode selection, per-frame
//! subject enumeration, and per-subject pose and marker queries.
//! Transport and frame acquisition live behind the [`DataStreamClient`]
//! seam; this crate validates arguments, translates result codes into
//! the error taxonomy of [`ViconError`], and marshals payloads into
//! caller-facing types.
//!
//! ## Quick Start
//! ```
//! use vicon::{Session, SimClient, StreamMode};
//!
//! let mut session = Session::new(SimClient::new());
//! assert!(session.connect("localhost:801").unwrap());
//! session.set_stream_mode(StreamMode::ClientPull);
//!
//! if session.frame() {
//!     println!("frame {}: {:?}", session.frame_number(), session.subjects());
//! }
//! ```
//!
//! Swap [`SimClient`] for an implementation backed by the vendor SDK
//! to talk to a live capture server.

pub mod error;
pub mod types;
pub mod client;
pub mod session;
pub mod sim;
pub mod stream;

pub use client::{DataStreamClient, Output, ResultCode};
pub use error::ViconError;
pub use session::Session;
pub use sim::{SimClient, SimSubject};
pub use stream::FrameStream;
pub use types::*;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, ViconError>;
