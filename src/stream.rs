use crate::client::DataStreamClient;
use crate::session::Session;
use crate::types::FrameUpdate;
use crate::{Result, ViconError};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Handle to a background frame-polling stream.
///
/// A reader thread owns the session, calls `frame()` at the configured
/// interval and delivers a [`FrameUpdate`] whenever the frame number
/// advances.
pub struct FrameStream<C: DataStreamClient + Send + 'static> {
    receiver: Receiver<FrameUpdate>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<Session<C>>>,
}

impl<C: DataStreamClient + Send + 'static> FrameStream<C> {
    /// Start the reader thread. The thread hands the session back when
    /// the stream stops.
    pub(crate) fn start(session: Session<C>, poll_interval: Duration) -> Result<FrameStream<C>> {
        let (sender, receiver) = crossbeam_channel::bounded(256);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop_clone = stop_flag.clone();

        let thread = std::thread::Builder::new()
            .name("vicon-frames".into())
            .spawn(move || frame_reader_loop(session, sender, stop_clone, poll_interval))
            .map_err(ViconError::StreamSpawn)?;

        Ok(FrameStream {
            receiver,
            stop_flag,
            thread: Some(thread),
        })
    }

    /// Receive the next frame update (blocks until available).
    pub fn recv(&self) -> Result<FrameUpdate> {
        self.receiver.recv().map_err(|_| ViconError::StreamStopped)
    }

    /// Receive a frame update without blocking.
    pub fn try_recv(&self) -> Option<FrameUpdate> {
        self.receiver.try_recv().ok()
    }

    /// Receive a frame update with a timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<FrameUpdate> {
        self.receiver.recv_timeout(timeout).map_err(|e| match e {
            crossbeam_channel::RecvTimeoutError::Timeout => ViconError::Timeout,
            crossbeam_channel::RecvTimeoutError::Disconnected => ViconError::StreamStopped,
        })
    }

    /// Check if the reader thread is still running.
    pub fn is_active(&self) -> bool {
        !self.stop_flag.load(Ordering::Relaxed)
    }

    /// Stop the stream and take the session back for direct use.
    pub fn stop(mut self) -> Option<Session<C>> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<Session<C>> {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.thread.take().and_then(|thread| thread.join().ok())
    }
}

impl<C: DataStreamClient + Send + 'static> Drop for FrameStream<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Polls `frame()` at the configured interval and emits an update for
/// every observed frame-number advance. Failed polls are retried on
/// the next tick; the frame itself carries no retry.
fn frame_reader_loop<C: DataStreamClient>(
    mut session: Session<C>,
    sender: Sender<FrameUpdate>,
    stop_flag: Arc<AtomicBool>,
    poll_interval: Duration,
) -> Session<C> {
    let epoch = Instant::now();
    let mut last_frame = session.frame_number();
    let mut failures: u32 = 0;

    log::info!("Frame reader started");

    while !stop_flag.load(Ordering::Relaxed) {
        if !session.frame() {
            failures += 1;
            if failures % 100 == 1 {
                log::warn!("frame() failed ({} so far), retrying next tick", failures);
            }
            std::thread::sleep(poll_interval);
            continue;
        }

        let frame_number = session.frame_number();
        if frame_number != last_frame {
            last_frame = frame_number;
            let update = FrameUpdate {
                frame_number,
                host_timestamp_s: epoch.elapsed().as_secs_f64(),
            };
            match sender.try_send(update) {
                Ok(()) => {}
                Err(crossbeam_channel::TrySendError::Full(_)) => {
                    log::trace!("Frame channel full, dropping update");
                }
                Err(crossbeam_channel::TrySendError::Disconnected(_)) => {
                    log::info!("Frame channel disconnected, stopping reader");
                    break;
                }
            }
        }

        std::thread::sleep(poll_interval);
    }

    log::info!("Frame reader stopped");
    session
}
