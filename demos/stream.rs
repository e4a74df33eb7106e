//! Stream frame updates through the background reader.
//!
//! Usage: cargo run --example stream

use std::time::Duration;
use vicon::{Session, SimClient, SimSubject, ViconError};

fn main() {
    env_logger::init();

    let mut session = Session::new(demo_client());

    match session.connect("localhost:801") {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("DataStream server not reachable");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let stream = match session.start_stream(Duration::from_millis(10)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to start stream: {}", e);
            std::process::exit(1);
        }
    };

    println!("Streaming frame updates (50 frames)...");

    for _ in 0..50 {
        match stream.recv_timeout(Duration::from_secs(2)) {
            Ok(update) => println!(
                "frame {:>6} at t={:.3}s",
                update.frame_number, update.host_timestamp_s
            ),
            Err(ViconError::Timeout) => {
                eprintln!("Timeout waiting for frames");
                break;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(mut session) = stream.stop() {
        println!("Stopped after frame {}", session.frame_number());
        let _ = session.disconnect();
    }
}

/// Swap in a client backed by the vendor SDK to talk to a real server.
fn demo_client() -> SimClient {
    let mut sim = SimClient::new();
    sim.add_subject(SimSubject::new("Subject1").markers(5));
    sim
}
