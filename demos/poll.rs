//! Poll frames from a DataStream server and print subject poses.
//!
//! Usage: cargo run --example poll

use vicon::{Session, SimClient, SimSubject, StreamMode};

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

    println!("DataStream server {}", session.version());

    if !session.enable_segment_data() || !session.enable_marker_data() {
        eprintln!("Server refused data feeds");
        std::process::exit(1);
    }
    session.set_stream_mode(StreamMode::ClientPull);
    println!("Enabled: {:?}", session.enabled_features());

    for _ in 0..10 {
        if !session.frame() {
            continue;
        }
        println!("--- frame {} ---", session.frame_number());
        for name in session.subjects() {
            match (
                session.global_translation(&name),
                session.marker_count(&name),
            ) {
                (Ok(t), Ok(markers)) => println!(
                    "  {:<10} pos=[{:+8.1}, {:+8.1}, {:+8.1}] mm  markers={}",
                    name, t[0], t[1], t[2], markers
                ),
                (Err(e), _) | (_, Err(e)) => eprintln!("  {}: {}", name, e),
            }
        }
    }

    let _ = session.disconnect();
}

/// Swap in a client backed by the vendor SDK to talk to a real server.
fn demo_client() -> SimClient {
    let mut sim = SimClient::new();
    sim.add_subject(
        SimSubject::new("Subject1")
            .translation([120.0, -40.0, 980.0])
            .rotation([0.0, 0.0, 1.57])
            .markers(5),
    );
    sim.add_subject(
        SimSubject::new("Wand")
            .translation([0.0, 0.0, 1500.0])
            .markers(3),
    );
    sim
}
