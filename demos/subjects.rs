//! Enumerate the subjects visible to a DataStream server.

use vicon::{Session, SimClient, SimSubject};

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

    session.frame();

    println!(
        "Server {}, {} subject(s):",
        session.version(),
        session.subject_count()
    );
    for (i, name) in session.subjects().iter().enumerate() {
        println!("  [{}] {}", i, name);
    }

    let _ = session.disconnect();
}

/// Swap in a client backed by the vendor SDK to talk to a real server.
fn demo_client() -> SimClient {
    let mut sim = SimClient::new();
    sim.add_subject(
        SimSubject::new("Subject1")
            .translation([120.0, -40.0, 980.0])
            .markers(5),
    );
    sim.add_subject(
        SimSubject::new("Wand")
            .translation([0.0, 0.0, 1500.0])
            .markers(3),
    );
    sim
}
