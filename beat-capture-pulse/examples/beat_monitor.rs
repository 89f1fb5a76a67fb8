//! Prints a line for every bass or treble beat in whatever is playing.
//!
//! ```text
//! RUST_LOG=info cargo run -p beat-capture-pulse --features pulse --example beat_monitor [config.json]
//! ```

use beat_capture_core::{BeatDetector, CaptureConfiguration};
use beat_capture_pulse::pulse_driver;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("couldn't read {}: {}", path, e);
                std::process::exit(1);
            });
            CaptureConfiguration::from_json(&json).unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1);
            })
        }
        None => CaptureConfiguration::default(),
    };

    let mut driver = pulse_driver(config);
    if let Err(e) = driver.start() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let mut frame: u64 = 0;
    loop {
        let detector = match driver.pulse() {
            Ok(detector) => detector,
            Err(e) => {
                eprintln!("{}", e);
                break;
            }
        };

        if detector.is_bass_beat() || detector.is_treble_beat() {
            println!(
                "frame {:>8}  {}  {}",
                frame,
                if detector.is_bass_beat() { "BASS" } else { "    " },
                if detector.is_treble_beat() { "TREBLE" } else { "" }
            );
        }
        frame += 1;
    }

    if let Some(summary) = driver.stop() {
        log::info!("{} pulses, {} read failures", summary.pulses, summary.read_failures);
    }
}
