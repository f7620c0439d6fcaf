//! Sensor hub monitor - continuous multi-device acquisition and display
//!
//! Attaches emulated LSM9DS1 packages to a shared bus, hands them to the
//! polling supervisor, and redraws the published snapshots in place.
//!
//! Usage:
//!   hub-monitor --devices 2 --interval 200 --duration 30

use clap::Parser;
use i2c_sensor_hub::registers::{AG_ADDRESS, AG_ADDRESS_ALT, MAG_ADDRESS, MAG_ADDRESS_ALT};
use i2c_sensor_hub::{DeviceSnapshot, Lsm9ds1, Lsm9ds1Config, PolledDevice, SensorHub, SimBus};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Address pairs one bus can carry: SDO pins high, then low
const ADDRESS_PAIRS: [(u8, u8); 2] = [
    (AG_ADDRESS, MAG_ADDRESS),
    (AG_ADDRESS_ALT, MAG_ADDRESS_ALT),
];

#[derive(Parser, Debug)]
#[command(name = "hub-monitor")]
#[command(about = "Poll emulated LSM9DS1 packages and display live snapshots", long_about = None)]
struct Args {
    /// Number of packages to attach (a shared bus fits 1 or 2)
    #[arg(short = 'n', long, default_value = "2")]
    devices: usize,

    /// Display refresh interval in milliseconds
    #[arg(short, long, default_value = "200")]
    interval: u64,

    /// Duration in seconds (optional, runs until Ctrl+C if omitted)
    #[arg(short, long)]
    duration: Option<u64>,
}

/// Create a horizontal bar graph for a value
fn create_bar(value: f32, max_value: f32, width: usize) -> String {
    let normalized = (value / max_value).clamp(-1.0, 1.0);
    let center = width / 2;
    let bar_length = ((normalized.abs() * center as f32) as usize).min(center);

    let mut bar = String::new();

    if normalized < 0.0 {
        // Negative value: bar extends left from center
        bar.push_str(&" ".repeat(center - bar_length));
        bar.push_str(&"█".repeat(bar_length));
        bar.push('|');
        bar.push_str(&" ".repeat(center));
    } else {
        // Positive value: bar extends right from center
        bar.push_str(&" ".repeat(center));
        bar.push('|');
        bar.push_str(&"█".repeat(bar_length));
        bar.push_str(&" ".repeat(center - bar_length));
    }

    bar
}

/// Block until every device has either initialized or recorded its failure.
fn wait_for_init(hub: &SensorHub, devices: usize) {
    let deadline = Instant::now() + Duration::from_millis(500 * devices as u64 + 1000);
    while Instant::now() < deadline {
        let settled = hub
            .snapshots()
            .iter()
            .all(|snap| snap.initiated || !snap.last_error.is_empty());
        if settled {
            return;
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn draw_device(snap: &DeviceSnapshot) {
    println!(
        "DEVICE {:<8} {:>4} Hz                                                ",
        snap.label, snap.sample_rate
    );

    let error = if snap.last_error.is_empty() {
        "-"
    } else {
        &snap.last_error
    };
    println!("  last error: {:<56}", error);

    let reading = match snap.reading {
        Some(r) => r,
        None => {
            println!("  waiting for first sample...                                   ");
            println!();
            return;
        }
    };

    println!("  ACCELEROMETER (g)                -2g ◄─────────┼─────────► +2g");
    println!("    X: {:7.3}g  [{}]", reading.accel.x, create_bar(reading.accel.x, 2.0, 40));
    println!("    Y: {:7.3}g  [{}]", reading.accel.y, create_bar(reading.accel.y, 2.0, 40));
    println!("    Z: {:7.3}g  [{}]", reading.accel.z, create_bar(reading.accel.z, 2.0, 40));

    println!("  GYROSCOPE (rad/s)               -4.3 ◄─────────┼─────────► +4.3");
    println!("    X: {:7.3}   [{}]", reading.gyro.x, create_bar(reading.gyro.x, 4.3, 40));
    println!("    Y: {:7.3}   [{}]", reading.gyro.y, create_bar(reading.gyro.y, 4.3, 40));
    println!("    Z: {:7.3}   [{}]", reading.gyro.z, create_bar(reading.gyro.z, 4.3, 40));

    println!("  MAGNETOMETER (µT)                -60 ◄─────────┼─────────► +60");
    println!("    X: {:7.2}   [{}]", reading.mag.x, create_bar(reading.mag.x, 60.0, 40));
    println!("    Y: {:7.2}   [{}]", reading.mag.y, create_bar(reading.mag.y, 60.0, 40));
    println!("    Z: {:7.2}   [{}]", reading.mag.z, create_bar(reading.mag.z, 60.0, 40));

    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Best-effort; avoid panics if a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    if args.devices == 0 || args.devices > ADDRESS_PAIRS.len() {
        eprintln!("Error: devices must be 1 or 2 (one bus carries two address pairs)");
        std::process::exit(1);
    }

    println!("Sensor Hub Monitor");
    println!("==================");
    println!("Attaching {} emulated package(s)...", args.devices);

    // One shared bus; every driver gets a cheap clone of it
    let mut bus = SimBus::new();
    for (ag, mag) in &ADDRESS_PAIRS[..args.devices] {
        bus = bus.with_package(*ag, *mag);
    }

    let devices: Vec<Box<dyn PolledDevice>> = ADDRESS_PAIRS[..args.devices]
        .iter()
        .enumerate()
        .map(|(i, (ag, mag))| {
            let config = Lsm9ds1Config {
                ag_address: *ag,
                mag_address: *mag,
                ..Lsm9ds1Config::default()
            };
            Box::new(Lsm9ds1::new(bus.clone(), format!("imu{}", i), config))
                as Box<dyn PolledDevice>
        })
        .collect();

    let mut hub = SensorHub::start(devices);

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    wait_for_init(&hub, args.devices);

    let mut any_initiated = false;
    for snap in hub.snapshots() {
        if snap.initiated {
            println!("{}: initialized", snap.label);
            any_initiated = true;
        } else {
            eprintln!("{}: initialization failed: {}", snap.label, snap.last_error);
            eprintln!("Please check:");
            eprintln!("  1. The package answers on its configured address pair");
            eprintln!("  2. Power and pull-up resistors on the bus lines");
            eprintln!("  3. The configuration profile uses legal codes");
        }
    }

    if !any_initiated {
        eprintln!("No device initialized, exiting.");
        hub.stop();
        std::process::exit(1);
    }

    println!("Press Ctrl+C to exit");
    thread::sleep(Duration::from_secs(1));

    let start = Instant::now();
    let end_time = args.duration.map(|d| start + Duration::from_secs(d));

    // Clear screen once at start
    print!("\x1B[2J\x1B[H");
    io::stdout().flush()?;

    while running.load(Ordering::SeqCst) {
        if let Some(end) = end_time {
            if Instant::now() >= end {
                break;
            }
        }

        // Move cursor to top without clearing (reduces flicker)
        print!("\x1B[H");

        println!("Sensor Hub Monitor - Live Data                                  ");
        println!("==============================                                  ");
        println!(
            "Time: {:6.1}s | Refresh: {} ms                                  ",
            start.elapsed().as_secs_f64(),
            args.interval
        );
        println!();

        for snap in hub.snapshots() {
            draw_device(&snap);
        }

        // Erase anything left over below the last drawn line
        print!("\x1B[J");
        io::stdout().flush()?;

        thread::sleep(Duration::from_millis(args.interval));
    }

    hub.stop();

    println!("\nStopped.");
    for snap in hub.snapshots() {
        if snap.last_error.is_empty() {
            println!("  {}: {} Hz", snap.label, snap.sample_rate);
        } else {
            println!(
                "  {}: {} Hz (last error: {})",
                snap.label, snap.sample_rate, snap.last_error
            );
        }
    }

    Ok(())
}
