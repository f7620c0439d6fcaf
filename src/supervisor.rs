//! Polling supervisor
//!
//! [`SensorHub`] owns every device driver and runs the single worker thread
//! that performs all bus I/O: one sequential initialization pass, then a
//! continuous polling loop. Results are published per device into a
//! mutex-guarded snapshot store; external readers only ever touch that
//! store, never a driver or the bus.

use crate::device::PolledDevice;
use crate::reading::SensorReading;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Pause between polling ticks. Bounds CPU use; not a timing guarantee.
const TICK_DELAY: Duration = Duration::from_millis(1);

/// Length of one sample-rate accounting window.
const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Externally visible state of one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    /// Device label, as reported by the driver
    pub label: String,
    /// Whether initialization completed successfully
    pub initiated: bool,
    /// Most recent error text; empty while nothing has failed
    pub last_error: String,
    /// Most recent good reading; survives later read failures
    pub reading: Option<SensorReading>,
    /// Samples counted in the previous completed one-second window
    pub sample_rate: u32,
}

/// Per-device sample counter over a rolling one-second window.
///
/// Only the worker loop touches this; the published rate always reflects
/// the previous completed window, never a partially-filled one.
struct RateWindow {
    count: u32,
    window_start: Instant,
}

impl RateWindow {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn record(&mut self) {
        self.count += 1;
    }

    /// Finalize the window if its boundary has passed: hand back the count
    /// and start the next window at `now`.
    fn roll(&mut self, now: Instant) -> Option<u32> {
        if now.duration_since(self.window_start) < RATE_WINDOW {
            return None;
        }
        let rate = self.count;
        self.count = 0;
        self.window_start = now;
        Some(rate)
    }
}

struct HubShared {
    snapshots: Mutex<Vec<DeviceSnapshot>>,
    stop: AtomicBool,
}

impl HubShared {
    fn lock_snapshots(&self) -> MutexGuard<'_, Vec<DeviceSnapshot>> {
        // Readers never write; a poisoned lock still holds a consistent
        // bundle, so recover the guard instead of propagating the panic.
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Supervisor handle: owns the worker thread and the snapshot store.
///
/// Polling starts at construction and runs until [`SensorHub::stop`] is
/// called or the hub is dropped; both block until the worker has fully
/// exited, so no bus access can outlive the hub.
pub struct SensorHub {
    shared: Arc<HubShared>,
    worker: Option<JoinHandle<()>>,
}

impl SensorHub {
    /// Take ownership of `devices` and start polling them.
    ///
    /// The worker initializes every device in order first — one device's
    /// failure never prevents the next one's attempt — then polls all
    /// initiated devices each tick.
    pub fn start(devices: Vec<Box<dyn PolledDevice>>) -> Self {
        let snapshots = devices
            .iter()
            .map(|device| DeviceSnapshot {
                label: device.label().to_string(),
                initiated: false,
                last_error: String::new(),
                reading: None,
                sample_rate: 0,
            })
            .collect();

        let shared = Arc::new(HubShared {
            snapshots: Mutex::new(snapshots),
            stop: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || run_worker(devices, worker_shared));

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Snapshot of the device with this label, if the hub owns one.
    ///
    /// Safe to call from any thread at any rate; returns the most recently
    /// published bundle and never blocks on bus I/O.
    pub fn snapshot(&self, label: &str) -> Option<DeviceSnapshot> {
        self.shared
            .lock_snapshots()
            .iter()
            .find(|snap| snap.label == label)
            .cloned()
    }

    /// Snapshots of every owned device, in polling order.
    pub fn snapshots(&self) -> Vec<DeviceSnapshot> {
        self.shared.lock_snapshots().clone()
    }

    /// Request stop and block until the worker loop has fully exited.
    ///
    /// The flag is cooperative: the in-flight tick finishes first. After
    /// this returns no further bus access occurs. Idempotent.
    pub fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("worker thread panicked");
            }
        }
    }
}

impl Drop for SensorHub {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(mut devices: Vec<Box<dyn PolledDevice>>, shared: Arc<HubShared>) {
    // Phase 1: one-shot sequential initialization, one error channel per
    // device.
    let mut initiated = vec![false; devices.len()];
    for (i, device) in devices.iter_mut().enumerate() {
        match device.init() {
            Ok(()) => {
                initiated[i] = true;
                shared.lock_snapshots()[i].initiated = true;
            }
            Err(e) => {
                error!(device = device.label(), error = %e, "initialization failed");
                shared.lock_snapshots()[i].last_error = e.to_string();
            }
        }
    }

    info!(
        devices = devices.len(),
        initiated = initiated.iter().filter(|ok| **ok).count(),
        "polling started"
    );

    // Phase 2: poll until the stop flag is observed at the top of a tick.
    let mut windows: Vec<RateWindow> = devices
        .iter()
        .map(|_| RateWindow::new(Instant::now()))
        .collect();

    while !shared.stop.load(Ordering::SeqCst) {
        for (i, device) in devices.iter_mut().enumerate() {
            if !initiated[i] {
                continue;
            }

            let mut new_reading = None;
            let mut new_error = None;

            match device.update() {
                Ok(true) => {
                    windows[i].record();
                    new_reading = device.reading();
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(device = device.label(), error = %e, "read failed");
                    new_error = Some(e.to_string());
                }
            }

            let rolled = windows[i].roll(Instant::now());
            if let Some(rate) = rolled {
                debug!(device = device.label(), rate, "rate window rolled");
            }

            // One lock acquisition publishes everything this tick changed
            // for this device, so readers never observe a torn bundle.
            if new_reading.is_some() || new_error.is_some() || rolled.is_some() {
                let mut snapshots = shared.lock_snapshots();
                let snapshot = &mut snapshots[i];
                if new_reading.is_some() {
                    snapshot.reading = new_reading;
                }
                if let Some(text) = new_error {
                    snapshot.last_error = text;
                }
                if let Some(rate) = rolled {
                    snapshot.sample_rate = rate;
                }
            }
        }

        thread::sleep(TICK_DELAY);
    }

    info!("polling stopped");
}
