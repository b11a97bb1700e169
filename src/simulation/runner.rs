/// Timed send loop over the configured rooms
use log::{debug, error, info, warn};
use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use tokio::time::{sleep, Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::models::Reading;
use crate::simulation::generator::ReadingGenerator;
use crate::utils::describe_duration;

// Cap for durations too large to add to the clock
const MAX_RUN: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// How long to run and how often to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub duration: Duration,
    pub interval: Duration,
}

impl RunPlan {
    pub fn minutes(duration_minutes: u64, interval_seconds: u64) -> Self {
        RunPlan {
            duration: Duration::from_secs(duration_minutes.saturating_mul(60)),
            interval: Duration::from_secs(interval_seconds),
        }
    }
}

pub struct Simulator<R> {
    generator: ReadingGenerator<R>,
    room_ids: Vec<i32>,
    anomaly_probability: f64,
    cancel: CancellationToken,
}

impl<R: Rng> Simulator<R> {
    pub fn new(
        generator: ReadingGenerator<R>,
        room_ids: Vec<i32>,
        anomaly_probability: f64,
        cancel: CancellationToken,
    ) -> Self {
        Simulator {
            generator,
            room_ids,
            anomaly_probability,
            cancel,
        }
    }

    /// Send readings for every room each `plan.interval` until `plan.duration`
    /// has passed or the cancellation token fires
    ///
    /// Each reading is anomalous with the configured probability. Failed sends
    /// are logged and skipped.
    ///
    /// # Returns
    /// Number of readings the sender accepted
    pub async fn run<F, Fut, E>(&mut self, plan: RunPlan, mut send: F) -> usize
    where
        F: FnMut(Reading) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        info!(
            "Starting sensor simulation for {} ({:?} anomalies)",
            describe_duration(plan.duration),
            self.generator.policy()
        );
        info!("Sending readings every {}", describe_duration(plan.interval));

        let started = Instant::now();
        let end_time = started
            .checked_add(plan.duration)
            .unwrap_or_else(|| started + MAX_RUN);
        let mut reading_count = 0;

        'cycles: while Instant::now() < end_time {
            for &room_id in &self.room_ids {
                if self.cancel.is_cancelled() {
                    break 'cycles;
                }

                let anomaly = self.generator.roll_anomaly(self.anomaly_probability);
                let reading = self.generator.generate(room_id, anomaly);
                let (temperature, humidity) = (reading.temperature, reading.humidity);
                debug!("Sending {:?}", reading);

                let Some(result) = self.deliver(send(reading)).await else {
                    break 'cycles;
                };
                match result {
                    Ok(()) => {
                        reading_count += 1;
                        info!(
                            "Room {}: {:.2}°C, {:.2}% humidity",
                            room_id, temperature, humidity
                        );
                        if anomaly {
                            warn!(
                                "ABNORMAL: Room {} - {:.2}°C, {:.2}%",
                                room_id, temperature, humidity
                            );
                        }
                    }
                    Err(e) => error!("Failed to send data for room {}: {}", room_id, e),
                }
            }

            info!("Waiting {}...", describe_duration(plan.interval));
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = sleep(plan.interval) => {}
            }
        }

        if self.cancel.is_cancelled() {
            info!("Simulation stopped by user");
        }
        info!("Simulation complete. Total readings sent: {}", reading_count);

        reading_count
    }

    /// Send one normal reading per room without looping or waiting
    ///
    /// # Returns
    /// Number of readings the sender accepted
    pub async fn quick_test<F, Fut, E>(&mut self, mut send: F) -> usize
    where
        F: FnMut(Reading) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        info!("Quick test mode...");
        let mut reading_count = 0;

        for &room_id in &self.room_ids {
            if self.cancel.is_cancelled() {
                info!("Quick test stopped by user");
                break;
            }

            let reading = self.generator.generate(room_id, false);
            let (temperature, humidity) = (reading.temperature, reading.humidity);

            let Some(result) = self.deliver(send(reading)).await else {
                info!("Quick test stopped by user");
                break;
            };
            match result {
                Ok(()) => {
                    reading_count += 1;
                    info!(
                        "Room {}: {:.2}°C, {:.2}% humidity",
                        room_id, temperature, humidity
                    );
                }
                Err(e) => error!("Failed to send data for room {}: {}", room_id, e),
            }
        }

        info!("Quick test complete!");
        reading_count
    }

    /// Await a send unless cancellation fires first, in which case the send
    /// is dropped and `None` is returned. A send that is already complete
    /// wins over a pending cancellation.
    async fn deliver<Fut, T>(&self, send: Fut) -> Option<T>
    where
        Fut: Future<Output = T>,
    {
        tokio::select! {
            biased;
            result = send => Some(result),
            _ = self.cancel.cancelled() => None,
        }
    }
}
