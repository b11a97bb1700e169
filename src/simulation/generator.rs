/// Synthetic reading generation with optional anomaly injection
use rand::Rng;

use crate::config::{AnomalyPolicy, ReadingRanges, SimulatorConfig};
use crate::models::{Condition, HumidityFault, Reading, TemperatureFault};
use crate::utils::{format_capture_time, now, round2};

/// Produces readings for a room, drawing values from the configured ranges
///
/// Anomaly selection under `AnomalyPolicy::Mixed`:
/// - temperature-only, humidity-only, both: 1/3 each
/// - temperature-only: hot or cold, 1/2 each
/// - humidity-only: humid or dry, 1/2 each
/// - both: hot and humid
///
/// Under `AnomalyPolicy::HotHumid` every anomaly is hot and humid.
pub struct ReadingGenerator<R> {
    rng: R,
    ranges: ReadingRanges,
    sensor_type: String,
    policy: AnomalyPolicy,
}

impl<R: Rng> ReadingGenerator<R> {
    pub fn new(
        rng: R,
        ranges: ReadingRanges,
        sensor_type: impl Into<String>,
        policy: AnomalyPolicy,
    ) -> Self {
        ReadingGenerator {
            rng,
            ranges,
            sensor_type: sensor_type.into(),
            policy,
        }
    }

    pub fn from_config(rng: R, config: &SimulatorConfig) -> Self {
        Self::new(
            rng,
            config.ranges.clone(),
            config.sensor_type.clone(),
            config.anomaly_policy,
        )
    }

    pub fn policy(&self) -> AnomalyPolicy {
        self.policy
    }

    /// Flip a biased coin, true with the given probability
    pub fn roll_anomaly(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Generate one reading for `room_id`, anomalous if `anomaly` is set
    pub fn generate(&mut self, room_id: i32, anomaly: bool) -> Reading {
        let condition = self.choose_condition(anomaly);
        let (temperature, humidity) = self.sample(condition);

        Reading {
            room_id,
            temperature: round2(temperature),
            humidity: round2(humidity),
            sensor_type: self.sensor_type.clone(),
            notes: format!("Auto-generated reading at {}", format_capture_time(&now())),
        }
    }

    pub fn choose_condition(&mut self, anomaly: bool) -> Condition {
        if !anomaly {
            return Condition::Normal;
        }

        match self.policy {
            AnomalyPolicy::HotHumid => Condition::Both,
            AnomalyPolicy::Mixed => match self.rng.random_range(0..3) {
                0 => {
                    let fault = if self.rng.random_bool(0.5) {
                        TemperatureFault::Hot
                    } else {
                        TemperatureFault::Cold
                    };
                    Condition::Temperature(fault)
                }
                1 => {
                    let fault = if self.rng.random_bool(0.5) {
                        HumidityFault::Humid
                    } else {
                        HumidityFault::Dry
                    };
                    Condition::Humidity(fault)
                }
                _ => Condition::Both,
            },
        }
    }

    /// Draw raw (unrounded) temperature and humidity for a condition
    pub fn sample(&mut self, condition: Condition) -> (f64, f64) {
        let (temperature_range, humidity_range) = match condition {
            Condition::Normal => (
                &self.ranges.normal_temperature,
                &self.ranges.normal_humidity,
            ),
            Condition::Temperature(TemperatureFault::Hot) => {
                (&self.ranges.hot, &self.ranges.normal_humidity)
            }
            Condition::Temperature(TemperatureFault::Cold) => {
                (&self.ranges.cold, &self.ranges.normal_humidity)
            }
            Condition::Humidity(HumidityFault::Humid) => {
                (&self.ranges.normal_temperature, &self.ranges.humid)
            }
            Condition::Humidity(HumidityFault::Dry) => {
                (&self.ranges.normal_temperature, &self.ranges.dry)
            }
            Condition::Both => (&self.ranges.hot, &self.ranges.humid),
        };

        let (temperature_range, humidity_range) =
            (temperature_range.clone(), humidity_range.clone());
        (
            self.rng.random_range(temperature_range),
            self.rng.random_range(humidity_range),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded(policy: AnomalyPolicy) -> ReadingGenerator<ChaCha8Rng> {
        ReadingGenerator::new(
            ChaCha8Rng::seed_from_u64(12345),
            ReadingRanges::default(),
            "DHT22",
            policy,
        )
    }

    fn is_normal(reading: &Reading) -> bool {
        (18.0..=24.0).contains(&reading.temperature) && (30.0..=60.0).contains(&reading.humidity)
    }

    #[test]
    fn normal_readings_stay_in_range() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        for _ in 0..1000 {
            let reading = generator.generate(1, false);
            assert!(reading.temperature >= 18.0 && reading.temperature <= 24.0);
            assert!(reading.humidity >= 30.0 && reading.humidity <= 60.0);
        }
    }

    #[test]
    fn anomalous_readings_leave_normal_range() {
        for policy in [AnomalyPolicy::Mixed, AnomalyPolicy::HotHumid] {
            let mut generator = seeded(policy);
            for _ in 0..1000 {
                let reading = generator.generate(2, true);
                assert!(!is_normal(&reading), "{:?} produced {:?}", policy, reading);
            }
        }
    }

    #[test]
    fn values_have_at_most_two_decimals() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        for i in 0..500 {
            let reading = generator.generate(3, i % 2 == 0);
            assert_eq!(round2(reading.temperature), reading.temperature);
            assert_eq!(round2(reading.humidity), reading.humidity);
        }
    }

    #[test]
    fn mixed_policy_produces_every_shape() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        let mut seen = Vec::new();
        for _ in 0..1000 {
            let condition = generator.choose_condition(true);
            if !seen.contains(&condition) {
                seen.push(condition);
            }
        }

        for expected in [
            Condition::Temperature(TemperatureFault::Hot),
            Condition::Temperature(TemperatureFault::Cold),
            Condition::Humidity(HumidityFault::Humid),
            Condition::Humidity(HumidityFault::Dry),
            Condition::Both,
        ] {
            assert!(seen.contains(&expected), "never chose {:?}", expected);
        }
        assert!(!seen.contains(&Condition::Normal));
    }

    #[test]
    fn hot_humid_policy_only_produces_both() {
        let mut generator = seeded(AnomalyPolicy::HotHumid);
        for _ in 0..200 {
            assert_eq!(generator.choose_condition(true), Condition::Both);
        }
        let reading = generator.generate(1, true);
        assert!((27.0..=32.0).contains(&reading.temperature));
        assert!((65.0..=80.0).contains(&reading.humidity));
    }

    #[test]
    fn single_value_faults_keep_the_other_value_normal() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        for _ in 0..200 {
            let (t, h) = generator.sample(Condition::Temperature(TemperatureFault::Cold));
            assert!((12.0..=17.5).contains(&t));
            assert!((30.0..=60.0).contains(&h));

            let (t, h) = generator.sample(Condition::Humidity(HumidityFault::Dry));
            assert!((18.0..=24.0).contains(&t));
            assert!((15.0..=29.0).contains(&h));
        }
    }

    #[test]
    fn no_anomaly_means_normal_condition() {
        let mut generator = seeded(AnomalyPolicy::HotHumid);
        assert_eq!(generator.choose_condition(false), Condition::Normal);
    }

    #[test]
    fn reading_carries_room_and_metadata() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        let reading = generator.generate(42, false);
        assert_eq!(reading.room_id, 42);
        assert_eq!(reading.sensor_type, "DHT22");
        assert!(reading.notes.starts_with("Auto-generated reading at "));
    }

    #[test]
    fn anomaly_coin_respects_extremes() {
        let mut generator = seeded(AnomalyPolicy::Mixed);
        assert!((0..100).all(|_| !generator.roll_anomaly(0.0)));
        assert!((0..100).all(|_| generator.roll_anomaly(1.0)));
    }
}
