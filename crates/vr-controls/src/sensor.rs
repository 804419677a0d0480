//! Monitored sensors.
//!
//! A sensor holds the last reading and a status derived from it. The status
//! is recomputed on every write: negative readings are too low, readings
//! above the sensor's upper bound are too high, anything else is in range.
//! Pressure sensors use the rig target pressure as their upper bound;
//! temperature sensors have none.

use serde::{Deserialize, Serialize};
use vr_core::{VrResult, ensure_finite};

/// Derived state of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorStatus {
    /// No reading has been taken yet.
    Unknown,
    Disabled,
    /// The sensor stopped answering; cleared by the next reading.
    NoReply,
    ValueInRange,
    ValueTooLow,
    ValueTooHigh,
}

impl SensorStatus {
    /// Single character used in status reports.
    pub fn code(self) -> char {
        match self {
            SensorStatus::Unknown => 'U',
            SensorStatus::Disabled => 'D',
            SensorStatus::NoReply => 'N',
            SensorStatus::ValueInRange => 'R',
            SensorStatus::ValueTooLow => 'L',
            SensorStatus::ValueTooHigh => 'H',
        }
    }

    /// Classify a reading against `[0, upper]`.
    pub fn classify(value: f64, upper: Option<f64>) -> Self {
        if value < 0.0 {
            SensorStatus::ValueTooLow
        } else if upper.is_some_and(|upper| value > upper) {
            SensorStatus::ValueTooHigh
        } else {
            SensorStatus::ValueInRange
        }
    }
}

/// A monitored scalar reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    value: f64,
    status: SensorStatus,
    enabled: bool,
    upper: Option<f64>,
    has_reading: bool,
}

impl Default for Sensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensor {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            status: SensorStatus::Unknown,
            enabled: true,
            upper: None,
            has_reading: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Store a reading and recompute the status against `[0, upper]`.
    ///
    /// # Errors
    ///
    /// Non-finite readings are rejected and leave the sensor untouched.
    pub fn set_value_within(&mut self, value: f64, upper: Option<f64>) -> VrResult<()> {
        let value = ensure_finite(value, "sensor reading")?;
        self.value = value;
        self.upper = upper;
        self.has_reading = true;
        self.refresh();
        Ok(())
    }

    /// Recompute the status against a new upper bound without a new reading.
    pub fn rebound(&mut self, upper: Option<f64>) {
        self.upper = upper;
        if self.status != SensorStatus::NoReply {
            self.refresh();
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.refresh();
    }

    /// Readings are still stored while disabled; the status stays `Disabled`.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.refresh();
    }

    /// Simulate a sensor that stopped answering. Ignored while disabled.
    pub fn mark_no_reply(&mut self) {
        if self.enabled {
            self.status = SensorStatus::NoReply;
        }
    }

    fn refresh(&mut self) {
        self.status = if !self.enabled {
            SensorStatus::Disabled
        } else if !self.has_reading {
            SensorStatus::Unknown
        } else {
            SensorStatus::classify(self.value, self.upper)
        };
    }
}

/// Pressure gauge; its upper bound is the rig target pressure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureSensor {
    inner: Sensor,
}

impl PressureSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(&self) -> &Sensor {
        &self.inner
    }

    pub fn sensor_mut(&mut self) -> &mut Sensor {
        &mut self.inner
    }

    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    pub fn status(&self) -> SensorStatus {
        self.inner.status()
    }

    pub fn set_value(&mut self, value: f64, target_pressure: f64) -> VrResult<()> {
        self.inner.set_value_within(value, Some(target_pressure))
    }
}

/// Temperature probe; only negative readings are out of range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSensor {
    inner: Sensor,
}

impl TemperatureSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(&self) -> &Sensor {
        &self.inner
    }

    pub fn sensor_mut(&mut self) -> &mut Sensor {
        &mut self.inner
    }

    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    pub fn status(&self) -> SensorStatus {
        self.inner.status()
    }

    pub fn set_value(&mut self, value: f64) -> VrResult<()> {
        self.inner.set_value_within(value, None)
    }
}

/// Address of one sensor on the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SensorRef {
    /// 0-based pressure sensor position.
    Pressure { index: usize },
    /// 0-based temperature sensor position.
    Temperature { index: usize },
}

impl SensorRef {
    pub fn pressure(index: usize) -> Self {
        Self::Pressure { index }
    }

    pub fn temperature(index: usize) -> Self {
        Self::Temperature { index }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Pressure { index } | Self::Temperature { index } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_sensor_is_unknown() {
        let sensor = Sensor::new();
        assert_eq!(sensor.status(), SensorStatus::Unknown);
        assert_eq!(sensor.status().code(), 'U');
    }

    #[test]
    fn pressure_status_tracks_target() {
        let mut p = PressureSensor::new();
        p.set_value(50.0, 100.0).unwrap();
        assert_eq!(p.status(), SensorStatus::ValueInRange);
        p.set_value(100.5, 100.0).unwrap();
        assert_eq!(p.status(), SensorStatus::ValueTooHigh);
        p.set_value(-0.1, 100.0).unwrap();
        assert_eq!(p.status(), SensorStatus::ValueTooLow);
    }

    #[test]
    fn temperature_has_no_upper_bound() {
        let mut t = TemperatureSensor::new();
        t.set_value(1.0e6).unwrap();
        assert_eq!(t.status(), SensorStatus::ValueInRange);
        t.set_value(-273.0).unwrap();
        assert_eq!(t.status(), SensorStatus::ValueTooLow);
    }

    #[test]
    fn disabled_sensor_keeps_status_but_stores_value() {
        let mut p = PressureSensor::new();
        p.sensor_mut().disable();
        p.set_value(500.0, 100.0).unwrap();
        assert_eq!(p.status(), SensorStatus::Disabled);
        assert_eq!(p.value(), 500.0);

        p.sensor_mut().enable();
        assert_eq!(p.status(), SensorStatus::ValueTooHigh);
    }

    #[test]
    fn no_reply_cleared_by_next_reading() {
        let mut t = TemperatureSensor::new();
        t.set_value(20.0).unwrap();
        t.sensor_mut().mark_no_reply();
        assert_eq!(t.status(), SensorStatus::NoReply);
        t.set_value(21.0).unwrap();
        assert_eq!(t.status(), SensorStatus::ValueInRange);
    }

    #[test]
    fn non_finite_reading_rejected() {
        let mut p = PressureSensor::new();
        p.set_value(10.0, 100.0).unwrap();
        assert!(p.set_value(f64::NAN, 100.0).is_err());
        assert!(p.set_value(f64::INFINITY, 100.0).is_err());
        assert_eq!(p.value(), 10.0);
    }

    #[test]
    fn rebound_reclassifies() {
        let mut p = PressureSensor::new();
        p.set_value(80.0, 100.0).unwrap();
        p.sensor_mut().rebound(Some(50.0));
        assert_eq!(p.status(), SensorStatus::ValueTooHigh);
    }

    #[test]
    fn sensor_ref_index() {
        assert_eq!(SensorRef::pressure(2).index(), 2);
        assert_eq!(SensorRef::temperature(7).index(), 7);
    }
}
