use crate::control::OutputLimits;
use super::state::Sample;

// ---------------------------------------------------------------------------
// Closed-loop events
// ---------------------------------------------------------------------------

/// Kinds of closed-loop events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    SaturationStart,
    SaturationEnd,
    SetpointCrossed,
    Settled { band: f64 },
    Custom(String),
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub sample: Sample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind>;
}

/// Detects the controller output entering and leaving its clamp range.
pub struct SaturationDetector {
    pub limits: OutputLimits,
    saturated: bool,
}

impl SaturationDetector {
    pub fn new(limits: OutputLimits) -> Self {
        Self { limits, saturated: false }
    }
}

impl EventDetector for SaturationDetector {
    fn check(&mut self, _prev: &Sample, current: &Sample) -> Option<EventKind> {
        let now = self.limits.is_saturated(current.output);
        match (self.saturated, now) {
            (false, true) => {
                self.saturated = true;
                Some(EventKind::SaturationStart)
            }
            (true, false) => {
                self.saturated = false;
                Some(EventKind::SaturationEnd)
            }
            _ => None,
        }
    }
}

/// Fires once, the first time the measurement crosses the setpoint.
#[derive(Default)]
pub struct CrossingDetector {
    fired: bool,
}

impl EventDetector for CrossingDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let before = prev.measurement - prev.setpoint;
        let after = current.measurement - current.setpoint;
        if before != 0.0 && before * after <= 0.0 {
            self.fired = true;
            Some(EventKind::SetpointCrossed)
        } else {
            None
        }
    }
}

/// Fires once the error has stayed within `band` (a fraction of the
/// setpoint magnitude) for `hold` seconds. Re-arms if the error leaves the band.
pub struct SettleDetector {
    pub band: f64,
    pub hold: f64,
    entered: Option<f64>,
    fired: bool,
}

impl SettleDetector {
    pub fn new(band: f64, hold: f64) -> Self {
        Self { band, hold, entered: None, fired: false }
    }
}

impl EventDetector for SettleDetector {
    fn check(&mut self, _prev: &Sample, current: &Sample) -> Option<EventKind> {
        let tol = self.band * current.setpoint.abs().max(f64::EPSILON);
        if current.error.abs() > tol {
            self.entered = None;
            self.fired = false;
            return None;
        }
        let since = *self.entered.get_or_insert(current.time);
        if !self.fired && current.time - since >= self.hold {
            self.fired = true;
            Some(EventKind::Settled { band: self.band })
        } else {
            None
        }
    }
}

/// Run all detectors over a trace and collect events in time order.
pub fn detect_events(trace: &[Sample], detectors: &mut [Box<dyn EventDetector>]) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for pair in trace.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(SimEvent { time: pair[1].time, kind, sample: pair[1] });
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, measurement: f64, output: f64) -> Sample {
        Sample {
            time,
            setpoint: 1.0,
            measurement,
            error: 1.0 - measurement,
            output,
        }
    }

    #[test]
    fn saturation_start_and_end() {
        let mut det = SaturationDetector::new(OutputLimits::symmetric(2.0));
        let a = sample(0.0, 0.0, 1.0);
        let b = sample(0.1, 0.1, 2.0);
        let c = sample(0.2, 0.3, 1.5);
        assert_eq!(det.check(&a, &b), Some(EventKind::SaturationStart));
        assert_eq!(det.check(&b, &b), None);
        assert_eq!(det.check(&b, &c), Some(EventKind::SaturationEnd));
    }

    #[test]
    fn crossing_fires_once() {
        let mut det = CrossingDetector::default();
        let a = sample(0.0, 0.9, 0.0);
        let b = sample(0.1, 1.1, 0.0);
        assert_eq!(det.check(&a, &b), Some(EventKind::SetpointCrossed));
        assert!(det.check(&b, &a).is_none());
    }

    #[test]
    fn landing_on_setpoint_counts_from_either_side() {
        let on = sample(0.1, 1.0, 0.0);

        let mut from_below = CrossingDetector::default();
        assert_eq!(from_below.check(&sample(0.0, 0.9, 0.0), &on), Some(EventKind::SetpointCrossed));

        let mut from_above = CrossingDetector::default();
        assert_eq!(from_above.check(&sample(0.0, 1.1, 0.0), &on), Some(EventKind::SetpointCrossed));
    }

    #[test]
    fn settle_needs_hold_time() {
        let trace: Vec<Sample> = (0..20).map(|k| sample(k as f64 * 0.1, 0.995, 0.0)).collect();
        let mut dets: Vec<Box<dyn EventDetector>> = vec![Box::new(SettleDetector::new(0.02, 0.5))];
        let events = detect_events(&trace, &mut dets);
        assert_eq!(events.len(), 1);
        assert!((events[0].time - 0.6).abs() < 1e-9);
    }
}
