use std::io::{self, Write};

use crate::sim::Sample;

/// Settling band used by [`ResponseSummary`], as a fraction of the setpoint.
pub const SETTLING_BAND: f64 = 0.02;

/// Step-response metrics computed from a closed-loop trace.
#[derive(Debug, Clone)]
pub struct ResponseSummary {
    pub setpoint: f64,
    pub final_value: f64,
    /// 10% → 90% of the setpoint. `None` if the response never gets there.
    pub rise_time: Option<f64>,
    /// Peak excursion past the setpoint, percent of the setpoint.
    pub overshoot_pct: f64,
    /// Time after which the error stays inside the 2% band.
    pub settling_time: Option<f64>,
    pub steady_state_error: f64,
    pub peak_output: f64,
    pub duration: f64,
}

impl ResponseSummary {
    /// Compute summary from trace data. `None` for an empty trace.
    pub fn from_trace(trace: &[Sample]) -> Option<Self> {
        let last = trace.last()?;
        let setpoint = last.setpoint;

        let peak_output = trace.iter().map(|s| s.output.abs()).fold(0.0_f64, f64::max);

        // Everything below is measured in the direction of the step
        let dir = if setpoint < 0.0 { -1.0 } else { 1.0 };
        let target = setpoint * dir;

        let rise_time = if target > 0.0 {
            let t10 = trace.iter().find(|s| s.measurement * dir >= 0.1 * target).map(|s| s.time);
            let t90 = trace.iter().find(|s| s.measurement * dir >= 0.9 * target).map(|s| s.time);
            match (t10, t90) {
                (Some(a), Some(b)) => Some(b - a),
                _ => None,
            }
        } else {
            None
        };

        let overshoot_pct = if target > 0.0 {
            let peak = trace.iter().map(|s| s.measurement * dir).fold(f64::MIN, f64::max);
            ((peak - target) / target * 100.0).max(0.0)
        } else {
            0.0
        };

        let tol = SETTLING_BAND * setpoint.abs().max(f64::EPSILON);
        let settling_time = match trace.iter().rposition(|s| s.error.abs() > tol) {
            None => Some(trace[0].time),
            Some(idx) if idx + 1 < trace.len() => Some(trace[idx + 1].time),
            Some(_) => None,
        };

        Some(ResponseSummary {
            setpoint,
            final_value: last.measurement,
            rise_time,
            overshoot_pct,
            settling_time,
            steady_state_error: last.error,
            peak_output,
            duration: last.time,
        })
    }
}

/// Quote a string as a JSON string literal.
fn json_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "null".to_string(), |x| format!("{:.4}", x))
}

/// Write response summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    controller: &str,
    summary: &ResponseSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"controller\": {},", json_str(controller))?;
    writeln!(writer, "  \"response\": {{")?;
    writeln!(writer, "    \"setpoint\": {:.4},", summary.setpoint)?;
    writeln!(writer, "    \"final_value\": {:.6},", summary.final_value)?;
    writeln!(writer, "    \"rise_time_s\": {},", opt(summary.rise_time))?;
    writeln!(writer, "    \"overshoot_pct\": {:.2},", summary.overshoot_pct)?;
    writeln!(writer, "    \"settling_time_s\": {},", opt(summary.settling_time))?;
    writeln!(writer, "    \"steady_state_error\": {:.6},", summary.steady_state_error)?;
    writeln!(writer, "    \"peak_output\": {:.4},", summary.peak_output)?;
    writeln!(writer, "    \"duration_s\": {:.2}", summary.duration)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write response summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    controller: &str,
    summary: &ResponseSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, controller, summary)
}
