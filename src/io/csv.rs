use std::io::{self, Write};

use crate::sim::Sample;

/// Write a closed-loop trace in CSV format.
///
/// Columns: time, setpoint, measurement, error, output
pub fn write_trace<W: Write>(writer: &mut W, trace: &[Sample]) -> io::Result<()> {
    writeln!(writer, "time,setpoint,measurement,error,output")?;

    for s in trace {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6}",
            s.time, s.setpoint, s.measurement, s.error, s.output,
        )?;
    }

    Ok(())
}

/// Write a trace to a CSV file at the given path.
pub fn write_trace_file(path: &str, trace: &[Sample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trace(&mut file, trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_header_and_rows() {
        let trace = vec![
            Sample { time: 0.0, setpoint: 1.0, measurement: 0.0, error: 1.0, output: 2.0 },
            Sample { time: 0.01, setpoint: 1.0, measurement: 0.02, error: 0.98, output: 1.96 },
        ];

        let mut buf = Vec::new();
        write_trace(&mut buf, &trace).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "0.0000,1.000000,0.000000,1.000000,2.000000");
    }
}
