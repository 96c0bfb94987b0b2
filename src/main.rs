use std::process::ExitCode;

use pid_controller::config::PidConfig;
use pid_controller::io::{csv, json};
use pid_controller::sim::event::{
    CrossingDetector, EventDetector, EventKind, SaturationDetector, SettleDetector,
};
use pid_controller::sim::{self, detect_events};

const USAGE: &str = "usage: pid-controller [CONFIG.toml] [--csv PATH] [--json PATH]";

struct Args {
    help: bool,
    config: Option<String>,
    csv: Option<String>,
    json: Option<String>,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args { help: false, config: None, csv: None, json: None };
    let mut it = argv.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--csv" => args.csv = Some(it.next().ok_or("--csv needs a path")?),
            "--json" => args.json = Some(it.next().ok_or("--json needs a path")?),
            "-h" | "--help" => args.help = true,
            _ if args.config.is_none() && !arg.starts_with("--") => args.config = Some(arg.clone()),
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().skip(1)).map_err(|e| format!("{e}\n{USAGE}"))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => PidConfig::load(path)?,
        None => PidConfig::default(),
    };

    // -----------------------------------------------------------------------
    // Run closed loop
    // -----------------------------------------------------------------------
    let plant = config.build_plant();
    let sim_config = config.sim_config();
    let mut controller = config.build_controller();
    let trace = sim::simulate_with(plant.as_ref(), &sim_config, controller.as_mut());

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(CrossingDetector::default()),
        Box::new(SettleDetector::new(json::SETTLING_BAND, 0.5)),
    ];
    if let Some(limits) = controller.output_limits() {
        detectors.push(Box::new(SaturationDetector::new(limits)));
    }
    let events = detect_events(&trace, &mut detectors);
    let summary = json::ResponseSummary::from_trace(&trace).ok_or("simulation produced no samples")?;

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let c = &config.controller;
    println!();
    println!("====================================================================");
    println!("  PID STEP RESPONSE — {} on {}", controller.name(), plant.name());
    println!("====================================================================");
    println!();
    println!("  Controller");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  P: {:>8.4}   I: {:>8.4}   D: {:>8.4}", c.p, c.i, c.d);
    match (c.min_output, c.max_output) {
        (Some(min), Some(max)) => println!("  Output bounds: [{:.3}, {:.3}]", min, max),
        _ => println!("  Output bound:  ±{:.3}   Mode: {:?}", c.max_output_abs, c.mode),
    }
    println!();

    println!("  Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for ev in &events {
        let label = match &ev.kind {
            EventKind::SaturationStart => "SATURATE".to_string(),
            EventKind::SaturationEnd => "UNSATURATE".to_string(),
            EventKind::SetpointCrossed => "CROSSING".to_string(),
            EventKind::Settled { band } => format!("SETTLED ({:.0}%)", band * 100.0),
            EventKind::Custom(s) => s.clone(),
        };
        println!(
            "  {:<14} t={:>7.3}s   y={:>9.4}   u={:>9.4}",
            label, ev.time, ev.sample.measurement, ev.sample.output
        );
    }
    if events.is_empty() {
        println!("  (none)");
    }
    println!();

    let fmt_opt = |v: Option<f64>| v.map_or("n/a".to_string(), |t| format!("{:.3} s", t));
    println!("  Response Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Setpoint:       {:>10.4}   Final value:   {:>10.4}", summary.setpoint, summary.final_value);
    println!("  Rise time:      {:>10}   Settling time: {:>10}", fmt_opt(summary.rise_time), fmt_opt(summary.settling_time));
    println!("  Overshoot:      {:>9.2}%   Peak output:   {:>10.4}", summary.overshoot_pct, summary.peak_output);
    println!("  Steady error:   {:>10.2e}", summary.steady_state_error);
    println!();

    // -----------------------------------------------------------------------
    // Trace table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trace");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:>8}  {:>10}  {:>10}  {:>10}", "t (s)", "y", "error", "u");
    println!("  {}", "─".repeat(46));

    let sample_interval = (trace.len() / 25).max(1);
    for (i, s) in trace.iter().enumerate() {
        if i % sample_interval != 0 && i != trace.len() - 1 {
            continue;
        }
        println!(
            "  {:>8.3}  {:>10.4}  {:>10.4}  {:>10.4}",
            s.time, s.measurement, s.error, s.output
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", trace.len() - 1, sim_config.dt);
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        csv::write_trace_file(path, &trace)?;
        println!("  Trace written to {path}");
    }
    if let Some(path) = &args.json {
        json::write_summary_file(path, controller.name(), &summary)?;
        println!("  Summary written to {path}");
    }

    Ok(())
}
