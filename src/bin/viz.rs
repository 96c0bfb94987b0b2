use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use pid_controller::config::PidConfig;
use pid_controller::io::json::ResponseSummary;
use pid_controller::sim::{self, Sample};

fn main() -> eframe::Result {
    let config = match std::env::args().nth(1) {
        Some(path) => match PidConfig::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => PidConfig::default(),
    };

    let plant = config.build_plant();
    let mut controller = config.build_controller();
    let trace = sim::simulate_with(plant.as_ref(), &config.sim_config(), controller.as_mut());
    let title = format!("{} on {}", controller.name(), plant.name());

    let app = StepViz { summary: ResponseSummary::from_trace(&trace), trace, title };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("PID Step Response", options, Box::new(|_| Ok(Box::new(app))))
}

struct StepViz {
    trace: Vec<Sample>,
    summary: Option<ResponseSummary>,
    title: String,
}

impl eframe::App for StepViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trace.len() / 2000).max(1);
        let sampled: Vec<&Sample> = self.trace.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(&self.title);
            if let Some(s) = &self.summary {
                let t = |v: Option<f64>| v.map_or("n/a".to_string(), |x| format!("{:.2} s", x));
                ui.label(format!(
                    "Rise: {}  |  Overshoot: {:.1}%  |  Settling: {}  |  Steady error: {:.2e}",
                    t(s.rise_time),
                    s.overshoot_pct,
                    t(s.settling_time),
                    s.steady_state_error,
                ));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_h = available.y / 2.0 - 8.0;

            // Measurement vs setpoint
            ui.label("Process value");
            let measured: PlotPoints = sampled.iter().map(|s| [s.time, s.measurement]).collect();
            let target: PlotPoints = sampled.iter().map(|s| [s.time, s.setpoint]).collect();
            Plot::new("response")
                .height(half_h)
                .x_axis_label("Time (s)")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Measurement", measured));
                    plot_ui.line(Line::new("Setpoint", target));
                });

            ui.horizontal(|ui| {
                let half_w = available.x / 2.0 - 8.0;

                ui.vertical(|ui| {
                    ui.label("Controller output");
                    let points: PlotPoints = sampled.iter().map(|s| [s.time, s.output]).collect();
                    Plot::new("output")
                        .width(half_w)
                        .height(half_h - 24.0)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Output", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Error");
                    let points: PlotPoints = sampled.iter().map(|s| [s.time, s.error]).collect();
                    Plot::new("error")
                        .width(half_w)
                        .height(half_h - 24.0)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Error", points));
                        });
                });
            });
        });
    }
}
