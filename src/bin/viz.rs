use std::path::PathBuf;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use oscillator_sim::config::{self, Scenario};
use oscillator_sim::{sim, Params, Record};

fn main() -> eframe::Result {
    env_logger::init();

    let scenario = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match config::load_scenario(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("{:#}", e);
                std::process::exit(1);
            }
        },
        None => Scenario::default(),
    };
    let params = scenario.params();
    let records = match sim::simulate(&params) {
        Ok(r) => r,
        Err(e) => {
            log::error!("simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = OscillatorViz { records, params };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Harmonic Oscillator", options, Box::new(|_| Ok(Box::new(app))))
}

struct OscillatorViz {
    records: Vec<Record>,
    params: Params,
}

fn time_plot(ui: &mut egui::Ui, id: &str, title: &str, points: PlotPoints, w: f32, h: f32) {
    ui.vertical(|ui| {
        ui.label(title);
        Plot::new(id)
            .width(w)
            .height(h)
            .x_axis_label("Time")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(title, points));
            });
    });
}

impl eframe::App for OscillatorViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.records.len() / 2000).max(1);
        let sampled: Vec<&Record> = self.records.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let p = &self.params;
            ui.heading("F = -kx, semi-implicit Euler");
            ui.label(format!(
                "x0 = {}  |  v0 = {}  |  m = {}  |  k = {}  |  h = {}  |  steps: {}",
                p.initial_position,
                p.initial_velocity,
                p.mass,
                p.spring_constant,
                p.time_step,
                self.records.len(),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                let points: PlotPoints = sampled.iter().map(|r| [r.time, r.position]).collect();
                time_plot(ui, "position", "Position", points, half_w, half_h);

                let points: PlotPoints = sampled.iter().map(|r| [r.time, r.velocity]).collect();
                time_plot(ui, "velocity", "Velocity", points, half_w, half_h);
            });

            ui.horizontal(|ui| {
                let points: PlotPoints = sampled.iter().map(|r| [r.time, r.force]).collect();
                time_plot(ui, "force", "Force", points, half_w, half_h);

                // Phase portrait
                ui.vertical(|ui| {
                    ui.label("Phase space (x, v)");
                    let points: PlotPoints = sampled
                        .iter()
                        .map(|r| {
                            let p = r.phase_point();
                            [p.x, p.y]
                        })
                        .collect();
                    Plot::new("phase")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Position")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Orbit", points));
                        });
                });
            });
        });
    }
}
