use std::time::Duration;

use eframe::egui;
use tracing::debug;

use crate::config::Config;
use crate::display::{axis_color, component_readouts, magnitude_readout, slider_readout};
use crate::error::Result;
use crate::focus::FocusRelease;
use crate::math::{Axis, Operation, Vec3};
use crate::resolve::{InputVector, Visualizer};

use crate::render::draw_axes_3d;
use crate::render::draw_grid_3d;
use crate::render::draw_view_gizmo;
use crate::render::draw_resolution;
use crate::render::Camera;


/// Parses a typed component, pinned to the slider span `-range..=range`.
fn parse_entry(text: &str, range: f32) -> Option<f32> {
    let parsed = text.trim().parse::<f32>().ok()?;
    parsed.is_finite().then(|| parsed.clamp(-range, range))
}


pub struct VectorApp {
    visualizer: Visualizer,
    release: FocusRelease,
    camera: Camera,
    input_buffer: String,

    slider_range: f32,
    slider_step: f64,
    grid_size: i32,
    grid_opacity: u8, // 0 is invisible, 255 is fully opaque
}

impl VectorApp {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            visualizer: Visualizer::new(config.arrow_style()?),
            release: config.focus_release(),
            camera: Camera { perspective: config.view.perspective, ..Camera::default() },
            input_buffer: String::new(),
            slider_range: config.sliders.range,
            slider_step: config.sliders.step,
            grid_size: config.view.grid_size,
            grid_opacity: 77,
        })
    }


    /// Text entry next to a slider. Returns `true` when the typed text parsed
    /// and was written to `val`; anything unparsable is left in the buffer.
    fn handle_buffered_input(ui: &mut egui::Ui, id: egui::Id, buffer: &mut String, val: &mut f32, range: f32) -> bool {
        let mut display_str = if ui.memory(|mem| mem.has_focus(id)) {
            buffer.clone()
        } else {
            format!("{:.2}", val)
        };

        let response = ui.add(egui::TextEdit::singleline(&mut display_str).id(id).desired_width(48.0));

        if response.gained_focus() {
            *buffer = format!("{:.2}", val);
        }

        if response.changed() {
            *buffer = display_str;
            if let Some(parsed) = parse_entry(buffer, range) {
                *val = parsed;
                return true;
            }
        }
        false
    }


    fn select_operation(&mut self, operation: Operation) {
        debug!(?operation, "operation selected");
        self.visualizer.set_operation(operation);
    }


    fn randomize(&mut self) {
        self.release.cancel();
        self.visualizer.randomize(&mut rand::thread_rng());
    }


    fn reset(&mut self) {
        self.release.cancel();
        self.visualizer.reset();
    }


    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() { return; }
        let pressed = |key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::Num1) { self.select_operation(Operation::Add); }
        if pressed(egui::Key::Num2) { self.select_operation(Operation::Subtract); }
        if pressed(egui::Key::Num3) { self.select_operation(Operation::Cross); }
        if pressed(egui::Key::R) { self.randomize(); }
        if pressed(egui::Key::C) { self.reset(); }
        if pressed(egui::Key::V) { self.camera.perspective = !self.camera.perspective; }
    }


    fn vector_controls(&mut self, ui: &mut egui::Ui, which: InputVector, now: f64) {
        let title = match which {
            InputVector::A => "Vector A",
            InputVector::B => "Vector B",
        };
        let color = self.visualizer.style().colors[which.id()];
        ui.label(egui::RichText::new(title).color(color).strong().size(18.0));

        let range = self.slider_range;
        let step = self.slider_step;

        egui::Grid::new(("vector_controls", which)).spacing([6.0, 4.0]).show(ui, |ui| {
            for axis in Axis::ALL {
                let mut value = self.visualizer.state().input(which)[axis.index()];

                ui.colored_label(axis_color(axis), format!("{}:", axis.name()));
                let slider = ui.add(
                    egui::Slider::new(&mut value, -range..=range)
                        .step_by(step)
                        .show_value(false),
                );
                ui.label(slider_readout(value));

                let id = ui.make_persistent_id(("vec_input", which, axis.index()));
                let typed = Self::handle_buffered_input(ui, id, &mut self.input_buffer, &mut value, range);

                if slider.changed() || typed {
                    self.visualizer.set_vector_component(which, axis, value);
                    self.release.arm(now);
                } else if slider.dragged() && self.visualizer.state().focus == which.focus() {
                    // Held still mid-drag: keep the emphasis.
                    self.release.arm(now);
                }
                ui.end_row();
            }
        });
    }


    fn vector_readout(ui: &mut egui::Ui, name: &str, color: egui::Color32, v: &Vec3) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label(egui::RichText::new(format!("{} = ", name)).color(color).strong());
            ui.label("(");
            let parts = component_readouts(v);
            for (i, (axis, text)) in parts.iter().enumerate() {
                ui.label(egui::RichText::new(text).color(axis_color(*axis)).strong());
                if i + 1 < parts.len() { ui.label(", "); }
            }
            ui.label(")");
        });
    }


    fn draw_operation_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Operation");
        ui.horizontal(|ui| {
            let current = self.visualizer.state().operation;
            for op in Operation::ALL {
                if ui.selectable_label(current == op, op.expression()).clicked() {
                    self.select_operation(op);
                }
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("⟲ Reset [C]").clicked() { self.reset(); }
            if ui.button("Randomize [R]").clicked() { self.randomize(); }
        });
    }


    fn draw_readouts(&self, ui: &mut egui::Ui) {
        let state = self.visualizer.state();
        let resolution = self.visualizer.resolution();
        let colors = &self.visualizer.style().colors;

        egui::Frame::group(ui.style()).show(ui, |ui| {
            Self::vector_readout(ui, "A", colors.a, &state.a);
            Self::vector_readout(ui, "B", colors.b, &state.b);
            Self::vector_readout(ui, state.operation.expression(), colors.result, &resolution.result);
            ui.label(format!("|{}| = {}", state.operation.expression(), magnitude_readout(&resolution.result)));
        });
    }
}


impl eframe::App for VectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        if self.release.poll(now) {
            self.visualizer.clear_focus();
        }
        self.handle_hotkeys(ctx);

        // --- SIDEBAR ---
        egui::SidePanel::left("controls")
            .width_range(300.0..=360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.heading("3D Vector Calculator");
                        ui.add_space(4.0);

                        ui.collapsing("⌨ Hotkeys", |ui| {
                            ui.label("1/2/3: Add / Subtract / Cross\nR: Randomize | C: Reset | V: Persp");
                        });

                        ui.separator();
                        ui.checkbox(&mut self.camera.perspective, "🔭 Perspective [V]");
                        ui.add(egui::Slider::new(&mut self.grid_opacity, 0..=255).text("Grid Alpha"));

                        ui.separator();
                        self.vector_controls(ui, InputVector::A, now);
                        ui.add_space(8.0);
                        self.vector_controls(ui, InputVector::B, now);

                        ui.separator();
                        self.draw_operation_ui(ui);

                        ui.separator();
                        ui.heading("Result");
                        self.draw_readouts(ui);
                    });
            });

        // --- VIEWPORT ---
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, resp) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());

            if resp.dragged_by(egui::PointerButton::Primary) {
                self.camera.orbit(resp.drag_delta());
            }
            if resp.hovered() {
                self.camera.zoom_by(ui.input(|i| i.smooth_scroll_delta.y));
            }

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0x1a, 0x1a, 0x2a));

            let project = self.camera.projector(rect);
            let grid_c = egui::Color32::from_rgba_unmultiplied(0xcc, 0xcc, 0xcc, self.grid_opacity);
            draw_grid_3d(&painter, &project, grid_c, self.grid_size);
            draw_axes_3d(&painter, &project);
            draw_resolution(&painter, &project, self.visualizer.resolution(), self.visualizer.style());

            draw_view_gizmo(ui, &painter, &mut self.camera);
        });

        // Wake up again for a pending focus release.
        if let Some(remaining) = self.release.remaining(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }
}
