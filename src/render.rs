use std::f32::consts::{FRAC_PI_2, PI};

use nalgebra::Matrix3;

use crate::display::axis_color;
use crate::math::{Axis, Vec3};
use crate::resolve::{ArrowSpec, ArrowStyle, Resolution};

/// Axis lines and tick numbers reach this far from the origin.
pub const AXIS_EXTENT: i32 = 10;


/// Orbit camera over the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub perspective: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self { yaw: 0.6, pitch: 0.4, zoom: 1.0, perspective: true }
    }
}

impl Camera {
    pub fn set_view(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub fn orbit(&mut self, drag: egui::Vec2) {
        self.yaw += drag.x * 0.01;
        self.pitch = (self.pitch + drag.y * 0.01).clamp(-1.5, 1.5);
    }

    pub fn zoom_by(&mut self, scroll: f32) {
        self.zoom = (self.zoom * (1.0 + scroll * 0.001)).clamp(0.1, 10.0);
    }

    pub fn view_matrix(&self) -> Matrix3<f32> {
        let (cr, sr) = (self.yaw.cos(), self.yaw.sin());
        let (cp, sp) = (self.pitch.cos(), self.pitch.sin());
        Matrix3::new(
            cr, 0.0, sr,
            sr * sp, cp, -cr * sp,
            -sr * cp, sp, cr * cp,
        )
    }

    /// World-to-screen mapping for a viewport rect.
    pub fn projector(&self, rect: egui::Rect) -> impl Fn(Vec3) -> egui::Pos2 {
        let view_mat = self.view_matrix();
        let perspective = self.perspective;
        // Grid spans 2 * AXIS_EXTENT units; leave a margin around it.
        let base_scale = (rect.width().min(rect.height()) / (2.5 * AXIS_EXTENT as f32)) * self.zoom;
        let center = rect.center();

        move |v: Vec3| {
            let v_v = view_mat * v;
            let factor = if perspective {
                (base_scale * 40.0) / (40.0 - v_v.z).max(0.1)
            } else {
                base_scale
            };
            center + egui::vec2(v_v.x * factor, -v_v.y * factor)
        }
    }
}


pub fn draw_grid_3d(painter: &egui::Painter, project: &impl Fn(Vec3) -> egui::Pos2, color: egui::Color32, size: i32) {
    let stroke = egui::Stroke::new(1.0, color);
    let s = size as f32;

    for i in -size..=size {
        let t = i as f32;
        // XZ plane (floor)
        painter.line_segment([project(Vec3::new(-s, 0.0, t)), project(Vec3::new(s, 0.0, t))], stroke);
        painter.line_segment([project(Vec3::new(t, 0.0, -s)), project(Vec3::new(t, 0.0, s))], stroke);

        // XY plane
        painter.line_segment([project(Vec3::new(-s, t, 0.0)), project(Vec3::new(s, t, 0.0))], stroke);
        painter.line_segment([project(Vec3::new(t, -s, 0.0)), project(Vec3::new(t, s, 0.0))], stroke);

        // YZ plane
        painter.line_segment([project(Vec3::new(0.0, -s, t)), project(Vec3::new(0.0, s, t))], stroke);
        painter.line_segment([project(Vec3::new(0.0, t, -s)), project(Vec3::new(0.0, t, s))], stroke);
    }
}


/// Positive half-axes in their axis colour, with a name at the tip and
/// numbered ticks on both halves.
pub fn draw_axes_3d(painter: &egui::Painter, project: &impl Fn(Vec3) -> egui::Pos2) {
    let extent = AXIS_EXTENT as f32;

    for axis in Axis::ALL {
        let color = axis_color(axis);
        let mut tip = Vec3::zeros();
        tip[axis.index()] = extent;
        painter.line_segment([project(Vec3::zeros()), project(tip)], egui::Stroke::new(2.0, color));

        let mut label_pos = tip;
        label_pos[axis.index()] += 0.8;
        painter.text(
            project(label_pos),
            egui::Align2::CENTER_CENTER,
            axis.name(),
            egui::FontId::proportional(18.0),
            color,
        );

        for i in (-AXIS_EXTENT..=AXIS_EXTENT).filter(|&i| i != 0) {
            let mut tick = Vec3::zeros();
            tick[axis.index()] = i as f32;
            painter.text(
                project(tick),
                egui::Align2::CENTER_CENTER,
                i.to_string(),
                egui::FontId::proportional(10.0),
                color.linear_multiply(0.8),
            );
        }
    }
}


pub fn draw_arrow(painter: &egui::Painter, start: egui::Pos2, end: egui::Pos2, color: egui::Color32, scale: f32) {
    let vec = end - start;
    let len = vec.length();
    if len < 1.0 { return; }

    // Main shaft
    painter.line_segment([start, end], egui::Stroke::new(2.5 * scale, color));

    // Arrow head (triangle)
    let head_len = (len * 0.15).clamp(5.0, 15.0) * scale;
    let dir = vec / len;
    let perp = egui::vec2(-dir.y, dir.x) * (head_len * 0.4);

    let tip = end;
    let base = end - dir * head_len;

    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + perp, base - perp],
        color,
        egui::Stroke::NONE,
    ));
}


pub fn draw_vector_arrow(
    painter: &egui::Painter,
    project: &impl Fn(Vec3) -> egui::Pos2,
    spec: &ArrowSpec,
    style: &ArrowStyle,
) {
    if !spec.visible { return; }

    let scale = style.scale_factor(spec.scale);
    draw_arrow(painter, project(Vec3::zeros()), project(spec.endpoint), spec.color, scale);

    if let Some(label) = &spec.label {
        painter.text(
            project(spec.label_anchor),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0 * scale),
            spec.color,
        );
    }
}


/// Inputs first, result on top.
pub fn draw_resolution(
    painter: &egui::Painter,
    project: &impl Fn(Vec3) -> egui::Pos2,
    resolution: &Resolution,
    style: &ArrowStyle,
) {
    for (_, spec) in resolution.arrows.iter() {
        draw_vector_arrow(painter, project, spec, style);
    }
}


/// One clickable end of an axis in the corner view gizmo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewHandle {
    pub axis: Axis,
    pub positive: bool,
    pub pos: egui::Pos2,
    /// View-space z of the direction; positive faces the viewer.
    pub depth: f32,
    /// Camera orientation that looks straight down this direction.
    pub snap: (f32, f32),
}

const VIEW_SNAPS: [(Axis, bool, f32, f32); 6] = [
    (Axis::Z, true, 0.0, 0.0),
    (Axis::Z, false, PI, 0.0),
    (Axis::X, true, -FRAC_PI_2, 0.0),
    (Axis::X, false, FRAC_PI_2, 0.0),
    (Axis::Y, true, 0.0, FRAC_PI_2),
    (Axis::Y, false, 0.0, -FRAC_PI_2),
];


/// Gizmo handles laid out around `center`, sorted back to front.
pub fn view_handles(camera: &Camera, center: egui::Pos2, radius: f32) -> Vec<ViewHandle> {
    let view_mat = camera.view_matrix();
    let mut handles: Vec<ViewHandle> = VIEW_SNAPS
        .iter()
        .map(|&(axis, positive, yaw, pitch)| {
            let mut dir = Vec3::zeros();
            dir[axis.index()] = if positive { 1.0 } else { -1.0 };
            let v = view_mat * dir;
            ViewHandle {
                axis,
                positive,
                pos: center + egui::vec2(v.x, -v.y) * radius,
                depth: v.z,
                snap: (yaw, pitch),
            }
        })
        .collect();
    handles.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    handles
}


pub fn draw_view_gizmo(ui: &egui::Ui, painter: &egui::Painter, camera: &mut Camera) {
    let rect = painter.clip_rect();
    let center = egui::pos2(rect.right() - 50.0, rect.top() + 50.0);
    let radius = 32.0;
    let knob = 8.0;

    painter.circle_filled(center, radius + knob + 2.0, egui::Color32::from_black_alpha(120));

    let (hover, clicked) = ui.input(|i| (i.pointer.hover_pos(), i.pointer.any_click()));
    let mut snap_to = None;

    for handle in view_handles(camera, center, radius) {
        let color = axis_color(handle.axis);
        let hovered = handle.depth >= 0.0
            && hover.map_or(false, |p| p.distance(handle.pos) <= knob + 1.0);

        if handle.positive {
            painter.line_segment([center, handle.pos], egui::Stroke::new(2.0, color));
        }
        let fill = if hovered {
            egui::Color32::WHITE
        } else if handle.positive {
            color
        } else {
            color.linear_multiply(0.35)
        };
        painter.circle_filled(handle.pos, knob, fill);
        if handle.positive {
            painter.text(handle.pos, egui::Align2::CENTER_CENTER, handle.axis.name(), egui::FontId::proportional(10.0), egui::Color32::BLACK);
        }

        if hovered && clicked {
            snap_to = Some(handle.snap);
        }
    }

    if let Some((yaw, pitch)) = snap_to {
        camera.set_view(yaw, pitch);
    }
}
