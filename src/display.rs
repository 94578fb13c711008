//! Text readouts shown in the side panel.

use egui::Color32;

use crate::math::{self, Axis, Vec3};

/// Slider-linked readout, one decimal.
pub fn slider_readout(value: f32) -> String {
    format!("{:.1}", value)
}

pub fn vector_readout(v: &Vec3) -> String {
    math::format(v)
}

pub fn magnitude_readout(v: &Vec3) -> String {
    format!("{:.2}", math::magnitude(v))
}

pub fn component_readouts(v: &Vec3) -> [(Axis, String); 3] {
    Axis::ALL.map(|axis| (axis, format!("{:.2}", v[axis.index()])))
}

pub fn axis_color(axis: Axis) -> Color32 {
    match axis {
        Axis::X => Color32::from_rgb(0xff, 0x00, 0x00),
        Axis::Y => Color32::from_rgb(0x00, 0xff, 0x00),
        Axis::Z => Color32::from_rgb(0x00, 0x00, 0xff),
    }
}
