//! Turns the calculator state into what gets drawn.
//!
//! [`resolve`] is a pure function of [`VectorState`]: it computes the result
//! vector and one [`ArrowSpec`] per displayed vector. [`Visualizer`] owns the
//! state and re-resolves after every inbound edit.

use std::ops::{Index, IndexMut};

use egui::Color32;
use rand::Rng;
use tracing::{debug, info};

use crate::math::{self, Axis, Operation, Vec3};

/// Stand-in direction for a zero vector that is being edited, so the arrow
/// still has an orientation.
pub const NOMINAL_DIRECTION: Vec3 = Vec3::new(0.1, 0.0, 0.0);

/// Distance from the arrow tip to its label.
pub const LABEL_OFFSET: f32 = 0.4;

/// Random components are integers in `-RANDOM_LIMIT..=RANDOM_LIMIT`.
pub const RANDOM_LIMIT: i32 = 10;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorId {
    A,
    B,
    Result,
}

impl VectorId {
    pub const ALL: [VectorId; 3] = [VectorId::A, VectorId::B, VectorId::Result];
}


/// One of the two user-editable vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputVector {
    A,
    B,
}

impl InputVector {
    pub fn id(self) -> VectorId {
        match self {
            InputVector::A => VectorId::A,
            InputVector::B => VectorId::B,
        }
    }

    pub fn focus(self) -> EditingFocus {
        match self {
            InputVector::A => EditingFocus::EditingA,
            InputVector::B => EditingFocus::EditingB,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditingFocus {
    #[default]
    None,
    EditingA,
    EditingB,
}

impl EditingFocus {
    pub fn is_editing(self, id: VectorId) -> bool {
        matches!(
            (self, id),
            (EditingFocus::EditingA, VectorId::A) | (EditingFocus::EditingB, VectorId::B)
        )
    }
}


/// Fixed record with one slot per [`VectorId`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArrowSet<T> {
    pub a: T,
    pub b: T,
    pub result: T,
}

impl<T> ArrowSet<T> {
    pub fn iter(&self) -> impl Iterator<Item = (VectorId, &T)> {
        VectorId::ALL.into_iter().map(move |id| (id, &self[id]))
    }
}

impl<T> Index<VectorId> for ArrowSet<T> {
    type Output = T;

    fn index(&self, id: VectorId) -> &T {
        match id {
            VectorId::A => &self.a,
            VectorId::B => &self.b,
            VectorId::Result => &self.result,
        }
    }
}

impl<T> IndexMut<VectorId> for ArrowSet<T> {
    fn index_mut(&mut self, id: VectorId) -> &mut T {
        match id {
            VectorId::A => &mut self.a,
            VectorId::B => &mut self.b,
            VectorId::Result => &mut self.result,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowScale {
    #[default]
    Normal,
    Emphasized,
}


/// Colours and emphasis parameters used when building arrow specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowStyle {
    pub colors: ArrowSet<Color32>,
    /// Per-channel multiplier for emphasized arrows, clamped to 255.
    pub brighten: f32,
    /// Size multiplier for [`ArrowScale::Emphasized`].
    pub emphasized_scale: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            colors: ArrowSet {
                a: Color32::from_rgb(0xff, 0x44, 0x44),
                b: Color32::from_rgb(0x44, 0x44, 0xff),
                result: Color32::from_rgb(0x44, 0xff, 0x44),
            },
            brighten: 1.3,
            emphasized_scale: 1.5,
        }
    }
}

impl ArrowStyle {
    pub fn scale_factor(&self, scale: ArrowScale) -> f32 {
        match scale {
            ArrowScale::Normal => 1.0,
            ArrowScale::Emphasized => self.emphasized_scale,
        }
    }
}


pub fn brighten(color: Color32, factor: f32) -> Color32 {
    let channel = |v: u8| (v as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(color.r()), channel(color.g()), channel(color.b()))
}


#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSpec {
    /// Tip of the arrow. Equals the vector except for the nominal stand-in.
    pub endpoint: Vec3,
    pub visible: bool,
    pub emphasized: bool,
    pub color: Color32,
    pub scale: ArrowScale,
    pub label: Option<String>,
    pub label_anchor: Vec3,
}

impl ArrowSpec {
    fn hidden(color: Color32) -> Self {
        Self {
            endpoint: Vec3::zeros(),
            visible: false,
            emphasized: false,
            color,
            scale: ArrowScale::Normal,
            label: None,
            label_anchor: Vec3::zeros(),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VectorState {
    pub a: Vec3,
    pub b: Vec3,
    pub operation: Operation,
    pub focus: EditingFocus,
}

impl VectorState {
    pub fn input(&self, which: InputVector) -> &Vec3 {
        match which {
            InputVector::A => &self.a,
            InputVector::B => &self.b,
        }
    }

    fn input_mut(&mut self, which: InputVector) -> &mut Vec3 {
        match which {
            InputVector::A => &mut self.a,
            InputVector::B => &mut self.b,
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Result as shown to the user: zero whenever either input is zero.
    pub result: Vec3,
    pub arrows: ArrowSet<ArrowSpec>,
}


fn input_arrow(which: InputVector, v: &Vec3, focus: EditingFocus, style: &ArrowStyle) -> ArrowSpec {
    let id = which.id();
    let base = style.colors[id];
    let emphasized = focus.is_editing(id);
    let zero = math::is_zero(v);

    if zero && !emphasized {
        return ArrowSpec::hidden(base);
    }

    let endpoint = if zero { NOMINAL_DIRECTION } else { *v };
    let (color, scale) = if emphasized {
        (brighten(base, style.brighten), ArrowScale::Emphasized)
    } else {
        (base, ArrowScale::Normal)
    };
    let label = match which {
        InputVector::A => "A",
        InputVector::B => "B",
    };

    ArrowSpec {
        endpoint,
        visible: true,
        emphasized,
        color,
        scale,
        label: Some(label.to_owned()),
        label_anchor: label_anchor(&endpoint),
    }
}


fn label_anchor(endpoint: &Vec3) -> Vec3 {
    let len = math::magnitude(endpoint);
    if len == 0.0 {
        return *endpoint;
    }
    endpoint + endpoint * (LABEL_OFFSET / len)
}


pub fn resolve(state: &VectorState, style: &ArrowStyle) -> Resolution {
    let computed = state.operation.apply(&state.a, &state.b);
    let result_visible = !math::is_zero(&state.a) && !math::is_zero(&state.b);

    let result_arrow = if result_visible {
        ArrowSpec {
            endpoint: computed,
            visible: true,
            emphasized: false,
            color: style.colors.result,
            scale: ArrowScale::Normal,
            label: Some(state.operation.expression().to_owned()),
            label_anchor: label_anchor(&computed),
        }
    } else {
        ArrowSpec::hidden(style.colors.result)
    };

    Resolution {
        result: if result_visible { computed } else { Vec3::zeros() },
        arrows: ArrowSet {
            a: input_arrow(InputVector::A, &state.a, state.focus, style),
            b: input_arrow(InputVector::B, &state.b, state.focus, style),
            result: result_arrow,
        },
    }
}


/// Owns the calculator state and keeps its [`Resolution`] current.
pub struct Visualizer {
    state: VectorState,
    style: ArrowStyle,
    resolution: Resolution,
    generation: u64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(ArrowStyle::default())
    }
}

impl Visualizer {
    pub fn new(style: ArrowStyle) -> Self {
        let state = VectorState::default();
        let resolution = resolve(&state, &style);
        Self { state, style, resolution, generation: 0 }
    }

    pub fn state(&self) -> &VectorState {
        &self.state
    }

    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Number of resolves performed since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn resolve(&mut self) {
        self.resolution = resolve(&self.state, &self.style);
        self.generation += 1;
        debug!(
            generation = self.generation,
            operation = ?self.state.operation,
            focus = ?self.state.focus,
            result = %math::format(&self.resolution.result),
            "resolved"
        );
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.state.operation = operation;
        self.resolve();
    }

    pub fn set_vector_component(&mut self, which: InputVector, axis: Axis, value: f32) {
        self.state.focus = which.focus();
        self.state.input_mut(which)[axis.index()] = value;
        self.resolve();
    }

    pub fn clear_focus(&mut self) {
        self.state.focus = EditingFocus::None;
        self.resolve();
    }

    pub fn reset(&mut self) {
        self.state.a = Vec3::zeros();
        self.state.b = Vec3::zeros();
        self.state.focus = EditingFocus::None;
        info!("vectors reset");
        self.resolve();
    }

    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let mut component = || rng.gen_range(-RANDOM_LIMIT..=RANDOM_LIMIT) as f32;
        self.state.a = Vec3::new(component(), component(), component());
        self.state.b = Vec3::new(component(), component(), component());
        self.state.focus = EditingFocus::None;
        info!(a = %math::format(&self.state.a), b = %math::format(&self.state.b), "vectors randomized");
        self.resolve();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(a: Vec3, b: Vec3, operation: Operation, focus: EditingFocus) -> VectorState {
        VectorState { a, b, operation, focus }
    }

    #[test]
    fn brighten_clamps_each_channel() {
        let c = brighten(Color32::from_rgb(0xff, 0x44, 0x00), 1.3);
        assert_eq!(c, Color32::from_rgb(255, 88, 0));
    }

    #[test]
    fn zero_vector_without_focus_is_hidden() {
        let r = resolve(
            &state(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0), Operation::Add, EditingFocus::None),
            &ArrowStyle::default(),
        );
        assert!(!r.arrows.a.visible);
        assert!(r.arrows.a.label.is_none());
        assert!(r.arrows.b.visible);
        assert_eq!(r.arrows.b.endpoint, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn focused_zero_vector_uses_nominal_direction() {
        let style = ArrowStyle::default();
        let r = resolve(
            &state(Vec3::zeros(), Vec3::zeros(), Operation::Add, EditingFocus::EditingB),
            &style,
        );
        let b = &r.arrows.b;
        assert!(b.visible);
        assert!(b.emphasized);
        assert_eq!(b.endpoint, NOMINAL_DIRECTION);
        assert_eq!(b.scale, ArrowScale::Emphasized);
        assert_eq!(b.color, brighten(style.colors.b, style.brighten));
        assert!(!r.arrows.a.visible);
    }

    #[test]
    fn emphasis_follows_focus_only() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let style = ArrowStyle::default();
        let r = resolve(&state(a, b, Operation::Cross, EditingFocus::EditingA), &style);
        assert!(r.arrows.a.emphasized);
        assert!(!r.arrows.b.emphasized);
        assert!(!r.arrows.result.emphasized);
        assert_eq!(r.arrows.b.color, style.colors.b);
        assert_eq!(r.arrows.b.scale, ArrowScale::Normal);
    }

    #[test]
    fn result_ignores_focus() {
        let a = Vec3::new(2.0, -1.0, 0.5);
        let b = Vec3::new(0.0, 3.0, 1.0);
        let style = ArrowStyle::default();
        let focused = [EditingFocus::None, EditingFocus::EditingA, EditingFocus::EditingB];
        let results: Vec<Vec3> = focused
            .iter()
            .map(|&f| resolve(&state(a, b, Operation::Subtract, f), &style).result)
            .collect();
        assert!(results.iter().all(|r| *r == Vec3::new(2.0, -4.0, -0.5)));
    }

    #[test]
    fn result_suppressed_when_an_input_is_zero() {
        let r = resolve(
            &state(Vec3::new(1.0, 1.0, 1.0), Vec3::zeros(), Operation::Subtract, EditingFocus::EditingB),
            &ArrowStyle::default(),
        );
        assert!(!r.arrows.result.visible);
        assert_eq!(r.result, Vec3::zeros());
    }

    #[test]
    fn tiny_input_still_counts_as_non_zero() {
        let a = Vec3::new(1e-30, 0.0, 0.0);
        let r = resolve(
            &state(a, Vec3::new(0.0, 2.0, 0.0), Operation::Add, EditingFocus::None),
            &ArrowStyle::default(),
        );
        assert!(r.arrows.a.visible);
        assert_eq!(r.arrows.a.endpoint, a);
        assert!(r.arrows.result.visible);
        assert_eq!(r.result, Vec3::new(1e-30, 2.0, 0.0));
    }

    #[test]
    fn result_label_names_the_operation() {
        let r = resolve(
            &state(Vec3::x(), Vec3::y(), Operation::Cross, EditingFocus::None),
            &ArrowStyle::default(),
        );
        assert_eq!(r.arrows.result.label.as_deref(), Some("A × B"));
        assert_eq!(r.arrows.result.label_anchor, Vec3::new(0.0, 0.0, 1.0 + LABEL_OFFSET));
    }

    #[test]
    fn arrow_set_indexes_by_id() {
        let mut set = ArrowSet { a: 1, b: 2, result: 3 };
        set[VectorId::Result] = 30;
        let collected: Vec<_> = set.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(
            collected,
            vec![(VectorId::A, 1), (VectorId::B, 2), (VectorId::Result, 30)]
        );
    }

    #[test]
    fn every_inbound_edit_resolves_once() {
        let mut vis = Visualizer::default();
        assert_eq!(vis.generation(), 0);

        vis.set_vector_component(InputVector::A, Axis::X, 1.0);
        assert_eq!(vis.state().focus, EditingFocus::EditingA);
        vis.set_operation(Operation::Cross);
        vis.set_operation(Operation::Cross);
        vis.clear_focus();
        vis.reset();
        vis.randomize(&mut StdRng::seed_from_u64(7));
        assert_eq!(vis.generation(), 6);
    }

    #[test]
    fn reset_zeroes_and_clears_focus() {
        let mut vis = Visualizer::default();
        vis.set_vector_component(InputVector::B, Axis::Z, -4.5);
        vis.reset();
        assert_eq!(*vis.state(), VectorState { operation: Operation::Add, ..Default::default() });
        assert!(vis.resolution().arrows.iter().all(|(_, spec)| !spec.visible));
    }
}
