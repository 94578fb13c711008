//! Algebraic properties of the vector operations and of `resolve`.

use proptest::prelude::*;
use vector_viz::math::{self, Operation, Vec3};
use vector_viz::{resolve, ArrowStyle, EditingFocus, VectorState};

fn component() -> impl Strategy<Value = f32> {
    -10.0f32..=10.0
}

fn vector() -> impl Strategy<Value = Vec3> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![Just(Operation::Add), Just(Operation::Subtract), Just(Operation::Cross)]
}

fn focus() -> impl Strategy<Value = EditingFocus> {
    prop_oneof![
        Just(EditingFocus::None),
        Just(EditingFocus::EditingA),
        Just(EditingFocus::EditingB),
    ]
}

proptest! {
    #[test]
    fn addition_commutes(a in vector(), b in vector()) {
        prop_assert_eq!(math::add(&a, &b), math::add(&b, &a));
    }

    #[test]
    fn subtraction_anticommutes(a in vector(), b in vector()) {
        prop_assert_eq!(math::subtract(&a, &b), -math::subtract(&b, &a));
    }

    #[test]
    fn cross_anticommutes(a in vector(), b in vector()) {
        prop_assert_eq!(math::cross(&a, &b), -math::cross(&b, &a));
    }

    #[test]
    fn cross_with_self_is_zero(a in vector()) {
        prop_assert!(math::is_zero(&math::cross(&a, &a)));
    }

    #[test]
    fn magnitude_is_non_negative(v in vector()) {
        let m = math::magnitude(&v);
        prop_assert!(m >= 0.0);
        prop_assert_eq!(m == 0.0, v == Vec3::zeros());
    }

    #[test]
    fn format_round_trips_within_rounding(v in vector()) {
        let parsed = math::parse(&math::format(&v)).unwrap();
        for i in 0..3 {
            prop_assert!((parsed[i] - v[i]).abs() <= 0.005 + 1e-5);
        }
    }

    #[test]
    fn result_ignores_focus(a in vector(), b in vector(), op in operation(), f in focus()) {
        let style = ArrowStyle::default();
        let unfocused = resolve(&VectorState { a, b, operation: op, focus: EditingFocus::None }, &style);
        let focused = resolve(&VectorState { a, b, operation: op, focus: f }, &style);
        prop_assert_eq!(unfocused.result, focused.result);
        prop_assert_eq!(unfocused.arrows.result, focused.arrows.result);
    }

    #[test]
    fn result_visible_iff_both_inputs_non_zero(
        a in prop_oneof![Just(Vec3::zeros()), vector()],
        b in prop_oneof![Just(Vec3::zeros()), vector()],
        op in operation(),
        f in focus(),
    ) {
        let r = resolve(&VectorState { a, b, operation: op, focus: f }, &ArrowStyle::default());
        let both = !math::is_zero(&a) && !math::is_zero(&b);
        prop_assert_eq!(r.arrows.result.visible, both);
        prop_assert!(!r.arrows.result.emphasized);
        if both {
            prop_assert_eq!(r.result, op.apply(&a, &b));
        } else {
            prop_assert_eq!(r.result, Vec3::zeros());
        }
    }

    #[test]
    fn input_arrow_visible_unless_zero_and_unfocused(
        a in prop_oneof![Just(Vec3::zeros()), vector()],
        f in focus(),
    ) {
        let r = resolve(
            &VectorState { a, b: Vec3::x(), operation: Operation::Add, focus: f },
            &ArrowStyle::default(),
        );
        let editing_a = f == EditingFocus::EditingA;
        prop_assert_eq!(r.arrows.a.visible, !math::is_zero(&a) || editing_a);
        prop_assert_eq!(r.arrows.a.emphasized, editing_a);
        if r.arrows.a.visible {
            prop_assert!(!math::is_zero(&r.arrows.a.endpoint));
        }
    }
}
