//! Interactive calculator for 3D vector addition, subtraction and cross
//! product.
//!
//! [`math`] holds the arithmetic, [`resolve`] turns the two input vectors and
//! the selected operation into arrows to draw, and [`app`] is the egui front
//! end that feeds user edits in and paints the result.

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod focus;
pub mod math;
pub mod render;
pub mod resolve;

pub use config::Config;
pub use error::{ConfigError, Result};
pub use math::{Axis, Operation, Vec3};
pub use resolve::{
    resolve, ArrowScale, ArrowSet, ArrowSpec, ArrowStyle, EditingFocus, InputVector, Resolution,
    VectorId, VectorState, Visualizer,
};
