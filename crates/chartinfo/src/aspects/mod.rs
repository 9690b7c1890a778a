pub mod calculator;
pub mod types;

pub use calculator::{relative_degree, AspectCalculator};
pub use types::{Aspect, AspectDefinition, AspectKind, ASPECT_DEFINITIONS};
