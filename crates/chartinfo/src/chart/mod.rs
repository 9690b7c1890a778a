pub mod assembler;
pub mod request;

pub use assembler::{Chart, ChartAssembler, ChartError};
pub use request::ChartRequest;
