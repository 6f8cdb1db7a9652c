pub mod assembler;
pub mod types;

pub use assembler::{BirthChartAssembler, ChartError};
pub use types::{BirthChart, BodyPlacement, ChartRequest, ChartWithHouses};
