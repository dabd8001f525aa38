//! Chart rendering on the plotters bitmap backend.

mod bandwidth;
pub mod grid;
mod quality;
mod style;

pub use bandwidth::bandwidth_chart;
pub use quality::quality_chart;
pub use style::ChartStyle;
