//! Charts module - Static chart rendering for the report

mod renderer;

pub use renderer::{ChartArtifact, ChartInputs, ChartKind, StaticChartRenderer};
