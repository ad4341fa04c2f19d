// Domain layer - Series model and processing, chart page model
pub mod chart;
pub mod series;
