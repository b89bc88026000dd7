// crates/driftscope-report/src/lib.rs
//
// driftscope-report: Renders the post-run distance chart.

pub mod chart;

pub use chart::render_drift_chart;
