// crates/driftscope-store/src/lib.rs
//
// driftscope-store: Append-only persisted results log and per-run
// artifact paths.
//
// The store is the sole writer of the results file. Each append opens,
// writes, flushes, and closes the file, so record durability never
// depends on run completion.

pub mod csv;
pub mod paths;

pub use csv::CsvResultsStore;
pub use paths::RunPaths;
