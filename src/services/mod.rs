//! Deterministic domain computations.
//!
//! Pure functions over record slices; nothing in here touches the store or
//! performs I/O. Handlers fetch the inputs and render the outputs.

pub mod eligibility;
pub mod phq9;
pub mod report;
pub mod sparkline;
