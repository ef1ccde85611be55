//! Rule engines
//!
//! Both engines are pure functions: a fixed baseline per input, then an
//! ordered list of overlays, each writing only the fields it declares.

mod timing;
mod verdict;

pub use timing::{evaluate_timing_window, TimingResult};
pub use verdict::{evaluate_verdict, TripSummary, Verdict, VerdictResult};
