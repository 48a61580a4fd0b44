pub use engine::Aligner;
pub use params::{EndGaps, Mode, Params};
pub use traceback::{Trace, TraceMatrix};

mod algo;
mod best;
mod engine;
mod params;
mod traceback;
