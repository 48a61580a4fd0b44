pub use alignment::{Alignment, Op, ResiduePair, Sink, Step};

pub mod alignment;
pub mod chain;
pub mod dottor;
pub mod dp;
pub mod fragmentor;
pub mod scoring;
