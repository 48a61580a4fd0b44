pub use alignment::Alignment;
pub use op::Op;
pub use pair::{ResiduePair, Sink};
pub use step::Step;

mod alignment;
mod op;
mod pair;
pub mod step;
