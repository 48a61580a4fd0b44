pub use alignkit_core_rs::alignable::{self, Alignable};
pub use alignkit_core_rs::num::Score;
pub use error::Error;

mod error;
pub mod pairwise;
