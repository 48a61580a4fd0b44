//! Fragmentors split a set of dots into fragments, i.e. short ungapped or gapped alignments,
//! that can be chained further by a [`crate::pairwise::chain::FragmentAligner`].
use eyre::Result;

pub use diagonals::Diagonals;
pub use iterative::Iterative;
pub use repetitive::Repetitive;

use crate::pairwise::chain::{Dot, Fragment};
use crate::Score;

mod diagonals;
mod iterative;
mod repetitive;

pub trait Fragmentor<S: Score> {
    fn fragment(&self, dots: &[Dot<S>]) -> Result<Vec<Fragment<S>>>;
}
