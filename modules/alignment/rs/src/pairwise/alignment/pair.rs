#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use derive_more::Constructor;

/// A single aligned position: `row` of the first input is matched to `col` of the second one.
/// Also used as a "dot", i.e. a candidate match with an intrinsic score, by the chaining engines.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Hash, Constructor, Dissolve)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct ResiduePair<S> {
    pub row: usize,
    pub col: usize,
    pub score: S,
}

impl<S> ResiduePair<S> {
    /// Diagonal of the pair, `col - row`. Constant along a gap-free run of pairs.
    #[inline(always)]
    pub fn diagonal(&self) -> isize {
        self.col as isize - self.row as isize
    }

    /// Coordinates of the pair ignoring its score.
    #[inline(always)]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Append-only collector of alignment results.
///
/// Engines compute the whole result before touching the sink. They `clear` it first, then
/// append pairs in the order of increasing rows, and finally report the total score.
/// Nothing is written if the alignment fails.
pub trait Sink<S> {
    fn add_pair(&mut self, pair: ResiduePair<S>);

    fn set_score(&mut self, score: S);

    fn clear(&mut self);
}

impl<S, T: Sink<S> + ?Sized> Sink<S> for &mut T {
    #[inline(always)]
    fn add_pair(&mut self, pair: ResiduePair<S>) {
        (**self).add_pair(pair)
    }

    #[inline(always)]
    fn set_score(&mut self, score: S) {
        (**self).set_score(score)
    }

    #[inline(always)]
    fn clear(&mut self) {
        (**self).clear()
    }
}
