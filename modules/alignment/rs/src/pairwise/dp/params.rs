#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_more::Constructor;

use crate::pairwise::scoring::gaps::Gaps;
use crate::Score;

/// Alignment semantics of the DP engine.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub enum Mode {
    /// Smith-Waterman: best-scoring pair of sub-segments, scores are floored at zero.
    #[default]
    Local,
    /// Needleman-Wunsch: end gaps are scored according to [`EndGaps`].
    Global,
    /// Local alignment against a circular column axis, used to detect tandem repeats.
    Wrap,
}

/// Which unaligned ends are penalized in the global mode. Local and wrap alignments ignore it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default, Constructor)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct EndGaps {
    /// Leading row residues left unaligned
    pub row_left: bool,
    /// Trailing row residues left unaligned
    pub row_right: bool,
    /// Leading column residues left unaligned
    pub col_left: bool,
    /// Trailing column residues left unaligned
    pub col_right: bool,
}

impl EndGaps {
    pub fn all() -> Self {
        Self::new(true, true, true, true)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn transposed(&self) -> Self {
        Self {
            row_left: self.col_left,
            row_right: self.col_right,
            col_left: self.row_left,
            col_right: self.row_right,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Constructor)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct Params<S> {
    pub mode: Mode,
    pub gaps: Gaps<S>,
    pub end_gaps: EndGaps,
}

impl<S: Score> Params<S> {
    pub fn local(gaps: Gaps<S>) -> Self {
        Self::new(Mode::Local, gaps, EndGaps::none())
    }

    pub fn global(gaps: Gaps<S>, end_gaps: EndGaps) -> Self {
        Self::new(Mode::Global, gaps, end_gaps)
    }

    pub fn wrap(gaps: Gaps<S>) -> Self {
        Self::new(Mode::Wrap, gaps, EndGaps::none())
    }

    /// Parameters for aligning the swapped inputs.
    pub fn transposed(&self) -> Self {
        Self::new(self.mode, self.gaps.transposed(), self.end_gaps.transposed())
    }
}

impl<S: Score> Default for Params<S> {
    fn default() -> Self {
        Self::local(Gaps::default())
    }
}
