#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use derive_more::Constructor;

use crate::pairwise::scoring::Score;

/// Affine gap scoring: a gap of `len > 0` residues scores `open + len * extend`.
/// Scores are added to the alignment score, i.e. penalties are negative numbers.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Constructor, Dissolve)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct Affine<S> {
    pub open: S,
    pub extend: S,
}

impl<S: Score> Affine<S> {
    /// Score of a gap of `len` residues (expressed in the score domain). Empty gaps are free.
    #[inline(always)]
    pub fn cost(&self, len: S) -> S {
        if len > S::zero() {
            self.open + len * self.extend
        } else {
            S::zero()
        }
    }

    /// True if neither opening nor extending a gap increases the score.
    pub fn is_penalty(&self) -> bool {
        self.open <= S::zero() && self.extend <= S::zero()
    }
}

/// Independent affine gap scoring for both axes. Row gaps skip residues of the first (row) input,
/// column gaps skip residues of the second (column) input.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Constructor, Dissolve)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct Gaps<S> {
    pub row: Affine<S>,
    pub col: Affine<S>,
}

impl<S: Score> Gaps<S> {
    /// The same gap scoring for rows and columns.
    pub fn symmetric(open: S, extend: S) -> Self {
        let affine = Affine { open, extend };
        Self {
            row: affine,
            col: affine,
        }
    }

    /// Gap scoring for the swapped inputs.
    pub fn transposed(&self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    /// Score of skipping `rows` row residues and `cols` column residues between two aligned pairs.
    #[inline(always)]
    pub fn cost(&self, rows: S, cols: S) -> S {
        self.row.cost(rows) + self.col.cost(cols)
    }
}

impl<S: Score> Default for Gaps<S> {
    fn default() -> Self {
        let two = S::one() + S::one();
        let ten = two * (two + two + S::one());
        Self::symmetric(-ten, -two)
    }
}
