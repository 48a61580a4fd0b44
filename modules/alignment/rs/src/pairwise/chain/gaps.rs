#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_more::Constructor;

use crate::pairwise::scoring::gaps::Gaps;
use crate::Score;

/// Distance-based affine gap cost between consecutive units of a chain.
///
/// Skipping `n > 0` rows costs `row.open + n * row.extend`, skipping `n > 0` columns costs
/// `col.open + n * col.extend`, and adjacent units are connected for free. Costs are added to
/// the chain score, i.e. they are non-positive for ordinary penalties.
#[derive(Copy, Clone, PartialEq, Debug, Hash, Constructor)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct GapCost<S> {
    pub gaps: Gaps<S>,
}

impl<S: Score> GapCost<S> {
    /// Cost of skipping `rows` row residues and `cols` column residues.
    #[inline(always)]
    pub fn skip(&self, rows: S, cols: S) -> S {
        self.gaps.cost(rows, cols)
    }

    /// Cost of connecting a dot at `prev` to a dot at `next`, both given as `(row, col)`.
    #[inline(always)]
    pub fn between(&self, prev: (S, S), next: (S, S)) -> S {
        let one = S::one();
        self.skip(next.0 - prev.0 - one, next.1 - prev.1 - one)
    }
}

impl<S: Score> Default for GapCost<S> {
    fn default() -> Self {
        Self::new(Gaps::default())
    }
}

/// Chaining gap cost measured by the shift between the diagonals of two units.
///
/// Units on the same diagonal are connected through a row gap over the skipped rows. Units on
/// different diagonals pay `col.open + |shift| * col.extend`, however many residues lie between
/// them.
#[derive(Copy, Clone, PartialEq, Debug, Hash, Constructor)]
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
pub struct DiagonalGapCost<S> {
    pub gaps: Gaps<S>,
}

impl<S: Score> DiagonalGapCost<S> {
    /// Cost of connecting a dot at `prev` to a dot at `next`, both given as `(row, col)`.
    #[inline(always)]
    pub fn between(&self, prev: (S, S), next: (S, S)) -> S {
        let shift = (next.1 - next.0) - (prev.1 - prev.0);
        if shift.is_zero() {
            self.gaps.row.cost(next.0 - prev.0 - S::one())
        } else {
            self.gaps.col.open + shift.abs() * self.gaps.col.extend
        }
    }
}

impl<S: Score> Default for DiagonalGapCost<S> {
    fn default() -> Self {
        Self::new(Gaps::default())
    }
}
