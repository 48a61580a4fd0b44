use derive_getters::{Dissolve, Getters};
use eyre::{eyre, Result};
use itertools::{Itertools, MinMaxResult};

use alignkit_core_rs::num::{NumCast, PrimUInt};

use super::op::Op;
use super::pair::{ResiduePair, Sink};
use super::step::Step;
use crate::Score;

/// Vector-backed pairwise alignment: the default [`Sink`] and the unit of fragment chaining.
#[derive(Clone, PartialEq, Debug, Default, Getters, Dissolve)]
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
pub struct Alignment<S> {
    pairs: Vec<ResiduePair<S>>,
    score: S,
}

impl<S: Score> Alignment<S> {
    pub fn new(pairs: Vec<ResiduePair<S>>, score: S) -> Self {
        Self { pairs, score }
    }

    /// Alignment whose score is the sum of its pair scores.
    pub fn from_pairs(pairs: Vec<ResiduePair<S>>) -> Self {
        let score = pairs.iter().fold(S::zero(), |acc, x| acc + x.score);
        Self { pairs, score }
    }

    /// Checks if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of aligned pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// First aligned row.
    pub fn row_from(&self) -> Option<usize> {
        self.pairs.first().map(|x| x.row)
    }

    /// One past the last aligned row.
    pub fn row_to(&self) -> Option<usize> {
        self.pairs.last().map(|x| x.row + 1)
    }

    /// Smallest aligned column. Equals the column of the first pair unless the alignment wraps.
    pub fn col_from(&self) -> Option<usize> {
        match self.pairs.iter().map(|x| x.col).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) | MinMaxResult::MinMax(x, _) => Some(x),
        }
    }

    /// One past the largest aligned column.
    pub fn col_to(&self) -> Option<usize> {
        match self.pairs.iter().map(|x| x.col).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) | MinMaxResult::MinMax(_, x) => Some(x + 1),
        }
    }

    /// True if both rows and columns strictly increase along the alignment.
    pub fn is_monotone(&self) -> bool {
        self.pairs
            .iter()
            .tuple_windows()
            .all(|(prv, nxt)| prv.row < nxt.row && prv.col < nxt.col)
    }

    /// Alignment path as collapsed steps. Positive pairs are reported as matches, others as
    /// mismatches. Wrapped (non-monotone) alignments have no linear path and are rejected.
    pub fn steps<Len: PrimUInt>(&self) -> Result<Vec<Step<Len>>> {
        if !self.is_monotone() {
            return Err(eyre!("Only monotone alignments can be converted to steps"));
        }

        let cast = |len: usize| {
            <Len as NumCast>::from(len)
                .ok_or_else(|| eyre!("Step length {len} doesn't fit the step type"))
        };

        let mut steps = Vec::with_capacity(self.pairs.len());
        for (ind, pair) in self.pairs.iter().enumerate() {
            if ind > 0 {
                let prev = &self.pairs[ind - 1];
                if pair.row - prev.row > 1 {
                    steps.push(Step::new(Op::GapRow, cast(pair.row - prev.row - 1)?)?);
                }
                if pair.col - prev.col > 1 {
                    steps.push(Step::new(Op::GapCol, cast(pair.col - prev.col - 1)?)?);
                }
            }

            let op = if pair.score > S::zero() {
                Op::Match
            } else {
                Op::Mismatch
            };
            steps.push(Step::new(op, Len::one())?);
        }
        Step::collapse(&mut steps);
        Ok(steps)
    }

    /// Run-length encoded alignment path, e.g. `2=3v2=`.
    pub fn rle(&self) -> Result<String> {
        Ok(Step::rle_string(self.steps::<usize>()?.iter()))
    }
}

impl<S: Score> Sink<S> for Alignment<S> {
    #[inline(always)]
    fn add_pair(&mut self, pair: ResiduePair<S>) {
        self.pairs.push(pair);
    }

    #[inline(always)]
    fn set_score(&mut self, score: S) {
        self.score = score;
    }

    fn clear(&mut self) {
        self.pairs.clear();
        self.score = S::zero();
    }
}
