use eyre::Result;

use super::Fragmentor;
use crate::pairwise::alignment::Alignment;
use crate::pairwise::chain::{Dot, DotAligner, Fragment};
use crate::{Error, Score};

/// Repeatedly extracts the best chain of dots.
///
/// Every accepted chain becomes a fragment and all dots inside its bounding box are discarded
/// before the next round. Stops once the best remaining chain scores below `min_score`.
#[derive(Clone, Debug)]
pub struct Iterative<A, S> {
    aligner: A,
    min_score: S,
}

impl<S: Score, A: DotAligner<S>> Iterative<A, S> {
    pub fn new(aligner: A, min_score: S) -> Result<Self> {
        if min_score <= S::zero() {
            return Err(Error::invalid_input(format!(
                "minimum fragment score must be positive, got {min_score:?}"
            ))
            .into());
        }
        Ok(Self { aligner, min_score })
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    pub fn min_score(&self) -> S {
        self.min_score
    }
}

impl<S: Score, A: DotAligner<S>> Fragmentor<S> for Iterative<A, S> {
    fn fragment(&self, dots: &[Dot<S>]) -> Result<Vec<Fragment<S>>> {
        let mut remaining = dots.to_vec();
        let mut fragments = Vec::new();

        loop {
            let mut chain = Alignment::default();
            self.aligner.align(&mut chain, &remaining)?;
            if *chain.score() < self.min_score {
                break;
            }

            let bounds = (chain.row_from(), chain.row_to(), chain.col_from(), chain.col_to());
            let (Some(row_from), Some(row_to), Some(col_from), Some(col_to)) = bounds else {
                return Err(Error::internal("positive-scoring chain without pairs").into());
            };
            let (rows, cols) = (row_from..row_to, col_from..col_to);
            remaining.retain(|x| !(rows.contains(&x.row) && cols.contains(&x.col)));

            log::trace!(
                "Accepted chain over rows {rows:?} and columns {cols:?}, {} dots left",
                remaining.len()
            );
            fragments.push(chain);
        }

        log::debug!("Extracted {} fragments from {} dots", fragments.len(), dots.len());
        Ok(fragments)
    }
}
