//! Sparse aligners: find the best-scoring monotone chain of pre-computed dots or fragments.
//!
//! All chaining engines have local semantics. A chain scores the sum of its units plus the gap
//! costs between consecutive units, and restarts whenever the running score drops to zero.
use eyre::Result;
use itertools::Itertools;

pub use dots::Dots;
pub use fragments::{Fragments, FragmentsSquared};
pub use gaps::{DiagonalGapCost, GapCost};
pub use squared::{DotsDiagonal, DotsSquared};

use crate::pairwise::alignment::{Alignment, ResiduePair, Sink};
use crate::{Error, Score};

mod dots;
mod fragments;
mod gaps;
mod squared;

/// Candidate match with an intrinsic score.
pub type Dot<S> = ResiduePair<S>;

/// Pre-aligned, monotone piece of an alignment.
pub type Fragment<S> = Alignment<S>;

pub trait DotAligner<S: Score> {
    /// Write the best chain of `dots` to the sink. Dots may come in any order but must occupy
    /// distinct positions.
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, dots: &[Dot<S>]) -> Result<()>;
}

pub trait FragmentAligner<S: Score> {
    /// Write the concatenated pairs of the best fragment chain to the sink.
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, fragments: &[Fragment<S>]) -> Result<()>;
}

/// Dots sorted by row, then by column. Fails on duplicated positions.
pub(crate) fn sorted<S: Score>(dots: &[Dot<S>]) -> Result<Vec<Dot<S>>> {
    let mut dots = dots.to_vec();
    dots.sort_by_key(|x| x.position());

    if let Some((dup, _)) = dots
        .iter()
        .tuple_windows()
        .find(|(prv, nxt)| prv.position() == nxt.position())
    {
        return Err(Error::invalid_input(format!(
            "duplicated dot at ({}, {})",
            dup.row, dup.col
        ))
        .into());
    }
    Ok(dots)
}

/// Position converted to the score domain.
pub(crate) fn position<S: Score>(pos: usize) -> Result<S> {
    S::from_position(pos).ok_or_else(|| {
        Error::invalid_input(format!("position {pos} can't be represented by the score type"))
            .into()
    })
}

/// Keep the candidate with the strictly larger score.
#[inline(always)]
fn offer<S: Score>(slot: &mut Option<(S, usize)>, score: S, unit: usize) {
    if slot.is_none_or(|(x, _)| score > x) {
        *slot = Some((score, unit));
    }
}

/// Pick the chain end with the best positive score and collect the chain in the order of
/// increasing rows.
fn backtrack<S: Score>(best: &[S], backptr: &[Option<usize>]) -> Option<(Vec<usize>, S)> {
    let mut anchor = None;
    for (ind, score) in best.iter().enumerate() {
        offer(&mut anchor, *score, ind);
    }
    let (score, anchor) = anchor.filter(|(score, _)| *score > S::zero())?;

    let mut chain = vec![anchor];
    let mut cursor = anchor;
    while let Some(prev) = backptr[cursor] {
        chain.push(prev);
        cursor = prev;
    }
    chain.reverse();
    log::trace!("Best chain of {} units ends at {anchor} with score {score:?}", chain.len());
    Some((chain, score))
}

fn emit<S, K>(sink: &mut K, pairs: impl IntoIterator<Item = ResiduePair<S>>, score: S)
where
    S: Score,
    K: Sink<S> + ?Sized,
{
    sink.clear();
    for pair in pairs {
        sink.add_pair(pair);
    }
    sink.set_score(score);
}
