use eyre::Result;

use super::{backtrack, emit, offer, position, sorted, DiagonalGapCost, Dot, DotAligner, GapCost};
use crate::pairwise::alignment::Sink;
use crate::Score;

/// Dot chaining that tries every eligible predecessor of every dot. Quadratic in the number of
/// dots, reaches the same optimal score as [`super::Dots`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DotsSquared<S> {
    cost: GapCost<S>,
}

impl<S: Score> DotsSquared<S> {
    pub fn new(cost: GapCost<S>) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> &GapCost<S> {
        &self.cost
    }
}

impl<S: Score> Default for DotsSquared<S> {
    fn default() -> Self {
        Self::new(GapCost::default())
    }
}

impl<S: Score> DotAligner<S> for DotsSquared<S> {
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, dots: &[Dot<S>]) -> Result<()> {
        all_pairs(sink, dots, |prv, nxt| self.cost.between(prv, nxt))
    }
}

/// Quadratic dot chaining under the [`DiagonalGapCost`] model: moving to another diagonal costs
/// the same however far apart the dots are.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DotsDiagonal<S> {
    cost: DiagonalGapCost<S>,
}

impl<S: Score> DotsDiagonal<S> {
    pub fn new(cost: DiagonalGapCost<S>) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> &DiagonalGapCost<S> {
        &self.cost
    }
}

impl<S: Score> Default for DotsDiagonal<S> {
    fn default() -> Self {
        Self::new(DiagonalGapCost::default())
    }
}

impl<S: Score> DotAligner<S> for DotsDiagonal<S> {
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, dots: &[Dot<S>]) -> Result<()> {
        all_pairs(sink, dots, |prv, nxt| self.cost.between(prv, nxt))
    }
}

fn all_pairs<S, K, F>(sink: &mut K, dots: &[Dot<S>], between: F) -> Result<()>
where
    S: Score,
    K: Sink<S> + ?Sized,
    F: Fn((S, S), (S, S)) -> S,
{
    let dots = sorted(dots)?;
    let coords = dots
        .iter()
        .map(|x| Ok((position(x.row)?, position(x.col)?)))
        .collect::<Result<Vec<(S, S)>>>()?;
    log::debug!("Chaining {} dots, all pairs", dots.len());

    let mut best = Vec::with_capacity(dots.len());
    let mut backptr = Vec::with_capacity(dots.len());
    for (ind, dot) in dots.iter().enumerate() {
        let mut candidate = None;
        for (pred, prv) in dots[..ind].iter().enumerate() {
            if prv.row < dot.row && prv.col < dot.col {
                let score = best[pred] + between(coords[pred], coords[ind]);
                offer(&mut candidate, score, pred);
            }
        }

        match candidate {
            Some((score, pred)) if score > S::zero() => {
                best.push(score + dot.score);
                backptr.push(Some(pred));
            }
            _ => {
                best.push(dot.score);
                backptr.push(None);
            }
        }
    }

    match backtrack(&best, &backptr) {
        Some((chain, score)) => emit(sink, chain.into_iter().map(|x| dots[x]), score),
        None => emit(sink, [], S::zero()),
    }
    Ok(())
}
