use ahash::AHashMap;
use eyre::Result;

use super::Fragmentor;
use crate::pairwise::alignment::Alignment;
use crate::pairwise::chain::{position, sorted, Dot, Fragment, GapCost};
use crate::Score;

/// Cuts every diagonal of the dot plot into positive-scoring runs.
///
/// Dots of a diagonal are scanned in the order of increasing columns while the running score,
/// including the gap cost between consecutive dots, stays positive. Once it drops to zero or
/// below, the current run is closed and reported if it has at least two dots, and a new run
/// starts at the current dot if the dot itself scores above zero.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Diagonals<S> {
    cost: GapCost<S>,
}

impl<S: Score> Diagonals<S> {
    pub fn new(cost: GapCost<S>) -> Self {
        Self { cost }
    }

    fn split(&self, dots: &[Dot<S>], saveto: &mut Vec<Fragment<S>>) -> Result<()> {
        let mut run = Vec::new();
        let mut score = S::zero();
        let mut last = None;

        for dot in dots {
            let coords = (position(dot.row)?, position(dot.col)?);
            let extended = match last {
                Some(prev) => score + dot.score + self.cost.between(prev, coords),
                None => score + dot.score,
            };
            if extended > S::zero() {
                score = extended;
                last = Some(coords);
                run.push(*dot);
                continue;
            }

            close(&mut run, score, saveto);
            if dot.score > S::zero() {
                score = dot.score;
                last = Some(coords);
                run.push(*dot);
            } else {
                score = S::zero();
                last = None;
            }
        }
        close(&mut run, score, saveto);
        Ok(())
    }
}

impl<S: Score> Default for Diagonals<S> {
    fn default() -> Self {
        Self::new(GapCost::default())
    }
}

fn close<S: Score>(run: &mut Vec<Dot<S>>, score: S, saveto: &mut Vec<Fragment<S>>) {
    if run.len() > 1 && score > S::zero() {
        saveto.push(Alignment::new(std::mem::take(run), score));
    } else {
        run.clear();
    }
}

impl<S: Score> Fragmentor<S> for Diagonals<S> {
    fn fragment(&self, dots: &[Dot<S>]) -> Result<Vec<Fragment<S>>> {
        let mut diagonals: AHashMap<isize, Vec<Dot<S>>> = AHashMap::new();
        // Sorted dots keep every diagonal ordered by column
        for dot in sorted(dots)? {
            diagonals.entry(dot.diagonal()).or_default().push(dot);
        }
        let mut diagonals: Vec<_> = diagonals.into_iter().collect();
        diagonals.sort_unstable_by_key(|(diagonal, _)| *diagonal);

        let mut fragments = Vec::new();
        for (_, dots) in &diagonals {
            self.split(dots, &mut fragments)?;
        }
        log::debug!(
            "Split {} diagonals into {} fragments",
            diagonals.len(),
            fragments.len()
        );
        Ok(fragments)
    }
}
