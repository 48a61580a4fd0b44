use std::ops::Range;

use eyre::Result;
use itertools::Itertools;

use super::{backtrack, emit, offer, position, sorted, Dot, DotAligner, GapCost};
use crate::pairwise::alignment::Sink;
use crate::Score;

/// Sweep-line dot chaining.
///
/// Dots are visited row by row. The best predecessor of a dot `(r, c)` is the best of:
/// * the dot at `(r - 1, c - 1)`, connected for free;
/// * a dot of row `r - 1` left of `c - 1`, connected by a column gap;
/// * the best dot of column `c - 1` above `r - 1`, connected by a row gap;
/// * the best dot above `r - 1` and left of `c - 1`, connected by a row and a column gap.
///
/// Affine costs are linear in the coordinates of the predecessor once the kind of the gap is
/// fixed. Each case therefore reduces to a running maximum of `best - row * extend` and/or
/// `best - col * extend`, which makes the sweep exact.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Dots<S> {
    cost: GapCost<S>,
}

impl<S: Score> Dots<S> {
    pub fn new(cost: GapCost<S>) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> &GapCost<S> {
        &self.cost
    }
}

impl<S: Score> Default for Dots<S> {
    fn default() -> Self {
        Self::new(GapCost::default())
    }
}

struct Sweep<S> {
    dots: Vec<Dot<S>>,
    // Dot positions in the score domain
    coords: Vec<(S, S)>,
    best: Vec<S>,
    backptr: Vec<Option<usize>>,
    // Distinct dot columns, ascending, and the rank of each dot's column among them
    cols: Vec<usize>,
    ranks: Vec<usize>,
    // Per column rank: max of `best - row * row.extend` over dots at least two rows above
    columns: Vec<Option<(S, usize)>>,
    committed: usize,
}

impl<S: Score> Sweep<S> {
    fn new(dots: Vec<Dot<S>>) -> Result<Self> {
        let coords = dots
            .iter()
            .map(|x| Ok((position(x.row)?, position(x.col)?)))
            .collect::<Result<Vec<_>>>()?;
        let cols: Vec<usize> = dots.iter().map(|x| x.col).sorted_unstable().dedup().collect();
        let ranks = dots
            .iter()
            .map(|x| cols.partition_point(|&c| c < x.col))
            .collect();

        Ok(Self {
            best: vec![S::zero(); dots.len()],
            backptr: vec![None; dots.len()],
            columns: vec![None; cols.len()],
            cols,
            ranks,
            committed: 0,
            dots,
            coords,
        })
    }

    /// Publish dots located at or above `row` to the column index.
    fn commit(&mut self, row: usize, extend: S) {
        while self.committed < self.dots.len() && self.dots[self.committed].row <= row {
            let ind = self.committed;
            let key = self.best[ind] - self.coords[ind].0 * extend;
            offer(&mut self.columns[self.ranks[ind]], key, ind);
            self.committed += 1;
        }
    }

    fn run(&mut self, cost: &GapCost<S>) {
        let (rowgap, colgap) = (cost.gaps.row, cost.gaps.col);
        let one = S::one();

        let mut prev: Range<usize> = 0..0;
        let mut start = 0;
        while start < self.dots.len() {
            let row = self.dots[start].row;
            let end = start
                + self.dots[start..]
                    .iter()
                    .take_while(|x| x.row == row)
                    .count();
            if row >= 2 {
                self.commit(row - 2, rowgap.extend);
            }
            if prev.is_empty() || self.dots[prev.start].row + 1 != row {
                prev = start..start;
            }

            // Skipping the rows between row `r` and the current one costs `row_base - r * extend`
            let row_base = rowgap.open + (self.coords[start].0 - one) * rowgap.extend;

            let mut pointer = prev.start;
            let mut prev_best: Option<(S, usize)> = None;
            let mut search_rank = 0;
            let mut search_best: Option<(S, usize)> = None;

            for ind in start..end {
                let col = self.dots[ind].col;
                let col_base = colgap.open + (self.coords[ind].1 - one) * colgap.extend;
                let mut candidate = None;

                // Previous row
                while pointer < prev.end && self.dots[pointer].col + 2 <= col {
                    let key = self.best[pointer] - self.coords[pointer].1 * colgap.extend;
                    offer(&mut prev_best, key, pointer);
                    pointer += 1;
                }
                if let Some((key, pred)) = prev_best {
                    offer(&mut candidate, key + col_base, pred);
                }
                if pointer < prev.end && self.dots[pointer].col + 1 == col {
                    offer(&mut candidate, self.best[pointer], pointer);
                }

                // Rows above the previous one
                let rank = self.ranks[ind];
                if rank >= 1 && self.cols[rank - 1] + 1 == col {
                    if let Some((key, pred)) = self.columns[rank - 1] {
                        offer(&mut candidate, key + row_base, pred);
                    }
                }
                while self.cols[search_rank] + 2 <= col {
                    if let Some((key, pred)) = self.columns[search_rank] {
                        let key = key - self.coords[pred].1 * colgap.extend;
                        offer(&mut search_best, key, pred);
                    }
                    search_rank += 1;
                }
                if let Some((key, pred)) = search_best {
                    offer(&mut candidate, key + row_base + col_base, pred);
                }

                let dot = self.dots[ind].score;
                match candidate {
                    Some((score, pred)) if score > S::zero() => {
                        self.best[ind] = score + dot;
                        self.backptr[ind] = Some(pred);
                    }
                    _ => self.best[ind] = dot,
                }
            }

            prev = start..end;
            start = end;
        }
    }
}

impl<S: Score> DotAligner<S> for Dots<S> {
    fn align<K: Sink<S> + ?Sized>(&self, sink: &mut K, dots: &[Dot<S>]) -> Result<()> {
        let mut sweep = Sweep::new(sorted(dots)?)?;
        log::debug!(
            "Chaining {} dots over {} columns",
            sweep.dots.len(),
            sweep.columns.len()
        );
        sweep.run(&self.cost);

        match backtrack(&sweep.best, &sweep.backptr) {
            Some((chain, score)) => emit(sink, chain.into_iter().map(|x| sweep.dots[x]), score),
            None => emit(sink, [], S::zero()),
        }
        Ok(())
    }
}
