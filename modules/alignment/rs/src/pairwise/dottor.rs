use std::collections::BTreeSet;
use std::hash::Hash;
use std::ops::Range;

use ahash::AHashMap;
use eyre::Result;

use crate::pairwise::chain::Dot;
use crate::pairwise::scoring::Scorer;
use crate::{Alignable, Error, Score};

/// Builds the dot plot of two inputs: every cell scoring at least `min_score` becomes a dot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Dottor<S> {
    min_score: S,
}

impl<S: Score> Dottor<S> {
    pub fn new(min_score: S) -> Self {
        Self { min_score }
    }

    pub fn min_score(&self) -> S {
        self.min_score
    }

    /// Dots of the `rows x cols` grid, ordered by row and then by column.
    pub fn dots<T: Scorer<Score = S>>(&self, scorer: &T, rows: usize, cols: usize) -> Vec<Dot<S>> {
        self.dots_in(scorer, 0..rows, 0..cols)
    }

    /// Dots of a sub-grid. Positions are absolute.
    pub fn dots_in<T: Scorer<Score = S>>(
        &self,
        scorer: &T,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Vec<Dot<S>> {
        let mut dots = Vec::new();
        for row in rows {
            for col in cols.clone() {
                let score = scorer.score(row, col);
                if score >= self.min_score {
                    dots.push(Dot::new(row, col, score));
                }
            }
        }
        log::debug!("Collected {} dots", dots.len());
        dots
    }
}

/// Seeds dots from identical k-tuples: every `k` consecutive residues shared by both inputs
/// produce the `k` dots along the shared stretch. Each dot is reported once, whatever the number
/// of tuples covering it, and scored by the positional scorer.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Tuples {
    ktuple: usize,
}

impl Tuples {
    pub fn new(ktuple: usize) -> Result<Self> {
        if ktuple == 0 {
            return Err(Error::invalid_input("tuple length must be positive").into());
        }
        Ok(Self { ktuple })
    }

    pub fn ktuple(&self) -> usize {
        self.ktuple
    }

    /// Dots ordered by row and then by column.
    pub fn dots<R, C, T>(&self, row: &R, col: &C, scorer: &T) -> Vec<Dot<T::Score>>
    where
        R: Alignable,
        C: Alignable<Symbol = R::Symbol>,
        R::Symbol: Hash + Eq,
        T: Scorer,
    {
        let k = self.ktuple;
        if row.len() < k || col.len() < k {
            return Vec::new();
        }

        let mut index: AHashMap<Vec<&R::Symbol>, Vec<usize>> = AHashMap::new();
        for start in 0..=row.len() - k {
            let tuple = (start..start + k).map(|x| row.at(x)).collect();
            index.entry(tuple).or_default().push(start);
        }

        let mut seeds = BTreeSet::new();
        for start in 0..=col.len() - k {
            let tuple: Vec<_> = (start..start + k).map(|x| col.at(x)).collect();
            let Some(rows) = index.get(&tuple) else {
                continue;
            };
            for &row in rows {
                seeds.extend((0..k).map(|x| (row + x, start + x)));
            }
        }
        log::debug!("{} dots seeded by {}-tuples", seeds.len(), k);

        seeds
            .into_iter()
            .map(|(row, col)| Dot::new(row, col, scorer.score(row, col)))
            .collect()
    }
}
