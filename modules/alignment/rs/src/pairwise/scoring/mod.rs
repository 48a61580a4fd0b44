use std::rc::Rc;
use std::sync::Arc;

use derive_getters::Dissolve;
use derive_more::Constructor;
use eyre::Result;
use impl_tools::autoimpl;

pub use matrix::SubstitutionMatrix;
pub use profile::Profile;
pub use strategy::{Operand, Strategy, Visitor};

pub use crate::Score;
use crate::{Alignable, Error};

pub mod gaps;
mod matrix;
mod profile;
pub mod strategy;
pub mod symbols;

/// Positional scorer: the score of aligning `row` of the first input to `col` of the second one.
/// Implementations must be pure, engines call them many times for the same cell.
#[autoimpl(for<T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait Scorer {
    type Score: Score;

    fn score(&self, row: usize, col: usize) -> Self::Score;
}

/// Lifts a symbol-level scorer over two alignable objects.
#[derive(Debug, Clone, Constructor, Dissolve)]
pub struct Pairwise<'a, R, C, Sym> {
    row: &'a R,
    col: &'a C,
    symbols: &'a Sym,
}

impl<R, C, Sym> Scorer for Pairwise<'_, R, C, Sym>
where
    R: Alignable,
    C: Alignable<Symbol = R::Symbol>,
    Sym: symbols::Scorer<Symbol = R::Symbol>,
{
    type Score = Sym::Score;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> Self::Score {
        self.symbols
            .score(row, self.row.at(row), col, self.col.at(col))
    }
}

/// Dense, precomputed `rows x cols` score table.
#[derive(Debug, Clone, PartialEq, Dissolve)]
pub struct Table<S> {
    rows: usize,
    cols: usize,
    scores: Vec<S>,
}

impl<S: Score> Table<S> {
    /// Table from row-major scores.
    pub fn new(rows: usize, cols: usize, scores: Vec<S>) -> Result<Self> {
        if scores.len() != rows * cols {
            return Err(Error::invalid_input(format!(
                "score table of {rows}x{cols} cells requires {} scores, got {}",
                rows * cols,
                scores.len()
            ))
            .into());
        }
        Ok(Self { rows, cols, scores })
    }

    /// Materialize any positional scorer over the given grid.
    pub fn from_scorer(rows: usize, cols: usize, scorer: impl Scorer<Score = S>) -> Self {
        let mut scores = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            scores.extend((0..cols).map(|col| scorer.score(row, col)));
        }
        Self { rows, cols, scores }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl<S: Score> Scorer for Table<S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> Self::Score {
        debug_assert!(row < self.rows && col < self.cols);
        self.scores[row * self.cols + col]
    }
}

/// Scorer backed by a closure.
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(pub F);

impl<S: Score, F: Fn(usize, usize) -> S> Scorer for FromFn<F> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> Self::Score {
        (self.0)(row, col)
    }
}

/// Swaps rows and columns of the underlying scorer.
#[derive(Debug, Clone, Copy, Constructor)]
pub struct Transposed<T>(pub T);

impl<T: Scorer> Scorer for Transposed<T> {
    type Score = T::Score;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> Self::Score {
        self.0.score(col, row)
    }
}
