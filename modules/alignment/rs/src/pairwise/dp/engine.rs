use std::ops::Range;

use eyre::Result;

use super::algo::Scratch;
use super::params::Params;
use crate::pairwise::alignment::Sink;
use crate::pairwise::scoring::{
    symbols, Operand, Pairwise, Scorer, Strategy, SubstitutionMatrix, Visitor,
};
use crate::{Alignable, Error, Score};

/// Quadratic DP aligner with affine gaps. The aligner only holds the request parameters,
/// all working memory is allocated per call.
#[derive(Clone, PartialEq, Debug)]
pub struct Aligner<S> {
    params: Params<S>,
    rows: Option<Range<usize>>,
    cols: Option<Range<usize>>,
}

impl<S: Score> Aligner<S> {
    pub fn new(params: Params<S>) -> Self {
        Self {
            params,
            rows: None,
            cols: None,
        }
    }

    /// Restrict the alignment to a half-open segment of the first (row) input.
    pub fn with_rows(mut self, rows: Range<usize>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Restrict the alignment to a half-open segment of the second (column) input.
    pub fn with_cols(mut self, cols: Range<usize>) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn params(&self) -> &Params<S> {
        &self.params
    }

    /// Align `rows` positions of the first input against `cols` positions of the second one.
    /// The scorer is queried with absolute positions, pairs reported to the sink are absolute too.
    pub fn align<K, T>(&self, sink: &mut K, scorer: &T, rows: usize, cols: usize) -> Result<()>
    where
        K: Sink<S> + ?Sized,
        T: Scorer<Score = S>,
    {
        let rows = region("row", rows, self.rows.as_ref())?;
        let cols = region("column", cols, self.cols.as_ref())?;

        if !self.params.gaps.row.is_penalty() || !self.params.gaps.col.is_penalty() {
            log::warn!(
                "Gap scores are expected to be non-positive, got {:?}",
                self.params.gaps
            );
        }

        if rows.is_empty() || cols.is_empty() {
            log::debug!("Nothing to align: rows {rows:?}, columns {cols:?}");
            sink.clear();
            sink.set_score(S::zero());
            return Ok(());
        }

        log::debug!(
            "{:?} alignment of rows {rows:?} against columns {cols:?}",
            self.params.mode
        );
        let mut scratch = Scratch::new(rows.len(), cols.len());
        let (pairs, score) = match scratch.fill(&self.params, scorer, &rows, &cols) {
            Some(seed) => {
                log::debug!(
                    "Optimal cell ({}, {}) with score {:?}",
                    rows.start + seed.row,
                    cols.start + seed.col,
                    seed.score
                );
                (scratch.trace.walk(&seed, &rows, &cols, scorer)?, seed.score)
            }
            None => {
                log::debug!("No positive-scoring cell, the alignment is empty");
                (Vec::new(), S::zero())
            }
        };

        sink.clear();
        for pair in pairs {
            sink.add_pair(pair);
        }
        sink.set_score(score);
        Ok(())
    }

    /// Align two encoded operands. The scoring strategy is resolved once for the whole call.
    pub fn align_operands<K: Sink<S> + ?Sized>(
        &self,
        sink: &mut K,
        row: Operand<'_, S>,
        col: Operand<'_, S>,
        matrix: &SubstitutionMatrix<S>,
    ) -> Result<()> {
        let strategy = Strategy::resolve(row, col, matrix)?;
        strategy.dispatch(AlignWith {
            aligner: self,
            sink,
            rows: row.len(),
            cols: col.len(),
        })
    }

    /// Align two alignable objects with a symbol-level scorer.
    pub fn align_sequences<K, R, C, Sym>(
        &self,
        sink: &mut K,
        row: &R,
        col: &C,
        symbols: &Sym,
    ) -> Result<()>
    where
        K: Sink<S> + ?Sized,
        R: Alignable,
        C: Alignable<Symbol = R::Symbol>,
        Sym: symbols::Scorer<Symbol = R::Symbol, Score = S>,
    {
        let scorer = Pairwise::new(row, col, symbols);
        self.align(sink, &scorer, row.len(), col.len())
    }
}

impl<S: Score> Default for Aligner<S> {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

fn region(axis: &str, len: usize, restriction: Option<&Range<usize>>) -> Result<Range<usize>> {
    match restriction {
        None => Ok(0..len),
        Some(range) if range.start <= range.end && range.end <= len => Ok(range.clone()),
        Some(range) => Err(Error::invalid_input(format!(
            "{axis} region {range:?} doesn't fit the input of length {len}"
        ))
        .into()),
    }
}

struct AlignWith<'a, S, K: ?Sized> {
    aligner: &'a Aligner<S>,
    sink: &'a mut K,
    rows: usize,
    cols: usize,
}

impl<S: Score, K: Sink<S> + ?Sized> Visitor<S> for AlignWith<'_, S, K> {
    type Output = Result<()>;

    fn visit<T: Scorer<Score = S>>(self, scorer: &T) -> Self::Output {
        self.aligner.align(self.sink, scorer, self.rows, self.cols)
    }
}
