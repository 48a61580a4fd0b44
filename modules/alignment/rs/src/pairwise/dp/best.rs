use super::params::{Mode, Params};
use crate::Score;

/// DP cell where the traceback starts. Coordinates are relative to the aligned region.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Seed<S> {
    pub row: usize,
    pub col: usize,
    pub score: S,
}

/// Tracks the optimal admissible cell while the matrix is being filled.
/// Ties are resolved in favour of the first cell in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct Best<S> {
    best: Option<Seed<S>>,
    // Local alignments must score above zero
    floor: Option<S>,
    // Global alignments penalizing trailing gaps must end on the last row/column
    row: Option<usize>,
    col: Option<usize>,
}

impl<S: Score> Best<S> {
    pub fn new(params: &Params<S>, rows: usize, cols: usize) -> Self {
        match params.mode {
            Mode::Local | Mode::Wrap => Self {
                best: None,
                floor: Some(S::zero()),
                row: None,
                col: None,
            },
            Mode::Global => Self {
                best: None,
                floor: None,
                row: params.end_gaps.row_right.then(|| rows - 1),
                col: params.end_gaps.col_right.then(|| cols - 1),
            },
        }
    }

    #[inline(always)]
    pub fn offer(&mut self, row: usize, col: usize, score: S) {
        if self.row.is_some_and(|x| x != row) || self.col.is_some_and(|x| x != col) {
            return;
        }

        let threshold = match (self.best, self.floor) {
            (Some(best), _) => Some(best.score),
            (None, floor) => floor,
        };
        if threshold.is_none_or(|x| score > x) {
            self.best = Some(Seed { row, col, score });
        }
    }

    pub fn finalize(self) -> Option<Seed<S>> {
        self.best
    }
}
