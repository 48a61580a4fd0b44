use std::ops::Range;

use super::best::{Best, Seed};
use super::params::{Mode, Params};
use super::traceback::{Trace, TraceMatrix};
use crate::pairwise::scoring::gaps::Affine;
use crate::pairwise::scoring::Scorer;
use crate::Score;

/// Per-call state of the DP engine: two rolling score rows and the full traceback matrix.
///
/// Index `0` of the rolling rows is the sentinel column (`col = -1`), column `j` of the region
/// lives at index `j + 1`.
pub(super) struct Scratch<S> {
    // Best score of a path ending in the cell (the `C` row)
    cc: Vec<S>,
    // Best score of a path ending with a vertical gap in the cell (the `D` row)
    dd: Vec<S>,
    // Best score of a path ending with a horizontal gap in the cell (the `E` row)
    ee: Vec<S>,
    pub trace: TraceMatrix,
}

impl<S: Score> Scratch<S> {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut trace = TraceMatrix::new();
        trace.reset(rows, cols);
        Self {
            cc: vec![S::zero(); cols + 1],
            dd: vec![S::zero(); cols + 1],
            ee: vec![S::zero(); cols + 1],
            trace,
        }
    }

    /// Fill the traceback matrix for the region and return the optimal admissible cell, if any.
    pub fn fill<T: Scorer<Score = S>>(
        &mut self,
        params: &Params<S>,
        scorer: &T,
        rows: &Range<usize>,
        cols: &Range<usize>,
    ) -> Option<Seed<S>> {
        let (nrows, ncols) = (rows.len(), cols.len());
        let (rowgap, colgap) = (params.gaps.row, params.gaps.col);
        let global = params.mode == Mode::Global;
        let floored = !global;
        // Gaps that cross the column boundary are only well-defined when they never pay off
        let wrap_gaps = params.mode == Mode::Wrap && colgap.is_penalty();
        let mut best = Best::new(params, nrows, ncols);

        // Row -1: skipping the leading columns
        self.cc[0] = S::zero();
        let mut skipped = S::zero();
        for j in 0..ncols {
            skipped = skipped + S::one();
            self.cc[j + 1] = if global && params.end_gaps.col_left {
                colgap.cost(skipped)
            } else {
                S::zero()
            };
            self.dd[j + 1] = self.cc[j + 1] + rowgap.open;
        }

        let mut skipped = S::zero();
        for i in 0..nrows {
            skipped = skipped + S::one();
            let left = if global && params.end_gaps.row_left {
                rowgap.cost(skipped)
            } else {
                S::zero()
            };

            let mut diag = self.cc[0];
            if params.mode == Mode::Wrap && i > 0 && self.cc[ncols] > S::zero() {
                diag = self.cc[ncols];
                self.trace.set_code(i as isize - 1, -1, Trace::Wrap);
            }

            self.cc[0] = left;
            let mut c_left = left;
            let mut e = left + colgap.open;

            let row = rows.start + i;
            for j in 0..ncols {
                let (up_c, up_d) = (self.cc[j + 1], self.dd[j + 1]);
                let mut flags = 0;

                // Horizontal move: column gap
                let (extend, open) = (e + colgap.extend, c_left + colgap.open + colgap.extend);
                e = if extend >= open {
                    flags |= TraceMatrix::COL_GAP_EXTENDED;
                    extend
                } else {
                    open
                };

                // Vertical move: row gap
                let (extend, open) = (up_d + rowgap.extend, up_c + rowgap.open + rowgap.extend);
                let d = if extend >= open {
                    flags |= TraceMatrix::ROW_GAP_EXTENDED;
                    extend
                } else {
                    open
                };

                let mut c = diag + scorer.score(row, cols.start + j);
                let mut trace = Trace::Match;
                if e > c {
                    c = e;
                    trace = Trace::Deletion;
                }
                if d >= c {
                    c = d;
                    trace = Trace::Insertion;
                }
                if floored && c <= S::zero() {
                    c = S::zero();
                    trace = Trace::Stop;
                }

                self.trace.set(i as isize, j as isize, trace, flags);
                best.offer(i, j, c);

                diag = up_c;
                self.cc[j + 1] = c;
                self.dd[j + 1] = d;
                self.ee[j + 1] = e;
                c_left = c;
            }

            if wrap_gaps {
                self.wrap_col_gaps(i, &colgap, &mut best);
            }
        }
        best.finalize()
    }

    /// Second pass over a WRAP row: column gaps that run past the last column and continue at
    /// the first one. Only states that strictly improve are rewritten, so every traceback path
    /// crosses the boundary at most once per row.
    fn wrap_col_gaps(&mut self, i: usize, colgap: &Affine<S>, best: &mut Best<S>) {
        let ncols = self.cc.len() - 1;
        let row = i as isize;

        let (extend, open) = (
            self.ee[ncols] + colgap.extend,
            self.cc[ncols] + colgap.open + colgap.extend,
        );
        let (mut e, extended) = if extend >= open {
            (extend, true)
        } else {
            (open, false)
        };

        for j in 0..ncols {
            // The first column continues the gap from the sentinel
            let mut flag = true;
            if j > 0 {
                let (extend, open) = (
                    e + colgap.extend,
                    self.cc[j] + colgap.open + colgap.extend,
                );
                flag = extend >= open;
                e = if flag { extend } else { open };
            }
            if e <= self.ee[j + 1] {
                break;
            }

            if j == 0 {
                self.trace.set_flag(row, -1, TraceMatrix::COL_GAP_WRAPPED, true);
                self.trace.set_flag(row, -1, TraceMatrix::COL_GAP_EXTENDED, extended);
            }
            let col = j as isize;
            self.ee[j + 1] = e;
            self.trace.set_flag(row, col, TraceMatrix::COL_GAP_EXTENDED, flag);
            if e > self.cc[j + 1] {
                self.cc[j + 1] = e;
                self.trace.set_code(row, col, Trace::Deletion);
                best.offer(i, j, e);
            }
        }
    }
}
