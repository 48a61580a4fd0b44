use std::ops::Range;

use eyre::Result;

use super::best::Seed;
use crate::pairwise::alignment::ResiduePair;
use crate::pairwise::scoring::Scorer;
use crate::{Error, Score};

/// The recurrence branch that produced the best score of a DP cell.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Trace {
    /// Nothing precedes the cell: borders and local cells reset to zero
    Stop = 0,
    /// Diagonal move, the cell's residues are aligned
    Match = 1,
    /// Vertical move, the row residue is aligned to a gap
    Insertion = 2,
    /// Horizontal move, the column residue is aligned to a gap
    Deletion = 3,
    /// Sentinel cell carrying the last column of its row over to the next row
    Wrap = 4,
}

impl TryFrom<u8> for Trace {
    type Error = Error;

    fn try_from(cell: u8) -> Result<Self, Self::Error> {
        match cell & TraceMatrix::CODE_MASK {
            0 => Ok(Trace::Stop),
            1 => Ok(Trace::Match),
            2 => Ok(Trace::Insertion),
            3 => Ok(Trace::Deletion),
            4 => Ok(Trace::Wrap),
            code => Err(Error::internal(format!("unknown trace code {code}"))),
        }
    }
}

/// Full traceback matrix with a sentinel row and column (index -1).
///
/// Besides the trace code, each cell remembers whether its vertical/horizontal gap states were
/// obtained by extending the gap of the previous cell. Gotoh's traceback needs both to follow
/// affine gaps exactly.
#[derive(Clone, Debug, Default)]
pub struct TraceMatrix {
    cells: Vec<u8>,
    cols: usize,
}

impl TraceMatrix {
    const CODE_MASK: u8 = 0b0000_0111;
    pub const ROW_GAP_EXTENDED: u8 = 0b0000_1000;
    pub const COL_GAP_EXTENDED: u8 = 0b0001_0000;
    /// Set on a sentinel cell: the column gap entering the first column of the row continues
    /// from the last column of the same row. Combined with `COL_GAP_EXTENDED` if the gap was
    /// already open there.
    pub const COL_GAP_WRAPPED: u8 = 0b0010_0000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Resize for a `rows x cols` problem and reset every cell to `Stop`.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.cols = cols;
        self.cells.clear();
        self.cells.resize((rows + 1) * (cols + 1), Trace::Stop as u8);
    }

    #[inline(always)]
    fn index(&self, row: isize, col: isize) -> usize {
        debug_assert!(row >= -1 && col >= -1);
        (row + 1) as usize * (self.cols + 1) + (col + 1) as usize
    }

    #[inline(always)]
    pub fn set(&mut self, row: isize, col: isize, trace: Trace, flags: u8) {
        let ind = self.index(row, col);
        self.cells[ind] = trace as u8 | flags;
    }

    /// Replace the trace code of a cell, keeping its flags.
    #[inline(always)]
    pub fn set_code(&mut self, row: isize, col: isize, trace: Trace) {
        let ind = self.index(row, col);
        self.cells[ind] = (self.cells[ind] & !Self::CODE_MASK) | trace as u8;
    }

    #[inline(always)]
    pub fn set_flag(&mut self, row: isize, col: isize, flag: u8, on: bool) {
        let ind = self.index(row, col);
        if on {
            self.cells[ind] |= flag;
        } else {
            self.cells[ind] &= !flag;
        }
    }

    #[inline(always)]
    pub fn get(&self, row: isize, col: isize) -> u8 {
        self.cells[self.index(row, col)]
    }

    #[inline(always)]
    pub fn trace(&self, row: isize, col: isize) -> Result<Trace, Error> {
        Trace::try_from(self.get(row, col))
    }

    /// Walk back from the seed cell and collect aligned pairs in the order of increasing rows.
    /// Positions are relative to the region start, emitted pairs are absolute.
    pub(super) fn walk<S, T>(
        &self,
        seed: &Seed<S>,
        rows: &Range<usize>,
        cols: &Range<usize>,
        scorer: &T,
    ) -> Result<Vec<ResiduePair<S>>>
    where
        S: Score,
        T: Scorer<Score = S>,
    {
        #[derive(Copy, Clone, Eq, PartialEq)]
        enum State {
            Diagonal,
            RowGap,
            ColGap,
        }

        let last_col = cols.len() as isize - 1;
        let (mut row, mut col) = (seed.row as isize, seed.col as isize);
        let mut state = State::Diagonal;
        let mut pairs = Vec::new();

        while row >= 0 && col >= 0 {
            let cell = self.get(row, col);
            match state {
                State::Diagonal => match Trace::try_from(cell)? {
                    Trace::Stop => break,
                    Trace::Match => {
                        let (r, c) = (rows.start + row as usize, cols.start + col as usize);
                        pairs.push(ResiduePair::new(r, c, scorer.score(r, c)));
                        row -= 1;
                        col -= 1;

                        if col < 0 && row >= 0 && self.trace(row, -1)? == Trace::Wrap {
                            log::trace!("Wrapping around the column axis at row {row}");
                            col = last_col;
                        }
                    }
                    Trace::Insertion => state = State::RowGap,
                    Trace::Deletion => state = State::ColGap,
                    Trace::Wrap => {
                        return Err(Error::internal(format!(
                            "wrap marker inside the matrix at ({row}, {col})"
                        ))
                        .into())
                    }
                },
                State::RowGap => {
                    if cell & Self::ROW_GAP_EXTENDED == 0 {
                        state = State::Diagonal;
                    }
                    row -= 1;
                }
                State::ColGap => {
                    if cell & Self::COL_GAP_EXTENDED == 0 {
                        state = State::Diagonal;
                    }
                    col -= 1;

                    if col < 0 && state == State::ColGap {
                        let sentinel = self.get(row, -1);
                        if sentinel & Self::COL_GAP_WRAPPED != 0 {
                            log::trace!("Column gap wraps around at row {row}");
                            col = last_col;
                            if sentinel & Self::COL_GAP_EXTENDED == 0 {
                                state = State::Diagonal;
                            }
                        }
                    }
                }
            }
        }

        pairs.reverse();
        Ok(pairs)
    }
}
