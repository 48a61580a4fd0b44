/// `Op` represents a single operation of a pairwise alignment.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Op {
    /// Row residues aligned to nothing, a vertical move in the DP matrix (v)
    GapRow,
    /// Column residues aligned to nothing, a horizontal move in the DP matrix (^)
    GapCol,
    /// Aligned pair with a positive score (=)
    Match,
    /// Aligned pair with a non-positive score (X)
    Mismatch,
}

impl Op {
    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::GapRow => 'v',
            Op::GapCol => '^',
            Op::Match => '=',
            Op::Mismatch => 'X',
        }
    }
}
