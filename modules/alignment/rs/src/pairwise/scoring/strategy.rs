use eyre::Result;

use super::{Profile, Scorer, SubstitutionMatrix};
use crate::pairwise::scoring::Score;
use crate::Error;

/// Encoded input of an alignment: a plain sequence of residues `0..alphabet` or a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, S> {
    Sequence(&'a [u8]),
    Profile(&'a Profile<S>),
}

impl<S: Score> Operand<'_, S> {
    pub fn len(&self) -> usize {
        match self {
            Operand::Sequence(seq) => seq.len(),
            Operand::Profile(profile) => profile.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SequenceSequence<'a, S> {
    row: &'a [u8],
    col: &'a [u8],
    matrix: &'a SubstitutionMatrix<S>,
}

impl<S: Score> Scorer for SequenceSequence<'_, S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> S {
        self.matrix.get(self.row[row], self.col[col])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SequenceProfile<'a, S> {
    row: &'a [u8],
    col: &'a Profile<S>,
}

impl<S: Score> Scorer for SequenceProfile<'_, S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> S {
        self.col.log_odds(col)[self.row[row] as usize]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileSequence<'a, S> {
    row: &'a Profile<S>,
    col: &'a [u8],
}

impl<S: Score> Scorer for ProfileSequence<'_, S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> S {
        self.row.log_odds(row)[self.col[col] as usize]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileProfile<'a, S> {
    row: &'a Profile<S>,
    col: &'a Profile<S>,
}

impl<S: Score> Scorer for ProfileProfile<'_, S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, row: usize, col: usize) -> S {
        let (row_odds, row_freqs) = (self.row.log_odds(row), self.row.frequencies(row));
        let (col_odds, col_freqs) = (self.col.log_odds(col), self.col.frequencies(col));

        let mut score = S::zero();
        for a in 0..row_odds.len() {
            score = score + row_odds[a] * col_freqs[a] + col_odds[a] * row_freqs[a];
        }
        score
    }
}

/// Receives the concrete scorer picked by [`Strategy::dispatch`].
pub trait Visitor<S: Score> {
    type Output;

    fn visit<T: Scorer<Score = S>>(self, scorer: &T) -> Self::Output;
}

/// Scoring function resolved once for a pair of operands. Engines are generic over [`Scorer`], so
/// dispatching a strategy monomorphizes the whole alignment for the selected combination instead
/// of branching in every cell.
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'a, S> {
    SequenceSequence(SequenceSequence<'a, S>),
    SequenceProfile(SequenceProfile<'a, S>),
    ProfileSequence(ProfileSequence<'a, S>),
    ProfileProfile(ProfileProfile<'a, S>),
}

impl<'a, S: Score> Strategy<'a, S> {
    /// Select the scoring function for the operands. Sequence residues must belong to the matrix
    /// alphabet and all profiles must share it.
    pub fn resolve(
        row: Operand<'a, S>,
        col: Operand<'a, S>,
        matrix: &'a SubstitutionMatrix<S>,
    ) -> Result<Self> {
        for operand in [&row, &col] {
            match operand {
                Operand::Sequence(seq) => {
                    if let Some(residue) = matrix.find_foreign(seq) {
                        return Err(Error::invalid_input(format!(
                            "residue {residue} is outside of the {}-letter alphabet",
                            matrix.alphabet()
                        ))
                        .into());
                    }
                }
                Operand::Profile(profile) => {
                    if profile.alphabet() != *matrix.alphabet() {
                        return Err(Error::invalid_input(format!(
                            "profile alphabet size {} differs from the matrix alphabet size {}",
                            profile.alphabet(),
                            matrix.alphabet()
                        ))
                        .into());
                    }
                }
            }
        }

        let strategy = match (row, col) {
            (Operand::Sequence(row), Operand::Sequence(col)) => {
                Strategy::SequenceSequence(SequenceSequence { row, col, matrix })
            }
            (Operand::Sequence(row), Operand::Profile(col)) => {
                Strategy::SequenceProfile(SequenceProfile { row, col })
            }
            (Operand::Profile(row), Operand::Sequence(col)) => {
                Strategy::ProfileSequence(ProfileSequence { row, col })
            }
            (Operand::Profile(row), Operand::Profile(col)) => {
                Strategy::ProfileProfile(ProfileProfile { row, col })
            }
        };
        log::trace!("Resolved scoring strategy: {}", strategy.name());
        Ok(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SequenceSequence(_) => "sequence-sequence",
            Strategy::SequenceProfile(_) => "sequence-profile",
            Strategy::ProfileSequence(_) => "profile-sequence",
            Strategy::ProfileProfile(_) => "profile-profile",
        }
    }

    pub fn dispatch<V: Visitor<S>>(&self, visitor: V) -> V::Output {
        match self {
            Strategy::SequenceSequence(scorer) => visitor.visit(scorer),
            Strategy::SequenceProfile(scorer) => visitor.visit(scorer),
            Strategy::ProfileSequence(scorer) => visitor.visit(scorer),
            Strategy::ProfileProfile(scorer) => visitor.visit(scorer),
        }
    }
}
