use derive_getters::{Dissolve, Getters};
use eyre::Result;

use super::symbols::PosInvariantScorer;
use crate::pairwise::scoring::Score;
use crate::Error;

/// Square table of residue-vs-residue scores over an alphabet of encoded residues `0..alphabet`.
#[derive(Debug, Clone, PartialEq, Getters, Dissolve)]
pub struct SubstitutionMatrix<S> {
    alphabet: usize,
    scores: Vec<S>,
}

impl<S: Score> SubstitutionMatrix<S> {
    /// Matrix from row-major `alphabet x alphabet` scores.
    pub fn new(alphabet: usize, scores: Vec<S>) -> Result<Self> {
        if alphabet == 0 {
            return Err(Error::invalid_input("substitution matrix over an empty alphabet").into());
        }
        if scores.len() != alphabet * alphabet {
            return Err(Error::invalid_input(format!(
                "substitution matrix over {alphabet} residues requires {} scores, got {}",
                alphabet * alphabet,
                scores.len()
            ))
            .into());
        }
        Ok(Self { alphabet, scores })
    }

    /// `matched` on the diagonal, `mismatched` everywhere else.
    pub fn identity(alphabet: usize, matched: S, mismatched: S) -> Result<Self> {
        let scores = (0..alphabet * alphabet)
            .map(|ind| {
                if ind / alphabet == ind % alphabet {
                    matched
                } else {
                    mismatched
                }
            })
            .collect();
        Self::new(alphabet, scores)
    }

    #[inline(always)]
    pub fn get(&self, a: u8, b: u8) -> S {
        self.scores[a as usize * self.alphabet + b as usize]
    }

    /// Scores of residue `a` against every residue of the alphabet.
    #[inline(always)]
    pub fn row(&self, a: u8) -> &[S] {
        let start = a as usize * self.alphabet;
        &self.scores[start..start + self.alphabet]
    }

    /// Returns the first residue that is outside of the alphabet.
    pub fn find_foreign(&self, residues: &[u8]) -> Option<u8> {
        residues
            .iter()
            .copied()
            .find(|x| *x as usize >= self.alphabet)
    }
}

impl<S: Score> PosInvariantScorer for SubstitutionMatrix<S> {
    type SymScore = S;
    type Symbol = u8;

    #[inline(always)]
    fn score(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Self::SymScore {
        self.get(*s1, *s2)
    }
}
