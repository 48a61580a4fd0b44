use derive_getters::Dissolve;
use eyre::Result;

use super::matrix::SubstitutionMatrix;
use crate::pairwise::scoring::Score;
use crate::Error;

/// Position-specific profile: for each position, the log-odds score of every residue of the
/// alphabet and the observed residue frequencies.
#[derive(Debug, Clone, PartialEq, Dissolve)]
pub struct Profile<S> {
    alphabet: usize,
    log_odds: Vec<S>,
    frequencies: Vec<S>,
}

impl<S: Score> Profile<S> {
    /// Profile from row-major `len x alphabet` tables.
    pub fn new(alphabet: usize, log_odds: Vec<S>, frequencies: Vec<S>) -> Result<Self> {
        if alphabet == 0 {
            return Err(Error::invalid_input("profile over an empty alphabet").into());
        }
        if log_odds.len() != frequencies.len() || log_odds.len() % alphabet != 0 {
            return Err(Error::invalid_input(format!(
                "profile tables must have the same number of {alphabet}-residue columns, \
                 got {} log-odds and {} frequencies",
                log_odds.len(),
                frequencies.len()
            ))
            .into());
        }
        Ok(Self {
            alphabet,
            log_odds,
            frequencies,
        })
    }

    /// Degenerate profile of a single encoded sequence: frequencies are one-hot and log-odds are
    /// taken from the substitution matrix rows.
    pub fn from_sequence(seq: &[u8], matrix: &SubstitutionMatrix<S>) -> Result<Self> {
        if let Some(residue) = matrix.find_foreign(seq) {
            return Err(Error::invalid_input(format!(
                "residue {residue} is outside of the {}-letter alphabet",
                matrix.alphabet()
            ))
            .into());
        }

        let alphabet = *matrix.alphabet();
        let mut log_odds = Vec::with_capacity(seq.len() * alphabet);
        let mut frequencies = vec![S::zero(); seq.len() * alphabet];
        for (pos, residue) in seq.iter().enumerate() {
            log_odds.extend_from_slice(matrix.row(*residue));
            frequencies[pos * alphabet + *residue as usize] = S::one();
        }
        Self::new(alphabet, log_odds, frequencies)
    }

    pub fn alphabet(&self) -> usize {
        self.alphabet
    }

    pub fn len(&self) -> usize {
        self.log_odds.len() / self.alphabet
    }

    pub fn is_empty(&self) -> bool {
        self.log_odds.is_empty()
    }

    #[inline(always)]
    pub fn log_odds(&self, pos: usize) -> &[S] {
        &self.log_odds[pos * self.alphabet..(pos + 1) * self.alphabet]
    }

    #[inline(always)]
    pub fn frequencies(&self, pos: usize) -> &[S] {
        &self.frequencies[pos * self.alphabet..(pos + 1) * self.alphabet]
    }
}
