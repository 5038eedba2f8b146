//! Sea-state transition table.

use crate::{SpatialError, SpatialResult};

/// Allowed deviation of a row sum from 1.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Row-stochastic Markov matrix, stored as cumulative rows.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    cumulative: Vec<Vec<f64>>,
}

impl TransitionTable {
    /// Validate `rows` (square, non-negative, each summing to 1) and
    /// precompute cumulative sums.
    pub fn new(rows: &[Vec<f64>]) -> SpatialResult<Self> {
        let n = rows.len();
        if n == 0 || n > u8::MAX as usize + 1 {
            return Err(SpatialError::InvalidTransitions(format!(
                "need between 1 and 256 states, got {n}"
            )));
        }
        let mut cumulative = Vec::with_capacity(n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(SpatialError::InvalidTransitions(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            if row.iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
                return Err(SpatialError::InvalidTransitions(format!(
                    "row {i} has a negative or non-finite probability"
                )));
            }
            let mut acc = 0.0;
            let cum: Vec<f64> = row
                .iter()
                .map(|p| {
                    acc += p;
                    acc
                })
                .collect();
            if (acc - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(SpatialError::InvalidTransitions(format!(
                    "row {i} sums to {acc}"
                )));
            }
            cumulative.push(cum);
        }
        Ok(Self { cumulative })
    }

    #[inline]
    pub fn states(&self) -> usize {
        self.cumulative.len()
    }

    /// Walk the cumulative row of `current` and return the first state whose
    /// cumulative probability strictly exceeds `u`.  When none does (only
    /// possible for `u` at or above the row total) the state is unchanged.
    pub fn next_state(&self, current: u8, u: f64) -> SpatialResult<u8> {
        let row = self
            .cumulative
            .get(current as usize)
            .ok_or(SpatialError::UnknownSeaState { state: current, states: self.states() })?;
        Ok(row.iter().position(|&c| c > u).map_or(current, |k| k as u8))
    }
}
