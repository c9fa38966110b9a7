use crate::error::{Result, RlError};
use crate::spaces::{Discrete, DiscreteSpace};
use itertools::Itertools;
use ndarray::Array2;
use std::fmt;

/// Dense action-value table, one row per state.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    states: DiscreteSpace,
    actions: DiscreteSpace,
    values: Array2<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QTableSnapshot {
    pub states: Vec<String>,
    pub actions: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl QTable {
    pub fn new(states: DiscreteSpace, actions: DiscreteSpace) -> Self {
        let values = Array2::zeros((states.n(), actions.n()));

        Self {
            states,
            actions,
            values,
        }
    }

    /// Builds a table from row-major values.
    pub fn from_values(
        states: DiscreteSpace,
        actions: DiscreteSpace,
        values: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let (rows, cols) = (states.n(), actions.n());
        if values.len() != rows || values.iter().any(|r| r.len() != cols) {
            return Err(RlError::ShapeMismatch {
                rows,
                cols,
                len: values.iter().map(Vec::len).sum(),
            });
        }

        let flat = values.into_iter().flatten().collect::<Vec<_>>();
        let len = flat.len();
        let values = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|_| RlError::ShapeMismatch { rows, cols, len })?;

        Ok(Self {
            states,
            actions,
            values,
        })
    }

    pub fn states(&self) -> &DiscreteSpace {
        &self.states
    }

    pub fn actions(&self) -> &DiscreteSpace {
        &self.actions
    }

    pub fn state_index(&self, state: &str) -> Result<Discrete> {
        self.states
            .index_of(state)
            .ok_or_else(|| RlError::InvalidState(state.to_string()))
    }

    pub fn pair_index(&self, state: &str, action: &str) -> Result<(Discrete, Discrete)> {
        match (self.states.index_of(state), self.actions.index_of(action)) {
            (Some(s), Some(a)) => Ok((s, a)),
            _ => Err(RlError::InvalidStateOrAction {
                state: state.to_string(),
                action: action.to_string(),
            }),
        }
    }

    pub fn get(&self, state: &str, action: &str) -> Result<f64> {
        let (s, a) = self.pair_index(state, action)?;
        Ok(self.q(s, a))
    }

    pub fn set(&mut self, state: &str, action: &str, value: f64) -> Result<()> {
        let (s, a) = self.pair_index(state, action)?;
        self.set_q(s, a, value);
        Ok(())
    }

    /// Greedy action name for `state`.
    pub fn best_action(&self, state: &str) -> Result<&str> {
        let s = self.state_index(state)?;
        Ok(self.actions.names()[self.argmax(s)].as_str())
    }

    pub fn q(&self, s: Discrete, a: Discrete) -> f64 {
        self.values[[s, a]]
    }

    pub fn set_q(&mut self, s: Discrete, a: Discrete, value: f64) {
        self.values[[s, a]] = value;
    }

    /// Index of the largest value in row `s`. Ties go to the lowest index.
    pub fn argmax(&self, s: Discrete) -> Discrete {
        self.values
            .row(s)
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (a, &q)| {
                if q > best.1 {
                    (a, q)
                } else {
                    best
                }
            })
            .0
    }

    pub fn max(&self, s: Discrete) -> f64 {
        self.values
            .row(s)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    pub fn snapshot(&self) -> QTableSnapshot {
        QTableSnapshot {
            states: self.states.names().to_vec(),
            actions: self.actions.names().to_vec(),
            values: self.to_vec(),
        }
    }
}

impl fmt::Display for QTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} | {}", "state", self.actions.names().iter().join(" | "))?;
        for (name, row) in self.states.names().iter().zip(self.values.rows()) {
            writeln!(
                f,
                "{:<10} | {}",
                name,
                row.iter().map(|q| format!("{q:8.4}")).join(" | ")
            )?;
        }

        Ok(())
    }
}
