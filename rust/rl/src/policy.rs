use crate::q_table::QTable;
use crate::spaces::Discrete;
use rand::{Rng, RngCore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub action: Discrete,
    pub explored: bool,
}

pub trait Policy {
    fn select(&self, q: &QTable, s: Discrete, rng: &mut dyn RngCore) -> Selection;
}

/// Always the best tabulated action.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn select(&self, q: &QTable, s: Discrete, _rng: &mut dyn RngCore) -> Selection {
        Selection {
            action: q.argmax(s),
            explored: false,
        }
    }
}

/// Uniform random action with probability `epsilon`, greedy otherwise.
/// The rate is fixed for the life of the policy.
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Policy for EpsilonGreedy {
    fn select(&self, q: &QTable, s: Discrete, rng: &mut dyn RngCore) -> Selection {
        if rng.gen::<f64>() < self.epsilon {
            Selection {
                action: q.actions().sample(rng),
                explored: true,
            }
        } else {
            Greedy.select(q, s, rng)
        }
    }
}
