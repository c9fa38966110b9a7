use crate::error::{Result, RlError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALPHA: f64 = 0.1;
pub const DEFAULT_GAMMA: f64 = 0.9;
pub const DEFAULT_EPSILON: f64 = 0.2;
pub const DEFAULT_EPISODES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparameters {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Exploration rate used while training.
    pub epsilon: f64,
    /// Episodes run by the startup training pass.
    pub episodes: usize,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            gamma: DEFAULT_GAMMA,
            epsilon: DEFAULT_EPSILON,
            episodes: DEFAULT_EPISODES,
        }
    }
}

impl Hyperparameters {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64, episodes: usize) -> Result<Self> {
        let hp = Self {
            alpha,
            gamma,
            epsilon,
            episodes,
        };
        hp.validate()?;

        Ok(hp)
    }

    /// Rates must lie in [0, 1] for updates to stay convex combinations.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RlError::InvalidHyperparameter { name, value });
            }
        }

        Ok(())
    }
}
