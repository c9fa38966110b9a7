pub mod reminder;

use crate::spaces::{Continous, Discrete, DiscreteSpace};
use rand::RngCore;

/// Finite environment: named states and actions, a reward for every pair and
/// a way to draw where the agent starts and where it lands next.
pub trait Environment {
    fn states(&self) -> &DiscreteSpace;

    fn actions(&self) -> &DiscreteSpace;

    fn reward(&self, s: Discrete, a: Discrete) -> Continous;

    fn initial_state(&self, rng: &mut dyn RngCore) -> Discrete {
        self.states().sample(rng)
    }

    fn next_state(&self, rng: &mut dyn RngCore, s: Discrete, a: Discrete) -> Discrete;
}
