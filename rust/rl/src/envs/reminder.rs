use super::Environment;
use crate::error::Result;
use crate::spaces::{Continous, Discrete, DiscreteSpace};
use rand::RngCore;

pub const MISSED: &str = "Missed";
pub const LATE: &str = "Late";
pub const ON_TIME: &str = "On Time";

pub const REMIND_EARLY: &str = "Remind Early";
pub const REMIND_ON_TIME: &str = "Remind On Time";
pub const REMIND_LATE: &str = "Remind Late";

pub const STATES: [&str; 3] = [MISSED, LATE, ON_TIME];
pub const ACTIONS: [&str; 3] = [REMIND_EARLY, REMIND_ON_TIME, REMIND_LATE];

/// Punctuality of a reminded person against the reminder timing chosen for them.
///
/// Being on time pays best whatever the reminder was. A missed dose is
/// remedied by reminding early, a late one by reminding on time; any other
/// pairing is penalised.
pub fn reward(state: &str, action: &str) -> Continous {
    match (state, action) {
        (MISSED, REMIND_EARLY) | (LATE, REMIND_ON_TIME) => 1.,
        (ON_TIME, _) => 2.,
        _ => -1.,
    }
}

/// The next state is drawn uniformly and independently of the pair just
/// taken, so there are no real dynamics to learn beyond the reward.
#[derive(Debug, Clone)]
pub struct Reminder {
    states: DiscreteSpace,
    actions: DiscreteSpace,
}

impl Reminder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            states: DiscreteSpace::new(STATES)?,
            actions: DiscreteSpace::new(ACTIONS)?,
        })
    }
}

impl Environment for Reminder {
    fn states(&self) -> &DiscreteSpace {
        &self.states
    }

    fn actions(&self) -> &DiscreteSpace {
        &self.actions
    }

    fn reward(&self, s: Discrete, a: Discrete) -> Continous {
        reward(&self.states.names()[s], &self.actions.names()[a])
    }

    fn next_state(&self, rng: &mut dyn RngCore, _s: Discrete, _a: Discrete) -> Discrete {
        self.states.sample(rng)
    }
}
