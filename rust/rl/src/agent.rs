use crate::algos::model_free::q_learning::{QLearning, TrainingReport};
use crate::config::Hyperparameters;
use crate::envs::{reminder::Reminder, Environment};
use crate::error::Result;
use crate::q_table::{QTable, QTableSnapshot};
use crate::spaces::Continous;
use rand::RngCore;
use tracing::debug;

/// Owns the Q-table for an environment and answers queries against it by
/// state and action name. Names are validated before anything is touched.
#[derive(Debug, Clone)]
pub struct Agent<E: Environment> {
    env: E,
    table: QTable,
    learner: QLearning,
    hyperparameters: Hyperparameters,
}

impl<E: Environment> Agent<E> {
    pub fn new(env: E, hyperparameters: Hyperparameters) -> Result<Self> {
        hyperparameters.validate()?;
        let table = QTable::new(env.states().clone(), env.actions().clone());
        let learner = QLearning::from_hyperparameters(&hyperparameters);

        Ok(Self {
            env,
            table,
            learner,
            hyperparameters,
        })
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn train(&mut self, n_ep: usize, rng: &mut dyn RngCore) -> TrainingReport {
        self.learner.train(&mut self.table, &self.env, n_ep, rng)
    }

    /// Training pass with the configured episode count.
    pub fn warm_up(&mut self, rng: &mut dyn RngCore) -> TrainingReport {
        self.train(self.hyperparameters.episodes, rng)
    }

    /// Best known action for `state`.
    pub fn select(&self, state: &str) -> Result<&str> {
        self.table.best_action(state)
    }

    pub fn reward(&self, state: &str, action: &str) -> Result<Continous> {
        let (s, a) = self.table.pair_index(state, action)?;
        Ok(self.env.reward(s, a))
    }

    /// Folds the reward of an observed (state, action) into the table and
    /// returns the whole table afterwards.
    pub fn update(&mut self, state: &str, action: &str) -> Result<QTableSnapshot> {
        let (s, a) = self.table.pair_index(state, action)?;
        let r = self.env.reward(s, a);
        self.learner.reward_update(&mut self.table, s, a, r);

        debug!(state, action, reward = r, q = self.table.q(s, a), "Q-table updated");

        Ok(self.table.snapshot())
    }
}

impl Agent<Reminder> {
    pub fn reminder(hyperparameters: Hyperparameters) -> Result<Self> {
        Self::new(Reminder::new()?, hyperparameters)
    }
}
