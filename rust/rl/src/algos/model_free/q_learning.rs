use super::Transition;
use crate::config::Hyperparameters;
use crate::envs::Environment;
use crate::policy::{EpsilonGreedy, Policy};
use crate::q_table::QTable;
use crate::spaces::{Continous, Discrete};
use rand::RngCore;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrainingReport {
    pub episodes: usize,
    pub explored: usize,
    pub total_reward: Continous,
}

impl TrainingReport {
    pub fn mean_reward(&self) -> Continous {
        if self.episodes == 0 {
            0.
        } else {
            self.total_reward / self.episodes as Continous
        }
    }
}

/// One-step Q-learning with an epsilon-greedy behaviour policy.
/// Ref: Sutton & Barto 2018, section 6.5.
#[derive(Debug, Clone, Copy)]
pub struct QLearning {
    alpha: Continous,
    gamma: Continous,
    behaviour: EpsilonGreedy,
}

impl QLearning {
    pub fn new(alpha: Continous, gamma: Continous, epsilon: Continous) -> Self {
        Self {
            alpha,
            gamma,
            behaviour: EpsilonGreedy::new(epsilon),
        }
    }

    pub fn from_hyperparameters(hp: &Hyperparameters) -> Self {
        Self::new(hp.alpha, hp.gamma, hp.epsilon)
    }

    /// Runs `n_ep` single-step episodes against `env`. Each episode draws a
    /// start state, an action from the behaviour policy, then a successor from
    /// the environment, and applies [`QLearning::td_update`].
    pub fn train<E: Environment + ?Sized>(
        &self,
        q: &mut QTable,
        env: &E,
        n_ep: usize,
        rng: &mut dyn RngCore,
    ) -> TrainingReport {
        let mut report = TrainingReport::default();

        for _ in 0..n_ep {
            let s = env.initial_state(rng);
            let sel = self.behaviour.select(q, s, rng);
            let r = env.reward(s, sel.action);
            let next_s = env.next_state(rng, s, sel.action);

            self.td_update(
                q,
                &Transition {
                    s,
                    a: sel.action,
                    r,
                    next_s,
                },
            );

            report.episodes += 1;
            report.explored += sel.explored as usize;
            report.total_reward += r;
        }

        debug!(
            episodes = report.episodes,
            explored = report.explored,
            mean_reward = report.mean_reward(),
            "Training pass finished"
        );

        report
    }

    /// Q[s,a] <- (1 - alpha) Q[s,a] + alpha (r + gamma max_a' Q[s',a'])
    pub fn td_update(&self, q: &mut QTable, t: &Transition) {
        let target = t.r + self.gamma * q.max(t.next_s);
        let v = (1. - self.alpha) * q.q(t.s, t.a) + self.alpha * target;
        q.set_q(t.s, t.a, v);
    }

    /// Q[s,a] <- (1 - alpha) Q[s,a] + alpha r
    ///
    /// Used for outcomes reported from outside; there is no successor to
    /// bootstrap from.
    pub fn reward_update(&self, q: &mut QTable, s: Discrete, a: Discrete, r: Continous) {
        let v = (1. - self.alpha) * q.q(s, a) + self.alpha * r;
        q.set_q(s, a, v);
    }
}
