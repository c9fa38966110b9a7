pub mod agent;
pub mod algos;
pub mod config;
pub mod envs;
pub mod error;
pub mod policy;
pub mod q_table;
pub mod spaces;

pub use agent::Agent;
pub use algos::model_free::{
    q_learning::{QLearning, TrainingReport},
    Transition,
};
pub use config::Hyperparameters;
pub use envs::{reminder::Reminder, Environment};
pub use error::{Result, RlError};
pub use q_table::{QTable, QTableSnapshot};
pub use spaces::{Continous, Discrete, DiscreteSpace};
