pub mod q_learning;

use crate::spaces::{Continous, Discrete};

/// One step of experience, consumed by a single update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub s: Discrete,
    pub a: Discrete,
    pub r: Continous,
    pub next_s: Discrete,
}
