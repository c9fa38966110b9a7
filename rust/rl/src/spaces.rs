use crate::error::{Result, RlError};
use rand::{Rng, RngCore};
use std::collections::HashMap;

pub type Discrete = usize;
pub type Continous = f64;

/// Finite set of named categories. Indices follow declaration order and
/// the name -> index map is built once, here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscreteSpace {
    names: Vec<String>,
    index: HashMap<String, Discrete>,
}

impl DiscreteSpace {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        if names.is_empty() {
            return Err(RlError::EmptySpace);
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(RlError::DuplicateName(name.clone()));
            }
        }

        Ok(Self { names, index })
    }

    pub fn n(&self) -> usize {
        self.names.len()
    }

    pub fn index_of(&self, name: &str) -> Option<Discrete> {
        self.index.get(name).copied()
    }

    pub fn name(&self, i: Discrete) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Uniform draw over the space.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Discrete {
        rng.gen_range(0..self.n())
    }
}
