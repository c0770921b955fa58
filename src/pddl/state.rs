use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::fluent::FluentState;
use super::predicate::Literal;
use super::Error;

/// Dense state: one flag per state map position, `true` meaning the literal holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedState(Vec<bool>);

impl EncodedState {
    pub fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn flags(&self) -> &[bool] {
        &self.0
    }
}

impl std::ops::Index<usize> for EncodedState {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Wire form, `TTFF...` in state map order.
impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.0.iter().map(|b| if *b { 'T' } else { 'F' }).collect();
        write!(f, "{}", s)
    }
}

impl FromStr for EncodedState {
    type Err = Error;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.chars()
            .enumerate()
            .map(|(idx, c)| match c {
                'T' => Ok(true),
                'F' => Ok(false),
                c => Err(Error::format(idx + 1, format!("Expected 'T' or 'F', got {:?}.", c))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(EncodedState)
    }
}

/// Fixed, ordered literal vocabulary giving each encoded flag its meaning.
#[derive(Debug, Clone)]
pub struct StateMap {
    literals: Vec<Literal>,
    positions: HashMap<Literal, usize>,
}

impl StateMap {
    pub fn new(literals: Vec<Literal>) -> Result<Self, Error> {
        let mut positions = HashMap::with_capacity(literals.len());
        for (idx, literal) in literals.iter().enumerate() {
            if positions.insert(literal.clone(), idx).is_some() {
                return Err(Error::Representation(literal.clone()));
            }
        }
        Ok(Self { literals, positions })
    }

    /// Vocabulary is the true literals followed by the false ones.
    pub fn from_fluents(fluents: &FluentState) -> Result<Self, Error> {
        Self::new(fluents.pos.iter().chain(fluents.neg.iter()).cloned().collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn position(&self, literal: &Literal) -> Option<usize> {
        self.positions.get(literal).copied()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.positions.contains_key(literal)
    }

    /// Flag `i` is set iff `literals[i]` is among the state's true literals.
    /// Literals missing from both lists encode as false.
    pub fn encode(&self, fluents: &FluentState) -> EncodedState {
        let pos: HashSet<&Literal> = fluents.pos.iter().collect();
        EncodedState(self.literals.iter().map(|lit| pos.contains(lit)).collect())
    }

    /// Splits the vocabulary by the state's flags, keeping state map order.
    pub fn decode(&self, state: &EncodedState) -> Result<FluentState, Error> {
        self.check(state)?;
        let mut fluents = FluentState::default();
        for (literal, holds) in self.literals.iter().zip(state.0.iter()) {
            if *holds {
                fluents.pos.push(literal.clone());
            } else {
                fluents.neg.push(literal.clone());
            }
        }
        Ok(fluents)
    }

    pub fn check(&self, state: &EncodedState) -> Result<(), Error> {
        if state.len() != self.len() {
            Err(Error::StateEncoding { expected: self.len(), found: state.len() })
        } else {
            Ok(())
        }
    }
}
