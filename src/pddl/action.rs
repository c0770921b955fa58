use std::fmt;

use super::predicate::{Literal, Object};
use super::utils::build_call_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    /// `Load(cargo, plane, airport)`
    Load,
    /// `Unload(cargo, plane, airport)`
    Unload,
    /// `Fly(plane, from, to)`
    Fly,
}

impl Schema {
    pub fn name(&self) -> &'static str {
        match self {
            Schema::Load => "Load",
            Schema::Unload => "Unload",
            Schema::Fly => "Fly",
        }
    }
}

/// A grounded STRIPS operator. No variables are left in any of its literal sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub schema: Schema,
    pub args: [Object; 3],
    pub precond_pos: Vec<Literal>,
    pub precond_neg: Vec<Literal>,
    pub effect_add: Vec<Literal>,
    pub effect_rem: Vec<Literal>,
}

impl Action {
    pub fn name(&self) -> String {
        build_call_string(self.schema.name(), &self.args)
    }

    pub fn effects(&self) -> impl Iterator<Item = &Literal> {
        self.effect_add.iter().chain(self.effect_rem.iter())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
