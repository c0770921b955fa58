use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::utils::build_call_string;
use super::Error;

/// Object identifiers are shared between every literal and action that mentions them.
pub type Object = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Predicate {
    /// `At(thing, airport)`, thing being a cargo or a plane.
    At,
    /// `In(cargo, plane)`.
    In,
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::At => "At",
            Predicate::In => "In",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A ground fluent, e.g. `At(C1, SFO)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub predicate: Predicate,
    pub args: [Object; 2],
}

impl Literal {
    pub fn new(predicate: Predicate, first: impl Into<Object>, second: impl Into<Object>) -> Literal {
        Literal {
            predicate,
            args: [first.into(), second.into()],
        }
    }

    pub fn at(thing: impl Into<Object>, location: impl Into<Object>) -> Literal {
        Literal::new(Predicate::At, thing, location)
    }

    pub fn is_in(cargo: impl Into<Object>, plane: impl Into<Object>) -> Literal {
        Literal::new(Predicate::In, cargo, plane)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", build_call_string(self.predicate.name(), &self.args))
    }
}

impl FromStr for Literal {
    type Err = Error;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        super::parser::parse_literal(text)
    }
}
