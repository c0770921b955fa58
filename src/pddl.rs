pub mod action;
pub mod domain;
pub mod fluent;
pub mod graph;
pub mod heuristic;
pub mod instances;
pub mod predicate;
pub mod problem;
pub mod search;
pub mod state;

mod parser;
mod utils;

pub use action::{Action, Schema};
pub use domain::Objects;
pub use fluent::FluentState;
pub use predicate::{Literal, Object, Predicate};
pub use problem::AirCargoProblem;
pub use state::{EncodedState, StateMap};

/// Everything that can go wrong while building or querying a planning problem.
/// An unsatisfied goal is not an error, `goal_test` just returns `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identifier or literal text that does not fit the `Predicate(arg1, arg2)` form.
    /// `col` is 1-based and only set when the error points into a piece of text.
    #[error("format error{}: {message}", at_column(.col))]
    Format { col: Option<usize>, message: String },

    /// An encoded state whose length does not match the state map.
    #[error("state has {found} flags but the state map holds {expected} literals")]
    StateEncoding { expected: usize, found: usize },

    /// A literal that has no position in the state map.
    #[error("literal {0} can not be represented in the state map")]
    Representation(Literal),

    /// A plan step whose preconditions do not hold.
    #[error("action {action} is not applicable at step {step}")]
    NotApplicable { step: usize, action: String },

    #[error("unable to read problem file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid problem file: {0}")]
    Config(#[from] toml::de::Error),
}

fn at_column(col: &Option<usize>) -> String {
    col.map(|c| format!(" at column {}", c)).unwrap_or_default()
}

impl Error {
    pub(crate) fn format(col: usize, message: impl Into<String>) -> Self {
        Self::Format { col: Some(col), message: message.into() }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Format { col: None, message: message.into() }
    }
}
