use std::fmt;

use serde::Deserialize;

use super::graph::RelaxedPlanningGraph;
use super::problem::AirCargoProblem;
use super::search::Node;
use super::state::EncodedState;
use super::Error;

/// Planning-graph collaborator: the sum, over the goal literals, of the first
/// graph level each appears at.
pub trait LevelSum {
    fn level_sum(&self, problem: &AirCargoProblem, state: &EncodedState) -> Result<u32, Error>;
}

impl AirCargoProblem {
    /// Not a real distance estimate, only a uniform baseline.
    pub fn h_1(&self, _node: &Node<EncodedState>) -> u32 {
        1
    }

    /// Goal literals that do not hold yet. With preconditions and delete effects
    /// relaxed away every one of them still needs its own action, so this never
    /// overestimates.
    pub fn h_ignore_preconditions(&self, node: &Node<EncodedState>) -> Result<u32, Error> {
        self.state_map().check(node.state)?;
        let count = self.goal().iter()
            .filter_map(|g| self.state_map().position(g))
            .filter(|idx| !node.state[*idx])
            .count();
        Ok(count as u32)
    }

    pub fn h_pg_levelsum<G: LevelSum + ?Sized>(&self, node: &Node<EncodedState>, graph: &G) -> Result<u32, Error> {
        graph.level_sum(self, node.state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// `h_1`
    Constant,
    /// `h_ignore_preconditions`
    #[default]
    IgnorePreconditions,
    /// `h_pg_levelsum` over a relaxed planning graph
    LevelSum,
}

impl Heuristic {
    pub fn evaluate(&self, problem: &AirCargoProblem, node: &Node<EncodedState>) -> Result<u32, Error> {
        match self {
            Heuristic::Constant => Ok(problem.h_1(node)),
            Heuristic::IgnorePreconditions => problem.h_ignore_preconditions(node),
            Heuristic::LevelSum => problem.h_pg_levelsum(node, &RelaxedPlanningGraph::default()),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Heuristic::Constant => write!(f, "h_1"),
            Heuristic::IgnorePreconditions => write!(f, "h_ignore_preconditions"),
            Heuristic::LevelSum => write!(f, "h_pg_levelsum"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Heuristic, LevelSum};
    use crate::pddl::instances::air_cargo_p1;
    use crate::pddl::search::Node;
    use crate::pddl::{AirCargoProblem, EncodedState, Error};

    struct Fixed(u32);

    impl LevelSum for Fixed {
        fn level_sum(&self, _problem: &AirCargoProblem, _state: &EncodedState) -> Result<u32, Error> {
            Ok(self.0)
        }
    }

    fn run(p: &AirCargoProblem, names: &[&str]) -> Vec<EncodedState> {
        let mut states = vec![p.initial_state().clone()];
        for name in names {
            let action = p.find_action(name).unwrap();
            let next = p.result(states.last().unwrap(), action).unwrap();
            states.push(next);
        }
        states
    }

    const PLAN: [&str; 6] = ["Load(C1, P1, SFO)", "Fly(P1, SFO, JFK)", "Unload(C1, P1, JFK)", "Load(C2, P2, JFK)", "Fly(P2, JFK, SFO)", "Unload(C2, P2, SFO)"];

    #[test]
    fn test_h_1() {
        let p = air_cargo_p1();
        for state in run(&p, &PLAN) {
            assert_eq!(p.h_1(&Node::new(&state, 0)), 1);
        }
    }

    #[test]
    fn test_ignore_preconditions_along_plan() {
        let p = air_cargo_p1();
        let values: Vec<u32> = run(&p, &PLAN).iter().map(|s| p.h_ignore_preconditions(&Node::new(s, 0)).unwrap()).collect();
        assert_eq!(values, vec![2, 2, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_ignore_preconditions_length_mismatch() {
        let p = air_cargo_p1();
        let short = EncodedState::new(vec![false]);
        assert!(matches!(p.h_ignore_preconditions(&Node::new(&short, 0)), Err(Error::StateEncoding { .. })));
    }

    #[test]
    fn test_levelsum_delegates() {
        let p = air_cargo_p1();
        assert_eq!(p.h_pg_levelsum(&Node::new(p.initial_state(), 0), &Fixed(7)).unwrap(), 7);
    }

    #[test]
    fn test_selector() {
        let p = air_cargo_p1();
        let node = Node::new(p.initial_state(), 0);
        assert_eq!(Heuristic::Constant.evaluate(&p, &node).unwrap(), 1);
        assert_eq!(Heuristic::IgnorePreconditions.evaluate(&p, &node).unwrap(), 2);
        assert_eq!(Heuristic::LevelSum.evaluate(&p, &node).unwrap(), 4);
    }
}
