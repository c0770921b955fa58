use tracing::{trace, warn};

use super::heuristic::LevelSum;
use super::predicate::Literal;
use super::problem::AirCargoProblem;
use super::state::EncodedState;
use super::Error;

/// Planning graph without delete effects or mutexes.
///
/// Each state map literal carries the first level it can be true at and the first
/// level it can be false at. An action enters the graph at the first level where all
/// of its positive preconditions can be true and all negative ones can be false; its
/// add effects can be true and its delete effects false one level later. Levels only
/// ever grow, so expansion stops once the goals are in or nothing new appears.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedPlanningGraph {
    /// Stop expanding after this many levels, `None` means until the graph levels off.
    pub max_levels: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralLevels {
    pub pos: Vec<Option<u32>>,
    pub neg: Vec<Option<u32>>,
    pub depth: u32,
}

impl RelaxedPlanningGraph {
    pub fn expand(&self, problem: &AirCargoProblem, state: &EncodedState) -> Result<LiteralLevels, Error> {
        let map = problem.state_map();
        map.check(state)?;
        let position = |l: &Literal| map.position(l).ok_or_else(|| Error::Representation(l.clone()));
        let mut levels = LiteralLevels {
            pos: state.flags().iter().map(|b| if *b { Some(0) } else { None }).collect(),
            neg: state.flags().iter().map(|b| if *b { None } else { Some(0) }).collect(),
            depth: 0,
        };
        let goal_positions = problem.goal().iter().map(|g| map.position(g)).collect::<Vec<_>>();
        let goals_in = |levels: &LiteralLevels| goal_positions.iter().all(|g| matches!(g, Some(idx) if levels.pos[*idx].is_some()));

        while !goals_in(&levels) && self.max_levels.map_or(true, |max| levels.depth < max) {
            let mut added = Vec::new();
            let mut deleted = Vec::new();
            for action in problem.actions_list() {
                let mut enabled = true;
                for l in &action.precond_pos {
                    enabled &= levels.pos[position(l)?].is_some();
                }
                for l in &action.precond_neg {
                    enabled &= levels.neg[position(l)?].is_some();
                }
                if enabled {
                    for l in &action.effect_add {
                        added.push(position(l)?);
                    }
                    for l in &action.effect_rem {
                        deleted.push(position(l)?);
                    }
                }
            }
            let next = levels.depth + 1;
            let mut changed = false;
            for idx in added {
                if levels.pos[idx].is_none() {
                    levels.pos[idx] = Some(next);
                    changed = true;
                }
            }
            for idx in deleted {
                if levels.neg[idx].is_none() {
                    levels.neg[idx] = Some(next);
                    changed = true;
                }
            }
            if !changed {
                trace!(depth = levels.depth, "planning graph levelled off");
                break;
            }
            levels.depth = next;
        }
        Ok(levels)
    }
}

impl LevelSum for RelaxedPlanningGraph {
    /// A goal that never shows up in the graph saturates the sum at `u32::MAX`.
    fn level_sum(&self, problem: &AirCargoProblem, state: &EncodedState) -> Result<u32, Error> {
        let levels = self.expand(problem, state)?;
        let mut sum: u32 = 0;
        for goal in problem.goal() {
            match problem.state_map().position(goal).and_then(|idx| levels.pos[idx]) {
                Some(level) => sum = sum.saturating_add(level),
                None => {
                    warn!(goal = %goal, depth = levels.depth, "goal literal unreachable in planning graph");
                    sum = u32::MAX;
                }
            }
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::RelaxedPlanningGraph;
    use crate::literals;
    use crate::pddl::heuristic::LevelSum;
    use crate::pddl::instances::{air_cargo_p1, air_cargo_p3};
    use crate::pddl::{AirCargoProblem, FluentState, Literal, Objects};

    #[test]
    fn test_levels() {
        let p = air_cargo_p1();
        let levels = RelaxedPlanningGraph::default().expand(&p, p.initial_state()).unwrap();
        let map = p.state_map();
        let pos = |l: Literal| levels.pos[map.position(&l).unwrap()];
        assert_eq!(pos(Literal::at("C1", "SFO")), Some(0));
        assert_eq!(pos(Literal::is_in("C1", "P1")), Some(1));
        assert_eq!(pos(Literal::at("P1", "JFK")), Some(1));
        assert_eq!(pos(Literal::at("C1", "JFK")), Some(2));
        assert_eq!(levels.depth, 2);
    }

    #[test]
    fn test_level_sum() {
        let p = air_cargo_p1();
        let graph = RelaxedPlanningGraph::default();
        assert_eq!(graph.level_sum(&p, p.initial_state()).unwrap(), 4);
        let mut state = p.initial_state().clone();
        for name in ["Load(C1, P1, SFO)", "Fly(P1, SFO, JFK)", "Unload(C1, P1, JFK)", "Load(C2, P2, JFK)", "Fly(P2, JFK, SFO)", "Unload(C2, P2, SFO)"] {
            state = p.result(&state, p.find_action(name).unwrap()).unwrap();
        }
        assert_eq!(graph.level_sum(&p, &state).unwrap(), 0);
    }

    #[test]
    fn test_level_sum_p3() {
        let p = air_cargo_p3();
        // C1 and C2 sit next to a plane, C3 and C4 need one to fly in first
        assert_eq!(RelaxedPlanningGraph::default().level_sum(&p, p.initial_state()).unwrap(), 2 + 2 + 3 + 3);
    }

    #[test]
    fn test_unreachable() {
        let objects = Objects::new(&["C1"], &["P1"], &["SFO"]).unwrap();
        let initial = FluentState::new(literals![At("C1", "SFO")], literals![At("P1", "SFO"), In("C1", "P1")]);
        let p = AirCargoProblem::new(objects, initial, literals![In("C1", "P1")]).unwrap();
        assert_eq!(RelaxedPlanningGraph::default().level_sum(&p, p.initial_state()).unwrap(), u32::MAX);
    }

    #[test]
    fn test_max_levels() {
        let p = air_cargo_p1();
        let shallow = RelaxedPlanningGraph { max_levels: Some(1) };
        let levels = shallow.expand(&p, p.initial_state()).unwrap();
        assert_eq!(levels.depth, 1);
        assert_eq!(shallow.level_sum(&p, p.initial_state()).unwrap(), u32::MAX);
    }
}
