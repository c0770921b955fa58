use std::{cmp::Reverse, collections::HashMap, hash::Hash};

use priority_queue::PriorityQueue;
use tracing::{debug, info};

use super::action::Action;
use super::problem::AirCargoProblem;
use super::state::EncodedState;
use super::Error;

/// What a forward search needs from a problem formulation.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action;

    fn initial_state(&self) -> &Self::State;
    fn actions<'a>(&'a self, state: &Self::State) -> Result<Vec<&'a Self::Action>, Error>;
    fn result(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State, Error>;
    fn goal_test(&self, state: &Self::State) -> Result<bool, Error>;

    fn step_cost(&self, _action: &Self::Action) -> u32 {
        1
    }
}

impl SearchProblem for AirCargoProblem {
    type State = EncodedState;
    type Action = Action;

    fn initial_state(&self) -> &EncodedState {
        AirCargoProblem::initial_state(self)
    }

    fn actions<'a>(&'a self, state: &EncodedState) -> Result<Vec<&'a Action>, Error> {
        AirCargoProblem::actions(self, state)
    }

    fn result(&self, state: &EncodedState, action: &Action) -> Result<EncodedState, Error> {
        AirCargoProblem::result(self, state, action)
    }

    fn goal_test(&self, state: &EncodedState) -> Result<bool, Error> {
        AirCargoProblem::goal_test(self, state)
    }
}

/// The view of a search node handed to heuristics.
#[derive(Debug, Clone, Copy)]
pub struct Node<'s, S> {
    pub state: &'s S,
    pub path_cost: u32,
}

impl<'s, S> Node<'s, S> {
    pub fn new(state: &'s S, path_cost: u32) -> Self {
        Self { state, path_cost }
    }
}

#[derive(Debug)]
pub struct Solution<'a, A> {
    pub plan: Vec<&'a A>,
    pub cost: u32,
    pub expansions: usize,
    pub goal_tests: usize,
    pub new_nodes: usize,
}

fn reconstruct_path<'a, S, A>(came_from: &HashMap<S, (S, &'a A)>, goal: &S) -> Vec<&'a A> where S: Eq + Hash {
    let mut total_path = Vec::new();
    let mut current = goal;
    while let Some((parent, action)) = came_from.get(current) {
        total_path.push(*action);
        current = parent;
    }
    total_path.reverse();
    total_path
}

/// A* over the problem's state graph. Ties on `f` are broken first come, first served
/// so the same problem always yields the same plan. `Ok(None)` means the reachable
/// state space holds no goal.
pub fn astar<'a, P, F>(problem: &'a P, heuristic: F) -> Result<Option<Solution<'a, P::Action>>, Error>
where P: SearchProblem, F: Fn(&Node<P::State>) -> Result<u32, Error> {
    let start = problem.initial_state().clone();
    let mut open_set = PriorityQueue::new();
    let mut came_from: HashMap<P::State, (P::State, &'a P::Action)> = HashMap::new();
    let mut g_score: HashMap<P::State, u32> = HashMap::new();
    let mut sequence: u64 = 0;
    let mut expansions = 0;
    let mut goal_tests = 0;
    let mut new_nodes = 1;

    let h = heuristic(&Node::new(&start, 0))?;
    g_score.insert(start.clone(), 0);
    open_set.push(start, Reverse((h, sequence)));

    while let Some((current, _)) = open_set.pop() {
        let current_g = g_score.get(&current).copied().unwrap_or(0);
        goal_tests += 1;
        if problem.goal_test(&current)? {
            let plan = reconstruct_path(&came_from, &current);
            info!(steps = plan.len(), cost = current_g, expansions, goal_tests, new_nodes, "plan found");
            return Ok(Some(Solution { plan, cost: current_g, expansions, goal_tests, new_nodes }));
        }
        expansions += 1;
        for action in problem.actions(&current)? {
            let neighbor = problem.result(&current, action)?;
            let tentative_g = current_g.saturating_add(problem.step_cost(action));
            if g_score.get(&neighbor).map_or(true, |known| tentative_g < *known) {
                let h = heuristic(&Node::new(&neighbor, tentative_g))?;
                sequence += 1;
                new_nodes += 1;
                g_score.insert(neighbor.clone(), tentative_g);
                came_from.insert(neighbor.clone(), (current.clone(), action));
                open_set.push(neighbor, Reverse((tentative_g.saturating_add(h), sequence)));
            }
        }
        if expansions % 1000 == 0 {
            debug!(expansions, open = open_set.len(), "search progress");
        }
    }
    info!(expansions, goal_tests, new_nodes, "search space exhausted without reaching the goal");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{astar, SearchProblem};
    use crate::literals;
    use crate::pddl::instances::{air_cargo_p1, air_cargo_p2};
    use crate::pddl::{AirCargoProblem, Error, FluentState, Objects};

    #[test]
    fn test_p1_optimal_plan() {
        let p = air_cargo_p1();
        let solution = astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().unwrap();
        assert_eq!(solution.plan.len(), 6);
        assert_eq!(solution.cost, 6);
        let end = p.execute(solution.plan.iter().copied()).unwrap();
        assert!(p.goal_test(&end).unwrap());
    }

    #[test]
    fn test_heuristics_agree_on_cost() {
        let p = air_cargo_p1();
        let constant = astar(&p, |n| Ok(p.h_1(n))).unwrap().unwrap();
        let ignore = astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().unwrap();
        assert_eq!(constant.cost, ignore.cost);
        assert!(ignore.expansions <= constant.expansions);
    }

    #[test]
    fn test_deterministic() {
        let p = air_cargo_p1();
        let first: Vec<String> = astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().unwrap().plan.iter().map(|a| a.name()).collect();
        let second: Vec<String> = astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().unwrap().plan.iter().map(|a| a.name()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_p2() {
        let p = air_cargo_p2();
        let solution = astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().unwrap();
        // C2 starts where it has to end, the other two cargos swap
        assert_eq!(solution.cost, 6);
        assert!(p.goal_test(&p.execute(solution.plan.iter().copied()).unwrap()).unwrap());
    }

    #[test]
    fn test_already_at_goal() {
        let p = air_cargo_p1();
        let goal_reached = AirCargoProblem::new(p.objects().clone(), p.decode(p.initial_state()).unwrap(), literals![At("C1", "SFO")]).unwrap();
        let solution = astar(&goal_reached, |_| Ok(0)).unwrap().unwrap();
        assert!(solution.plan.is_empty());
        assert_eq!(solution.expansions, 0);
    }

    #[test]
    fn test_unreachable_goal() {
        // the only plane is parked away from the only cargo and can never fly
        let objects = Objects::new(&["C1"], &["P1"], &["SFO"]).unwrap();
        let initial = FluentState::new(literals![At("C1", "SFO")], literals![At("P1", "SFO"), In("C1", "P1")]);
        let p = AirCargoProblem::new(objects, initial, literals![In("C1", "P1")]).unwrap();
        assert!(astar(&p, |n| p.h_ignore_preconditions(n)).unwrap().is_none());
    }

    #[test]
    fn test_heuristic_errors_propagate() {
        let p = air_cargo_p1();
        let failed = astar(&p, |_| Err(Error::StateEncoding { expected: 1, found: 0 }));
        assert!(matches!(failed, Err(Error::StateEncoding { .. })));
        assert_eq!(SearchProblem::step_cost(&p, &p.actions_list()[0]), 1);
    }
}
