use std::collections::HashSet;

use tracing::{debug, trace};

use super::action::Action;
use super::domain::Objects;
use super::fluent::FluentState;
use super::predicate::Literal;
use super::state::{EncodedState, StateMap};
use super::Error;

/// Air cargo planning problem as a deterministic transition model.
///
/// Actions are grounded once in [`AirCargoProblem::new`] and never recomputed,
/// so one problem can be shared read-only between searches.
#[derive(Debug, Clone)]
pub struct AirCargoProblem {
    objects: Objects,
    state_map: StateMap,
    actions_list: Vec<Action>,
    initial_state: EncodedState,
    goal: Vec<Literal>,
}

impl AirCargoProblem {
    /// The state map is `initial.pos` followed by `initial.neg`; it fixes the meaning
    /// of every encoded state of this problem.
    pub fn new(objects: Objects, initial: FluentState, goal: Vec<Literal>) -> Result<AirCargoProblem, Error> {
        let state_map = StateMap::from_fluents(&initial)?;
        let initial_state = state_map.encode(&initial);
        let actions_list = objects.ground();
        debug!(literals = state_map.len(), actions = actions_list.len(), goals = goal.len(), "built air cargo problem");
        Ok(AirCargoProblem { objects, state_map, actions_list, initial_state, goal })
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    pub fn state_map(&self) -> &StateMap {
        &self.state_map
    }

    pub fn actions_list(&self) -> &[Action] {
        &self.actions_list
    }

    pub fn initial_state(&self) -> &EncodedState {
        &self.initial_state
    }

    pub fn goal(&self) -> &[Literal] {
        &self.goal
    }

    pub fn decode(&self, state: &EncodedState) -> Result<FluentState, Error> {
        self.state_map.decode(state)
    }

    /// Actions whose positive preconditions all hold and whose negative
    /// preconditions are all false in `state`, in grounding order.
    pub fn actions(&self, state: &EncodedState) -> Result<Vec<&Action>, Error> {
        let fluents = self.decode(state)?;
        let pos: HashSet<&Literal> = fluents.pos.iter().collect();
        let neg: HashSet<&Literal> = fluents.neg.iter().collect();
        let possible: Vec<&Action> = self.actions_list.iter()
            .filter(|a| a.precond_neg.iter().all(|l| neg.contains(l)) && a.precond_pos.iter().all(|l| pos.contains(l)))
            .collect();
        trace!(state = %state, applicable = possible.len(), "expanded state");
        Ok(possible)
    }

    /// Applies `action` without checking its preconditions: deleted literals move to the
    /// false set, added ones to the true set.
    pub fn result(&self, state: &EncodedState, action: &Action) -> Result<EncodedState, Error> {
        if let Some(missing) = action.effects().find(|l| !self.state_map.contains(l)) {
            return Err(Error::Representation(missing.clone()));
        }
        let fluents = self.decode(state)?;
        let mut pos: Vec<Literal> = fluents.pos.into_iter().filter(|l| !action.effect_rem.contains(l)).collect();
        pos.extend(action.effect_add.iter().cloned());
        let mut neg: Vec<Literal> = fluents.neg.into_iter().filter(|l| !action.effect_add.contains(l)).collect();
        neg.extend(action.effect_rem.iter().cloned());
        Ok(self.state_map.encode(&FluentState::new(pos, neg)))
    }

    /// Goals are conjunctions of positive literals, so the test is a subset check.
    pub fn goal_test(&self, state: &EncodedState) -> Result<bool, Error> {
        self.state_map.check(state)?;
        Ok(self.goal.iter().all(|g| match self.state_map.position(g) {
            Some(idx) => state[idx],
            None => false,
        }))
    }

    /// Runs `plan` from the initial state, refusing any step whose preconditions fail.
    pub fn execute<'a, I>(&self, plan: I) -> Result<EncodedState, Error> where I: IntoIterator<Item = &'a Action> {
        let mut state = self.initial_state.clone();
        for (step, action) in plan.into_iter().enumerate() {
            if !self.is_applicable(&state, action)? {
                return Err(Error::NotApplicable { step, action: action.name() });
            }
            state = self.result(&state, action)?;
        }
        Ok(state)
    }

    pub fn is_applicable(&self, state: &EncodedState, action: &Action) -> Result<bool, Error> {
        self.state_map.check(state)?;
        let holds = |l: &Literal| self.state_map.position(l).map(|idx| state[idx]);
        Ok(action.precond_pos.iter().all(|l| holds(l) == Some(true))
            && action.precond_neg.iter().all(|l| holds(l) == Some(false)))
    }

    /// Looks a grounded action up by its textual name, e.g. `Fly(P1, SFO, JFK)`.
    pub fn find_action(&self, name: &str) -> Option<&Action> {
        self.actions_list.iter().find(|a| a.name() == name)
    }
}
