use std::collections::HashSet;

use tracing::debug;

use super::action::{Action, Schema};
use super::predicate::{Literal, Object};
use super::utils::validate_identifier;
use super::Error;

/// The typed object sets of an air cargo problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objects {
    pub cargos: Vec<Object>,
    pub planes: Vec<Object>,
    pub airports: Vec<Object>,
}

impl Objects {
    /// Every identifier must be well formed and name exactly one object, across all
    /// three sets, or two objects would share their `At`/`In` literals.
    pub fn new<S: AsRef<str>>(cargos: &[S], planes: &[S], airports: &[S]) -> Result<Objects, Error> {
        let mut seen = HashSet::new();
        let mut collect = |identifiers: &[S]| -> Result<Vec<Object>, Error> {
            identifiers.iter()
                .map(|s| {
                    let s = s.as_ref();
                    validate_identifier(s)?;
                    if !seen.insert(s.to_string()) {
                        return Err(Error::malformed(format!("Object {:?} is declared more than once.", s)));
                    }
                    Ok(Object::from(s))
                })
                .collect()
        };
        Ok(Objects {
            cargos: collect(cargos)?,
            planes: collect(planes)?,
            airports: collect(airports)?,
        })
    }

    /// Number of actions [`Objects::ground`] produces.
    pub fn action_count(&self) -> usize {
        let (a, p, c) = (self.airports.len(), self.planes.len(), self.cargos.len());
        a * p * c * 2 + a * a.saturating_sub(1) * p
    }

    /// Expands the Load, Unload and Fly schemas over every object combination.
    /// The order is fixed: all loads, then unloads, then flies.
    pub fn ground(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.action_count());
        actions.extend(self.load_actions());
        actions.extend(self.unload_actions());
        actions.extend(self.fly_actions());
        debug!(actions = actions.len(), cargos = self.cargos.len(), planes = self.planes.len(), airports = self.airports.len(), "grounded air cargo schemas");
        actions
    }

    fn load_actions(&self) -> Vec<Action> {
        let mut loads = Vec::new();
        for ap in &self.airports {
            for p in &self.planes {
                for c in &self.cargos {
                    loads.push(Action {
                        schema: Schema::Load,
                        args: [c.clone(), p.clone(), ap.clone()],
                        precond_pos: vec![Literal::at(p.clone(), ap.clone()), Literal::at(c.clone(), ap.clone())],
                        precond_neg: vec![Literal::is_in(c.clone(), p.clone())],
                        effect_add: vec![Literal::is_in(c.clone(), p.clone())],
                        effect_rem: vec![Literal::at(c.clone(), ap.clone())],
                    });
                }
            }
        }
        loads
    }

    fn unload_actions(&self) -> Vec<Action> {
        let mut unloads = Vec::new();
        for ap in &self.airports {
            for p in &self.planes {
                for c in &self.cargos {
                    unloads.push(Action {
                        schema: Schema::Unload,
                        args: [c.clone(), p.clone(), ap.clone()],
                        precond_pos: vec![Literal::is_in(c.clone(), p.clone()), Literal::at(p.clone(), ap.clone())],
                        precond_neg: vec![Literal::at(c.clone(), ap.clone())],
                        effect_add: vec![Literal::at(c.clone(), ap.clone())],
                        effect_rem: vec![Literal::is_in(c.clone(), p.clone())],
                    });
                }
            }
        }
        unloads
    }

    fn fly_actions(&self) -> Vec<Action> {
        let mut flys = Vec::new();
        for fr in &self.airports {
            for to in self.airports.iter().filter(|to| *to != fr) {
                for p in &self.planes {
                    flys.push(Action {
                        schema: Schema::Fly,
                        args: [p.clone(), fr.clone(), to.clone()],
                        precond_pos: vec![Literal::at(p.clone(), fr.clone())],
                        precond_neg: vec![],
                        effect_add: vec![Literal::at(p.clone(), to.clone())],
                        effect_rem: vec![Literal::at(p.clone(), fr.clone())],
                    });
                }
            }
        }
        flys
    }
}
