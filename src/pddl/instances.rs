//! Sample air cargo scenarios.

use tracing::debug;

use super::domain::Objects;
use super::fluent::FluentState;
use super::predicate::Literal;
use super::problem::AirCargoProblem;
use super::Error;
use crate::literals;

/// Two cargos, two planes, two airports; the cargos swap airports.
pub fn air_cargo_p1() -> AirCargoProblem {
    let pos = literals![
        At("C1", "SFO"),
        At("C2", "JFK"),
        At("P1", "SFO"),
        At("P2", "JFK"),
    ];
    let neg = literals![
        At("C2", "SFO"),
        In("C2", "P1"),
        In("C2", "P2"),
        At("C1", "JFK"),
        In("C1", "P1"),
        In("C1", "P2"),
        At("P1", "JFK"),
        At("P2", "SFO"),
    ];
    let goal = literals![At("C1", "JFK"), At("C2", "SFO")];
    sample(Objects::new(&["C1", "C2"], &["P1", "P2"], &["JFK", "SFO"])
        .and_then(|objects| AirCargoProblem::new(objects, FluentState::new(pos, neg), goal)))
}

pub fn air_cargo_p2() -> AirCargoProblem {
    sample(formulate_problem(&["SFO", "JFK", "ATL"], 3, 3))
}

pub fn air_cargo_p3() -> AirCargoProblem {
    sample(formulate_problem(&["SFO", "JFK", "ATL", "ORD"], 4, 2))
}

/// Cargo `i` and plane `i` start at airport `i`; the goal sends the cargo at
/// airport `i` to airport `n - i - 1`.
///
/// Airport names go through the same checks as any other object identifier.
pub fn formulate_problem(airports: &[&str], cargo_count: usize, plane_count: usize) -> Result<AirCargoProblem, Error> {
    let cargos: Vec<String> = (1..=cargo_count).map(|x| format!("C{}", x)).collect();
    let planes: Vec<String> = (1..=plane_count).map(|x| format!("P{}", x)).collect();
    let airports: Vec<String> = airports.iter().map(|a| a.to_string()).collect();
    let objects = Objects::new(&cargos, &planes, &airports)?;
    let mut pos = Vec::new();
    let mut neg = Vec::new();
    let mut goal = Vec::new();
    for c in &objects.cargos {
        for p in &objects.planes {
            neg.push(Literal::is_in(c.clone(), p.clone()));
        }
    }
    for (ia, a) in objects.airports.iter().enumerate() {
        for (ic, c) in objects.cargos.iter().enumerate() {
            let at = Literal::at(c.clone(), a.clone());
            if ic + ia + 1 == objects.airports.len() {
                goal.push(at.clone());
            }
            if ia == ic {
                pos.push(at);
            } else {
                neg.push(at);
            }
        }
        for (ip, p) in objects.planes.iter().enumerate() {
            let at = Literal::at(p.clone(), a.clone());
            if ip == ia {
                pos.push(at);
            } else {
                neg.push(at);
            }
        }
    }
    debug!(airports = airports.len(), cargo_count, plane_count, "formulated air cargo problem");
    AirCargoProblem::new(objects, FluentState::new(pos, neg), goal)
}

fn sample(problem: Result<AirCargoProblem, Error>) -> AirCargoProblem {
    match problem {
        Ok(problem) => problem,
        // fixed, distinct, well formed identifiers
        Err(e) => unreachable!("sample problem is malformed: {}", e),
    }
}

/// Named sample scenario, `p1`, `p2` or `p3`.
pub fn by_name(name: &str) -> Result<AirCargoProblem, Error> {
    match name {
        "p1" => Ok(air_cargo_p1()),
        "p2" => Ok(air_cargo_p2()),
        "p3" => Ok(air_cargo_p3()),
        other => Err(Error::malformed(format!("Unknown sample problem {:?}, expected p1, p2 or p3.", other))),
    }
}
