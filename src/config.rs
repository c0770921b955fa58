//! Problem files.
//!
//! ```toml
//! cargos = ["C1", "C2"]
//! planes = ["P1", "P2"]
//! airports = ["JFK", "SFO"]
//! goal = ["At(C1, JFK)", "At(C2, SFO)"]
//!
//! [init]
//! pos = ["At(C1, SFO)", "At(C2, JFK)", "At(P1, SFO)", "At(P2, JFK)"]
//! neg = ["At(C2, SFO)", "At(C1, JFK)", "In(C1, P1)", "In(C1, P2)", "In(C2, P1)", "In(C2, P2)", "At(P1, JFK)", "At(P2, SFO)"]
//!
//! [search]
//! heuristic = "level-sum"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::pddl::heuristic::Heuristic;
use crate::pddl::{AirCargoProblem, Error, FluentState, Literal, Objects};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitConfig {
    #[serde(default)]
    pub pos: Vec<String>,
    #[serde(default)]
    pub neg: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub heuristic: Heuristic,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemConfig {
    pub cargos: Vec<String>,
    pub planes: Vec<String>,
    pub airports: Vec<String>,
    pub init: InitConfig,
    pub goal: Vec<String>,
    #[serde(default)]
    pub search: SearchConfig,
}

fn parse_literals(texts: &[String]) -> Result<Vec<Literal>, Error> {
    texts.iter().map(|t| t.parse::<Literal>()).collect()
}

impl ProblemConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<ProblemConfig, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading problem file");
        text.parse()
    }

    pub fn into_problem(self) -> Result<AirCargoProblem, Error> {
        let objects = Objects::new(&self.cargos, &self.planes, &self.airports)?;
        let initial = FluentState::new(parse_literals(&self.init.pos)?, parse_literals(&self.init.neg)?);
        let goal = parse_literals(&self.goal)?;
        AirCargoProblem::new(objects, initial, goal)
    }
}

impl std::str::FromStr for ProblemConfig {
    type Err = Error;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::{ProblemConfig, SearchConfig};
    use crate::pddl::heuristic::Heuristic;
    use crate::pddl::instances::air_cargo_p1;
    use crate::pddl::Error;

    const P1: &str = r#"
cargos = ["C1", "C2"]
planes = ["P1", "P2"]
airports = ["JFK", "SFO"]
goal = ["At(C1, JFK)", "At(C2, SFO)"]

[init]
pos = ["At(C1, SFO)", "At(C2, JFK)", "At(P1, SFO)", "At(P2, JFK)"]
neg = ["At(C2, SFO)", "In(C2, P1)", "In(C2, P2)", "At(C1, JFK)", "In(C1, P1)", "In(C1, P2)", "At(P1, JFK)", "At(P2, SFO)"]

[search]
heuristic = "level-sum"
"#;

    #[test]
    fn test_parse() {
        let config: ProblemConfig = P1.parse().unwrap();
        assert_eq!(config.search, SearchConfig { heuristic: Heuristic::LevelSum });
        let problem = config.into_problem().unwrap();
        let sample = air_cargo_p1();
        assert_eq!(problem.state_map().literals(), sample.state_map().literals());
        assert_eq!(problem.initial_state(), sample.initial_state());
        assert_eq!(problem.goal(), sample.goal());
        assert_eq!(problem.actions_list(), sample.actions_list());
    }

    #[test]
    fn test_default_search() {
        let text = P1.replace("[search]\nheuristic = \"level-sum\"\n", "");
        let config: ProblemConfig = text.parse().unwrap();
        assert_eq!(config.search.heuristic, Heuristic::IgnorePreconditions);
    }

    #[test]
    fn test_load() {
        let mut file = Builder::new().suffix(".toml").tempfile().expect("Unable to create temporary file");
        write!(file.as_file_mut(), "{}", P1).expect("Unable to write to tempfile");
        let config = ProblemConfig::load(file.path()).unwrap();
        assert_eq!(config.cargos, vec!["C1", "C2"]);
        assert!(matches!(ProblemConfig::load("/nonexistent/problem.toml"), Err(Error::Io(_))));
    }

    #[test]
    fn test_errors() {
        assert!(matches!("cargos = 5".parse::<ProblemConfig>(), Err(Error::Config(_))));
        let bad_literal = P1.replace("At(C1, JFK)\", \"At(C2, SFO)\"]\n\n[init]", "At(C1; JFK)\", \"At(C2, SFO)\"]\n\n[init]");
        assert!(matches!(bad_literal.parse::<ProblemConfig>().unwrap().into_problem(), Err(Error::Format { .. })));
        let bad_object = P1.replace("\"P2\"]", "\"P 2\"]");
        assert!(matches!(bad_object.parse::<ProblemConfig>().unwrap().into_problem(), Err(Error::Format { .. })));
    }
}
