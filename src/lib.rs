pub mod config;
pub mod pddl;
