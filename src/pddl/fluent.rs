use std::fmt;

use super::predicate::Literal;

/// Builds a [`Literal`] from its textual pieces: `literal!(At, "C1", "SFO")`.
#[macro_export]
macro_rules! literal {
    (At, $thing:expr, $location:expr) => {
        $crate::pddl::Literal::at($thing, $location)
    };
    (In, $cargo:expr, $plane:expr) => {
        $crate::pddl::Literal::is_in($cargo, $plane)
    };
}

/// Builds a `Vec<Literal>`: `literals![At("C1", "SFO"), In("C2", "P1")]`.
#[macro_export]
macro_rules! literals {
    ( $($p:ident($a:expr, $b:expr)),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($crate::literal!($p, $a, $b));
            )*
            temp_vec
        }
    };
}

/// Sparse state: literals known to hold and literals known not to hold.
///
/// Well formed states list every literal of the vocabulary exactly once across
/// `pos` and `neg`. That is assumed here, not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FluentState {
    pub pos: Vec<Literal>,
    pub neg: Vec<Literal>,
}

impl FluentState {
    pub fn new(pos: Vec<Literal>, neg: Vec<Literal>) -> FluentState {
        FluentState { pos, neg }
    }

    /// Conjunction of the positive literals, `At(C1, SFO) & At(P1, SFO)`.
    pub fn pos_sentence(&self) -> String {
        let first = self.pos.iter().take(1).fold(String::new(), |acc, item| acc + &item.to_string());
        self.pos.iter().skip(1).fold(first, |acc, item| acc + " & " + &item.to_string())
    }
}

impl fmt::Display for FluentState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pos_sentence())
    }
}
