use std::fmt::{self, Display, Formatter};

/// How the search handles states it has seen before.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Only a child equal to its own grandparent is dropped.
    /// States can be queued many times over different paths.
    ParentCheck,
    /// Also keeps every expanded state and drops later copies of it.
    /// Can pick a different one of several equally long solutions than `ParentCheck`.
    ClosedSet,
}

impl Default for Method {
    fn default() -> Self {
        Method::ParentCheck
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::ParentCheck => write!(f, "parent-check"),
            Method::ClosedSet => write!(f, "closed-set"),
        }
    }
}

/// Estimate of remaining moves, both admissible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Manhattan,
    Hamming,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Manhattan
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Hamming => write!(f, "hamming"),
        }
    }
}
