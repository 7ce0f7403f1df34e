use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter, Result};

use separator::Separatable;

use crate::puzzle::PuzzleState;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    skipped_states: Vec<u64>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    /// Expanded nodes, the goal included.
    pub fn total_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    /// Popped nodes whose state was already expanded (closed set only).
    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    /// Neighbours dropped because they equal the parent's state.
    pub fn total_skipped(&self) -> u64 {
        self.skipped_states.iter().sum()
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_visited(&mut self, depth: u32) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_skipped(&mut self, depth: u32) -> bool {
        Self::add(&mut self.skipped_states, depth)
    }

    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn max_depth(&self) -> usize {
        self.created_states
            .len()
            .max(self.skipped_states.len())
    }
}

fn at(counts: &[u64], depth: usize) -> u64 {
    counts.get(depth).copied().unwrap_or(0)
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "skipped backtracks by depth: {:?}", self.skipped_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total visited: {}", self.total_visited().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_reached_duplicates().separated_string())?;
        writeln!(f, "total skipped backtracks: {}", self.total_skipped().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let created = self.total_created();
        let visited = self.total_visited();
        let duplicates = self.total_reached_duplicates();
        let left = created - visited - duplicates;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "States visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Skipped backtracks total: {}", self.total_skipped().separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(f)?;

        writeln!(f, "{:<15}{:<15}{:<15}{:<15}{}", "Depth", "Created", "Visited", "Duplicates", "Skipped")?;
        for i in 0..self.max_depth() {
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{:<15}{}",
                format!("{}:", i),
                at(&self.created_states, i).separated_string(),
                at(&self.visited_states, i).separated_string(),
                at(&self.duplicate_states, i).separated_string(),
                at(&self.skipped_states, i).separated_string()
            )?;
        }
        Ok(())
    }
}

/// A state reached by the search.
///
/// Nodes live in an arena and `prev` is the parent's index in it, `None` for the initial state.
#[derive(Debug)]
pub(crate) struct SearchNode {
    pub(crate) state: PuzzleState,
    pub(crate) prev: Option<usize>,
    pub(crate) dist: u32,
}

impl SearchNode {
    pub(crate) fn new(state: PuzzleState, prev: Option<usize>, dist: u32) -> Self {
        SearchNode { state, prev, dist }
    }
}

/// Priority queue key for a node in the arena.
///
/// Lower `cost` (dist + heuristic) first, equal costs in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QueueEntry {
    pub(crate) index: usize,
    cost: u32,
    seq: u64,
}

impl QueueEntry {
    pub(crate) fn new(index: usize, cost: u32, seq: u64) -> Self {
        QueueEntry { index, cost, seq }
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
