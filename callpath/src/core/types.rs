//! Shared deterministic types for the engine core.
//!
//! These types define stable contracts between the registry, the selector,
//! the execution driver and the run controller. They carry no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense identifier of a registered path.
///
/// Ids are assigned in registration order starting at zero, so every value in
/// `[0, registry.count())` names exactly one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(usize);

impl PathId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural category of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Entry performs aux steps then calls the payload itself.
    Direct,
    /// Fixed-depth chain of statically named helpers.
    Nested,
    /// Payload reached through a function pointer.
    Indirect,
    /// Bounded recursion with a randomly drawn depth.
    Recursive,
    /// Fixed-length chain where each link calls the next through a pointer.
    PointerChain,
    /// Multi-level tower with random binary choices along the way.
    Branching,
    /// Acquires and releases a transient resource before the payload.
    Resource,
    /// Bounded recursion that bottoms out in a nested tail.
    Mixed,
}

/// Per-path invocation counts for one batch of executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageCounters {
    counts: Vec<u32>,
}

impl UsageCounters {
    /// Counters for a registry with `paths` entries, all zero.
    pub fn new(paths: usize) -> Self {
        Self {
            counts: vec![0; paths],
        }
    }

    /// Increment the counter for `id`. Ids outside the registry are ignored.
    pub fn record(&mut self, id: PathId) {
        if let Some(count) = self.counts.get_mut(id.index()) {
            *count += 1;
        }
    }

    pub fn get(&self, id: PathId) -> u32 {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterate `(id, count)` pairs in id order, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (PathId, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, count)| (PathId::new(index), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_counters_track_totals_and_ignore_unknown_ids() {
        let mut usage = UsageCounters::new(3);
        usage.record(PathId::new(0));
        usage.record(PathId::new(2));
        usage.record(PathId::new(2));
        usage.record(PathId::new(7));

        assert_eq!(usage.get(PathId::new(0)), 1);
        assert_eq!(usage.get(PathId::new(1)), 0);
        assert_eq!(usage.get(PathId::new(2)), 2);
        assert_eq!(usage.get(PathId::new(7)), 0);
        assert_eq!(usage.total(), 3);
        assert_eq!(usage.iter().count(), 3);
    }

    #[test]
    fn path_id_serializes_as_bare_index() {
        let json = serde_json::to_string(&PathId::new(12)).expect("serialize");
        assert_eq!(json, "12");
    }
}
