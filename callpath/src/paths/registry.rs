//! Ordered, immutable registry of execution paths.

use std::ops::Index;

use anyhow::{Result, bail};

use crate::core::types::{PathId, Shape};
use crate::paths::context::PathEntry;
use crate::paths::{branching, indirect, nested, recursive, resource};

/// One registered path.
#[derive(Debug, Clone, Copy)]
pub struct PathDescriptor {
    pub id: PathId,
    pub name: &'static str,
    pub shape: Shape,
    pub entry: PathEntry,
}

/// Dense, read-only collection of paths.
///
/// Ids are contiguous from zero, so a uniform draw over `0..count()` covers
/// every path. The registry holds only fn pointers and static strings and can
/// be shared freely once built.
#[derive(Debug, Clone)]
pub struct Registry {
    paths: Vec<PathDescriptor>,
}

/// Accumulates paths in registration order.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    paths: Vec<PathDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: &'static str, shape: Shape, entry: PathEntry) -> Self {
        let id = PathId::new(self.paths.len());
        self.paths.push(PathDescriptor {
            id,
            name,
            shape,
            entry,
        });
        self
    }

    pub fn build(self) -> Result<Registry> {
        if self.paths.is_empty() {
            bail!("registry must contain at least one path");
        }
        Ok(Registry { paths: self.paths })
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The thirteen built-in shapes, A through M.
    pub fn standard() -> Self {
        let paths = Self::builder()
            .path("Path A (Direct)", Shape::Direct, nested::direct)
            .path("Path B (Nested - 2 levels)", Shape::Nested, nested::two_level)
            .path("Path C (Deep - 3 levels)", Shape::Nested, nested::three_level)
            .path("Path D (Indirect)", Shape::Indirect, indirect::through_pointer)
            .path(
                "Path E (Recursive - 1-3 levels)",
                Shape::Recursive,
                recursive::recursive,
            )
            .path("Path F (Heavy Aux)", Shape::Direct, nested::heavy_aux)
            .path("Path G (Page Cycle)", Shape::Resource, resource::page_cycle)
            .path("Path H (Tower - 5 levels)", Shape::Nested, nested::tower)
            .path("Path I (Deep - 6 levels)", Shape::Nested, nested::deep_six)
            .path(
                "Path J (Ptr Chain - 5 links)",
                Shape::PointerChain,
                indirect::pointer_chain,
            )
            .path("Path K (Mixed - 4-7 levels)", Shape::Mixed, recursive::mixed)
            .path(
                "Path L (Staircase - 7 levels)",
                Shape::Nested,
                nested::staircase,
            )
            .path(
                "Path M (Branching - 5 levels)",
                Shape::Branching,
                branching::branching,
            )
            .paths;
        Self { paths }
    }

    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn get(&self, id: PathId) -> Option<&PathDescriptor> {
        self.paths.get(id.index())
    }

    pub fn describe(&self, id: PathId) -> Option<&'static str> {
        self.get(id).map(|path| path.name)
    }

    pub fn entry(&self, id: PathId) -> Option<PathEntry> {
        self.get(id).map(|path| path.entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathDescriptor> {
        self.paths.iter()
    }
}

impl Index<PathId> for Registry {
    type Output = PathDescriptor;

    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    fn index(&self, id: PathId) -> &PathDescriptor {
        &self.paths[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::test_support::{CountingPayload, RecordingAux, ScriptedRandom, run_shape};

    /// Enough scripted draws to satisfy any built-in shape.
    fn draws() -> ScriptedRandom {
        ScriptedRandom::new(vec![1, 1])
    }

    #[test]
    fn standard_registry_has_thirteen_dense_ids() {
        let registry = Registry::standard();
        assert_eq!(registry.count(), 13);
        for (index, path) in registry.iter().enumerate() {
            assert_eq!(path.id, PathId::new(index));
        }
        let names: HashSet<&str> = registry.iter().map(|path| path.name).collect();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn lookups_outside_registry_return_none() {
        let registry = Registry::standard();
        let past_end = PathId::new(registry.count());
        assert!(registry.get(past_end).is_none());
        assert!(registry.describe(past_end).is_none());
        assert!(registry.entry(past_end).is_none());
        assert_eq!(registry.describe(PathId::new(3)), Some("Path D (Indirect)"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<Registry>();
    }

    #[test]
    fn empty_builder_is_rejected() {
        assert!(Registry::builder().build().is_err());
    }

    #[test]
    fn builder_assigns_ids_in_registration_order() {
        let registry = Registry::builder()
            .path("first", Shape::Direct, nested::direct)
            .path("second", Shape::Nested, nested::tower)
            .build()
            .expect("build");
        assert_eq!(registry[PathId::new(1)].name, "second");
        assert_eq!(registry[PathId::new(1)].shape, Shape::Nested);
    }

    #[test]
    fn every_path_delivers_payload_exactly_once() {
        let registry = Registry::standard();
        for path in registry.iter() {
            let payload = CountingPayload::new();
            let aux = RecordingAux::new();
            let mut rng = draws();
            let mut cx = crate::paths::context::PathContext::new(&payload, &aux, &mut rng);
            (path.entry)(&mut cx);
            let trace = cx.finish();
            assert_eq!(payload.calls(), 1, "{}", path.name);
            assert_eq!(trace.payload_calls, 1, "{}", path.name);
            assert!(!trace.frames.is_empty(), "{}", path.name);
        }
    }

    #[test]
    fn repeated_runs_of_a_path_are_identical() {
        let registry = Registry::standard();
        for path in registry.iter() {
            let first = run_shape(path.entry, draws());
            let second = run_shape(path.entry, draws());
            assert_eq!(first, second, "{}", path.name);
        }
    }

    #[test]
    fn every_path_has_a_distinct_route() {
        let registry = Registry::standard();
        let routes: HashSet<Vec<&'static str>> = registry
            .iter()
            .map(|path| run_shape(path.entry, draws()).frames)
            .collect();
        assert_eq!(routes.len(), registry.count());
    }
}
