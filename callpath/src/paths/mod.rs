//! Path definitions and the registry that indexes them.
//!
//! Every path is a chain of `fn(&mut PathContext)` frames ending in exactly one
//! [`context::PathContext::deliver`] call. Shapes differ only in how they get
//! there: nesting depth, recursion, pointer indirection, branching, or the aux
//! steps run along the way.

pub mod branching;
pub mod context;
pub mod indirect;
pub mod nested;
pub mod recursive;
pub mod registry;
pub mod resource;
