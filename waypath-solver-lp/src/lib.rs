//! Exact flow optimiser for Waypath.
//!
//! This crate provides [`LpFlowSolver`], the default implementation of the
//! [`FlowSolver`](waypath_core::FlowSolver) trait. It formulates the arc
//! selection as a binary integer program, with one 0/1 variable per arc and
//! flow-conservation equalities per node, and solves it with the pure-Rust
//! `microlp` backend of `good_lp`.
//!
//! The model is solved as an integer program even though the flow polytope is
//! usually integral: overlapping segments can introduce cycles and shortcuts,
//! and the solver's answer is read back with an explicit integrality check.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod model;
mod solver;

pub use solver::{LpFlowSolver, LpFlowSolverConfig};
