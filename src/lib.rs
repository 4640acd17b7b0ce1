//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so callers can write
//! `blockfall::{core, engine, types}`. The headless match runner used by the
//! binary lives in [`runner`].

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub mod runner;
