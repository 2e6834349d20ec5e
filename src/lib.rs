//! GIES causal structure learning, delegated to R's `pcalg`.
//!
//! The crate stages a dataset (and optionally a skeleton) in a throwaway
//! workspace, runs the GIES R script on it and turns the resulting adjacency
//! matrix into a [`petgraph`] directed graph over the dataset's column names.

pub mod config;
pub mod data;
pub mod error;
pub mod gies;
pub mod graph;
pub mod process;
pub mod workspace;

pub use config::Settings;
pub use data::{Dataset, FixedGaps, Skeleton};
pub use error::{GiesError, Result};
pub use gies::{Gies, GiesConfig, Score, ScriptArguments};
pub use graph::{AdjacencyMatrix, GraphExport};
pub use process::{Rscript, ScriptRunner};
pub use workspace::Workspace;
