//! GIES orientation: stage inputs, run `pcalg::gies`, map the result back.

use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, UnGraph};

use crate::config::Settings;
use crate::data::{skeleton::to_undirected, Dataset, FixedGaps, Skeleton};
use crate::error::Result;
use crate::graph::AdjacencyMatrix;
use crate::process::{launch_r_script, Rscript, ScriptRunner};
use crate::workspace::Workspace;

mod args;

pub use args::{GiesConfig, Score, ScriptArguments};

pub const GIES_TEMPLATE: &str = include_str!("../../templates/gies.R");
pub const REQUIRED_PACKAGE: &str = "pcalg";

/// Greedy interventional equivalence search, delegated to R.
#[derive(Debug, Clone)]
pub struct Gies<R = Rscript> {
    runner: R,
    temp_root: PathBuf,
    config: GiesConfig,
}

impl Gies<Rscript> {
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let config = settings.gies_config()?;
        Self::new(Rscript::from_settings(settings), settings.temp_root(), config).await
    }
}

impl<R: ScriptRunner> Gies<R> {
    /// Fails with `PackageUnavailable` when pcalg cannot be loaded.
    pub async fn new(runner: R, temp_root: impl Into<PathBuf>, config: GiesConfig) -> Result<Self> {
        runner.require_package(REQUIRED_PACKAGE).await?;
        Ok(Self {
            runner,
            temp_root: temp_root.into(),
            config,
        })
    }

    pub fn config(&self) -> &GiesConfig {
        &self.config
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    pub async fn orient(
        &self,
        data: &Dataset,
        skeleton: Option<&Skeleton>,
    ) -> Result<DiGraph<String, ()>> {
        self.orient_with(data, skeleton, &self.config).await
    }

    /// Like [`Gies::orient`] with an explicit configuration for this call only.
    pub async fn orient_with(
        &self,
        data: &Dataset,
        skeleton: Option<&Skeleton>,
        config: &GiesConfig,
    ) -> Result<DiGraph<String, ()>> {
        match skeleton {
            None => self.unconstrained(data, config).await,
            Some(Skeleton::Undirected(graph)) => self.undirected(data, graph, config).await,
            Some(Skeleton::Directed(graph)) => self.directed(data, graph, config).await,
        }
    }

    pub async fn orient_undirected_graph(
        &self,
        data: &Dataset,
        graph: &UnGraph<String, ()>,
    ) -> Result<DiGraph<String, ()>> {
        self.undirected(data, graph, &self.config).await
    }

    /// Only the skeleton of `graph` is used; directions are dropped with a warning.
    pub async fn orient_directed_graph(
        &self,
        data: &Dataset,
        graph: &DiGraph<String, ()>,
    ) -> Result<DiGraph<String, ()>> {
        self.directed(data, graph, &self.config).await
    }

    pub async fn create_graph_from_data(&self, data: &Dataset) -> Result<DiGraph<String, ()>> {
        self.unconstrained(data, &self.config).await
    }

    async fn undirected(
        &self,
        data: &Dataset,
        graph: &UnGraph<String, ()>,
        config: &GiesConfig,
    ) -> Result<DiGraph<String, ()>> {
        let gaps = FixedGaps::from_skeleton(graph, data)?;
        let result = self.run_gies(data, Some(&gaps), config).await?;
        result.relabel(data.columns())
    }

    async fn directed(
        &self,
        data: &Dataset,
        graph: &DiGraph<String, ()>,
        config: &GiesConfig,
    ) -> Result<DiGraph<String, ()>> {
        tracing::warn!(
            directed_edges = graph.edge_count(),
            "GIES runs on the skeleton of the given graph; edge directions are ignored"
        );
        self.undirected(data, &to_undirected(graph), config).await
    }

    async fn unconstrained(
        &self,
        data: &Dataset,
        config: &GiesConfig,
    ) -> Result<DiGraph<String, ()>> {
        let result = self.run_gies(data, None, config).await?;
        result.relabel(data.columns())
    }

    /// Stage the inputs in a fresh workspace, run the script and read `result.csv`.
    ///
    /// The workspace is removed on every exit path, including when this future is dropped.
    pub async fn run_gies(
        &self,
        data: &Dataset,
        fixed_gaps: Option<&FixedGaps>,
        config: &GiesConfig,
    ) -> Result<AdjacencyMatrix> {
        let workspace = Workspace::create(&self.temp_root)?;

        data.write_headerless(workspace.data_path())?;
        if let Some(gaps) = fixed_gaps {
            gaps.write_headerless(workspace.gaps_path())?;
        }
        let args = ScriptArguments::new(workspace.path(), config, fixed_gaps.is_some());
        tracing::info!(
            workspace = %workspace.id(),
            columns = data.n_columns(),
            samples = data.rows().len(),
            score = %config.score,
            skeleton = args.skeleton,
            "running GIES"
        );

        let result_path = workspace.result_path();
        let matrix = launch_r_script(&self.runner, GIES_TEMPLATE, &args, || {
            AdjacencyMatrix::read_csv(&result_path)
        })
        .await?;

        workspace.close()?;
        Ok(matrix)
    }
}
