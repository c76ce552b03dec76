//! Per-gene aggregation.
//!
//! A `GeneSheet` is built as an ownership chain, each step consuming the
//! previous state:
//! ```ignore
//! let sheet = GeneSheet::resolve(db, "hmgcr", "dme").await?
//!     .with_pathways(db).await?
//!     .with_network(db, &pipeline).await?;
//! ```
//! and is annotated afterwards with a seam's common node table.

use std::collections::{BTreeMap, HashMap};

use pathseam_common::config::PipelineConfig;
use pathseam_common::{PathseamError, Result};
use pathseam_kegg::PathwayDatabase;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::extractor::extract;
use crate::model::{CommonNode, PathwayEdge, PathwayNetwork, PathwayNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSheet {
    /// Queried gene name.
    pub gene: String,
    /// KEGG organism code, e.g. "dme".
    pub org_id: String,
    pub gene_aliases: Vec<String>,
    /// path_id → path_name for every pathway containing any alias.
    pub gene_pathways: Option<BTreeMap<String, String>>,
    pub gene_pathways_meta: Option<PathwayNetwork>,
    /// Pathways skipped because their description could not be fetched.
    #[serde(default)]
    pub failed_pathways: Vec<String>,
}

impl GeneSheet {
    /// Step 1: resolve the aliases of `gene` within `org_id`.
    #[instrument(skip(db))]
    pub async fn resolve(db: &dyn PathwayDatabase, gene: &str, org_id: &str) -> Result<Self> {
        info!("Getting aliases of {gene}");
        let gene_aliases = db.find_aliases(org_id, gene).await?;
        info!(?gene_aliases, "Aliases resolved");

        Ok(Self {
            gene: gene.to_string(),
            org_id: org_id.to_string(),
            gene_aliases,
            gene_pathways: None,
            gene_pathways_meta: None,
            failed_pathways: Vec::new(),
        })
    }

    /// Step 2: union the pathways of every alias, keyed by path_id.
    pub async fn with_pathways(mut self, db: &dyn PathwayDatabase) -> Result<Self> {
        let mut pathways: BTreeMap<String, String> = BTreeMap::new();

        for alias in &self.gene_aliases {
            let found = db.find_pathways_by_alias(alias, &self.org_id).await?;
            info!(gene = %self.gene, alias = %alias, n = found.len(), "Pathways for alias");
            for (path_id, path_name) in found {
                pathways.entry(path_id).or_insert(path_name);
            }
        }

        if pathways.is_empty() {
            warn!(gene = %self.gene, "No pathways found for any alias");
        }
        self.gene_pathways = Some(pathways);
        Ok(self)
    }

    /// Step 3: extract every discovered pathway and concatenate the tagged
    /// node and edge rows.
    ///
    /// A failing pathway aborts the step unless
    /// `pipeline.isolate_pathway_failures` is set, in which case it is
    /// logged, recorded in `failed_pathways` and skipped.
    pub async fn with_network(
        mut self,
        db: &dyn PathwayDatabase,
        pipeline: &PipelineConfig,
    ) -> Result<Self> {
        let Some(pathways) = self.gene_pathways.as_ref() else {
            return Err(PathseamError::Precondition(format!(
                "pathways of {} must be discovered before building the network",
                self.gene
            )));
        };

        info!(gene = %self.gene, n = pathways.len(), "Parsing pathway ids for network data");

        let mut network = PathwayNetwork::default();
        let mut failed = Vec::new();

        for path_id in pathways.keys() {
            info!(gene = %self.gene, %path_id, "Extracting pathway");
            let extracted = match extract(db, path_id).await {
                Ok(extracted) => extracted,
                Err(e) if pipeline.isolate_pathway_failures => {
                    warn!(path_id = %path_id, error = %e, "Skipping pathway");
                    failed.push(path_id.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            network.nodes.extend(extracted.nodes.into_iter().map(|node| PathwayNode {
                path_id: path_id.clone(),
                node,
                membership: None,
            }));
            network.edges.extend(extracted.edges.into_iter().map(|edge| PathwayEdge {
                path_id: path_id.clone(),
                edge,
            }));
        }

        info!(
            gene = %self.gene,
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            failed = failed.len(),
            "Pathway network built"
        );
        self.gene_pathways_meta = Some(network);
        self.failed_pathways = failed;
        Ok(self)
    }

    /// Step 4: left-join a seam's common node table onto the node table by
    /// name. Any previous annotation is replaced, so repeating the call with
    /// the same table leaves the sheet unchanged.
    pub fn annotate(mut self, common_nodes: &[CommonNode]) -> Result<Self> {
        info!(gene = %self.gene, "Marking common nodes between gene A and gene Z sets of pathways");

        let network = self
            .gene_pathways_meta
            .as_mut()
            .ok_or_else(|| PathseamError::MissingNodeData(self.gene.clone()))?;

        let lookup: HashMap<&str, _> = common_nodes
            .iter()
            .map(|c| (c.name.as_str(), c.membership))
            .collect();

        for row in &mut network.nodes {
            row.membership = lookup.get(row.node.name.as_str()).copied();
        }
        Ok(self)
    }

    /// The node table, or `MissingNodeData` if the network step never ran.
    pub fn nodes(&self) -> Result<&[PathwayNode]> {
        self.gene_pathways_meta
            .as_ref()
            .map(|n| n.nodes.as_slice())
            .ok_or_else(|| PathseamError::MissingNodeData(self.gene.clone()))
    }
}
