//! The two-gene run: build both sheets, reconcile, annotate.

use pathseam_common::config::{PipelineConfig, QueryConfig};
use pathseam_common::Result;
use pathseam_kegg::PathwayDatabase;
use tracing::{info, instrument};

use crate::seam::Seam;
use crate::sheet::GeneSheet;

/// Aliases → pathways → network for one gene.
pub async fn build_sheet(
    db: &dyn PathwayDatabase,
    gene: &str,
    org_id: &str,
    pipeline: &PipelineConfig,
) -> Result<GeneSheet> {
    GeneSheet::resolve(db, gene, org_id)
        .await?
        .with_pathways(db)
        .await?
        .with_network(db, pipeline)
        .await
}

/// Build the A and Z sheets, reconcile them and annotate both.
///
/// The two gene pipelines are independent and run concurrently; requests
/// within one gene stay sequential.
#[instrument(skip(db, query, pipeline), fields(gene_a = %query.gene_a, gene_z = %query.gene_z))]
pub async fn run_pipeline(
    db: &dyn PathwayDatabase,
    query: &QueryConfig,
    pipeline: &PipelineConfig,
) -> Result<Seam> {
    let (gene_a, gene_z) = tokio::try_join!(
        build_sheet(db, &query.gene_a, &query.organism, pipeline),
        build_sheet(db, &query.gene_z, &query.organism, pipeline),
    )?;

    info!("Finding common nodes between gene A and gene Z pathways");
    Seam::reconcile(gene_a, gene_z)?.annotate()
}
