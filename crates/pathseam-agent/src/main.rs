//! Pathseam — shared pathway nodes between two genes.
//! Entry point for the pipeline binary.
//!
//! Collects the KEGG pathways holding gene A and gene Z, extracts their
//! networks, marks which nodes are common to both sets of pathways and
//! writes geneA.json, geneZ.json and seamAZ.json to the output directory.

use pathseam_common::PathseamConfig;
use pathseam_core::output::write_outputs;
use pathseam_core::{run_pipeline, Membership};
use pathseam_kegg::KeggClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pathseam=debug,info")),
        )
        .init();

    info!("Pathseam starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = PathseamConfig::load()?;
    info!(
        "Query: gene A = {}, gene Z = {}, organism = {}",
        config.query.gene_a, config.query.gene_z, config.query.organism
    );

    let kegg = KeggClient::new(&config.kegg)?;
    let seam = run_pipeline(&kegg, &config.query, &config.pipeline).await?;

    for sheet in [&seam.gene_a, &seam.gene_z] {
        let pathways = sheet
            .gene_pathways_meta
            .as_ref()
            .map_or(0, |network| network.pathway_count());
        info!(gene = %sheet.gene, pathways, "Pathways extracted");
        if !sheet.failed_pathways.is_empty() {
            tracing::warn!(
                gene = %sheet.gene,
                "Pathways skipped: {}",
                sheet.failed_pathways.join(", ")
            );
        }
    }

    let shared: Vec<&str> = seam.shared_names().collect();
    info!(n = shared.len(), "Shared nodes: {}", shared.join(", "));

    let paths = write_outputs(&config.output.dir, &seam)?;
    info!(
        only_a = seam.count(Membership::A),
        only_z = seam.count(Membership::Z),
        shared = seam.count(Membership::Both),
        "Done. Gene A sheet: {}, gene Z sheet: {}, seam: {}",
        paths.gene_a.display(),
        paths.gene_z.display(),
        paths.seam.display()
    );

    Ok(())
}
