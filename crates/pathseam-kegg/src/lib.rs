//! pathseam-kegg — KEGG REST access.
//!
//! - Gene alias lookup (`/find/{org}/{gene}`)
//! - Pathway membership of a gene (`/get/{org}:{gene}`, PATHWAY section)
//! - KGML pathway descriptions (`/get/{path_id}/kgml`)

pub mod client;
pub mod flatfile;
pub mod kgml;

use std::collections::BTreeMap;

use async_trait::async_trait;
use pathseam_common::Result;

pub use client::KeggClient;
pub use kgml::{parse_kgml, Graphics, PathwayRecord, RawEntry, RawRelation, Subtype};

/// Common interface for a pathway database.
///
/// `KeggClient` talks to the KEGG REST service; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait PathwayDatabase: Send + Sync {
    /// All known name variants of `gene` within `org`.
    /// Fails with `GeneNotFound` when the lookup has no match.
    async fn find_aliases(&self, org: &str, gene: &str) -> Result<Vec<String>>;

    /// Pathways containing `alias`, as path_id → path_name.
    /// An alias with no pathways yields an empty map.
    async fn find_pathways_by_alias(
        &self,
        alias: &str,
        org: &str,
    ) -> Result<BTreeMap<String, String>>;

    /// Raw pathway description. Fails with `PathwayNotFound` for unknown ids.
    async fn fetch_pathway(&self, path_id: &str) -> Result<PathwayRecord>;
}
