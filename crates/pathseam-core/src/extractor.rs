//! Pathway network extraction: one KGML record → node list + edge list.

use pathseam_common::Result;
use pathseam_kegg::{PathwayDatabase, PathwayRecord, RawEntry, RawRelation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Edge, Node, NodeGraphics};

/// Nodes and edges of a single pathway, not yet tagged with a path_id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPathway {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Fetch a pathway description and flatten it.
///
/// An unknown `path_id` fails with `PathwayNotFound`.
pub async fn extract(db: &dyn PathwayDatabase, path_id: &str) -> Result<ExtractedPathway> {
    let record = db.fetch_pathway(path_id).await?;
    let extracted = flatten(&record);
    debug!(
        path_id,
        nodes = extracted.nodes.len(),
        edges = extracted.edges.len(),
        "Pathway flattened"
    );
    Ok(extracted)
}

/// Flatten a parsed pathway into its node and edge tables.
pub fn flatten(record: &PathwayRecord) -> ExtractedPathway {
    ExtractedPathway {
        nodes: record.entries.iter().map(entry_to_node).collect(),
        edges: record.relations.iter().map(relation_to_edge).collect(),
    }
}

fn entry_to_node(entry: &RawEntry) -> Node {
    Node {
        id: entry.id,
        name: entry.names.first().cloned().unwrap_or_default(),
        kind: entry.kind.clone(),
        link: entry.link.clone(),
        gene_names: entry.names.join(" "),
        graphics: entry.graphics.first().map(NodeGraphics::from).unwrap_or_default(),
        graphics_data_len: entry.graphics.len(),
    }
}

fn relation_to_edge(relation: &RawRelation) -> Edge {
    let first = relation.subtypes.first();
    Edge {
        entry1: relation.entry1,
        entry2: relation.entry2,
        link: relation.kind.clone(),
        name: first.map(|s| s.name.clone()),
        value: first.map(|s| s.value.clone()),
        subtypes: relation.subtypes.clone(),
    }
}
