//! Flat tabular entities produced from KGML pathways.

use std::fmt;

use pathseam_kegg::{Graphics, Subtype};
use serde::{Deserialize, Serialize};

/// One pathway participant (gene, compound, map reference, ...).
///
/// `id` is local to the pathway the node came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    /// First name in the entry's name list.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub link: Option<String>,
    /// All names of the entry, space-joined.
    pub gene_names: String,
    /// Layout of the first graphics record; empty when the entry had none.
    #[serde(flatten)]
    pub graphics: NodeGraphics,
    /// How many graphics records the entry carried.
    pub graphics_data_len: usize,
}

/// The first graphics record of an entry, serialized as `graphics_*` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGraphics {
    #[serde(rename = "graphics_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "graphics_x", default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(rename = "graphics_y", default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(rename = "graphics_coords", default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<String>,
    #[serde(rename = "graphics_type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "graphics_width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "graphics_height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "graphics_fgcolor", default, skip_serializing_if = "Option::is_none")]
    pub fgcolor: Option<String>,
    #[serde(rename = "graphics_bgcolor", default, skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
}

impl From<&Graphics> for NodeGraphics {
    fn from(g: &Graphics) -> Self {
        Self {
            name: g.name.clone(),
            x: g.x,
            y: g.y,
            coords: g.coords.clone(),
            kind: g.kind.clone(),
            width: g.width,
            height: g.height,
            fgcolor: g.fgcolor.clone(),
            bgcolor: g.bgcolor.clone(),
        }
    }
}

/// An interaction between two entries of the same pathway.
///
/// `name`/`value` hold the first subtype only: a relation with several
/// subtypes is collapsed onto its first one. The complete list stays in
/// `subtypes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub entry1: u32,
    pub entry2: u32,
    /// Relation type (ECrel, PPrel, GErel, PCrel, maplink).
    pub link: String,
    pub name: Option<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<Subtype>,
}

/// A node row tagged with the pathway it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayNode {
    pub path_id: String,
    #[serde(flatten)]
    pub node: Node,
    #[serde(
        rename = "belongs_to_pathways_with_AZ",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub membership: Option<Membership>,
}

/// An edge row tagged with the pathway it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayEdge {
    pub path_id: String,
    #[serde(flatten)]
    pub edge: Edge,
}

/// Node and edge tables unioned over all pathways of one gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathwayNetwork {
    pub nodes: Vec<PathwayNode>,
    pub edges: Vec<PathwayEdge>,
}

impl PathwayNetwork {
    /// Number of distinct pathways contributing rows.
    pub fn pathway_count(&self) -> usize {
        let mut ids: Vec<&str> = self.nodes.iter().map(|n| n.path_id.as_str()).collect();
        ids.extend(self.edges.iter().map(|e| e.path_id.as_str()));
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Which gene's pathway set a node name was seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "A,Z")]
    Both,
}

impl Membership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::A    => "A",
            Membership::Z    => "Z",
            Membership::Both => "A,Z",
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a seam's common node table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonNode {
    pub name: String,
    #[serde(rename = "belongs_to_pathways_with_AZ")]
    pub membership: Membership,
}
