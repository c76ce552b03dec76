//! pathseam-core — Pathway network extraction and A/Z seam reconciliation.
//!
//! - `extractor`: KGML record → flat node/edge tables
//! - `sheet`: per-gene aggregation (aliases → pathways → networks) and annotation
//! - `seam`: three-way membership of node names between two gene sheets
//! - `output`: JSON persistence of the results
//! - `pipeline`: the two-gene run

pub mod extractor;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod seam;
pub mod sheet;

pub use extractor::{extract, flatten, ExtractedPathway};
pub use model::{CommonNode, Edge, Membership, Node, NodeGraphics, PathwayEdge, PathwayNetwork, PathwayNode};
pub use pipeline::run_pipeline;
pub use seam::{MissingNodePolicy, Seam};
pub use sheet::GeneSheet;
