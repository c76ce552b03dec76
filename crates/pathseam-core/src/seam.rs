//! Seam reconciliation between two gene sheets.
//!
//! Pathways are treated as sheets sewn together over the nodes (gene
//! products, compounds, maps) they have in common. Every distinct node name
//! from either sheet gets exactly one membership label: `A`, `Z` or `A,Z`.

use std::collections::BTreeMap;

use pathseam_common::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{CommonNode, Membership, PathwayNode};
use crate::sheet::GeneSheet;

/// What to do when a sheet has no node table at reconciliation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingNodePolicy {
    /// Fail with `MissingNodeData`.
    #[default]
    Fail,
    /// Treat the missing table as empty and carry on.
    TreatAsEmpty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seam {
    pub gene_a: GeneSheet,
    pub gene_z: GeneSheet,
    /// One row per distinct node name, sorted by name.
    pub common_nodes: Vec<CommonNode>,
}

impl Seam {
    /// Reconcile two sheets, failing if either lacks a node table.
    pub fn reconcile(gene_a: GeneSheet, gene_z: GeneSheet) -> Result<Self> {
        Self::reconcile_with(gene_a, gene_z, MissingNodePolicy::Fail)
    }

    pub fn reconcile_with(
        gene_a: GeneSheet,
        gene_z: GeneSheet,
        policy: MissingNodePolicy,
    ) -> Result<Self> {
        let common_nodes = {
            let a = node_table(&gene_a, policy)?;
            let z = node_table(&gene_z, policy)?;
            common_nodes(a, z)
        };

        let seam = Self { gene_a, gene_z, common_nodes };
        info!(
            a = %seam.gene_a.gene,
            z = %seam.gene_z.gene,
            only_a = seam.count(Membership::A),
            only_z = seam.count(Membership::Z),
            shared = seam.count(Membership::Both),
            "Seam reconciled"
        );
        Ok(seam)
    }

    /// Annotate both owned sheets with this seam's membership table.
    pub fn annotate(self) -> Result<Self> {
        let Self { gene_a, gene_z, common_nodes } = self;
        let gene_a = gene_a.annotate(&common_nodes)?;
        let gene_z = gene_z.annotate(&common_nodes)?;
        Ok(Self { gene_a, gene_z, common_nodes })
    }

    pub fn count(&self, membership: Membership) -> usize {
        self.common_nodes.iter().filter(|c| c.membership == membership).count()
    }

    /// Names present in both genes' pathway sets.
    pub fn shared_names(&self) -> impl Iterator<Item = &str> {
        self.common_nodes
            .iter()
            .filter(|c| c.membership == Membership::Both)
            .map(|c| c.name.as_str())
    }
}

fn node_table(sheet: &GeneSheet, policy: MissingNodePolicy) -> Result<&[PathwayNode]> {
    match (sheet.nodes(), policy) {
        (Ok(nodes), _) => Ok(nodes),
        (Err(_), MissingNodePolicy::TreatAsEmpty) => {
            warn!(gene = %sheet.gene, "No node table; reconciling as empty");
            Ok(&[][..])
        }
        (Err(e), MissingNodePolicy::Fail) => Err(e),
    }
}

/// Full outer join of two node tables on `name`, projected to
/// `(name, membership)`, deduplicated and sorted by name.
pub fn common_nodes(a: &[PathwayNode], z: &[PathwayNode]) -> Vec<CommonNode> {
    let mut joined: BTreeMap<&str, Membership> = BTreeMap::new();

    for row in a {
        joined.insert(row.node.name.as_str(), Membership::A);
    }
    for row in z {
        joined
            .entry(row.node.name.as_str())
            .and_modify(|m| {
                if *m == Membership::A {
                    *m = Membership::Both;
                }
            })
            .or_insert(Membership::Z);
    }

    joined
        .into_iter()
        .map(|(name, membership)| CommonNode { name: name.to_string(), membership })
        .collect()
}
