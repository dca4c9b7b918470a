//! Directed graph of index-case transitions, built from UPDATE records.

use super::target_counts;
use crate::{
    catalog::IndexCaseCatalog,
    model::{IndexCase, UpdateCase, UpdateType},
    types::IndexCaseId,
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a link's weight is counted once its direction is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// Only updates in the link's own (source, target) direction.
    #[default]
    Ordered,
    /// Updates in either direction between the two cases.
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub index_case_id: IndexCaseId,
    pub title:         String,
    /// Update cases of any type targeting this case. Radius scaling is left
    /// to the renderer.
    pub count:         usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: IndexCaseId,
    pub target: IndexCaseId,
    pub value:  usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index_case_id: IndexCaseId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.index_case_id == index_case_id)
    }

    /// The link between two cases, in whichever direction it was kept.
    pub fn link_between(&self, a: IndexCaseId, b: IndexCaseId) -> Option<&GraphLink> {
        self.links
            .iter()
            .find(|l| (l.source == a && l.target == b) || (l.source == b && l.target == a))
    }
}

/// Build the transition graph.
///
/// Only UPDATE records whose source and target both resolve in
/// `index_cases` take part; orphans are dropped. At most one link exists
/// per unordered pair, pointing in the direction first seen.
pub fn build_graph(
    index_cases: &[IndexCase],
    update_cases: &[UpdateCase],
    weighting: EdgeWeighting,
) -> Graph {
    let catalog = IndexCaseCatalog::new(index_cases);
    let targets = target_counts(update_cases);

    let mut orphans = 0usize;
    let moves: Vec<(IndexCaseId, IndexCaseId)> = update_cases
        .iter()
        .filter(|uc| uc.update_type == UpdateType::Update)
        .filter_map(|uc| match (uc.source, uc.index_case_id) {
            (Some(source), Some(target)) if catalog.contains(source) && catalog.contains(target) => {
                Some((source, target))
            }
            _ => {
                orphans += 1;
                None
            }
        })
        .collect();

    if orphans > 0 {
        log::debug!("graph: dropped {orphans} updates with unresolved source or target");
    }

    // Targets first, then sources not already present.
    let mut node_ids: IndexSet<IndexCaseId> = moves.iter().map(|&(_, t)| t).collect();
    node_ids.extend(moves.iter().map(|&(s, _)| s));

    let nodes = node_ids
        .into_iter()
        .map(|id| GraphNode {
            index_case_id: id,
            title: catalog.label(id).unwrap_or_default().to_string(),
            count: targets.get(&id).copied().unwrap_or(0),
        })
        .collect();

    let mut directed: HashMap<(IndexCaseId, IndexCaseId), usize> = HashMap::new();
    let mut kept: IndexMap<(IndexCaseId, IndexCaseId), (IndexCaseId, IndexCaseId)> = IndexMap::new();
    for &(source, target) in &moves {
        *directed.entry((source, target)).or_insert(0) += 1;
        kept.entry(unordered(source, target)).or_insert((source, target));
    }

    let links = kept
        .into_values()
        .map(|(source, target)| {
            let forward = directed.get(&(source, target)).copied().unwrap_or(0);
            let value = match weighting {
                EdgeWeighting::Ordered => forward,
                EdgeWeighting::Unordered => {
                    forward + directed.get(&(target, source)).copied().unwrap_or(0)
                }
            };
            GraphLink { source, target, value }
        })
        .collect();

    Graph { nodes, links }
}

fn unordered(a: IndexCaseId, b: IndexCaseId) -> (IndexCaseId, IndexCaseId) {
    if a <= b { (a, b) } else { (b, a) }
}
