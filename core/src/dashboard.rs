//! Dashboard: recomputes every aggregate view from the filter state.
//!
//! Recomputation, never incremental update: each refresh derives the
//! update cases for the visible customers from scratch and rebuilds all
//! views over them. The most recent refresh is authoritative.

use crate::{
    aggregate::{
        build_graph, build_matrix, by_customer, by_index_case, by_update_type, count_by,
        rank_customers, rank_index_cases, topic_hierarchy, Count, CustomerActivity, Graph,
        IndexCaseActivity, Matrix, TopicGroup,
    },
    catalog::extract_categories,
    config::EngineConfig,
    derivation::derive_update_cases_with,
    filter::{FilterEvent, FilterState},
    model::{Category, Customer, IndexCase, UpdateCase, UpdateType},
    types::{CustomerId, IndexCaseId},
};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

/// Every view the presentation layer consumes, as plain records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    pub update_cases:    Vec<UpdateCase>,
    pub categories:      Vec<Category>,
    pub by_index_case:   Vec<Count<Option<IndexCaseId>>>,
    pub by_customer:     Vec<Count<CustomerId>>,
    pub by_update_type:  Vec<Count<UpdateType>>,
    pub matrix:          Matrix,
    pub graph:           Graph,
    pub top_customers:   Vec<CustomerActivity>,
    pub top_index_cases: Vec<IndexCaseActivity>,
    pub topics:          Vec<TopicGroup>,
}

/// Compute all views for the given (already filtered) collections.
pub fn compute_views(
    customers: &[Customer],
    index_cases: &[IndexCase],
    config: &EngineConfig,
) -> DashboardViews {
    let update_cases = derive_update_cases_with(customers, &config.merge_rule);

    DashboardViews {
        categories:      extract_categories(customers),
        by_index_case:   count_by(&update_cases, by_index_case),
        by_customer:     count_by(&update_cases, by_customer),
        by_update_type:  count_by(&update_cases, by_update_type),
        matrix:          build_matrix(customers, index_cases, &update_cases, config.matrix),
        graph:           build_graph(index_cases, &update_cases, config.edge_weighting),
        top_customers:   rank_customers(customers, &update_cases, config.top),
        top_index_cases: rank_index_cases(index_cases, &update_cases, config.top),
        topics:          topic_hierarchy(index_cases, &update_cases),
        update_cases,
    }
}

pub struct Dashboard {
    config:    EngineConfig,
    views:     DashboardViews,
    refreshes: u64,
}

impl Dashboard {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            views: DashboardViews::default(),
            refreshes: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    /// Number of refreshes performed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Recompute every view from the currently visible entities.
    pub fn refresh(&mut self, filter: &FilterState) -> &DashboardViews {
        let customers = filter.visible_customers();
        let index_cases = filter.visible_index_cases();

        self.views = compute_views(&customers, &index_cases, &self.config);
        self.refreshes += 1;

        log::debug!(
            "dashboard refresh #{}: {} customers, {} index cases, {} update cases",
            self.refreshes,
            customers.len(),
            index_cases.len(),
            self.views.update_cases.len(),
        );
        &self.views
    }

    /// Drain pending filter events and refresh once if any arrived.
    /// Returns the number of events drained.
    pub fn sync(&mut self, filter: &FilterState, events: &Receiver<FilterEvent>) -> usize {
        let drained = events.try_iter().count();
        if drained > 0 {
            self.refresh(filter);
        }
        drained
    }
}
