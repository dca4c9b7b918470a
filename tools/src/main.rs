//! icu-report: headless runner for the update-case engine.
//!
//! Usage:
//!   icu-report --data-dir ./data
//!   icu-report --data-dir ./data --merge-rule surface_and_timestamp --top 5
//!   icu-report --data-dir ./data --hide-customer 2179 --json

use anyhow::{Context, Result};
use icu_core::{
    config::EngineConfig,
    dashboard::{Dashboard, DashboardViews},
    derivation::MergeRule,
    filter::FilterState,
    snapshot::Snapshot,
    types::{CustomerId, IndexCaseId},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let json_mode = args.iter().any(|a| a == "--json");

    let mut config = EngineConfig::load(data_dir)
        .with_context(|| format!("loading engine config from {data_dir}"))?;
    if let Some(rule) = args.windows(2).find(|w| w[0] == "--merge-rule") {
        config.merge_rule = parse_merge_rule(&rule[1])?;
    }
    if let Some(top) = parse_arg::<usize>(&args, "--top") {
        config.top = Some(top);
    }
    config.validate()?;

    let snapshot = Snapshot::load_with(data_dir, &config)
        .with_context(|| format!("loading snapshot from {data_dir}"))?;
    if snapshot.is_empty() {
        log::warn!("snapshot in {data_dir} has no customers; every view will be empty");
    }

    let mut filter = FilterState::new(snapshot);
    let events = filter.subscribe();
    let mut dashboard = Dashboard::new(config);
    dashboard.refresh(&filter);

    for id in parse_all::<CustomerId>(&args, "--hide-customer") {
        filter.set_customer_visible(id, false)?;
    }
    for id in parse_all::<IndexCaseId>(&args, "--hide-index-case") {
        filter.set_index_case_visible(id, false)?;
    }
    let changes = dashboard.sync(&filter, &events);

    if json_mode {
        println!("{}", serde_json::to_string_pretty(dashboard.views())?);
        return Ok(());
    }

    println!("ICU update-case report");
    println!("  data_dir:    {data_dir}");
    println!("  merge rule:  {:?}", dashboard.config().merge_rule);
    println!("  filters:     {changes} applied");
    println!();
    print_summary(&filter, dashboard.views());
    Ok(())
}

fn print_summary(filter: &FilterState, views: &DashboardViews) {
    let snapshot = filter.snapshot();
    let visible = filter.visible_customers();
    let elements: usize = visible.iter().map(|c| c.icu_elements.len()).sum();

    println!("=== SNAPSHOT ===");
    println!("  customers:      {} ({} visible)", snapshot.customers.len(), visible.len());
    println!("  index cases:    {}", snapshot.index_cases.len());
    println!("  raw elements:   {elements}");
    println!("  update cases:   {}", views.update_cases.len());
    println!("  merged away:    {}", elements.saturating_sub(views.update_cases.len()));
    println!("  categories:     {}", views.categories.len());

    println!();
    println!("=== BY UPDATE TYPE ===");
    for entry in &views.by_update_type {
        println!("  {:<8} {}", entry.key.as_str(), entry.count);
    }

    println!();
    println!("=== TOP INDEX CASES ===");
    for ic in views.top_index_cases.iter().filter(|ic| ic.update_case_count > 0) {
        println!("  {:>5}  {:<40} {}", ic.id, ic.label, ic.update_case_count);
    }

    println!();
    println!("=== TOP CUSTOMERS ===");
    for c in &views.top_customers {
        println!("  {:>5}  {:<40} {}", c.id, c.name, c.update_case_count);
    }

    println!();
    println!("=== TRANSITIONS ===");
    if views.graph.links.is_empty() {
        println!("  (no updates between known index cases)");
    }
    for link in &views.graph.links {
        println!("  {:>5} -> {:<5} x{}", link.source, link.target, link.value);
    }

    println!();
    println!(
        "=== MATRIX === {} x {} (max cell {})",
        views.matrix.row_count(),
        views.matrix.col_count(),
        views.matrix.max_value(),
    );
}

fn parse_merge_rule(value: &str) -> Result<MergeRule> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("unknown merge rule '{value}' (surface | surface_and_timestamp)"))
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}

fn parse_all<T: std::str::FromStr>(args: &[String], flag: &str) -> Vec<T> {
    args.windows(2)
        .filter(|w| w[0] == flag)
        .filter_map(|w| w[1].parse().ok())
        .collect()
}
