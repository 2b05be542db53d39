//! Plain-text cards and tables for the terminal.
//!
//! Head counts are point-in-time values and are replaced by a placeholder
//! whenever a selection spans more than one period.

use std::collections::BTreeMap;

use regiostat_classify::{LawTotals, ProcessedLawData};
use regiostat_core::{DeputyCategory, Metric};
use regiostat_store::{AggregatedMetrics, ComparisonReport, MetricsDelta, Selection, SelectionSummary};

const PLACEHOLDER: &str = "—";
const MAX_ROWS: usize = 100;

// ── Summary ──

pub fn print_summary(selection: &Selection, summary: &SelectionSummary) {
    let dates: Vec<&str> = selection.dates.iter().map(String::as_str).collect();
    println!("=== Summary ===");
    println!("  {:<26} {}", "periods", dates.join(", "));
    println!("  {:<26} {}", "categories", category_list(selection));
    if !selection.regions.is_empty() {
        let regions: Vec<&str> = selection.regions.iter().map(String::as_str).collect();
        println!("  {:<26} {}", "regions", regions.join(", "));
    }
    println!();

    println!("Deputies");
    match &summary.headcounts {
        Some(h) => {
            println!("  {:<26} {}", "total", h.total);
            println!("  {:<26} {}", "interacting", h.interacting);
            println!("  {:<26} {}", "reception", h.reception);
            println!("  {:<26} {}%", "engagement", h.engagement);
            for (category, stats) in &h.by_category {
                println!(
                    "  {:<26} {} / {} / {}",
                    category.abbreviation(),
                    stats.total,
                    stats.interacting,
                    stats.reception
                );
            }
        }
        None => {
            for label in ["total", "interacting", "reception", "engagement"] {
                println!("  {:<26} {}", label, PLACEHOLDER);
            }
            println!(
                "  (head counts are not summed across {} periods)",
                summary.period_count
            );
        }
    }
    println!();

    println!("Citizens");
    println!("  {:<26} {}", "received", summary.total_citizens);
    println!();

    print_appeals(&summary.appeals);
}

fn print_appeals(appeals: &BTreeMap<String, i64>) {
    let total: i64 = appeals.values().sum();
    println!("Appeals ({total})");
    let mut ranked: Vec<(&String, &i64)> = appeals.iter().filter(|(_, n)| **n > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    for (topic, count) in ranked {
        println!("  {:<40} {}", topic, count);
    }
    println!();
}

fn category_list(selection: &Selection) -> String {
    if selection.categories.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let names: Vec<&str> = selection
        .categories
        .iter()
        .map(DeputyCategory::abbreviation)
        .collect();
    names.join(", ")
}

// ── Region tables ──

pub fn print_regions(records: &[AggregatedMetrics], multi_period: bool) {
    println!(
        "{:<34} {:>8} {:>11} {:>9} {:>10} {:>9}",
        "region", "total", "interacting", "reception", "engagement", "citizens"
    );
    for r in records.iter().take(MAX_ROWS) {
        if multi_period {
            println!(
                "{:<34} {:>8} {:>11} {:>9} {:>10} {:>9}",
                r.region, PLACEHOLDER, PLACEHOLDER, PLACEHOLDER, PLACEHOLDER, r.total_citizens
            );
        } else {
            println!(
                "{:<34} {:>8} {:>11} {:>9} {:>9}% {:>9}",
                r.region, r.total, r.interacting, r.reception, r.engagement, r.total_citizens
            );
        }
    }
    if records.len() > MAX_ROWS {
        println!("... and {} more", records.len() - MAX_ROWS);
    }
    println!("{} regions", records.len());
}

// ── Comparison ──

fn signed(n: i64) -> String {
    if n > 0 { format!("+{n}") } else { n.to_string() }
}

pub fn print_comparison(report: &ComparisonReport) {
    println!(
        "=== {} vs {} ===",
        report.current_date, report.previous_date
    );
    print_delta(&report.combined);

    println!(
        "{:<34} {:>8} {:>11} {:>9} {:>10} {:>9}",
        "region", "Δtotal", "Δinteract", "Δreception", "Δengage", "Δcitizens"
    );
    for r in report.regions.iter().take(MAX_ROWS) {
        let d = &r.delta;
        println!(
            "{:<34} {:>8} {:>11} {:>9} {:>10} {:>9}",
            r.region,
            signed(d.total),
            signed(d.interacting),
            signed(d.reception),
            signed(d.engagement),
            signed(d.total_citizens)
        );
    }
}

fn print_delta(delta: &MetricsDelta) {
    println!("  {:<26} {}", "total", signed(delta.total));
    println!("  {:<26} {}", "interacting", signed(delta.interacting));
    println!("  {:<26} {}", "reception", signed(delta.reception));
    println!("  {:<26} {} pp", "engagement", signed(delta.engagement));
    println!("  {:<26} {}", "citizens", signed(delta.total_citizens));
    for (category, stats) in &delta.by_category {
        let parts: Vec<String> = Metric::ALL
            .iter()
            .map(|m| signed(stats.get(*m)))
            .collect();
        println!("  {:<26} {}", category.abbreviation(), parts.join(" / "));
    }
    let changed: Vec<(&String, &i64)> = delta.appeals.iter().filter(|(_, n)| **n != 0).collect();
    if !changed.is_empty() {
        println!("  Appeals");
        for (topic, n) in changed {
            println!("    {:<38} {}", topic, signed(*n));
        }
    }
    println!();
}

// ── Legislation ──

pub fn print_law_totals(laws: &ProcessedLawData, totals: &LawTotals) {
    println!("=== Model laws ===");
    println!("  {:<26} {}", "laws", laws.law_list.len());
    println!("  {:<26} {}", "regions", laws.region_options.len());
    println!();

    println!("Status");
    println!("  {:<26} {}", "Принят ЛДПР", totals.adopted_ldpr());
    println!("    {:<24} {}", "только ЛДПР", totals.adopted_ldpr_only);
    println!("    {:<24} {}", "межфракционно", totals.adopted_ldpr_cross_party);
    println!("  {:<26} {}", "Внесен ЛДПР", totals.submitted_ldpr());
    println!("    {:<24} {}", "только ЛДПР", totals.submitted_ldpr_only);
    println!("    {:<24} {}", "межфракционно", totals.submitted_ldpr_cross_party);
    println!("  {:<26} {}", "На рассмотрении", totals.pending);
    println!("  {:<26} {}", "Принят/Внесен другими", totals.by_other_party);
    println!("  {:<26} {}", "Не внесен", totals.not_submitted());
    println!(
        "    {:<24} {}",
        "внесен другой партией", totals.not_submitted_submitted_by_other_party
    );
    println!(
        "    {:<24} {}",
        "принят другой партией", totals.not_submitted_adopted_by_other_party
    );
    println!("    {:<24} {}", "неактуально", totals.not_submitted_not_relevant);
    println!("    {:<24} {}", "иная причина", totals.not_submitted_other);
    println!("  {:<26} {}", "Нет данных", totals.no_data);
    println!();

    println!("Own initiatives");
    println!("  {:<26} {}", "contributed", totals.own_contributed);
    println!("  {:<26} {}", "accepted", totals.own_accepted);
}

pub fn print_law_breakdown(laws: &ProcessedLawData, law: &str) {
    println!("=== {law} ===");
    for region in &laws.region_options {
        let bucket = laws.status(region, law);
        println!("  {:<34} {:<24} {}", region, bucket.label(), bucket.slug());
    }
}

// ── Colours ──

pub fn print_colors(colors: &BTreeMap<String, String>) {
    for (topic, color) in colors {
        println!("  {:<40} {}", topic, color);
    }
}
