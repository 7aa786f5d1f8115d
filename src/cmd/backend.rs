//! Direct backend queries: `company-intel graph`, `companies` and `health`.

use anyhow::{Context, Result};
use company_intel::config::ClientConfig;
use company_intel::ui::icons::{CHECK, CROSS};
use console::style;
use serde::Serialize;

use super::connect_api;

pub async fn cmd_graph(config: &ClientConfig, id: &str, depth: u32, json: bool) -> Result<()> {
    let api = connect_api(config)?;
    let graph = api
        .get_graph(id, depth)
        .await
        .with_context(|| format!("Failed to fetch graph for '{}'", id))?;
    if json {
        return print_json(&graph);
    }

    println!();
    println!(
        "{} {}",
        style("Knowledge graph for").bold(),
        style(id).cyan().bold()
    );
    println!(
        "  {} nodes, {} edges (depth {})",
        style(graph.metadata.node_count).green(),
        style(graph.metadata.edge_count).green(),
        depth
    );
    if !graph.metadata.generated_at.is_empty() {
        println!("  {}", style(format!("generated {}", graph.metadata.generated_at)).dim());
    }

    let labels = graph.label_counts();
    if !labels.is_empty() {
        println!();
        println!("{}", style("Node labels:").underlined());
        for (label, count) in labels {
            println!("  {:<20} {}", label, count);
        }
    }
    println!();
    Ok(())
}

pub async fn cmd_companies(config: &ClientConfig, limit: u32, offset: u32, json: bool) -> Result<()> {
    let api = connect_api(config)?;
    let list = api
        .list_companies(limit, offset)
        .await
        .context("Failed to list companies")?;
    if json {
        return print_json(&list);
    }

    if list.companies.is_empty() {
        println!("No analysed companies yet. Run 'company-intel analyze' to add one.");
        return Ok(());
    }

    println!();
    println!(
        "{:<24} {:<28} {:<12} {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("STATUS").bold(),
        style("ANALYZED").bold()
    );
    for company in &list.companies {
        println!(
            "{:<24} {:<28} {:<12} {}",
            company.id,
            company.name,
            company.status,
            style(&company.analyzed_at).dim()
        );
    }
    println!();
    println!(
        "{}",
        style(page_summary(list.offset, list.companies.len(), list.total)).dim()
    );
    Ok(())
}

/// "Showing a-b of total" for a page of `shown` rows starting at `offset`.
fn page_summary(offset: u32, shown: usize, total: u64) -> String {
    let first = u64::from(offset) + 1;
    let last = u64::from(offset) + shown as u64;
    format!("Showing {}-{} of {}", first, last, total)
}

pub async fn cmd_health(config: &ClientConfig, json: bool) -> Result<()> {
    let api = connect_api(config)?;
    let health = api
        .health()
        .await
        .with_context(|| format!("Backend at {} is unreachable", config.api_url))?;
    if json {
        return print_json(&health);
    }

    let healthy = health.status == "healthy" || health.status == "ok";
    println!(
        "{}Backend {} is {}",
        if healthy { CHECK } else { CROSS },
        style(&config.api_url).cyan(),
        health.status
    );
    if !health.version.is_empty() {
        println!("  version: {}", health.version);
    }
    for (service, status) in &health.services {
        println!("  {:<12} {}", service, status);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_summary_is_one_based() {
        assert_eq!(page_summary(0, 1, 1), "Showing 1-1 of 1");
        assert_eq!(page_summary(20, 5, 25), "Showing 21-25 of 25");
    }

    #[test]
    fn test_page_summary_handles_largest_offset() {
        assert_eq!(
            page_summary(u32::MAX, 2, 5_000_000_000),
            "Showing 4294967296-4294967297 of 5000000000"
        );
    }
}
