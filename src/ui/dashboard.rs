//! Plain-string renderers for the dashboard phase.
//!
//! Each function is pure over the record, so the views can be asserted on
//! without a terminal. Styling goes through `console` and disappears when
//! colours are disabled.

use std::fmt::Write as _;

use console::style;
use intel_common::{
    CompanyOverview, CompanyResponse, EnrichmentStatus, MarketIntelligence, ProductsApis,
};

use crate::dashboard::Tab;
use crate::errors::DashboardError;
use crate::ui::icons::{CROSS, HOURGLASS};

/// Rows shown in the API endpoint table.
pub const MAX_API_ROWS: usize = 10;
/// Strengths and weaknesses listed per competitor.
pub const MAX_COMPETITOR_POINTS: usize = 3;

const NOT_AVAILABLE: &str = "N/A";

pub fn render_header(record: &CompanyResponse) -> String {
    let name = if record.data.overview.name.is_empty() {
        &record.company_name
    } else {
        &record.data.overview.name
    };
    let confidence = (record.metadata.confidence_score * 100.0).round() as i64;
    format!(
        "{}\n{}  {}\n",
        style(name).bold().cyan(),
        style(format!("Analyzed {}", record.analyzed_date())).dim(),
        style(format!("Confidence: {}%", confidence)).green()
    )
}

/// Tab bar with `active` highlighted.
pub fn render_tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("{}", style(format!("[{}]", tab.label())).bold().underlined())
            } else {
                format!(" {} ", style(tab.label()).dim())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_tab(record: &CompanyResponse, tab: Tab) -> String {
    match tab {
        Tab::Overview => render_overview(&record.data.overview),
        Tab::ProductsApis => render_products(&record.data.products_apis, &record.enrichment()),
        Tab::Market => render_market(&record.data.market_intelligence),
    }
}

pub fn render_overview(overview: &CompanyOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(&overview.name).bold());
    if !overview.description.is_empty() {
        let _ = writeln!(out, "{}", overview.description);
    }
    if !overview.industry.is_empty() {
        let _ = writeln!(out, "{}", style(overview.industry.join(" · ")).dim());
    }
    let _ = writeln!(out);

    let founded = overview
        .founded_year
        .map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string());
    field(&mut out, "Founded", &founded);
    field(&mut out, "Employees", or_na(&overview.employee_count));
    field(&mut out, "Headquarters", or_na(&overview.headquarters));
    let status = if overview.status == "public" {
        style(or_na(&overview.status)).green().to_string()
    } else {
        or_na(&overview.status).to_string()
    };
    field(&mut out, "Status", &status);

    if !overview.mission.is_empty() {
        section(&mut out, "Mission");
        let _ = writeln!(out, "{}", overview.mission);
    }
    if !overview.website.is_empty() {
        section(&mut out, "Website");
        let _ = writeln!(out, "{}", style(&overview.website).underlined());
    }
    out
}

pub fn render_products(products: &ProductsApis, enrichment: &EnrichmentStatus) -> String {
    let mut out = String::new();
    if enrichment.is_pending() {
        let _ = writeln!(
            out,
            "{}{}",
            HOURGLASS,
            style("API enrichment in progress; results will refresh automatically").yellow()
        );
        let _ = writeln!(out);
    }

    field(
        &mut out,
        "Documentation Quality",
        &format!("{:.1} / 5.0", products.documentation_quality),
    );
    let sdks = if products.sdk_languages.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        products.sdk_languages.join(", ")
    };
    field(&mut out, "SDK Languages", &sdks);

    section(&mut out, &format!("Products ({})", products.products.len()));
    for product in &products.products {
        let _ = write!(out, "  {}", style(&product.name).bold());
        if !product.category.is_empty() {
            let _ = write!(out, " {}", style(format!("[{}]", product.category)).dim());
        }
        let _ = writeln!(out);
        if !product.description.is_empty() {
            let _ = writeln!(out, "    {}", product.description);
        }
    }

    section(&mut out, &format!("API Endpoints ({})", products.apis.len()));
    for api in products.apis.iter().take(MAX_API_ROWS) {
        let _ = writeln!(
            out,
            "  {:<7} {:<32} {}{}",
            style(&api.method).cyan(),
            api.path,
            api.description,
            if api.category.is_empty() {
                String::new()
            } else {
                format!(" {}", style(format!("({})", api.category)).dim())
            }
        );
    }
    if products.apis.len() > MAX_API_ROWS {
        let _ = writeln!(
            out,
            "  {}",
            style(format!(
                "Showing {} of {} endpoints",
                MAX_API_ROWS,
                products.apis.len()
            ))
            .dim()
        );
    }

    if !products.pricing.is_empty() {
        section(&mut out, "Pricing Tiers");
        for tier in &products.pricing {
            let _ = writeln!(out, "  {} {}", style(&tier.name).bold(), style(&tier.price).cyan());
            if !tier.target_audience.is_empty() {
                let _ = writeln!(out, "    {}", style(&tier.target_audience).dim());
            }
            for feature in &tier.features {
                let _ = writeln!(out, "    • {}", feature);
            }
        }
    }
    out
}

pub fn render_market(market: &MarketIntelligence) -> String {
    let mut out = String::new();
    section(&mut out, "Market Position");
    let _ = writeln!(out, "{}", or_na(&market.market_position));
    if let Some(share) = market.market_share_percent {
        let _ = writeln!(out, "Market Share: {}%", share);
    }

    section(&mut out, "Niche");
    let _ = writeln!(out, "{}", or_na(&market.niche));

    if !market.differentiation.is_empty() {
        section(&mut out, "Key Differentiators");
        for diff in &market.differentiation {
            let _ = writeln!(out, "  • {}", diff);
        }
    }
    if !market.target_market.is_empty() {
        section(&mut out, "Target Markets");
        let _ = writeln!(out, "  {}", market.target_market.join(", "));
    }

    section(&mut out, &format!("Competitors ({})", market.competitors.len()));
    for competitor in &market.competitors {
        let _ = writeln!(
            out,
            "  {} {}",
            style(&competitor.name).bold(),
            style(format!("{}% overlap", competitor.market_overlap_percent)).yellow()
        );
        if !competitor.relationship.is_empty() {
            let _ = writeln!(
                out,
                "    {}",
                style(format!("Relationship: {}", competitor.relationship)).dim()
            );
        }
        points(&mut out, "Strengths", &competitor.strengths);
        points(&mut out, "Weaknesses", &competitor.weaknesses);
    }
    out
}

/// Terminal error view for a failed dashboard load.
pub fn render_error(error: &DashboardError) -> String {
    format!(
        "{}{}\n{}",
        CROSS,
        style(error).red(),
        style("Try another company with `company-intel analyze`.").dim()
    )
}

fn points(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "    {}:", title);
    for item in items.iter().take(MAX_COMPETITOR_POINTS) {
        let _ = writeln!(out, "      • {}", item);
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<22} {}", style(format!("{}:", label)).dim(), value);
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style(title).bold().underlined());
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}
