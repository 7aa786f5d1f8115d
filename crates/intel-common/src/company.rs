//! The finished analysis record returned by `GET /company/{id}`.
//!
//! Sections are filled in by independent backend collectors, so nearly every
//! field carries a serde default: a record whose API catalogue is still being
//! enriched must deserialize just as well as a complete one.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Secondary completion flag on a [`CompanyResponse`].
///
/// `Pending` means supplementary data (e.g. the API catalogue) is still being
/// gathered after the primary record was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnrichmentStatus {
    Pending,
    Completed,
    Other(String),
}

impl EnrichmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<String> for EnrichmentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            _ => Self::Other(s),
        }
    }
}

impl From<EnrichmentStatus> for String {
    fn from(status: EnrichmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub analyzed_at: String,
    #[serde(default)]
    pub status: String,
    /// Absent on records produced before enrichment existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment_status: Option<EnrichmentStatus>,
    pub data: CompanyData,
    #[serde(default)]
    pub metadata: CompanyMetadata,
}

impl CompanyResponse {
    /// Effective enrichment status; a missing flag counts as completed.
    pub fn enrichment(&self) -> EnrichmentStatus {
        self.enrichment_status
            .clone()
            .unwrap_or(EnrichmentStatus::Completed)
    }

    pub fn is_enrichment_pending(&self) -> bool {
        self.enrichment_status
            .as_ref()
            .is_some_and(EnrichmentStatus::is_pending)
    }

    /// Calendar date of `analyzed_at`, or the raw string when it does not parse.
    ///
    /// The backend emits both offset-aware RFC 3339 stamps and naive ISO
    /// datetimes depending on where the record was produced.
    pub fn analyzed_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.analyzed_at) {
            return dt.date_naive().to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&self.analyzed_at, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.date().to_string();
        }
        self.analyzed_at.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyMetadata {
    #[serde(default)]
    pub sources_count: u32,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyData {
    #[serde(default)]
    pub overview: CompanyOverview,
    #[serde(default)]
    pub products_apis: ProductsApis,
    #[serde(default)]
    pub market_intelligence: MarketIntelligence,
    #[serde(default)]
    pub financials: Financials,
    #[serde(default)]
    pub team_culture: TeamCulture,
    #[serde(default)]
    pub news_sentiment: NewsSentiment,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverview {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub founded_year: Option<i32>,
    pub headquarters: String,
    pub employee_count: String,
    pub website: String,
    pub logo_url: String,
    pub industry: Vec<String>,
    pub mission: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub category: String,
    pub launch_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoint {
    pub path: String,
    pub method: String,
    pub description: String,
    pub category: String,
    pub authentication_required: bool,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            path: String::new(),
            method: String::new(),
            description: String::new(),
            category: String::new(),
            authentication_required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTier {
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub target_audience: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductsApis {
    pub products: Vec<Product>,
    pub apis: Vec<ApiEndpoint>,
    /// Score on a 0-5 scale.
    pub documentation_quality: f64,
    pub sdk_languages: Vec<String>,
    pub pricing: Vec<PricingTier>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    pub name: String,
    pub slug: String,
    pub relationship: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub market_overlap_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketIntelligence {
    pub competitors: Vec<Competitor>,
    pub market_position: String,
    pub market_share_percent: Option<f64>,
    pub niche: String,
    pub differentiation: Vec<String>,
    pub target_market: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingRound {
    pub round: String,
    pub amount: f64,
    pub date: String,
    pub investors: Vec<String>,
    pub valuation: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    pub status: String,
    pub stock_symbol: Option<String>,
    pub stock_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub last_funding_round: Option<FundingRound>,
    pub total_funding: Option<f64>,
    pub valuation: Option<f64>,
    pub revenue_estimate: Option<f64>,
    pub revenue_growth_yoy: Option<f64>,
    pub profitability_status: String,
    pub burn_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Leader {
    pub name: String,
    pub title: String,
    pub background: String,
    pub linkedin_url: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamCulture {
    pub leadership: Vec<Leader>,
    pub tech_stack: Vec<String>,
    pub culture_signals: Vec<String>,
    pub work_model: String,
    pub open_positions_count: u32,
    pub hiring_focus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_date: String,
    pub sentiment: f64,
    pub summary: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentPoint {
    pub date: String,
    pub sentiment: f64,
    pub event: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub review_count: u32,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSentiment {
    pub overall_sentiment: f64,
    pub sentiment_label: String,
    pub recent_news: Vec<NewsArticle>,
    pub sentiment_timeline: Vec<SentimentPoint>,
    pub topics: Vec<String>,
    pub customer_reviews: Option<ReviewSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(extra: &str) -> String {
        format!(
            r#"{{"id":"stripe","company_name":"Stripe","data":{{"overview":{{"name":"Stripe"}}}}{extra}}}"#
        )
    }

    #[test]
    fn test_minimal_record_deserializes_with_defaults() {
        let record: CompanyResponse = serde_json::from_str(&minimal("")).unwrap();
        assert_eq!(record.company_name, "Stripe");
        assert_eq!(record.data.overview.founded_year, None);
        assert!(record.data.products_apis.apis.is_empty());
        assert_eq!(record.metadata.confidence_score, 0.0);
        assert_eq!(record.enrichment(), EnrichmentStatus::Completed);
        assert!(!record.is_enrichment_pending());
    }

    #[test]
    fn test_pending_enrichment_is_detected() {
        let record: CompanyResponse =
            serde_json::from_str(&minimal(r#","enrichment_status":"pending""#)).unwrap();
        assert!(record.is_enrichment_pending());
        assert_eq!(record.enrichment().as_str(), "pending");
    }

    #[test]
    fn test_unknown_enrichment_status_is_preserved_and_not_pending() {
        let record: CompanyResponse =
            serde_json::from_str(&minimal(r#","enrichment_status":"partial""#)).unwrap();
        assert_eq!(
            record.enrichment_status,
            Some(EnrichmentStatus::Other("partial".to_string()))
        );
        assert!(!record.is_enrichment_pending());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["enrichment_status"], "partial");
    }

    #[test]
    fn test_api_endpoint_defaults_to_authenticated() {
        let ep: ApiEndpoint = serde_json::from_str(r#"{"path":"/v1/charges","method":"POST"}"#).unwrap();
        assert!(ep.authentication_required);
        assert!(ep.description.is_empty());
    }

    #[test]
    fn test_analyzed_date_handles_both_timestamp_forms() {
        let mut record: CompanyResponse = serde_json::from_str(&minimal("")).unwrap();
        record.analyzed_at = "2025-03-04T10:11:12.123456".to_string();
        assert_eq!(record.analyzed_date(), "2025-03-04");
        record.analyzed_at = "2025-03-04T23:30:00+00:00".to_string();
        assert_eq!(record.analyzed_date(), "2025-03-04");
        record.analyzed_at = "yesterday".to_string();
        assert_eq!(record.analyzed_date(), "yesterday");
    }
}
