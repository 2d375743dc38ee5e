use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Pipeline stages in canonical display order. The wire format is the
/// snake_case name; anything else fails deserialization instead of being
/// silently dropped from the aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Lead,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::ClosedWon,
        Stage::ClosedLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Lead => "lead",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deal as the backend reports it. Timestamps are naive and expressed in
/// the backend's reporting zone (UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub value: Decimal,
    pub stage: Stage,
    pub health_score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Deal {
    /// Boundary check for the upstream contract: non-negative value, health
    /// score within 0..=100. Stage validity is already guaranteed by the
    /// `Stage` enum at deserialization time.
    pub fn validate(&self) -> Result<(), InvalidDeal> {
        if self.value.is_sign_negative() {
            return Err(InvalidDeal::NegativeValue {
                id: self.id,
                value: self.value,
            });
        }
        if !(0..=100).contains(&self.health_score) {
            return Err(InvalidDeal::HealthScoreOutOfRange {
                id: self.id,
                score: self.health_score,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidDeal {
    NegativeValue { id: i64, value: Decimal },
    HealthScoreOutOfRange { id: i64, score: i32 },
}

impl fmt::Display for InvalidDeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDeal::NegativeValue { id, value } => {
                write!(f, "deal {id} has negative value {value}")
            }
            InvalidDeal::HealthScoreOutOfRange { id, score } => {
                write!(f, "deal {id} has health score {score} outside 0..=100")
            }
        }
    }
}

impl std::error::Error for InvalidDeal {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealListResponse {
    pub deals: Vec<Deal>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeal {
    pub title: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// PATCH payload; absent fields stay untouched upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Note,
    Call,
    Email,
    Meeting,
    StageChange,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub deal_id: i64,
    pub user_id: i64,
    pub activity_type: ActivityKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    pub deal_id: i64,
    pub activity_type: ActivityKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub tenant_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Server-computed pipeline summary; displayed as-is, never recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub active_deals: u64,
    pub pipeline_value: Decimal,
    pub average_health_score: f64,
    pub at_risk_count: u64,
    pub revenue_at_risk: Decimal,
    pub closing_soon_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInsights {
    pub summary: PipelineSummary,
    pub weekly_summary: String,
    pub at_risk_deals: Vec<Deal>,
    pub high_priority_deals: Vec<Deal>,
    pub upcoming_close_deals: Vec<Deal>,
    pub stage_conversion_rates: BTreeMap<String, f64>,
}

/// Payload for the local `/api/charts` endpoint: the three aggregations
/// joined with their German display labels.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub pipeline: Vec<StageSlice>,
    pub health: Vec<BandSlice>,
    pub velocity: Vec<VelocitySlice>,
}

#[derive(Debug, Serialize)]
pub struct StageSlice {
    pub stage: Stage,
    pub label: &'static str,
    pub total_value: Decimal,
    /// Pre-formatted de-DE amount for the bar label, e.g. `1.500 €`.
    pub display_value: String,
}

#[derive(Debug, Serialize)]
pub struct BandSlice {
    pub band: &'static str,
    pub label: &'static str,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct VelocitySlice {
    pub date: NaiveDate,
    pub label: String,
    pub count: u64,
}
