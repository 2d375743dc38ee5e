//! Client-side chart aggregations over a deal snapshot.
//!
//! All three computations are pure: same deals plus same reference instant
//! gives identical output. Malformed input (negative value, health score
//! outside 0..=100, zero-day window) fails the whole call rather than
//! leaking a partial aggregate into a chart.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::models::{Deal, InvalidDeal, Stage};

pub const DEFAULT_VELOCITY_WINDOW_DAYS: u32 = 30;

/// A velocity window longer than a year has no chart to back it and would
/// eventually walk the date range out of chrono's representable span.
pub const MAX_VELOCITY_WINDOW_DAYS: u32 = 365;

/// Health score thresholds are fixed product constants (40/60/80), lower
/// bound inclusive, upper bound exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Critical, Band::Warning, Band::Good, Band::Excellent];

    pub fn of_score(score: i32) -> Band {
        if score < 40 {
            Band::Critical
        } else if score < 60 {
            Band::Warning
        } else if score < 80 {
            Band::Good
        } else {
            Band::Excellent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::Critical => "critical",
            Band::Warning => "warning",
            Band::Good => "good",
            Band::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageBucket {
    pub stage: Stage,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthBandCount {
    pub band: Band,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityPoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    InvalidDeal(InvalidDeal),
    InvalidWindow { window_days: u32 },
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::InvalidDeal(err) => err.fmt(f),
            MetricsError::InvalidWindow { window_days } => {
                write!(
                    f,
                    "velocity window must be 1..={MAX_VELOCITY_WINDOW_DAYS} days, got {window_days}"
                )
            }
        }
    }
}

impl std::error::Error for MetricsError {}

impl From<InvalidDeal> for MetricsError {
    fn from(err: InvalidDeal) -> Self {
        MetricsError::InvalidDeal(err)
    }
}

/// Sums deal value per pipeline stage. Always returns exactly six buckets in
/// canonical order; stages with no deals carry a zero total.
pub fn aggregate_by_stage(deals: &[Deal]) -> Result<Vec<StageBucket>, MetricsError> {
    let mut totals: HashMap<Stage, Decimal> = HashMap::with_capacity(Stage::ALL.len());

    for deal in deals {
        deal.validate()?;
        *totals.entry(deal.stage).or_insert(Decimal::ZERO) += deal.value;
    }

    Ok(Stage::ALL
        .iter()
        .map(|&stage| StageBucket {
            stage,
            total_value: totals.get(&stage).copied().unwrap_or(Decimal::ZERO),
        })
        .collect())
}

/// Partitions deals into the four health bands. Every deal lands in exactly
/// one band, so the four counts sum to the input length. Empty bands are
/// kept; the rendering layer decides whether to filter them.
pub fn classify_by_health(deals: &[Deal]) -> Result<[HealthBandCount; 4], MetricsError> {
    let mut counts = [0u64; 4];

    for deal in deals {
        deal.validate()?;
        counts[Band::of_score(deal.health_score) as usize] += 1;
    }

    Ok([
        HealthBandCount { band: Band::Critical, count: counts[0] },
        HealthBandCount { band: Band::Warning, count: counts[1] },
        HealthBandCount { band: Band::Good, count: counts[2] },
        HealthBandCount { band: Band::Excellent, count: counts[3] },
    ])
}

/// Counts deal creations per calendar day over a trailing window ending at
/// (and including) the calendar date of `reference_now`, oldest day first,
/// zero-filled.
///
/// Day bucketing happens in whichever time zone the caller expressed the
/// timestamps in; `reference_now` and every `created_at` must share that
/// zone. Deals created outside the window are ignored.
pub fn compute_velocity(
    deals: &[Deal],
    reference_now: NaiveDateTime,
    window_days: u32,
) -> Result<Vec<VelocityPoint>, MetricsError> {
    if window_days == 0 || window_days > MAX_VELOCITY_WINDOW_DAYS {
        return Err(MetricsError::InvalidWindow { window_days });
    }

    let today = reference_now.date();
    let window_start = today - Duration::days(i64::from(window_days) - 1);

    let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
    for deal in deals {
        deal.validate()?;
        let created = deal.created_at.date();
        if created >= window_start && created <= today {
            *per_day.entry(created).or_insert(0) += 1;
        }
    }

    let mut points = Vec::with_capacity(window_days as usize);
    for offset in (0..i64::from(window_days)).rev() {
        let date = today - Duration::days(offset);
        points.push(VelocityPoint {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn deal(id: i64, stage: Stage, value: Decimal, health_score: i32, created_at: &str) -> Deal {
        let created_at: NaiveDateTime = created_at.parse().expect("timestamp literal");
        Deal {
            id,
            title: format!("Deal {id}"),
            company_name: "Muster GmbH".to_string(),
            contact_person: None,
            contact_email: None,
            contact_phone: None,
            value,
            stage,
            health_score,
            last_contact_at: None,
            expected_close_date: None,
            notes: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn stage_totals_match_scenario() {
        let deals = vec![
            deal(1, Stage::Lead, dec!(1000), 50, "2024-03-01T08:00:00"),
            deal(2, Stage::Lead, dec!(500), 50, "2024-03-02T08:00:00"),
            deal(3, Stage::Negotiation, dec!(2000), 50, "2024-03-03T08:00:00"),
        ];

        let buckets = aggregate_by_stage(&deals).unwrap();
        let by_stage: Vec<(Stage, Decimal)> =
            buckets.iter().map(|b| (b.stage, b.total_value)).collect();
        assert_eq!(
            by_stage,
            vec![
                (Stage::Lead, dec!(1500)),
                (Stage::Qualified, dec!(0)),
                (Stage::Proposal, dec!(0)),
                (Stage::Negotiation, dec!(2000)),
                (Stage::ClosedWon, dec!(0)),
                (Stage::ClosedLost, dec!(0)),
            ]
        );
    }

    #[test]
    fn stage_buckets_are_complete_for_empty_input() {
        let buckets = aggregate_by_stage(&[]).unwrap();
        assert_eq!(buckets.len(), 6);
        let stages: Vec<Stage> = buckets.iter().map(|b| b.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        assert!(buckets.iter().all(|b| b.total_value == Decimal::ZERO));
    }

    #[test]
    fn stage_totals_conserve_input_sum_without_drift() {
        // 0.1 + 0.2-style cents that would drift under f64 accumulation.
        let mut deals = Vec::new();
        for id in 0..1000 {
            let stage = Stage::ALL[(id % 6) as usize];
            deals.push(deal(id, stage, dec!(0.10), 50, "2024-03-01T08:00:00"));
        }

        let buckets = aggregate_by_stage(&deals).unwrap();
        let bucket_sum: Decimal = buckets.iter().map(|b| b.total_value).sum();
        let input_sum: Decimal = deals.iter().map(|d| d.value).sum();
        assert_eq!(bucket_sum, input_sum);
        assert_eq!(bucket_sum, dec!(100.00));
    }

    #[test]
    fn stage_aggregation_rejects_negative_value() {
        let deals = vec![deal(1, Stage::Lead, dec!(-10), 50, "2024-03-01T08:00:00")];
        assert!(matches!(
            aggregate_by_stage(&deals),
            Err(MetricsError::InvalidDeal(InvalidDeal::NegativeValue { id: 1, .. }))
        ));
    }

    #[test]
    fn health_bands_partition_the_input() {
        let scores = [0, 12, 39, 40, 47, 59, 60, 72, 79, 80, 93, 100];
        let deals: Vec<Deal> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| deal(i as i64, Stage::Lead, dec!(1), score, "2024-03-01T08:00:00"))
            .collect();

        let bands = classify_by_health(&deals).unwrap();
        let total: u64 = bands.iter().map(|b| b.count).sum();
        assert_eq!(total as usize, deals.len());
    }

    #[test]
    fn health_band_boundaries_are_exact() {
        let scores = [39, 40, 59, 60, 79, 80, 100];
        let deals: Vec<Deal> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| deal(i as i64, Stage::Lead, dec!(1), score, "2024-03-01T08:00:00"))
            .collect();

        let bands = classify_by_health(&deals).unwrap();
        assert_eq!(bands[0], HealthBandCount { band: Band::Critical, count: 1 });
        assert_eq!(bands[1], HealthBandCount { band: Band::Warning, count: 2 });
        assert_eq!(bands[2], HealthBandCount { band: Band::Good, count: 2 });
        assert_eq!(bands[3], HealthBandCount { band: Band::Excellent, count: 2 });
    }

    #[test]
    fn empty_bands_are_reported_not_dropped() {
        let bands = classify_by_health(&[]).unwrap();
        assert_eq!(bands.len(), 4);
        let order: Vec<Band> = bands.iter().map(|b| b.band).collect();
        assert_eq!(order, Band::ALL.to_vec());
        assert!(bands.iter().all(|b| b.count == 0));
    }

    #[test]
    fn health_classification_rejects_out_of_range_score() {
        let deals = vec![deal(9, Stage::Lead, dec!(1), 104, "2024-03-01T08:00:00")];
        assert!(matches!(
            classify_by_health(&deals),
            Err(MetricsError::InvalidDeal(InvalidDeal::HealthScoreOutOfRange {
                id: 9,
                score: 104
            }))
        ));
    }

    #[test]
    fn velocity_matches_midnight_boundary_scenario() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        let deals = vec![
            deal(1, Stage::Lead, dec!(1), 50, "2024-03-13T23:59:00"),
            deal(2, Stage::Lead, dec!(1), 50, "2024-03-14T00:00:01"),
            deal(3, Stage::Lead, dec!(1), 50, "2024-03-14T12:00:00"),
            deal(4, Stage::Lead, dec!(1), 50, "2024-03-16T00:00:00"),
        ];

        let points = compute_velocity(&deals, now, 3).unwrap();
        let expected: Vec<(NaiveDate, u64)> = vec![
            ("2024-03-13".parse().unwrap(), 1),
            ("2024-03-14".parse().unwrap(), 2),
            ("2024-03-15".parse().unwrap(), 0),
        ];
        let actual: Vec<(NaiveDate, u64)> = points.iter().map(|p| (p.date, p.count)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn velocity_always_returns_window_days_points() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        for window in [1, 3, 7, 30, 90] {
            let points = compute_velocity(&[], now, window).unwrap();
            assert_eq!(points.len(), window as usize);
            assert!(points.iter().all(|p| p.count == 0));
            assert_eq!(points.last().unwrap().date, now.date());
        }
    }

    #[test]
    fn velocity_points_are_chronological_and_consecutive() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        let points = compute_velocity(&[], now, 30).unwrap();
        for pair in points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn velocity_ignores_deals_outside_window() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        let deals = vec![
            deal(1, Stage::Lead, dec!(1), 50, "2024-01-01T08:00:00"),
            deal(2, Stage::Lead, dec!(1), 50, "2024-03-15T09:59:59"),
        ];

        let points = compute_velocity(&deals, now, 7).unwrap();
        let total: u64 = points.iter().map(|p| p.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn velocity_rejects_zero_window() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        assert_eq!(
            compute_velocity(&[], now, 0),
            Err(MetricsError::InvalidWindow { window_days: 0 })
        );
    }

    #[test]
    fn velocity_rejects_oversized_window() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        assert!(compute_velocity(&[], now, MAX_VELOCITY_WINDOW_DAYS).is_ok());
        assert_eq!(
            compute_velocity(&[], now, MAX_VELOCITY_WINDOW_DAYS + 1),
            Err(MetricsError::InvalidWindow {
                window_days: MAX_VELOCITY_WINDOW_DAYS + 1
            })
        );
        assert_eq!(
            compute_velocity(&[], now, u32::MAX),
            Err(MetricsError::InvalidWindow { window_days: u32::MAX })
        );
    }

    #[test]
    fn aggregations_are_idempotent() {
        let now: NaiveDateTime = "2024-03-15T10:00:00".parse().unwrap();
        let deals = vec![
            deal(1, Stage::Qualified, dec!(777.77), 35, "2024-03-12T08:00:00"),
            deal(2, Stage::ClosedWon, dec!(100000), 88, "2024-03-14T20:30:00"),
        ];

        assert_eq!(aggregate_by_stage(&deals).unwrap(), aggregate_by_stage(&deals).unwrap());
        assert_eq!(classify_by_health(&deals).unwrap(), classify_by_health(&deals).unwrap());
        assert_eq!(
            compute_velocity(&deals, now, DEFAULT_VELOCITY_WINDOW_DAYS).unwrap(),
            compute_velocity(&deals, now, DEFAULT_VELOCITY_WINDOW_DAYS).unwrap()
        );
    }
}
