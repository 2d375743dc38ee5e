//! German display formatting for amounts, dates and labels.
//!
//! Locale handling is deliberately hardcoded to de-DE; DealFlow ships
//! German-only.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::metrics::Band;
use crate::models::Stage;

/// de-DE euro amount with cents, e.g. `1.234,56 €`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let abs = rounded.abs();
    let cents = (abs.fract() * Decimal::from(100)).round().to_i64().unwrap_or(0);
    format!("{sign}{},{cents:02} €", group_thousands(abs.trunc()))
}

/// de-DE euro amount without cents, e.g. `48.000 €`. Used for chart axes.
pub fn format_whole_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{} €", group_thousands(rounded.abs()))
}

// Expects a non-negative integral amount.
fn group_thousands(amount: Decimal) -> String {
    let raw = amount.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, digit) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_date_time(ts: NaiveDateTime) -> String {
    ts.format("%d.%m.%Y %H:%M").to_string()
}

/// Short day label for the velocity axis, e.g. `26.07`.
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// "Heute", "Gestern", "vor 3 Tagen", ... relative to an injected `now`.
pub fn format_relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (now - then).num_days();
    if days <= 0 {
        "Heute".to_string()
    } else if days == 1 {
        "Gestern".to_string()
    } else if days < 7 {
        format!("vor {days} Tagen")
    } else if days < 30 {
        format!("vor {} Wochen", days / 7)
    } else if days < 365 {
        format!("vor {} Monaten", days / 30)
    } else {
        format!("vor {} Jahren", days / 365)
    }
}

pub fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Lead => "Lead",
        Stage::Qualified => "Qualifiziert",
        Stage::Proposal => "Angebot",
        Stage::Negotiation => "Verhandlung",
        Stage::ClosedWon => "Gewonnen",
        Stage::ClosedLost => "Verloren",
    }
}

pub fn band_label(band: Band) -> &'static str {
    match band {
        Band::Critical => "Kritisch (<40%)",
        Band::Warning => "Warnung (40-60%)",
        Band::Good => "Gut (60-80%)",
        Band::Excellent => "Exzellent (>80%)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_uses_german_separators() {
        assert_eq!(format_currency(dec!(1234567.89)), "1.234.567,89 €");
        assert_eq!(format_currency(dec!(0)), "0,00 €");
        assert_eq!(format_currency(dec!(999.5)), "999,50 €");
        assert_eq!(format_currency(dec!(-1500.25)), "-1.500,25 €");
    }

    #[test]
    fn whole_currency_drops_cents() {
        assert_eq!(format_whole_currency(dec!(48000)), "48.000 €");
        assert_eq!(format_whole_currency(dec!(999.49)), "999 €");
        assert_eq!(format_whole_currency(dec!(0)), "0 €");
    }

    #[test]
    fn dates_use_german_order() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05.03.2024");
        assert_eq!(format_day_label(date), "05.03");
        let ts = date.and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(format_date_time(ts), "05.03.2024 14:30");
    }

    #[test]
    fn relative_time_tiers() {
        let now: NaiveDateTime = "2024-03-15T12:00:00".parse().unwrap();
        let at = |s: &str| s.parse::<NaiveDateTime>().unwrap();

        assert_eq!(format_relative_time(at("2024-03-15T08:00:00"), now), "Heute");
        assert_eq!(format_relative_time(at("2024-03-14T12:00:00"), now), "Gestern");
        assert_eq!(format_relative_time(at("2024-03-12T12:00:00"), now), "vor 3 Tagen");
        assert_eq!(format_relative_time(at("2024-03-01T12:00:00"), now), "vor 2 Wochen");
        assert_eq!(format_relative_time(at("2024-01-15T12:00:00"), now), "vor 2 Monaten");
        assert_eq!(format_relative_time(at("2021-03-15T12:00:00"), now), "vor 3 Jahren");
    }

    #[test]
    fn labels_are_german() {
        assert_eq!(stage_label(Stage::Proposal), "Angebot");
        assert_eq!(stage_label(Stage::ClosedLost), "Verloren");
        assert_eq!(band_label(Band::Critical), "Kritisch (<40%)");
        assert_eq!(band_label(Band::Excellent), "Exzellent (>80%)");
    }
}
