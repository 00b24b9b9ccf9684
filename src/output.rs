// src/output.rs
use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::config::consts::DATE_TIME_FORMAT;
use crate::data::{EnrichedRecord, Output};
use crate::error::Result;

/// `"25.10.2025, 08:00"` → timestamp. Anything else is `None`.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_TIME_FORMAT).ok()
}

/// Chronological, then location, then status. Unparseable times sort first.
/// Stable, so fully equal keys keep their incoming order.
pub fn sort_records(records: &mut [EnrichedRecord]) {
    records.sort_by(compare);
}

pub fn assemble(mut records: Vec<EnrichedRecord>) -> Output {
    sort_records(&mut records);
    Output { total_count: records.len(), exam_appointments: records }
}

pub fn to_json(output: &Output, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    json.push('\n');
    Ok(json)
}

fn compare(a: &EnrichedRecord, b: &EnrichedRecord) -> Ordering {
    let (a, b) = (&a.summary, &b.summary);
    // Option orders None before Some, which is what we want
    parse_date_time(&a.date_time)
        .cmp(&parse_date_time(&b.date_time))
        .then_with(|| a.location.cmp(&b.location))
        .then_with(|| a.status.cmp(&b.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DetailAttributes, SummaryRecord};
    use pretty_assertions::assert_eq;

    fn rec(date_time: &str, location: &str, status: &str) -> EnrichedRecord {
        EnrichedRecord::degraded(SummaryRecord {
            date_time: s!(date_time),
            location: s!(location),
            city: s!("Augsburg"),
            region: s!("Schwaben"),
            status: s!(status),
        })
    }

    fn keys(out: &Output) -> Vec<(&str, &str, &str)> {
        out.exam_appointments
            .iter()
            .map(|r| (r.summary.date_time.as_str(), r.summary.location.as_str(), r.summary.status.as_str()))
            .collect()
    }

    #[test]
    fn parses_listing_timestamps() {
        assert!(parse_date_time("25.10.2025, 08:00").is_some());
        assert!(parse_date_time(" 01.01.2026, 18:30 ").is_some());
        assert!(parse_date_time("n.V., ab 10:00").is_none());
        assert!(parse_date_time("2025-10-25 08:00").is_none());
    }

    #[test]
    fn orders_chronologically_across_months() {
        // lexical order would put 03.11 before 12.09 and 25.10
        let out = assemble(vec![
            rec("03.11.2025, 18:00", "B", "frei"),
            rec("25.10.2025, 08:00", "A", "frei"),
            rec("12.09.2025, 09:30", "C", "frei"),
        ]);
        assert_eq!(
            keys(&out),
            vec![
                ("12.09.2025, 09:30", "C", "frei"),
                ("25.10.2025, 08:00", "A", "frei"),
                ("03.11.2025, 18:00", "B", "frei"),
            ]
        );
        assert_eq!(out.total_count, 3);
    }

    #[test]
    fn unparseable_times_come_first() {
        let out = assemble(vec![
            rec("25.10.2025, 08:00", "A", "frei"),
            rec("n.V.", "Z", "frei"),
            rec("", "B", "frei"),
        ]);
        assert_eq!(
            keys(&out),
            vec![("", "B", "frei"), ("n.V.", "Z", "frei"), ("25.10.2025, 08:00", "A", "frei")]
        );
    }

    #[test]
    fn ties_break_on_location_then_status() {
        let out = assemble(vec![
            rec("25.10.2025, 08:00", "Stadthalle", "frei"),
            rec("25.10.2025, 08:00", "Gasthof Post", "frei"),
            rec("25.10.2025, 08:00", "Gasthof Post", "belegt"),
        ]);
        assert_eq!(
            keys(&out),
            vec![
                ("25.10.2025, 08:00", "Gasthof Post", "belegt"),
                ("25.10.2025, 08:00", "Gasthof Post", "frei"),
                ("25.10.2025, 08:00", "Stadthalle", "frei"),
            ]
        );
    }

    #[test]
    fn empty_run_still_has_both_keys() {
        let json = to_json(&assemble(Vec::new()), false).unwrap();
        assert_eq!(json.trim(), r#"{"exam_appointments":[],"total_count":0}"#);
    }

    #[test]
    fn json_omits_absent_details_only() {
        let mut enriched = rec("25.10.2025, 08:00", "Gasthof Post", "frei");
        enriched.details = DetailAttributes {
            room: Some(s!("Großer Saal")),
            min_participants: Some(s!("5")),
            ..Default::default()
        };
        let degraded = rec("26.10.2025, 08:00", "Stadthalle", "belegt");

        let json = to_json(&assemble(vec![degraded, enriched]), true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["total_count"], 2);
        let first = v["exam_appointments"][0].as_object().unwrap();
        assert_eq!(first["room"], "Großer Saal");
        assert_eq!(first["min_participants"], "5");
        assert!(!first.contains_key("street"));

        let second = v["exam_appointments"][1].as_object().unwrap();
        let mut fields: Vec<&str> = second.keys().map(String::as_str).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["city", "date_time", "location", "region", "status"]);

        assert!(json.contains("\n  \"exam_appointments\""), "two-space indentation");
    }
}
