// src/data.rs
use serde::{Deserialize, Serialize};

/// One row of the appointment listing, as scraped before enrichment.
/// Identity is `(date_time, location)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub date_time: String,
    pub location: String,
    pub city: String,
    pub region: String,
    pub status: String,
}

impl SummaryRecord {
    pub fn key(&self) -> (&str, &str) {
        (&self.date_time, &self.location)
    }
}

/// Detail attributes a label on the detail page can feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailField {
    ExamVenue,
    Room,
    PostalCode,
    Street,
    HouseNumber,
    ExamDate,
    ExamStartTime,
    Headphones,
    WheelchairAccessible,
    MinParticipants,
    MaxParticipants,
    CurrentParticipants,
    DetailStatus,
}

/// Everything the detail page may add. All optional; all `None` means degraded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headphones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_accessible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_participants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_status: Option<String>,
}

impl DetailAttributes {
    pub fn slot_mut(&mut self, field: DetailField) -> &mut Option<String> {
        use DetailField::*;
        match field {
            ExamVenue            => &mut self.exam_venue,
            Room                 => &mut self.room,
            PostalCode           => &mut self.postal_code,
            Street               => &mut self.street,
            HouseNumber          => &mut self.house_number,
            ExamDate             => &mut self.exam_date,
            ExamStartTime        => &mut self.exam_start_time,
            Headphones           => &mut self.headphones,
            WheelchairAccessible => &mut self.wheelchair_accessible,
            MinParticipants      => &mut self.min_participants,
            MaxParticipants      => &mut self.max_participants,
            CurrentParticipants  => &mut self.current_participants,
            DetailStatus         => &mut self.detail_status,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Summary plus whatever the detail conversation produced.
/// Serialized flat: summary fields always, detail fields only when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub summary: SummaryRecord,
    #[serde(flatten)]
    pub details: DetailAttributes,
}

impl EnrichedRecord {
    pub fn enriched(summary: SummaryRecord, details: DetailAttributes) -> Self {
        Self { summary, details }
    }

    /// Summary-only result of a failed enrichment.
    pub fn degraded(summary: SummaryRecord) -> Self {
        Self { summary, details: DetailAttributes::default() }
    }

    pub fn is_degraded(&self) -> bool {
        self.details.is_empty()
    }
}

/// The JSON artifact handed to storage and diff tooling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub exam_appointments: Vec<EnrichedRecord>,
    pub total_count: usize,
}
