//! Conflict dataset model
//!
//! Records are loaded once at startup and never mutated afterwards. The same
//! [`Dataset`] type is used for the full data store and for filtered views of it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier of a conflict
pub type ConflictId = u32;

/// Unique identifier of an event
pub type EventId = u64;

/// The three UCDP violence categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ViolenceType {
    /// Conflict between two organized actors, one of them a government
    StateBased = 1,
    /// Conflict between organized actors, none of them a government
    NonState = 2,
    /// Violence by an organized actor against civilians
    OneSided = 3,
}

impl ViolenceType {
    /// All categories in code order
    pub const ALL: [ViolenceType; 3] = [
        ViolenceType::StateBased,
        ViolenceType::NonState,
        ViolenceType::OneSided,
    ];

    /// Numeric category code used in the source data
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a numeric category code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ViolenceType::StateBased),
            2 => Some(ViolenceType::NonState),
            3 => Some(ViolenceType::OneSided),
            _ => None,
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            ViolenceType::StateBased => "State-based",
            ViolenceType::NonState => "Non-state",
            ViolenceType::OneSided => "One-sided",
        }
    }
}

impl TryFrom<u8> for ViolenceType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown violence type code {}", code))
    }
}

impl From<ViolenceType> for u8 {
    fn from(violence_type: ViolenceType) -> Self {
        violence_type.code()
    }
}

impl fmt::Display for ViolenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    /// Day of the incident
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,

    pub latitude: f64,
    pub longitude: f64,

    pub type_of_violence: ViolenceType,

    /// Best estimate of deaths
    pub best: u32,

    #[serde(default)]
    pub civilian_deaths: u32,

    #[serde(default)]
    pub combatant_deaths: u32,

    /// Owning conflict. May point at a conflict missing from the data store.
    pub conflict_id: ConflictId,

    pub country: String,

    #[serde(default)]
    pub region: Option<String>,
}

/// Aggregate of all events sharing a named conflict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub id: ConflictId,

    /// Full display name
    pub name: String,

    /// Truncated name for space-constrained labels
    #[serde(default)]
    pub short_name: String,

    pub violence_type: ViolenceType,

    /// Death estimates, assumed `low <= best <= high`
    pub low: u64,
    pub best: u64,
    pub high: u64,

    pub civilian_deaths: u64,
    pub combatant_deaths: u64,

    /// `civilian_deaths / best`
    pub civilian_ratio: f64,

    pub start_year: i32,
    pub end_year: i32,

    pub event_count: u64,
}

impl Conflict {
    /// Label used by compact views
    pub fn display_label(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }

    /// Deaths attributed neither to civilians nor to combatants
    pub fn unattributed_deaths(&self) -> u64 {
        self.best
            .saturating_sub(self.civilian_deaths)
            .saturating_sub(self.combatant_deaths)
    }
}

/// Pre-bucketed monthly deaths for one violence type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub year: i32,

    /// Month of year, 1-based
    pub month: u32,

    #[serde(rename = "type")]
    pub violence_type: ViolenceType,

    pub deaths: u64,
}

impl MonthlyAggregate {
    /// First day of the bucket, `None` when `month` is out of range
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Events, conflicts and monthly aggregates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub events: Vec<Event>,
    pub conflicts: Vec<Conflict>,
    pub monthly_deaths: Vec<MonthlyAggregate>,
}

impl Dataset {
    /// Look up an event by id
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Look up a conflict by id
    pub fn conflict(&self, id: ConflictId) -> Option<&Conflict> {
        self.conflicts.iter().find(|conflict| conflict.id == id)
    }

    /// Whether all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.conflicts.is_empty() && self.monthly_deaths.is_empty()
    }

    /// Fill in short names for conflicts loaded without one
    pub fn fill_short_names(&mut self) {
        for conflict in &mut self.conflicts {
            if conflict.short_name.is_empty() {
                conflict.short_name = short_name_for(&conflict.name);
            }
        }
    }
}

const SHORT_NAME_MAX: usize = 40;

/// Derive a compact label from a full conflict name
pub fn short_name_for(name: &str) -> String {
    let short = name.replace("Government of ", "").replace("Government", "Gov");
    if short.chars().count() > SHORT_NAME_MAX {
        let truncated: String = short.chars().take(SHORT_NAME_MAX - 3).collect();
        format!("{}...", truncated)
    } else {
        short
    }
}

/// Accept `YYYY-MM-DD` with an optional trailing time part
fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

/// Parse the day portion of an ISO date or datetime string
pub fn parse_day(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let day = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
}
