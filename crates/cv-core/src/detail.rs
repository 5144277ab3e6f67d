//! Detail panel projections and the filter summary line

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::{Conflict, ConflictId, Dataset, Event, EventId, ViolenceType};
use crate::state::FilterState;

/// Placeholder shown when an event's owning conflict is missing
pub const UNKNOWN_CONFLICT: &str = "Unknown conflict";

/// Summary of a selected conflict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictDetail {
    pub id: ConflictId,
    pub name: String,
    pub violence_type: ViolenceType,
    pub best: u64,
    pub low: u64,
    pub high: u64,
    pub civilian_deaths: u64,
    /// Civilian share of the best estimate, rounded percent
    pub civilian_percent: u32,
    pub combatant_deaths: u64,
    pub start_year: i32,
    pub end_year: i32,
    pub event_count: u64,
}

impl ConflictDetail {
    pub fn from_conflict(conflict: &Conflict) -> Self {
        Self {
            id: conflict.id,
            name: conflict.name.clone(),
            violence_type: conflict.violence_type,
            best: conflict.best,
            low: conflict.low,
            high: conflict.high,
            civilian_deaths: conflict.civilian_deaths,
            civilian_percent: percent(conflict.civilian_ratio),
            combatant_deaths: conflict.combatant_deaths,
            start_year: conflict.start_year,
            end_year: conflict.end_year,
            event_count: conflict.event_count,
        }
    }

    /// "best (range: low - high)"
    pub fn death_range(&self) -> String {
        format!(
            "{} (range: {} - {})",
            format_count(self.best),
            format_count(self.low),
            format_count(self.high)
        )
    }

    pub fn year_span(&self) -> String {
        format!("{} - {}", self.start_year, self.end_year)
    }
}

impl fmt::Display for ConflictDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Violence Type:     {}", self.violence_type.label())?;
        writeln!(f, "  Estimated Deaths:  {}", self.death_range())?;
        writeln!(
            f,
            "  Civilian Deaths:   {} ({}% of total)",
            format_count(self.civilian_deaths),
            self.civilian_percent
        )?;
        writeln!(f, "  Combatant Deaths:  {}", format_count(self.combatant_deaths))?;
        writeln!(f, "  Duration:          {}", self.year_span())?;
        write!(f, "  Number of Events:  {}", format_count(self.event_count))
    }
}

/// Owning conflict as shown in the event detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConflictContext {
    Known {
        id: ConflictId,
        name: String,
        best: u64,
        event_count: u64,
        start_year: i32,
        end_year: i32,
    },
    Unknown,
}

impl ConflictContext {
    fn resolve(conflict: Option<&Conflict>) -> Self {
        match conflict {
            Some(conflict) => ConflictContext::Known {
                id: conflict.id,
                name: conflict.name.clone(),
                best: conflict.best,
                event_count: conflict.event_count,
                start_year: conflict.start_year,
                end_year: conflict.end_year,
            },
            None => ConflictContext::Unknown,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConflictContext::Known { name, .. } => name,
            ConflictContext::Unknown => UNKNOWN_CONFLICT,
        }
    }
}

/// Summary of a selected event merged with its conflict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetail {
    pub id: EventId,
    pub date: NaiveDate,
    pub country: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub deaths: u32,
    pub civilian_deaths: u32,
    pub combatant_deaths: u32,
    pub violence_type: ViolenceType,
    pub conflict: ConflictContext,
}

impl EventDetail {
    /// Project `event` against the data store. A missing conflict becomes
    /// [`ConflictContext::Unknown`].
    pub fn from_event(event: &Event, store: &Dataset) -> Self {
        Self {
            id: event.id,
            date: event.date,
            country: event.country.clone(),
            region: event.region.clone(),
            latitude: event.latitude,
            longitude: event.longitude,
            deaths: event.best,
            civilian_deaths: event.civilian_deaths,
            combatant_deaths: event.combatant_deaths,
            violence_type: event.type_of_violence,
            conflict: ConflictContext::resolve(store.conflict(event.conflict_id)),
        }
    }

    /// "June 1, 1990"
    pub fn date_text(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// "Country, Region" or just the country
    pub fn location(&self) -> String {
        match &self.region {
            Some(region) if !region.is_empty() => format!("{}, {}", self.country, region),
            _ => self.country.clone(),
        }
    }

    pub fn coordinates(&self) -> String {
        format!("{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

impl fmt::Display for EventDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event Details")?;
        writeln!(f, "  Date:              {}", self.date_text())?;
        writeln!(f, "  Location:          {} ({})", self.location(), self.coordinates())?;
        writeln!(f, "  Deaths:            {}", format_count(self.deaths as u64))?;
        writeln!(f, "  Civilian Deaths:   {}", format_count(self.civilian_deaths as u64))?;
        writeln!(f, "  Combatant Deaths:  {}", format_count(self.combatant_deaths as u64))?;
        writeln!(f, "  Violence Type:     {}", self.violence_type.label())?;
        write!(f, "  Part of Conflict:  {}", self.conflict.name())?;
        if let ConflictContext::Known {
            best,
            event_count,
            start_year,
            end_year,
            ..
        } = &self.conflict
        {
            write!(
                f,
                "\n    Total Deaths: {}, Events: {}, Duration: {} - {}",
                format_count(*best),
                format_count(*event_count),
                start_year,
                end_year
            )?;
        }
        Ok(())
    }
}

/// What the detail panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Detail {
    Conflict(ConflictDetail),
    Event(EventDetail),
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Conflict(detail) => fmt::Display::fmt(detail, f),
            Detail::Event(detail) => fmt::Display::fmt(detail, f),
        }
    }
}

/// One-line description of the active filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub event_count: usize,
    pub text: String,
}

impl FilterSummary {
    pub fn new(state: &FilterState, filtered: &Dataset) -> Self {
        let event_count = filtered.events.len();
        let mut text = format!("Showing {} events", format_count(event_count as u64));

        if !state.has_default_time_range() {
            text.push_str(&format!(
                " ({}-{})",
                state.time_range.start_year(),
                state.time_range.end_year()
            ));
        }

        if state.violence_types.len() < ViolenceType::ALL.len() {
            let labels: Vec<&str> = state.violence_types.iter().map(ViolenceType::label).collect();
            text.push_str(&format!(" - {}", labels.join(", ")));
        }

        Self { event_count, text }
    }
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn percent(ratio: f64) -> u32 {
    if ratio.is_finite() && ratio > 0.0 {
        (ratio * 100.0).round() as u32
    } else {
        0
    }
}

/// Format a count with thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimeRange;

    fn conflict() -> Conflict {
        Conflict {
            id: 9,
            name: "Syria: Government - IS".to_string(),
            short_name: "Syria: Gov - IS".to_string(),
            violence_type: ViolenceType::StateBased,
            low: 7000,
            best: 10000,
            high: 13000,
            civilian_deaths: 4300,
            combatant_deaths: 5000,
            civilian_ratio: 0.43,
            start_year: 2013,
            end_year: 2019,
            event_count: 1234,
        }
    }

    fn event(conflict_id: ConflictId) -> Event {
        Event {
            id: 1,
            date: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
            latitude: 33.5,
            longitude: 36.25,
            type_of_violence: ViolenceType::OneSided,
            best: 12,
            civilian_deaths: 10,
            combatant_deaths: 2,
            conflict_id,
            country: "Syria".to_string(),
            region: Some("Aleppo".to_string()),
        }
    }

    #[test]
    fn test_conflict_detail() {
        let detail = ConflictDetail::from_conflict(&conflict());
        assert_eq!(detail.civilian_percent, 43);
        assert_eq!(detail.death_range(), "10,000 (range: 7,000 - 13,000)");
        assert_eq!(detail.year_span(), "2013 - 2019");
        assert!(detail.to_string().contains("Number of Events:  1,234"));
    }

    #[test]
    fn test_event_detail_with_conflict() {
        let store = Dataset { conflicts: vec![conflict()], ..Dataset::default() };
        let detail = EventDetail::from_event(&event(9), &store);
        assert_eq!(detail.date_text(), "June 1, 1990");
        assert_eq!(detail.location(), "Syria, Aleppo");
        assert_eq!(detail.coordinates(), "33.5000°, 36.2500°");
        assert_eq!(detail.conflict.name(), "Syria: Government - IS");
    }

    #[test]
    fn test_event_detail_unknown_conflict() {
        let detail = EventDetail::from_event(&event(404), &Dataset::default());
        assert_eq!(detail.conflict, ConflictContext::Unknown);
        assert!(detail.to_string().ends_with("Part of Conflict:  Unknown conflict"));
    }

    #[test]
    fn test_filter_summary() {
        let filtered = Dataset::default();
        let mut state = FilterState::default();
        assert_eq!(FilterSummary::new(&state, &filtered).text, "Showing 0 events");

        state.time_range = TimeRange::years(1990, 1995).unwrap();
        state.violence_types.toggle(ViolenceType::NonState);
        assert_eq!(
            FilterSummary::new(&state, &filtered).text,
            "Showing 0 events (1990-1995) - State-based, One-sided"
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
