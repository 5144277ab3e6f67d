//! Stacked monthly deaths timeline

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use cv_core::data::MonthlyAggregate;
use cv_core::{ConflictId, Dataset, LinkedView, ViewKind, ViolenceType};

use crate::style::{self, violence_color, Color, ElementStyle, Styled, HIGHLIGHT_BAND};

/// Deaths of one month, split by category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub date: NaiveDate,
    pub state_based: u64,
    pub non_state: u64,
    pub one_sided: u64,
}

impl MonthlyPoint {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            state_based: 0,
            non_state: 0,
            one_sided: 0,
        }
    }

    pub fn deaths(&self, violence_type: ViolenceType) -> u64 {
        match violence_type {
            ViolenceType::StateBased => self.state_based,
            ViolenceType::NonState => self.non_state,
            ViolenceType::OneSided => self.one_sided,
        }
    }

    fn deaths_mut(&mut self, violence_type: ViolenceType) -> &mut u64 {
        match violence_type {
            ViolenceType::StateBased => &mut self.state_based,
            ViolenceType::NonState => &mut self.non_state,
            ViolenceType::OneSided => &mut self.one_sided,
        }
    }

    pub fn total(&self) -> u64 {
        self.state_based + self.non_state + self.one_sided
    }
}

/// One stacked layer
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineArea {
    pub violence_type: ViolenceType,
    pub color: Color,
    pub style: ElementStyle,
}

impl Styled for TimelineArea {
    fn key(&self) -> u64 {
        u64::from(self.violence_type.code())
    }

    fn conflict(&self) -> Option<ConflictId> {
        None
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}

/// Shaded span of a highlighted conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightBand {
    pub conflict: ConflictId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Color,
}

/// Sum aggregates into one point per month, oldest first
pub fn aggregate_by_month(monthly: &[MonthlyAggregate]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<NaiveDate, MonthlyPoint> = BTreeMap::new();

    for record in monthly {
        let Some(date) = record.first_day() else {
            continue;
        };
        let point = months.entry(date).or_insert_with(|| MonthlyPoint::new(date));
        *point.deaths_mut(record.violence_type) += record.deaths;
    }

    months.into_values().collect()
}

/// Timeline view
#[derive(Default)]
pub struct TimelineView {
    points: Vec<MonthlyPoint>,
    areas: Vec<TimelineArea>,
    /// Year span of every conflict in the last render
    spans: BTreeMap<ConflictId, (i32, i32)>,
    band: Option<HighlightBand>,
    local_hover: Option<u64>,
}

impl TimelineView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    pub fn areas(&self) -> &[TimelineArea] {
        &self.areas
    }

    pub fn band(&self) -> Option<&HighlightBand> {
        self.band.as_ref()
    }

    /// First and last month shown
    pub fn extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Top of the y axis
    pub fn max_total(&self) -> u64 {
        self.points.iter().map(MonthlyPoint::total).max().unwrap_or(0)
    }

    /// Point closest to `date`, as shown in the tooltip
    pub fn point_at(&self, date: NaiveDate) -> Option<&MonthlyPoint> {
        self.points
            .iter()
            .min_by_key(|point| (point.date - date).num_days().abs())
    }
}

impl LinkedView for TimelineView {
    fn kind(&self) -> ViewKind {
        ViewKind::Timeline
    }

    fn render(&mut self, data: &Dataset) {
        self.points = aggregate_by_month(&data.monthly_deaths);
        self.spans = data
            .conflicts
            .iter()
            .map(|conflict| (conflict.id, (conflict.start_year, conflict.end_year)))
            .collect();
        if self
            .band
            .as_ref()
            .is_some_and(|band| !self.spans.contains_key(&band.conflict))
        {
            self.band = None;
        }

        self.areas = if self.points.is_empty() {
            Vec::new()
        } else {
            ViolenceType::ALL
                .into_iter()
                .map(|violence_type| TimelineArea {
                    violence_type,
                    color: violence_color(violence_type),
                    style: ElementStyle::default(),
                })
                .collect()
        };
        style::set_local_hover(&mut self.areas, self.local_hover);

        tracing::debug!("Timeline rendered {} months", self.points.len());
    }

    fn apply_highlight(&mut self, conflict: ConflictId, _origin: ViewKind) {
        self.band = None;
        let Some(&(start_year, end_year)) = self.spans.get(&conflict) else {
            return;
        };
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(start_year, 1, 1),
            NaiveDate::from_ymd_opt(end_year, 12, 31),
        ) else {
            return;
        };

        self.band = Some(HighlightBand {
            conflict,
            start,
            end: end.max(start),
            color: HIGHLIGHT_BAND,
        });
    }

    fn clear_highlight(&mut self) {
        self.band = None;
    }

    fn set_local_hover(&mut self, element: Option<u64>) {
        self.local_hover = element;
        style::set_local_hover(&mut self.areas, element);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for TimelineView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extent() {
            Some((first, last)) => write!(
                f,
                "Timeline: {} months ({} to {}), peak {} deaths",
                self.points.len(),
                first.format("%Y-%m"),
                last.format("%Y-%m"),
                self.max_total()
            )?,
            None => write!(f, "Timeline: no data")?,
        }
        if let Some(band) = &self.band {
            write!(f, ", conflict {} highlighted {} to {}", band.conflict, band.start, band.end)?;
        }
        Ok(())
    }
}
