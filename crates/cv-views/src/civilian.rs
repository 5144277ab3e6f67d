//! Civilian impact chart: diverging bars of civilian vs. combatant deaths

use std::any::Any;
use std::fmt;

use cv_core::{Conflict, ConflictId, Dataset, LinkedView, ViewKind};

use crate::style::{self, ElementStyle, Styled};

/// Number of conflicts shown
pub const TOP_CONFLICTS: usize = 12;

/// One conflict row. Civilians extend left of the axis, combatants right.
#[derive(Debug, Clone, PartialEq)]
pub struct CivilianBar {
    pub conflict_id: ConflictId,
    pub label: String,
    pub civilian_deaths: u64,
    pub combatant_deaths: u64,
    /// Deaths attributed to neither side
    pub unattributed_deaths: u64,
    pub best: u64,
    pub style: ElementStyle,
}

impl CivilianBar {
    fn from_conflict(conflict: &Conflict) -> Self {
        Self {
            conflict_id: conflict.id,
            label: conflict.display_label().to_string(),
            civilian_deaths: conflict.civilian_deaths,
            combatant_deaths: conflict.combatant_deaths,
            unattributed_deaths: conflict.unattributed_deaths(),
            best: conflict.best,
            style: ElementStyle::default(),
        }
    }

    /// Share of the best estimate, rounded percent
    pub fn civilian_percent(&self) -> u64 {
        share(self.civilian_deaths, self.best)
    }

    pub fn combatant_percent(&self) -> u64 {
        share(self.combatant_deaths, self.best)
    }
}

impl Styled for CivilianBar {
    fn key(&self) -> u64 {
        u64::from(self.conflict_id)
    }

    fn conflict(&self) -> Option<ConflictId> {
        Some(self.conflict_id)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}

fn share(part: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as u64
    }
}

/// Civilian impact view
#[derive(Default)]
pub struct CivilianImpactView {
    bars: Vec<CivilianBar>,
    local_hover: Option<u64>,
}

impl CivilianImpactView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[CivilianBar] {
        &self.bars
    }

    /// Half-width of the symmetric x domain
    pub fn max_value(&self) -> u64 {
        self.bars
            .iter()
            .map(|bar| bar.civilian_deaths.max(bar.combatant_deaths))
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

impl LinkedView for CivilianImpactView {
    fn kind(&self) -> ViewKind {
        ViewKind::CivilianImpact
    }

    fn render(&mut self, data: &Dataset) {
        let mut conflicts: Vec<&Conflict> = data.conflicts.iter().collect();
        conflicts.sort_by(|a, b| b.civilian_deaths.cmp(&a.civilian_deaths));

        self.bars = conflicts
            .into_iter()
            .take(TOP_CONFLICTS)
            .map(CivilianBar::from_conflict)
            .collect();
        style::set_local_hover(&mut self.bars, self.local_hover);
    }

    fn apply_highlight(&mut self, conflict: ConflictId, _origin: ViewKind) {
        style::highlight(&mut self.bars, conflict);
    }

    fn clear_highlight(&mut self) {
        style::clear(&mut self.bars);
    }

    fn set_local_hover(&mut self, element: Option<u64>) {
        self.local_hover = element;
        style::set_local_hover(&mut self.bars, element);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for CivilianImpactView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Civilian impact: {} conflicts", self.bars.len())?;
        for bar in &self.bars {
            write!(
                f,
                "\n  {:<40} civilian {:>3}% | combatant {:>3}%",
                bar.label,
                bar.civilian_percent(),
                bar.combatant_percent()
            )?;
        }
        Ok(())
    }
}
