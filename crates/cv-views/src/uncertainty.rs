//! Uncertainty chart: low/best/high ranges of the widest-estimate conflicts

use std::any::Any;
use std::fmt;

use cv_core::{Conflict, ConflictId, Dataset, LinkedView, ViewKind};
use serde::{Deserialize, Serialize};

use crate::style::{self, ElementStyle, Styled};

/// Number of conflicts shown
pub const TOP_CONFLICTS: usize = 12;

/// Uncertainty chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UncertaintyConfig {
    /// Logarithmic x axis
    pub log_scale: bool,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self { log_scale: true }
    }
}

/// One range row
#[derive(Debug, Clone, PartialEq)]
pub struct UncertaintyBar {
    pub conflict_id: ConflictId,
    pub label: String,
    pub low: u64,
    pub best: u64,
    pub high: u64,
    pub style: ElementStyle,
}

impl UncertaintyBar {
    fn from_conflict(conflict: &Conflict) -> Self {
        Self {
            conflict_id: conflict.id,
            label: conflict.display_label().to_string(),
            low: conflict.low,
            best: conflict.best,
            high: conflict.high,
            style: ElementStyle::default(),
        }
    }

    /// `high - low`
    pub fn width(&self) -> u64 {
        self.high.saturating_sub(self.low)
    }

    /// Width relative to the best estimate, 0 when there is no estimate
    pub fn relative_uncertainty(&self) -> f64 {
        if self.best == 0 {
            0.0
        } else {
            self.width() as f64 / self.best as f64
        }
    }
}

impl Styled for UncertaintyBar {
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

/// Uncertainty view
pub struct UncertaintyView {
    pub config: UncertaintyConfig,
    bars: Vec<UncertaintyBar>,
    local_hover: Option<u64>,
}

impl UncertaintyView {
    pub fn new(config: UncertaintyConfig) -> Self {
        Self {
            config,
            bars: Vec::new(),
            local_hover: None,
        }
    }

    pub fn bars(&self) -> &[UncertaintyBar] {
        &self.bars
    }

    /// Switch between log and linear axis
    pub fn set_log_scale(&mut self, log_scale: bool) {
        self.config.log_scale = log_scale;
    }

    /// X domain. The log axis starts at the smallest low estimate, never below 1.
    pub fn domain(&self) -> Option<(f64, f64)> {
        if self.bars.is_empty() {
            return None;
        }

        let max_high = self.bars.iter().map(|bar| bar.high).max().unwrap_or(0).max(1);
        let lower = if self.config.log_scale {
            self.bars.iter().map(|bar| bar.low).min().unwrap_or(1).max(1)
        } else {
            0
        };
        Some((lower as f64, max_high as f64))
    }
}

impl Default for UncertaintyView {
    fn default() -> Self {
        Self::new(UncertaintyConfig::default())
    }
}

impl LinkedView for UncertaintyView {
    fn kind(&self) -> ViewKind {
        ViewKind::Uncertainty
    }

    fn render(&mut self, data: &Dataset) {
        let mut bars: Vec<UncertaintyBar> =
            data.conflicts.iter().map(UncertaintyBar::from_conflict).collect();
        bars.sort_by(|a, b| b.width().cmp(&a.width()));
        bars.truncate(TOP_CONFLICTS);

        self.bars = bars;
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

impl fmt::Display for UncertaintyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = if self.config.log_scale { "log" } else { "linear" };
        write!(f, "Uncertainty ({} scale): {} conflicts", scale, self.bars.len())?;
        for bar in &self.bars {
            write!(
                f,
                "\n  {:<40} {} .. {} .. {} (width {:.0}% of best)",
                bar.label,
                bar.low,
                bar.best,
                bar.high,
                bar.relative_uncertainty() * 100.0
            )?;
        }
        Ok(())
    }
}
