use super::value_objects::{Panel, PanelKey, Percent};
use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::market_data::{IndicatorKind, IndicatorSelection};
use serde::{Deserialize, Serialize};

/// Container margins, all in percent of the container size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub top: f64,
    /// Reserved for the zoom slider
    pub bottom: f64,
    /// Space between consecutive panels
    pub gap: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { top: 6.0, bottom: 12.0, gap: 4.0, left: 8.0, right: 4.0 }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        let margins = [self.top, self.bottom, self.gap, self.left, self.right];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(AppError::ConfigurationError("layout margins must be non-negative".into()));
        }
        // Worst case: three panels, two gaps.
        if self.top + self.bottom + 2.0 * self.gap >= 100.0 || self.left + self.right >= 100.0 {
            return Err(AppError::ConfigurationError("layout margins leave no room for panels".into()));
        }
        Ok(())
    }

    fn usable_height(&self, panel_count: usize) -> f64 {
        let gaps = panel_count.saturating_sub(1) as f64 * self.gap;
        (100.0 - self.top - self.bottom - gaps).max(0.0)
    }
}

/// Where one panel sits inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPlacement {
    pub panel: Panel,
    pub top: Percent,
    pub height: Percent,
    pub show_x_labels: bool,
}

/// Ordered panels (top to bottom) with their vertical placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    placements: Vec<PanelPlacement>,
}

impl LayoutPlan {
    pub fn placements(&self) -> &[PanelPlacement] {
        &self.placements
    }

    pub fn panels(&self) -> Vec<Panel> {
        self.placements.iter().map(|p| p.panel).collect()
    }

    pub fn panel(&self, key: PanelKey) -> Option<&Panel> {
        self.placements.iter().map(|p| &p.panel).find(|p| p.key == key)
    }

    pub fn axis_index(&self, key: PanelKey) -> Option<usize> {
        self.panel(key).map(|p| p.axis_index)
    }

    pub fn axis_indices(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.panel.axis_index).collect()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Panels required by `selection`, in display order with axis indices
/// assigned top to bottom.
pub fn plan_panels(selection: &IndicatorSelection) -> Vec<Panel> {
    let mut keys = vec![PanelKey::Main];
    if selection.contains(IndicatorKind::Volume) {
        keys.push(PanelKey::Volume);
    }
    if selection.has_oscillator() {
        keys.push(PanelKey::Osc);
    }

    let main_weight = if keys.len() > 1 { 2 } else { 1 };
    keys.into_iter()
        .enumerate()
        .map(|(axis_index, key)| Panel {
            key,
            weight: if key == PanelKey::Main { main_weight } else { 1 },
            axis_index,
        })
        .collect()
}

/// Full vertical layout, or `None` when there is nothing to chart.
pub fn plan_layout(selection: &IndicatorSelection, bar_count: usize, config: &LayoutConfig) -> Option<LayoutPlan> {
    if bar_count == 0 {
        return None;
    }

    let panels = plan_panels(selection);
    let usable = config.usable_height(panels.len());
    let total_weight: u32 = panels.iter().map(|p| p.weight).sum();
    let last = panels.len() - 1;

    let mut cursor = config.top;
    let placements = panels
        .into_iter()
        .enumerate()
        .map(|(i, panel)| {
            let height = usable * f64::from(panel.weight) / f64::from(total_weight);
            let placement = PanelPlacement {
                panel,
                top: Percent::new(cursor),
                height: Percent::new(height),
                show_x_labels: i == last,
            };
            cursor += height + config.gap;
            placement
        })
        .collect();

    Some(LayoutPlan { placements })
}
