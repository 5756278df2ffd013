//! Recognition result presentation model
//!
//! Selection and aggregation rules over a decoded recognition result. The
//! selection is an explicit value rather than UI state: either the aggregate
//! "all items" view or one entity by index.
//!
//! Changing an entity's selected candidate changes only its displayed name;
//! weight and carbs stay as measured. The figures come from geometry, not
//! from the identification.

use thiserror::Error;

use crate::models::{RecognizedEntity, SessionRecognitionResult};

/// Which part of the result a summary describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitySelection {
    /// Aggregate over every recognized entity
    AllItems,
    /// One entity by result-list index
    Entity(usize),
}

/// Selection error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("entity index {0} out of range")]
    EntityOutOfRange(usize),

    #[error("candidate index {candidate} out of range for entity {entity}")]
    CandidateOutOfRange { entity: usize, candidate: usize },
}

/// Displayed size of an entity, at most one dimension
///
/// Area wins over volume when both were measured; entities with neither
/// measurement display as not available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeDisplay {
    Area(f64),
    Volume(f64),
    NotAvailable,
}

impl SizeDisplay {
    pub fn label(&self) -> String {
        match self {
            SizeDisplay::Area(a) => area_string(*a),
            SizeDisplay::Volume(v) => volume_string(*v),
            SizeDisplay::NotAvailable => "Not Available".to_string(),
        }
    }
}

/// Summary of one selection, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub name: String,
    pub size: SizeDisplay,
    pub weight: f64,
    pub carbs: f64,
}

/// Recognition results plus per-entity selection state
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResultModel {
    result: SessionRecognitionResult,
}

impl RecognitionResultModel {
    pub fn new(result: SessionRecognitionResult) -> Self {
        Self { result }
    }

    pub fn entity_count(&self) -> usize {
        self.result.results.len()
    }

    pub fn entities(&self) -> &[RecognizedEntity] {
        &self.result.results
    }

    /// Total weight over entities with a positive weight
    ///
    /// Non-positive weights mean "not measured" and are excluded from the
    /// sum, not treated as zero contributions of negative value.
    pub fn total_weight(&self) -> f64 {
        self.result
            .results
            .iter()
            .filter(|e| e.weight > 0.0)
            .map(|e| e.weight)
            .sum()
    }

    /// Total carbs over entities with positive carbs, same rule as weight
    pub fn total_carbs(&self) -> f64 {
        self.result
            .results
            .iter()
            .filter(|e| e.carbs > 0.0)
            .map(|e| e.carbs)
            .sum()
    }

    /// Change the selected candidate of one entity
    ///
    /// Mutates only that entity's selection; measured figures are untouched.
    pub fn select_candidate(&mut self, entity: usize, candidate: usize) -> Result<(), SelectionError> {
        let e = self
            .result
            .results
            .get_mut(entity)
            .ok_or(SelectionError::EntityOutOfRange(entity))?;
        if candidate >= e.candidates.len() {
            return Err(SelectionError::CandidateOutOfRange { entity, candidate });
        }
        e.selected_candidate_index = candidate;
        Ok(())
    }

    /// Displayable summary for a selection, `None` for an out-of-range entity
    pub fn summary(&self, selection: EntitySelection) -> Option<EntitySummary> {
        match selection {
            EntitySelection::AllItems => Some(EntitySummary {
                name: "All Items".to_string(),
                size: SizeDisplay::NotAvailable,
                weight: self.total_weight(),
                carbs: self.total_carbs(),
            }),
            EntitySelection::Entity(index) => {
                let entity = self.result.results.get(index)?;
                let size = if entity.area > 0.0 {
                    SizeDisplay::Area(entity.area)
                } else if entity.volume > 0.0 {
                    SizeDisplay::Volume(entity.volume)
                } else {
                    SizeDisplay::NotAvailable
                };
                Some(EntitySummary {
                    name: entity
                        .selected_candidate()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    size,
                    // Kept as measured even when non-positive; the figures
                    // are physical measurements independent of the name.
                    weight: entity.weight,
                    carbs: entity.carbs,
                })
            }
        }
    }
}

/// Format a weight in grams for display
pub fn weight_string(grams: f64) -> String {
    format!("{:.1} g", grams)
}

/// Format an area in square centimeters for display
pub fn area_string(square_cm: f64) -> String {
    format!("{:.1} cm\u{00B2}", square_cm)
}

/// Format a volume in cubic centimeters for display
pub fn volume_string(cubic_cm: f64) -> String {
    format!("{:.1} cm\u{00B3}", cubic_cm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn entity(weight: f64, carbs: f64, area: f64, volume: f64, names: &[&str]) -> RecognizedEntity {
        RecognizedEntity {
            weight,
            carbs,
            area,
            volume,
            candidates: names
                .iter()
                .map(|n| Candidate {
                    name: n.to_string(),
                })
                .collect(),
            selected_candidate_index: 0,
        }
    }

    fn model() -> RecognitionResultModel {
        RecognitionResultModel::new(SessionRecognitionResult {
            results: vec![
                entity(5.0, 12.0, 80.0, -1.0, &["rice", "couscous"]),
                entity(-1.0, -1.0, -1.0, 150.0, &["soup"]),
                entity(3.0, 2.0, -1.0, -1.0, &["lettuce"]),
            ],
        })
    }

    #[test]
    fn test_aggregate_excludes_non_positive_weights() {
        // [5, -1, 3] sums to 8, not 7: the -1 entity is excluded, not added.
        let m = model();
        assert_eq!(m.total_weight(), 8.0);
        assert_eq!(m.total_carbs(), 14.0);
    }

    #[test]
    fn test_all_items_summary() {
        let m = model();
        let summary = m.summary(EntitySelection::AllItems).unwrap();
        assert_eq!(summary.name, "All Items");
        assert_eq!(summary.size, SizeDisplay::NotAvailable);
        assert_eq!(summary.weight, 8.0);
        assert_eq!(summary.carbs, 14.0);
    }

    #[test]
    fn test_size_priority_area_over_volume() {
        let m = model();
        assert_eq!(
            m.summary(EntitySelection::Entity(0)).unwrap().size,
            SizeDisplay::Area(80.0)
        );
        assert_eq!(
            m.summary(EntitySelection::Entity(1)).unwrap().size,
            SizeDisplay::Volume(150.0)
        );
        assert_eq!(
            m.summary(EntitySelection::Entity(2)).unwrap().size,
            SizeDisplay::NotAvailable
        );
    }

    #[test]
    fn test_entity_summary_keeps_non_positive_figures() {
        let m = model();
        let summary = m.summary(EntitySelection::Entity(1)).unwrap();
        assert_eq!(summary.weight, -1.0);
        assert_eq!(summary.carbs, -1.0);
    }

    #[test]
    fn test_select_candidate_changes_only_name() {
        let mut m = model();
        let before = m.summary(EntitySelection::Entity(0)).unwrap();
        m.select_candidate(0, 1).unwrap();
        let after = m.summary(EntitySelection::Entity(0)).unwrap();

        assert_eq!(before.name, "rice");
        assert_eq!(after.name, "couscous");
        assert_eq!(after.weight, before.weight);
        assert_eq!(after.carbs, before.carbs);
        assert_eq!(after.size, before.size);

        // Other entities are untouched
        assert_eq!(
            m.summary(EntitySelection::Entity(2)).unwrap().name,
            "lettuce"
        );
    }

    #[test]
    fn test_selection_bounds_checked() {
        let mut m = model();
        assert_eq!(
            m.select_candidate(9, 0),
            Err(SelectionError::EntityOutOfRange(9))
        );
        assert_eq!(
            m.select_candidate(1, 5),
            Err(SelectionError::CandidateOutOfRange {
                entity: 1,
                candidate: 5
            })
        );
        assert!(m.summary(EntitySelection::Entity(9)).is_none());
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(weight_string(8.0), "8.0 g");
        assert_eq!(area_string(80.25), "80.2 cm\u{00B2}");
        assert_eq!(volume_string(150.0), "150.0 cm\u{00B3}");
    }
}
