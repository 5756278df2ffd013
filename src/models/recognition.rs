//! Recognition result models
//!
//! Decoded response of the nutrition estimation backend: an ordered list of
//! recognized entities, each with measured figures and ranked identification
//! candidates. Only the fields the consumer relies on are declared; unknown
//! fields in the response are ignored.

use serde::{Deserialize, Serialize};

/// One ranked identification proposal for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
}

/// One segmented food item recognized within a capture
///
/// `weight`, `carbs`, `area` and `volume` may each be zero or negative,
/// meaning "not measured". They are never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub weight: f64,
    pub carbs: f64,
    pub area: f64,
    pub volume: f64,
    pub candidates: Vec<Candidate>,
    /// Index into `candidates`; the backend may preselect, otherwise 0
    #[serde(default, rename = "selectedCandidateIndex")]
    pub selected_candidate_index: usize,
}

impl RecognizedEntity {
    /// The currently selected candidate, `None` when there are no candidates
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.candidates.get(self.selected_candidate_index)
    }
}

/// Ordered recognition results for one capture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecognitionResult {
    pub results: Vec<RecognizedEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_default_selection() {
        let body = r#"{
            "results": [
                {
                    "weight": 120.0,
                    "carbs": 30.5,
                    "area": -1.0,
                    "volume": 250.0,
                    "candidates": [{"name": "rice"}, {"name": "couscous"}]
                }
            ]
        }"#;
        let result: SessionRecognitionResult = serde_json::from_str(body).unwrap();
        let entity = &result.results[0];
        assert_eq!(entity.selected_candidate_index, 0);
        assert_eq!(entity.selected_candidate().unwrap().name, "rice");
        // Negative area means "not measured" and is kept as-is
        assert_eq!(entity.area, -1.0);
    }

    #[test]
    fn test_decode_with_preselected_candidate() {
        let body = r#"{
            "results": [
                {
                    "weight": 80.0,
                    "carbs": 12.0,
                    "area": 55.0,
                    "volume": -1.0,
                    "candidates": [{"name": "bread"}, {"name": "toast"}],
                    "selectedCandidateIndex": 1
                }
            ]
        }"#;
        let result: SessionRecognitionResult = serde_json::from_str(body).unwrap();
        assert_eq!(
            result.results[0].selected_candidate().unwrap().name,
            "toast"
        );
    }

    #[test]
    fn test_no_candidates_yields_none() {
        let entity = RecognizedEntity {
            weight: 1.0,
            carbs: 1.0,
            area: 1.0,
            volume: 1.0,
            candidates: Vec::new(),
            selected_candidate_index: 0,
        };
        assert!(entity.selected_candidate().is_none());
    }
}
