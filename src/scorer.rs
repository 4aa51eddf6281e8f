//! Linear scoring of feature vectors.
//!
//! Applies a trained linear ranking model to calculated feature vectors.
//! The model's weight array spans the global sparse index space, so a
//! vector is scored against the weight block starting at its offset;
//! indices beyond the stored weights contribute nothing, which lets a
//! model trained on shallow trees score deeper vectors gracefully.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::feat::FeatureVector;

/// Errors that can occur while loading a model file.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model has no weights")]
    EmptyWeights,
}

/// A trained linear ranking model over the global sparse feature space.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub bias: f64,
    pub weights: Vec<f64>,
}

impl LinearModel {
    /// Loads a model from a JSON file at the given path.
    pub fn load(path: &Path) -> Result<LinearModel, ModelError> {
        let data = fs::read_to_string(path)?;
        LinearModel::from_json(&data)
    }

    /// Parses a model from a JSON string.
    pub fn from_json(json: &str) -> Result<LinearModel, ModelError> {
        let model: LinearModel = serde_json::from_str(json)?;
        if model.weights.is_empty() {
            return Err(ModelError::EmptyWeights);
        }
        Ok(model)
    }

    /// Number of weights in the model.
    pub fn n_weights(&self) -> usize {
        self.weights.len()
    }

    /// Scores a calculated vector: bias plus the inner product of the
    /// vector's values with the weight block at its offset.
    ///
    /// Panics if the vector has not been calculated (`depth == 0`).
    pub fn score(&self, feat: &FeatureVector) -> f64 {
        assert!(
            feat.depth() != 0,
            "refusing to score an uncalculated feature vector"
        );
        let offset = feat.offset();
        let mut score = self.bias;
        for (i, v) in feat.values().iter().enumerate() {
            if let Some(w) = self.weights.get(offset + i) {
                score += w * v;
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feat::FEATURE_COUNT;
    use crate::solver::BoundType;

    fn manual_vector(values: &[f64], depth: u32, bound_type: BoundType) -> FeatureVector {
        let mut feat = FeatureVector::new(values.len());
        feat.set_max_depth(10);
        feat.vals.copy_from_slice(values);
        feat.depth = depth;
        feat.bound_type = bound_type;
        feat
    }

    #[test]
    fn parses_model_json() {
        let model = LinearModel::from_json(r#"{"bias": 0.5, "weights": [1.0, 2.0, 3.0]}"#).unwrap();
        assert_eq!(model.bias, 0.5);
        assert_eq!(model.n_weights(), 3);
    }

    #[test]
    fn bias_defaults_to_zero() {
        let model = LinearModel::from_json(r#"{"weights": [1.0]}"#).unwrap();
        assert_eq!(model.bias, 0.0);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            LinearModel::from_json("not json"),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn rejects_empty_weights() {
        assert!(matches!(
            LinearModel::from_json(r#"{"weights": []}"#),
            Err(ModelError::EmptyWeights)
        ));
    }

    #[test]
    fn scores_weight_block_at_offset() {
        // Vector of size 2 at depth 1, lower bound: offset = 2*2*1 = 4.
        let feat = manual_vector(&[3.0, 5.0], 1, BoundType::Lower);
        assert_eq!(feat.offset(), 4);

        let mut weights = vec![0.0; 6];
        weights[4] = 2.0;
        weights[5] = -1.0;
        let model = LinearModel { bias: 1.0, weights };
        assert_eq!(model.score(&feat), 1.0 + 3.0 * 2.0 - 5.0);
    }

    #[test]
    fn indices_beyond_weights_contribute_nothing() {
        let feat = manual_vector(&[3.0, 5.0], 9, BoundType::Upper);
        let model = LinearModel {
            bias: 0.25,
            weights: vec![7.0; 4],
        };
        assert_eq!(model.score(&feat), 0.25);
    }

    #[test]
    fn scoring_is_pure() {
        let feat = manual_vector(&[1.0; FEATURE_COUNT], 2, BoundType::Lower);
        let model = LinearModel {
            bias: 0.0,
            weights: vec![1.0; FEATURE_COUNT * 30],
        };
        assert_eq!(model.score(&feat), model.score(&feat));
    }

    #[test]
    #[should_panic(expected = "uncalculated")]
    fn uncalculated_vector_rejected() {
        let feat = FeatureVector::new(2);
        let model = LinearModel {
            bias: 0.0,
            weights: vec![1.0],
        };
        model.score(&feat);
    }
}
