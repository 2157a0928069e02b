//! Analysis result model
//!
//! The record returned for every analyzed image. Only its shape is a
//! contract; the placeholder analyzer fills it with fixed values.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Message carried by placeholder results
pub const PLACEHOLDER_MESSAGE: &str = "This is a dummy response; connect ML models here.";

/// Result of analyzing one uploaded image
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Skin colour category (e.g., "medium")
    pub skin_color: String,
    /// Skin undertone (e.g., "warm")
    pub skin_tone: String,
    /// Face shape category (e.g., "oval")
    pub face_structure: String,
    /// Somatotype (e.g., "ectomorph")
    pub body_structure: String,
    /// Estimated age in years
    pub age: u32,
    /// Estimated gender
    pub gender: String,
    /// Confidence of the estimate, in [0, 1]
    pub confidence: f64,
    /// Free-form note for the caller
    pub message: String,
}

impl AnalysisResult {
    /// The fixed record returned while no model is connected
    pub fn placeholder() -> Self {
        Self {
            skin_color: "medium".to_string(),
            skin_tone: "warm".to_string(),
            face_structure: "oval".to_string(),
            body_structure: "ectomorph".to_string(),
            age: 27,
            gender: "male".to_string(),
            confidence: 0.85,
            message: PLACEHOLDER_MESSAGE.to_string(),
        }
    }

    /// Check the record before it leaves the service
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AnalyzerError::Internal(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_serializes_in_field_order() {
        let json = serde_json::to_string(&AnalysisResult::placeholder()).unwrap();
        assert_eq!(
            json,
            r#"{"skin_color":"medium","skin_tone":"warm","face_structure":"oval","body_structure":"ectomorph","age":27,"gender":"male","confidence":0.85,"message":"This is a dummy response; connect ML models here."}"#
        );
    }

    #[test]
    fn test_placeholder_is_valid() {
        assert!(AnalysisResult::placeholder().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_confidence_is_rejected() {
        let mut result = AnalysisResult::placeholder();
        result.confidence = 1.5;
        assert!(matches!(result.validate(), Err(AnalyzerError::Internal(_))));

        result.confidence = f64::NAN;
        assert!(result.validate().is_err());
    }
}
