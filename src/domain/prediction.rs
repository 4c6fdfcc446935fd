//! Prediction payload types.
//!
//! Mirrors the JSON body returned by the prediction endpoint and the pure
//! mappings the result panel needs (percentage, gauge level).

use serde::{Deserialize, Serialize};

/// Detailed agronomic information attached to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDetails {
    /// Free-text description of the disease
    pub description: String,

    /// Visible symptoms, in display order
    pub symptoms: Vec<String>,

    /// Treatment and prevention tips, in display order
    pub prevention: Vec<String>,
}

/// Result of a successful prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Class label, e.g. "Apple Scab"
    pub disease_name: String,

    /// Model confidence (0.0 to 1.0)
    pub confidence: f64,

    pub details: DiseaseDetails,
}

impl PredictionResult {
    /// Check the payload against the response contract.
    ///
    /// # Errors
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence must be within [0, 1], got {}",
                self.confidence
            ));
        }
        Ok(())
    }

    /// Confidence gauge derived from this result.
    #[must_use]
    pub fn gauge(&self) -> ConfidenceGauge {
        ConfidenceGauge::from_confidence(self.confidence)
    }
}

/// Colour band of the confidence gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeLevel {
    /// Above 90%
    Success,
    /// Above 75%
    Warning,
    /// Everything else
    Danger,
}

impl GaugeLevel {
    /// Pick the band for a percentage already rounded to one decimal.
    #[must_use]
    pub fn for_percent(percent: f64) -> Self {
        if percent > 90.0 {
            Self::Success
        } else if percent > 75.0 {
            Self::Warning
        } else {
            Self::Danger
        }
    }
}

/// Display model of the confidence gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGauge {
    /// Percentage rounded to one decimal place
    pub percent: f64,
    pub level: GaugeLevel,
}

impl ConfidenceGauge {
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        let percent = (confidence * 1000.0).round() / 10.0;
        Self {
            percent,
            level: GaugeLevel::for_percent(percent),
        }
    }

    /// Text shown on the gauge, e.g. "97.0% Confidence".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.1}% Confidence", self.percent)
    }

    /// Fill ratio for a gauge widget, clamped to [0, 1].
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.percent.is_finite() {
            (self.percent / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(confidence: f64) -> PredictionResult {
        PredictionResult {
            disease_name: "Apple Scab".to_string(),
            confidence,
            details: DiseaseDetails {
                description: "Fungal disease".to_string(),
                symptoms: vec!["Olive-green spots".to_string()],
                prevention: vec!["Rake fallen leaves".to_string()],
            },
        }
    }

    #[test]
    fn test_gauge_high_confidence() {
        let gauge = result_with(0.97).gauge();
        assert_eq!(gauge.label(), "97.0% Confidence");
        assert_eq!(gauge.level, GaugeLevel::Success);
    }

    #[test]
    fn test_gauge_moderate_confidence() {
        let gauge = result_with(0.80).gauge();
        assert_eq!(gauge.label(), "80.0% Confidence");
        assert_eq!(gauge.level, GaugeLevel::Warning);
    }

    #[test]
    fn test_gauge_low_confidence() {
        let gauge = result_with(0.50).gauge();
        assert_eq!(gauge.label(), "50.0% Confidence");
        assert_eq!(gauge.level, GaugeLevel::Danger);
    }

    #[test]
    fn test_thresholds_are_strict_on_rounded_percent() {
        assert_eq!(ConfidenceGauge::from_confidence(0.90).level, GaugeLevel::Warning);
        assert_eq!(ConfidenceGauge::from_confidence(0.9004).level, GaugeLevel::Warning);
        assert_eq!(ConfidenceGauge::from_confidence(0.9006).level, GaugeLevel::Success);
        assert_eq!(ConfidenceGauge::from_confidence(0.75).level, GaugeLevel::Danger);
    }

    #[test]
    fn test_ratio_is_clamped() {
        assert_eq!(ConfidenceGauge::from_confidence(1.0).ratio(), 1.0);
        assert_eq!(ConfidenceGauge::from_confidence(0.0).ratio(), 0.0);
        assert_eq!(ConfidenceGauge::from_confidence(f64::NAN).ratio(), 0.0);
    }

    #[test]
    fn test_deserialize_endpoint_payload() {
        let body = r#"{
            "disease_name": "Tomato Late Blight",
            "confidence": 0.9852,
            "details": {
                "description": "Caused by Phytophthora infestans.",
                "symptoms": ["Dark lesions", "White mold"],
                "prevention": []
            }
        }"#;
        let result: PredictionResult = serde_json::from_str(body).expect("valid payload");

        assert_eq!(result.disease_name, "Tomato Late Blight");
        assert_eq!(result.details.symptoms.len(), 2);
        assert!(result.details.prevention.is_empty());
        assert!(result.validate().is_ok());
        assert_eq!(result.gauge().label(), "98.5% Confidence");
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        assert!(result_with(1.2).validate().is_err());
        assert!(result_with(-0.1).validate().is_err());
        assert!(result_with(f64::INFINITY).validate().is_err());
    }
}
