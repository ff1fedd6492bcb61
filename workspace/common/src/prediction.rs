//! Transport types for the prediction API.
//! These mirror the JSON payloads of `POST /predict`, `GET /health` and
//! `GET /feature-info` so the frontend can deserialize responses directly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::FormField;

/// The eight health metrics sent to the prediction API.
///
/// Every metric is carried as `f64`, the way the form edits them. Counts such
/// as pregnancies or age are whole numbers in practice but are not forced to be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: f64,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            pregnancies: 0.0,
            glucose: 100.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 80.0,
            bmi: 25.0,
            diabetes_pedigree: 0.5,
            age: 30.0,
        }
    }
}

impl PredictionInput {
    /// Values used by the "Fill Sample Data" action.
    pub fn sample() -> Self {
        Self {
            pregnancies: 2.0,
            glucose: 120.0,
            blood_pressure: 70.0,
            skin_thickness: 25.0,
            insulin: 80.0,
            bmi: 28.5,
            diabetes_pedigree: 0.35,
            age: 35.0,
        }
    }

    pub fn get(&self, field: FormField) -> f64 {
        match field {
            FormField::Pregnancies => self.pregnancies,
            FormField::Glucose => self.glucose,
            FormField::BloodPressure => self.blood_pressure,
            FormField::SkinThickness => self.skin_thickness,
            FormField::Insulin => self.insulin,
            FormField::Bmi => self.bmi,
            FormField::DiabetesPedigree => self.diabetes_pedigree,
            FormField::Age => self.age,
        }
    }

    pub fn set(&mut self, field: FormField, value: f64) {
        let slot = match field {
            FormField::Pregnancies => &mut self.pregnancies,
            FormField::Glucose => &mut self.glucose,
            FormField::BloodPressure => &mut self.blood_pressure,
            FormField::SkinThickness => &mut self.skin_thickness,
            FormField::Insulin => &mut self.insulin,
            FormField::Bmi => &mut self.bmi,
            FormField::DiabetesPedigree => &mut self.diabetes_pedigree,
            FormField::Age => &mut self.age,
        };
        *slot = value;
    }

    /// Returns a copy with one field replaced.
    #[must_use]
    pub fn with(mut self, field: FormField, value: f64) -> Self {
        self.set(field, value);
        self
    }
}

/// Risk category assigned upstream from the predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Capitalized label, e.g. "Moderate".
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Your health metrics suggest a low risk of diabetes. Keep up the healthy lifestyle!"
            }
            RiskLevel::Moderate => {
                "Your results indicate a moderate risk. Consider lifestyle adjustments and consult a healthcare provider."
            }
            RiskLevel::High => {
                "Your metrics suggest a higher risk of diabetes. Please consult with a healthcare professional soon."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a metric sits relative to its healthy reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Normal,
    Low,
    High,
    #[serde(other)]
    Unknown,
}

impl FeatureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureStatus::Normal => "Normal",
            FeatureStatus::Low => "Low",
            FeatureStatus::High => "High",
            FeatureStatus::Unknown => "Unknown",
        }
    }
}

/// Per-feature analysis entry returned alongside a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAnalysis {
    pub value: f64,
    pub status: FeatureStatus,
    pub healthy_range: [f64; 2],
    #[serde(default)]
    pub unit: String,
}

impl FeatureAnalysis {
    /// Position of the value inside its healthy range as a percentage:
    /// 0 is the lower bound, 100 the upper bound. Clamped to `[0, 150]`.
    pub fn normalized_score(&self) -> f64 {
        let [min, max] = self.healthy_range;
        let span = max - min;
        if span <= 0.0 {
            return 0.0;
        }
        let score = (self.value - min) / span * 100.0;
        score.clamp(0.0, 150.0)
    }
}

/// Full response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub timestamp: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub input_values: Option<PredictionInput>,
    #[serde(default)]
    pub feature_analysis: BTreeMap<String, FeatureAnalysis>,
}

impl PredictionResult {
    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }

    /// Feature analysis in form order; keys the form does not know follow
    /// alphabetically.
    pub fn ordered_features(&self) -> Vec<(&str, &FeatureAnalysis)> {
        let mut ordered: Vec<(&str, &FeatureAnalysis)> = FormField::ALL
            .iter()
            .filter_map(|field| {
                self.feature_analysis
                    .get_key_value(field.key())
                    .map(|(k, v)| (k.as_str(), v))
            })
            .collect();
        ordered.extend(
            self.feature_analysis
                .iter()
                .filter(|(k, _)| FormField::from_key(k).is_none())
                .map(|(k, v)| (k.as_str(), v)),
        );
        ordered
    }
}

/// Label used in outcome listings: "Positive" or "Negative".
pub fn outcome_label(prediction: u8) -> &'static str {
    if prediction == 1 { "Positive" } else { "Negative" }
}

/// Probability rendered as a percentage with one decimal, e.g. `82.0%`.
pub fn format_probability(probability: f64) -> String {
    format!("{}%", to_fixed_1(probability * 100.0))
}

/// Enough fractional digits to print any `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// One-decimal rendering where exact ties round away from zero (`81.25` gives
/// `81.3`). Values that are only close to a tie, such as `0.44999...`, keep
/// the ordinary nearest rounding.
fn to_fixed_1(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.1}", value);
    }

    let magnitude = value.abs();
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let is_tie = exact
        .split_once('.')
        .and_then(|(_, fraction)| fraction.get(1..))
        .is_some_and(|rest| rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0'));

    if !is_tie {
        return format!("{:.1}", value);
    }

    // `magnitude * 10` is exactly `n + 0.5` here, so the product is exact.
    let tenths = (magnitude * 10.0).floor() + 1.0;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{}{:.1}", sign, tenths / 10.0)
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub timestamp: String,
    pub version: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// Reference description of one input feature (`GET /feature-info`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub unit: String,
    pub healthy_range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfoResponse {
    pub features: BTreeMap<String, FeatureInfo>,
    pub total_features: usize,
}

impl FeatureInfoResponse {
    /// Features in form order, unknown keys last.
    pub fn ordered(&self) -> Vec<(&str, &FeatureInfo)> {
        let mut ordered: Vec<(&str, &FeatureInfo)> = FormField::ALL
            .iter()
            .filter_map(|field| {
                self.features
                    .get_key_value(field.key())
                    .map(|(k, v)| (k.as_str(), v))
            })
            .collect();
        ordered.extend(
            self.features
                .iter()
                .filter(|(k, _)| FormField::from_key(k).is_none())
                .map(|(k, v)| (k.as_str(), v)),
        );
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "prediction": 1,
        "probability": 0.8213,
        "risk_level": "high",
        "timestamp": "2024-01-01T00:00:00.000000Z",
        "recommendations": ["Monitor blood glucose levels regularly"],
        "input_values": {"pregnancies": 2, "glucose": 150, "blood_pressure": 80,
            "skin_thickness": 30, "insulin": 100, "bmi": 32.1,
            "diabetes_pedigree": 0.6, "age": 45},
        "feature_analysis": {
            "age": {"value": 45, "status": "normal", "healthy_range": [21, 81], "unit": "years"},
            "glucose": {"value": 150, "status": "high", "healthy_range": [70, 140], "unit": "mg/dL"},
            "mood": {"value": 3, "status": "elevated", "healthy_range": [0, 5], "unit": ""}
        }
    }"#;

    #[test]
    fn test_decode_prediction_result() {
        let result: PredictionResult = serde_json::from_str(RESPONSE).unwrap();
        assert!(result.is_positive());
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.input_values.unwrap().bmi, 32.1);
        assert_eq!(result.feature_analysis["mood"].status, FeatureStatus::Unknown);
    }

    #[test]
    fn test_ordered_features_follow_form_order() {
        let result: PredictionResult = serde_json::from_str(RESPONSE).unwrap();
        let keys: Vec<&str> = result.ordered_features().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["glucose", "age", "mood"]);
    }

    #[test]
    fn test_normalized_score_is_clamped() {
        let mut analysis = FeatureAnalysis {
            value: 105.0,
            status: FeatureStatus::Normal,
            healthy_range: [70.0, 140.0],
            unit: "mg/dL".to_string(),
        };
        assert_eq!(analysis.normalized_score(), 50.0);

        analysis.value = 40.0;
        assert_eq!(analysis.normalized_score(), 0.0);

        analysis.value = 500.0;
        assert_eq!(analysis.normalized_score(), 150.0);

        analysis.healthy_range = [5.0, 5.0];
        assert_eq!(analysis.normalized_score(), 0.0);
    }

    #[test]
    fn test_input_field_access() {
        let input = PredictionInput::default().with(FormField::Glucose, 180.0);
        assert_eq!(input.get(FormField::Glucose), 180.0);
        assert_eq!(input.get(FormField::Age), 30.0);
    }

    #[test]
    fn test_probability_formatting() {
        assert_eq!(format_probability(0.82), "82.0%");
        assert_eq!(format_probability(0.1234), "12.3%");
        assert_eq!(outcome_label(0), "Negative");
    }

    #[test]
    fn test_probability_exact_ties_round_up() {
        assert_eq!(format_probability(0.8125), "81.3%");
        assert_eq!(format_probability(0.0025), "0.3%");
        assert_eq!(format_probability(0.0045), "0.4%");
        assert_eq!(format_probability(0.0), "0.0%");
        assert_eq!(format_probability(1.0), "100.0%");
    }

    #[test]
    fn test_health_status() {
        let health: HealthResponse = serde_json::from_str(
            r#"{"status":"degraded","model_loaded":false,"timestamp":"t","version":"1.0.0"}"#,
        )
        .unwrap();
        assert!(!health.is_healthy());
    }
}
