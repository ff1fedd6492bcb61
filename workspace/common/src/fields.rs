//! Form field metadata and client-side range validation.

use std::collections::BTreeMap;

use crate::prediction::PredictionInput;

/// The eight inputs of the prediction form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigree,
    Age,
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// JSON key used on the wire.
    pub key: &'static str,
    pub label: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
    pub tooltip: &'static str,
}

const FIELD_CONFIGS: [FieldConfig; 8] = [
    FieldConfig {
        key: "pregnancies",
        label: "Pregnancies",
        min: 0.0,
        max: 17.0,
        step: 1.0,
        unit: "",
        tooltip: "Number of times pregnant",
    },
    FieldConfig {
        key: "glucose",
        label: "Glucose",
        min: 0.0,
        max: 200.0,
        step: 1.0,
        unit: "mg/dL",
        tooltip: "Plasma glucose concentration after 2 hours in an oral glucose tolerance test",
    },
    FieldConfig {
        key: "blood_pressure",
        label: "Blood Pressure",
        min: 0.0,
        max: 122.0,
        step: 1.0,
        unit: "mm Hg",
        tooltip: "Diastolic blood pressure (the bottom number)",
    },
    FieldConfig {
        key: "skin_thickness",
        label: "Skin Thickness",
        min: 0.0,
        max: 99.0,
        step: 1.0,
        unit: "mm",
        tooltip: "Triceps skin fold thickness measurement",
    },
    FieldConfig {
        key: "insulin",
        label: "Insulin",
        min: 0.0,
        max: 846.0,
        step: 1.0,
        unit: "μU/ml",
        tooltip: "2-Hour serum insulin level",
    },
    FieldConfig {
        key: "bmi",
        label: "BMI",
        min: 0.0,
        max: 67.1,
        step: 0.1,
        unit: "kg/m²",
        tooltip: "Body Mass Index (weight in kg / height in m²)",
    },
    FieldConfig {
        key: "diabetes_pedigree",
        label: "Diabetes Pedigree",
        min: 0.08,
        max: 2.42,
        step: 0.01,
        unit: "",
        tooltip: "Genetic risk score based on family history of diabetes",
    },
    FieldConfig {
        key: "age",
        label: "Age",
        min: 21.0,
        max: 81.0,
        step: 1.0,
        unit: "years",
        tooltip: "Age in years",
    },
];

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Pregnancies,
        FormField::Glucose,
        FormField::BloodPressure,
        FormField::SkinThickness,
        FormField::Insulin,
        FormField::Bmi,
        FormField::DiabetesPedigree,
        FormField::Age,
    ];

    pub fn config(&self) -> &'static FieldConfig {
        &FIELD_CONFIGS[*self as usize]
    }

    pub fn key(&self) -> &'static str {
        self.config().key
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn from_key(key: &str) -> Option<FormField> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

/// Per-field error messages, keyed in form order.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Checks one value against the field's inclusive range.
///
/// Returns the message shown under the input, or `None` when the value is valid.
pub fn validate_field(field: FormField, value: f64) -> Option<String> {
    let config = field.config();
    if value.is_nan() || value < config.min {
        return Some(format!("Minimum value is {}", config.min));
    }
    if value > config.max {
        return Some(format!("Maximum value is {}", config.max));
    }
    None
}

/// Revalidates every field and collects all failures, not just the first.
pub fn validate_input(input: &PredictionInput) -> Result<(), FieldErrors> {
    let errors: FieldErrors = FormField::ALL
        .iter()
        .filter_map(|&field| validate_field(field, input.get(field)).map(|msg| (field, msg)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "prediction input rejected by range validation");
        Err(errors)
    }
}

/// Parses the text of a numeric input the way the form reads it:
/// anything unparsable counts as zero.
pub fn parse_field_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_over_max_is_rejected() {
        assert_eq!(
            validate_field(FormField::Glucose, 250.0),
            Some("Maximum value is 200".to_string())
        );
        assert_eq!(validate_field(FormField::Glucose, 120.0), None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate_field(FormField::Age, 21.0), None);
        assert_eq!(validate_field(FormField::Age, 81.0), None);
        assert_eq!(validate_field(FormField::Bmi, 67.1), None);
    }

    #[test]
    fn test_fractional_bounds_in_messages() {
        assert_eq!(
            validate_field(FormField::DiabetesPedigree, 0.01),
            Some("Minimum value is 0.08".to_string())
        );
        assert_eq!(
            validate_field(FormField::Bmi, 70.0),
            Some("Maximum value is 67.1".to_string())
        );
        assert_eq!(
            validate_field(FormField::Age, 18.0),
            Some("Minimum value is 21".to_string())
        );
    }

    #[test]
    fn test_validate_input_reports_every_failure() {
        let input = PredictionInput::default()
            .with(FormField::Glucose, 250.0)
            .with(FormField::Age, 5.0);

        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&FormField::Glucose], "Maximum value is 200");
        assert_eq!(errors[&FormField::Age], "Minimum value is 21");
    }

    #[test]
    fn test_defaults_and_sample_are_valid() {
        assert!(validate_input(&PredictionInput::default()).is_ok());
        assert!(validate_input(&PredictionInput::sample()).is_ok());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("cholesterol"), None);
    }

    #[test]
    fn test_parse_field_value() {
        assert_eq!(parse_field_value("32.5"), 32.5);
        assert_eq!(parse_field_value(""), 0.0);
        assert_eq!(parse_field_value("abc"), 0.0);
        assert_eq!(parse_field_value(" 7 "), 7.0);
    }
}
