use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Anything carrying a weight (kg) and a height (cm).
pub trait BodyMetrics {
    fn weight(&self) -> f64;
    fn height(&self) -> f64;

    /// Body mass index, or `None` when the height is not usable.
    fn bmi(&self) -> Option<f64> {
        compute_bmi(self.weight(), self.height())
    }
}

pub fn compute_bmi(weight: f64, height_in_cm: f64) -> Option<f64> {
    let height_in_meters = height_in_cm / 100.0;
    if height_in_meters > 0.0 {
        Some(weight / (height_in_meters * height_in_meters))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Bajo peso",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Sobrepeso",
            BmiCategory::Obese => "Obesidad",
        }
    }
}

impl Display for BmiCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MeasurementResponse {
    id: u64,
    #[serde(rename = "gymId")]
    gym_id: u64,
    #[serde(rename = "clientId")]
    client_id: u64,
    #[serde(rename = "fecha")]
    date: NaiveDate,
    #[serde(flatten)]
    body: BodyMeasurements,
    #[serde(rename = "createdAt", default)]
    created_at: Option<NaiveDateTime>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<NaiveDateTime>,
}

/// Every value is in centimeters, except the weight (kg) and the body fat (%).
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct BodyMeasurements {
    #[serde(rename = "peso")]
    weight: f64,
    #[serde(rename = "altura")]
    height: f64,
    #[serde(rename = "pechoCm")]
    chest: f64,
    #[serde(rename = "cinturaCm")]
    waist: f64,
    #[serde(rename = "caderaCm")]
    hip: f64,
    #[serde(rename = "brazoIzqCm")]
    left_arm: f64,
    #[serde(rename = "brazoDerCm")]
    right_arm: f64,
    #[serde(rename = "piernaIzqCm")]
    left_leg: f64,
    #[serde(rename = "piernaDerCm")]
    right_leg: f64,
    #[serde(rename = "grasaCorporal", default, skip_serializing_if = "Option::is_none")]
    body_fat: Option<f64>,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl BodyMeasurements {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weight: f64,
        height: f64,
        chest: f64,
        waist: f64,
        hip: f64,
        left_arm: f64,
        right_arm: f64,
        left_leg: f64,
        right_leg: f64,
        body_fat: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            weight,
            height,
            chest,
            waist,
            hip,
            left_arm,
            right_arm,
            left_leg,
            right_leg,
            body_fat,
            notes,
        }
    }
}

impl BodyMetrics for MeasurementResponse {
    fn weight(&self) -> f64 {
        self.body.weight
    }

    fn height(&self) -> f64 {
        self.body.height
    }
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MeasurementCreateRequest {
    #[serde(rename = "clientId")]
    client_id: u64,
    #[serde(rename = "fecha")]
    date: NaiveDate,
    #[serde(flatten)]
    body: BodyMeasurements,
}

impl MeasurementCreateRequest {
    pub fn new(client_id: u64, date: NaiveDate, body: BodyMeasurements) -> Self {
        Self {
            client_id,
            date,
            body,
        }
    }
}

impl BodyMetrics for MeasurementCreateRequest {
    fn weight(&self) -> f64 {
        self.body.weight
    }

    fn height(&self) -> f64 {
        self.body.height
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl BodyMeasurements {
        pub fn new_test(weight: f64, height: f64) -> Self {
            BodyMeasurements::new(
                weight, height, 95.0, 80.0, 98.0, 32.0, 32.5, 55.0, 55.5, None, None,
            )
        }
    }

    impl MeasurementResponse {
        pub fn new_test(id: u64, client_id: u64, date: NaiveDate, weight: f64, height: f64) -> Self {
            MeasurementResponse {
                id,
                gym_id: 1,
                client_id,
                date,
                body: BodyMeasurements::new_test(weight, height),
                created_at: None,
                updated_at: None,
            }
        }
    }

    pub const MEASUREMENT_AS_JSON: &str = r#"{"id":5,"gymId":1,"clientId":42,"fecha":"2024-02-10","peso":80.0,"altura":180.0,"pechoCm":95.0,"cinturaCm":80.0,"caderaCm":98.0,"brazoIzqCm":32.0,"brazoDerCm":32.5,"piernaIzqCm":55.0,"piernaDerCm":55.5,"grasaCorporal":null,"notas":null,"createdAt":"2024-02-10T08:00:00","updatedAt":"2024-02-10T08:00:00"}"#;

    #[test]
    fn should_deserialize_measurement() {
        let measurement: MeasurementResponse = serde_json::from_str(MEASUREMENT_AS_JSON).unwrap();
        assert_eq!(&42, measurement.client_id());
        assert_eq!(&BodyMeasurements::new_test(80.0, 180.0), measurement.body());
    }

    #[test]
    fn should_serialize_create_request_flat() {
        let request = MeasurementCreateRequest::new(
            42,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            BodyMeasurements::new_test(80.0, 180.0),
        );
        assert_eq!(
            r#"{"clientId":42,"fecha":"2024-02-10","peso":80.0,"altura":180.0,"pechoCm":95.0,"cinturaCm":80.0,"caderaCm":98.0,"brazoIzqCm":32.0,"brazoDerCm":32.5,"piernaIzqCm":55.0,"piernaDerCm":55.5}"#,
            serde_json::to_string(&request).unwrap()
        );
    }

    #[test]
    fn should_compute_bmi() {
        let measurement = MeasurementResponse::new_test(
            1,
            42,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            80.0,
            180.0,
        );
        let bmi = measurement.bmi().unwrap();
        assert_eq!("24.7", format!("{bmi:.1}"));
        assert_eq!(BmiCategory::Normal, BmiCategory::from_bmi(bmi));
    }

    #[test]
    fn should_not_compute_bmi_without_height() {
        assert_eq!(None, compute_bmi(80.0, 0.0));
    }

    #[test]
    fn should_categorize_bmi() {
        assert_eq!(BmiCategory::Underweight, BmiCategory::from_bmi(18.4));
        assert_eq!(BmiCategory::Normal, BmiCategory::from_bmi(18.5));
        assert_eq!(BmiCategory::Overweight, BmiCategory::from_bmi(25.0));
        assert_eq!(BmiCategory::Obese, BmiCategory::from_bmi(30.0));
        assert_eq!("Sobrepeso", BmiCategory::Overweight.to_string());
    }
}
