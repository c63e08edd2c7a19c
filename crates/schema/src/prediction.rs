use serde::{Deserialize, Serialize};

/// One detected region returned by the inference service.
///
/// `bbox` is `[x1, y1, x2, y2]` in original image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub bbox: [f64; 4],
    pub class: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn width(&self) -> f64 {
        self.bbox[2] - self.bbox[0]
    }

    pub fn height(&self) -> f64 {
        self.bbox[3] - self.bbox[1]
    }
}

/// Body returned by the inference service (and relayed by the gateway).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    #[serde(default)]
    pub predictions: Option<Vec<Prediction>>,
}

impl InferenceResponse {
    /// Missing or `null` predictions count as an empty result set.
    pub fn into_predictions(self) -> Vec<Prediction> {
        self.predictions.unwrap_or_default()
    }
}

/// Failure payload produced by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_payload() {
        let json = r#"{"predictions":[{"bbox":[1,2,30,40],"class":"bad_weld","confidence":0.92}]}"#;
        let response: InferenceResponse = serde_json::from_str(json).unwrap();
        let predictions = response.into_predictions();

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].class, "bad_weld");
        assert_eq!(predictions[0].bbox, [1.0, 2.0, 30.0, 40.0]);
        assert!((predictions[0].confidence - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_predictions_field_is_empty() {
        let response: InferenceResponse = serde_json::from_str(r#"{"model":"v2"}"#).unwrap();
        assert!(response.into_predictions().is_empty());
    }

    #[test]
    fn null_predictions_field_is_empty() {
        let response: InferenceResponse =
            serde_json::from_str(r#"{"predictions":null}"#).unwrap();
        assert!(response.into_predictions().is_empty());
    }

    #[test]
    fn unknown_prediction_fields_are_ignored() {
        let json = r#"{"bbox":[0,0,10,10],"class":"good_weld","confidence":0.5,"class_id":3}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.width(), 10.0);
        assert_eq!(prediction.height(), 10.0);
    }

    #[test]
    fn error_body_serializes_with_error_key() {
        let body = ErrorBody::new("Failed to process image");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Failed to process image"}"#
        );
    }
}
