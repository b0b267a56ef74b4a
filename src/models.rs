use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_CARRIER_NAME: &str = "INDOSAT OOREDOO";
pub const DEFAULT_BATTERY_PERCENTAGE: &str = "8";
pub const DEFAULT_SIGNAL_STRENGTH: &str = "4";

// Query string as sent by the form, every field may be missing
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ImageQuery {
    pub time: Option<String>,
    pub message_text: Option<String>,
    pub carrier_name: Option<String>,
    pub battery_percentage: Option<String>,
    pub signal_strength: Option<String>,
}

// Validated parameters with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageParams {
    pub time: String,
    pub message_text: String,
    pub carrier_name: String,
    pub battery_percentage: String,
    pub signal_strength: String,
}

impl TryFrom<ImageQuery> for ImageParams {
    type Error = AppError;

    fn try_from(query: ImageQuery) -> Result<Self, Self::Error> {
        let (Some(time), Some(message_text)) = (
            non_empty(query.time),
            non_empty(query.message_text),
        ) else {
            return Err(AppError::MissingParameter);
        };

        Ok(Self {
            time,
            message_text,
            carrier_name: or_default(query.carrier_name, DEFAULT_CARRIER_NAME),
            battery_percentage: or_default(query.battery_percentage, DEFAULT_BATTERY_PERCENTAGE),
            signal_strength: or_default(query.signal_strength, DEFAULT_SIGNAL_STRENGTH),
        })
    }
}

// an empty value counts as absent, same as the form does
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}

// JSON body of every non-image response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(
        rename = "remainingSeconds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub remaining_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub cooldown_remaining_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(time: &str, message: &str) -> ImageQuery {
        ImageQuery {
            time: Some(time.to_string()),
            message_text: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let params = ImageParams::try_from(query("11:26", "test")).unwrap();
        assert_eq!(params.carrier_name, "INDOSAT OOREDOO");
        assert_eq!(params.battery_percentage, "8");
        assert_eq!(params.signal_strength, "4");
    }

    #[test]
    fn empty_optional_fields_fall_back_to_defaults() {
        let mut q = query("11:26", "test");
        q.carrier_name = Some(String::new());
        q.signal_strength = Some(String::new());
        q.battery_percentage = Some("57".into());

        let params = ImageParams::try_from(q).unwrap();
        assert_eq!(params.carrier_name, DEFAULT_CARRIER_NAME);
        assert_eq!(params.signal_strength, DEFAULT_SIGNAL_STRENGTH);
        assert_eq!(params.battery_percentage, "57");
    }

    #[test]
    fn missing_or_empty_required_fields_are_rejected() {
        let cases = [
            ImageQuery::default(),
            ImageQuery {
                time: Some("11:26".into()),
                ..Default::default()
            },
            ImageQuery {
                message_text: Some("hi".into()),
                ..Default::default()
            },
            query("", "hi"),
            query("11:26", ""),
        ];
        for q in cases {
            assert!(matches!(
                ImageParams::try_from(q.clone()),
                Err(AppError::MissingParameter)
            ), "{q:?}");
        }
    }

    #[test]
    fn error_body_omits_remaining_seconds_when_absent() {
        let body = ErrorBody {
            error: "Missing required parameters".into(),
            message: "x".into(),
            remaining_seconds: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("remainingSeconds").is_none());

        let body = ErrorBody {
            remaining_seconds: Some(12),
            ..body
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["remainingSeconds"], 12);
    }
}
