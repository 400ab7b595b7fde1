use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use health_monitor_data::models::HealthDomain;
use health_monitor_data::repository::SeriesKey;
use health_monitor_domain::entities::SummaryPolicy;

use super::common::ErrorResponse;

/// Selects the user and day a request reads
#[derive(Debug, Default, Deserialize, Clone, IntoParams, ToSchema, Validate)]
pub struct SeriesQuery {
    /// User directory name (default: configured user)
    #[validate(
        length(min = 1, max = 64, message = "User must be 1 to 64 characters"),
        custom = "validate_user"
    )]
    pub user: Option<String>,

    /// Day as YYYYMMDD (default: configured date)
    #[validate(custom = "validate_date")]
    pub date: Option<String>,
}

impl SeriesQuery {
    /// Validate the parameters and address a series, filling gaps from the defaults
    pub fn resolve(&self, default_user: &str, default_date: &str) -> Result<SeriesKey, ErrorResponse> {
        self.validate().map_err(validation_response)?;

        let user = self.user.as_deref().unwrap_or(default_user);
        let date = self.date.as_deref().unwrap_or(default_date);

        SeriesKey::new(user, date)
            .map_err(|e| ErrorResponse::validation_error(e.to_string(), None))
    }
}

/// Query parameters for the metadata endpoint
#[derive(Debug, Deserialize, Clone, IntoParams, ToSchema)]
pub struct MetadataQuery {
    /// User directory name (default: configured user)
    pub user: Option<String>,

    /// Day as YYYYMMDD (default: configured date)
    pub date: Option<String>,

    /// `blood-pressure` or `sleep-stages` (default: `blood-pressure`)
    pub domain: Option<String>,
}

impl MetadataQuery {
    /// The user and day part of the query
    pub fn series(&self) -> SeriesQuery {
        SeriesQuery { user: self.user.clone(), date: self.date.clone() }
    }

    /// Resolve the requested domain
    pub fn health_domain(&self) -> Result<HealthDomain, ErrorResponse> {
        match &self.domain {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ErrorResponse::validation_error(e, None)),
            None => Ok(HealthDomain::BloodPressure),
        }
    }
}

/// Query parameters for the notification endpoint
#[derive(Debug, Deserialize, Clone, IntoParams, ToSchema)]
pub struct NotificationQuery {
    /// User directory name (default: configured user)
    pub user: Option<String>,

    /// Day as YYYYMMDD (default: configured date)
    pub date: Option<String>,

    /// `last_observation` (default) or `most_severe`
    pub policy: Option<String>,
}

impl NotificationQuery {
    /// The user and day part of the query
    pub fn series(&self) -> SeriesQuery {
        SeriesQuery { user: self.user.clone(), date: self.date.clone() }
    }

    /// Resolve the requested summary policy
    pub fn summary_policy(&self) -> Result<SummaryPolicy, ErrorResponse> {
        match &self.policy {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ErrorResponse::validation_error(e, None)),
            None => Ok(SummaryPolicy::default()),
        }
    }
}

fn validate_user(user: &str) -> Result<(), ValidationError> {
    if user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(())
    } else {
        let mut error = ValidationError::new("user");
        error.message = Some("User may only contain letters, digits, '_' or '-'".into());
        Err(error)
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    let digits = date.len() == 8 && date.chars().all(|c| c.is_ascii_digit());
    if digits && chrono::NaiveDate::parse_from_str(date, "%Y%m%d").is_ok() {
        Ok(())
    } else {
        let mut error = ValidationError::new("date");
        error.message = Some("Date must be a calendar day formatted YYYYMMDD".into());
        Err(error)
    }
}

/// Convert validator errors into a 400 response listing each field
fn validation_response(errors: ValidationErrors) -> ErrorResponse {
    let details: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect();

    ErrorResponse::validation_error("Invalid query parameters", Some(details.into()))
}
