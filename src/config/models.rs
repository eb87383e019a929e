use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(length(min = 1, message = "Auth email cannot be empty"))]
    pub auth_email: Cow<'static, str>,

    #[validate(length(min = 1, message = "Auth key cannot be empty"))]
    pub auth_key: Cow<'static, str>,

    #[serde(default)]
    #[validate(url(message = "API base must be a valid URL"))]
    pub api_base: Option<String>,

    #[validate(length(min = 1, message = "At least one record is required"), nested)]
    pub records: Vec<RecordSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_content"))]
pub struct RecordSpec {
    #[validate(length(min = 1, message = "Zone name cannot be empty"))]
    pub zone: Cow<'static, str>,

    #[validate(length(min = 1, message = "Record name cannot be empty"))]
    pub name: Cow<'static, str>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Record type cannot be empty"))]
    pub record_type: Cow<'static, str>,

    #[serde(default)]
    pub content: Cow<'static, str>,

    #[serde(default)]
    pub ensure: Ensure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

fn validate_content(spec: &RecordSpec) -> Result<(), ValidationError> {
    if spec.ensure == Ensure::Present && spec.content.is_empty() {
        let mut err = ValidationError::new("content");
        err.message = Some("Content is required for records that should be present".into());
        return Err(err);
    }
    Ok(())
}
