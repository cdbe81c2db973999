use crate::config::consts;
use crate::domain::model::Senator;
use crate::utils::error::{AttendanceError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, reason: impl Into<String>) -> AttendanceError {
    AttendanceError::InvalidConfig {
        field: field_name.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, format!("Invalid URL format: {}", e))),
    }
}

/// Checks that a template carries its placeholders and expands to an http(s) URL.
pub fn validate_url_template(field_name: &str, template: &str, placeholders: &[&str]) -> Result<()> {
    for placeholder in placeholders {
        if !template.contains(placeholder) {
            return Err(invalid(
                field_name,
                format!("Template is missing the {} placeholder", placeholder),
            ));
        }
    }

    let sample = template
        .replace(consts::PERIOD_PLACEHOLDER, "1")
        .replace(consts::SENATOR_PLACEHOLDER, "1");
    validate_url(field_name, &sample)
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(field_name, format!("Value must be at least {}", min_value)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

impl Validate for Senator {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AttendanceError::invalid_argument("senator id cannot be empty"));
        }
        if self.nombre.trim().is_empty() {
            return Err(AttendanceError::invalid_argument("senator name cannot be empty"));
        }
        Ok(())
    }
}
