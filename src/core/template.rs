use crate::config::consts::{PERIOD_PLACEHOLDER, SENATOR_PLACEHOLDER};
use std::fmt::Display;

/// Substitutes the period and, when given, the senator id into a URL template.
pub fn fill(template: &str, periodo: impl Display, senador_id: Option<&str>) -> String {
    let url = template.replacen(PERIOD_PLACEHOLDER, &periodo.to_string(), 1);
    match senador_id {
        Some(id) => url.replacen(SENATOR_PLACEHOLDER, id, 1),
        None => url,
    }
}
