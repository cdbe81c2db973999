use crate::config::consts;
use crate::domain::model::PeriodTable;
use crate::domain::ports::SourceProvider;
use crate::utils::error::{AttendanceError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Where and how to fetch attendance pages, plus the known legislatures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub urls: UrlTemplates,
    pub http: HttpConfig,
    pub periodos: PeriodTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlTemplates {
    pub sala: String,
    pub sala_detalle: String,
    pub comisiones: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            sala: consts::URL_ASISTENCIA_SALA.to_string(),
            sala_detalle: consts::URL_ASISTENCIA_SALA_DETALLE.to_string(),
            comisiones: consts::URL_ASISTENCIA_COMISIONES.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: consts::DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: consts::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SourceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let config: Self = toml::from_str(&processed)?;
        tracing::debug!(
            "Loaded source config with {} legislatures",
            config.periodos.len()
        );
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SENADO_HOST})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url_template("urls.sala", &self.urls.sala, &[consts::PERIOD_PLACEHOLDER])?;
        validation::validate_url_template(
            "urls.sala_detalle",
            &self.urls.sala_detalle,
            &[consts::PERIOD_PLACEHOLDER, consts::SENATOR_PLACEHOLDER],
        )?;
        validation::validate_url_template(
            "urls.comisiones",
            &self.urls.comisiones,
            &[consts::PERIOD_PLACEHOLDER, consts::SENATOR_PLACEHOLDER],
        )?;
        validation::validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        validation::validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;

        if self.periodos.is_empty() {
            return Err(AttendanceError::InvalidConfig {
                field: "periodos".to_string(),
                reason: "at least one legislature is required".to_string(),
            });
        }
        Ok(())
    }
}

impl SourceProvider for SourceConfig {
    fn sala_url_template(&self) -> &str {
        &self.urls.sala
    }

    fn sala_detail_url_template(&self) -> &str {
        &self.urls.sala_detalle
    }

    fn comisiones_url_template(&self) -> &str {
        &self.urls.comisiones
    }

    fn periods(&self) -> &PeriodTable {
        &self.periodos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[urls]
sala = "http://localhost:9000/sala?legiid=:periodo:"
sala_detalle = "http://localhost:9000/detalle?parlid=:senador-id:&legiid=:periodo:"
comisiones = "http://localhost:9000/comisiones?parlid=:senador-id:&ano=:periodo:"

[http]
timeout_seconds = 5

[[periodos]]
legislatura = 500
desde = "2020-03-11T00:00:00"
hasta = "2021-03-10T23:59:59"

[[periodos]]
legislatura = 501
desde = "2021-03-11T00:00:00"
hasta = "2022-03-10T23:59:59"
"#;

    #[test]
    fn test_defaults_are_valid() {
        let config = SourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.urls.sala, consts::URL_ASISTENCIA_SALA);
        assert!(!config.periodos.is_empty());
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config = SourceConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.user_agent, consts::DEFAULT_USER_AGENT);
        assert_eq!(config.periodos.len(), 2);
        assert_eq!(config.periodos.by_id(501).unwrap().legislatura, 501);
        assert!(config.urls.sala.starts_with("http://localhost:9000"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SourceConfig::from_toml_str("").unwrap();
        assert_eq!(config.urls.comisiones, consts::URL_ASISTENCIA_COMISIONES);
        assert_eq!(config.periodos, PeriodTable::default());
    }

    #[test]
    fn test_inverted_period_is_rejected() {
        let content = r#"
[[periodos]]
legislatura = 1
desde = "2021-03-11T00:00:00"
hasta = "2020-03-10T23:59:59"
"#;
        let err = SourceConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, AttendanceError::Toml(_)));
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn test_template_without_placeholder_fails_validation() {
        let mut config = SourceConfig::default();
        config.urls.comisiones = "http://localhost/comisiones?ano=:periodo:".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidConfig { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SENADORES_TEST_HOST", "127.0.0.1:7000");
        let content = r#"
[urls]
sala = "http://${SENADORES_TEST_HOST}/sala?legiid=:periodo:"
"#;
        let config = SourceConfig::from_toml_str(content).unwrap();
        assert_eq!(config.urls.sala, "http://127.0.0.1:7000/sala?legiid=:periodo:");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = SourceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.periodos.len(), 2);

        let missing = SourceConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, AttendanceError::Io(_)));
    }
}
