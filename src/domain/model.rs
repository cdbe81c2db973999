use crate::utils::error::{AttendanceError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A legislative period (legislatura) and the instants it spans, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub legislatura: i32,
    pub desde: NaiveDateTime,
    pub hasta: NaiveDateTime,
}

impl Period {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.desde <= instant && instant <= self.hasta
    }

    pub fn spans_year(&self, year: i32) -> bool {
        use chrono::Datelike;
        self.desde.year() <= year && year <= self.hasta.year()
    }
}

/// The ordered collection of known legislatures.
///
/// Order is lookup priority: when several periods match a year, the one
/// that comes first here wins. Periods are expected not to overlap, but
/// that is only reported, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeriodTable {
    periods: Vec<Period>,
}

impl PeriodTable {
    pub fn new(periods: Vec<Period>) -> Result<Self> {
        for period in &periods {
            if period.desde > period.hasta {
                return Err(AttendanceError::InvalidConfig {
                    field: format!("periodos[{}]", period.legislatura),
                    reason: format!("desde {} is after hasta {}", period.desde, period.hasta),
                });
            }
        }

        for (i, a) in periods.iter().enumerate() {
            for b in &periods[i + 1..] {
                if a.desde <= b.hasta && b.desde <= a.hasta {
                    tracing::warn!(
                        "Legislatures {} and {} overlap; year lookups keep the first one",
                        a.legislatura,
                        b.legislatura
                    );
                }
            }
        }

        Ok(Self { periods })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn by_id(&self, legislatura: i32) -> Option<&Period> {
        self.periods.iter().find(|p| p.legislatura == legislatura)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl Default for PeriodTable {
    fn default() -> Self {
        Self {
            periods: crate::config::consts::default_periods(),
        }
    }
}

impl<'de> Deserialize<'de> for PeriodTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let periods = Vec::<Period>::deserialize(deserializer)?;
        Self::new(periods).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Senator {
    pub id: String,
    pub nombre: String,
}

impl Senator {
    pub fn new(id: impl Into<String>, nombre: impl Into<String>) -> Result<Self> {
        let senator = Self {
            id: id.into(),
            nombre: nombre.into(),
        };
        crate::utils::validation::Validate::validate(&senator)?;
        Ok(senator)
    }
}

/// What the caller asks for: a legislature id or year, or an exact instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodReference {
    Number(i32),
    Date(NaiveDateTime),
}

impl From<i32> for PeriodReference {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDateTime> for PeriodReference {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for PeriodReference {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl FromStr for PeriodReference {
    type Err = AttendanceError;

    /// Accepts `362`, `2014`, `2014-03-05`, `2014-03-05T10:30:00` or `2014-03-05 10:30:00`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<i32>() {
            return Ok(Self::Number(number));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.into());
        }
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(Self::Date)
            .ok_or_else(|| {
                AttendanceError::invalid_argument(format!(
                    "period must be a number or a date, got {:?}",
                    s
                ))
            })
    }
}

impl fmt::Display for PeriodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Non-fatal notice about how an ambiguous input was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum Advisory {
    /// More than one legislature spans the requested year; the first one in table order was used.
    AmbiguousYear {
        year: i32,
        chosen: i32,
        candidates: Vec<i32>,
    },
    /// A legislature id was mapped to a single calendar year although it spans several.
    MultiYearLegislature { legislatura: i32, chosen_year: i32 },
    /// The committee page had one table, so both committee lists were read from it.
    SingleCommitteeTable,
    /// No row in the plenary table carries the senator's name.
    SenatorRowMissing { nombre: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousYear {
                year,
                chosen,
                candidates,
            } => write!(
                f,
                "year {} matches legislatures {:?}; only {} is used. Prefer a date or legislature id",
                year, candidates, chosen
            ),
            Self::MultiYearLegislature {
                legislatura,
                chosen_year,
            } => write!(
                f,
                "legislature {} spans more than one year; committees are queried for {} only",
                legislatura, chosen_year
            ),
            Self::SingleCommitteeTable => write!(
                f,
                "committee page has a single table; official and other committees describe the same rows"
            ),
            Self::SenatorRowMissing { nombre } => {
                write!(f, "no attendance row found for {:?}; counts default to zero", nombre)
            }
        }
    }
}

/// A resolved value together with the advisories produced while resolving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<T> {
    #[serde(rename = "periodo")]
    pub value: T,
    #[serde(rename = "avisos", skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

impl<T> Resolution<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn with_advisory(value: T, advisory: Advisory) -> Self {
        tracing::warn!("{}", advisory);
        Self {
            value,
            advisories: vec![advisory],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Absences {
    pub total: i64,
    pub justificadas: i64,
    pub injustificadas: i64,
}

impl Absences {
    /// Derives absences from the session total, unjustified count floored at zero.
    pub fn derive(total_sessions: i64, asistencia: i64, justificadas: i64) -> Self {
        let total = total_sessions.saturating_sub(asistencia);
        Self {
            total,
            justificadas,
            injustificadas: total.saturating_sub(justificadas).max(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub sesion: i32,
    pub tipo: String,
    pub fecha: NaiveDate,
    pub asiste: bool,
}

/// Plenary ("sala") attendance for one senator in one legislature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaAttendance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senador: Option<Senator>,
    pub periodo: Period,
    pub asistencia: i64,
    pub inasistencias: Absences,
    pub detalle: Vec<SessionRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avisos: Vec<Advisory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficialCommittee {
    pub nombre: String,
    pub total: i64,
    pub asiste: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherCommittee {
    pub nombre: String,
    pub reemplazante: i64,
    pub asistente: i64,
}

/// Committee ("comisiones") attendance for one senator in one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeAttendance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senador: Option<Senator>,
    pub periodo: i32,
    pub oficiales: Vec<OfficialCommittee>,
    pub otras: Vec<OtherCommittee>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avisos: Vec<Advisory>,
}
