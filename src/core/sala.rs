//! Plenary ("sala") attendance: the per-legislature summary page and the
//! per-senator session detail page.

use crate::config::consts::MONTHS;
use crate::core::document::{
    last_number, parse_count, selector, text, text_within, Document, NumericPolicy,
};
use crate::core::template;
use crate::domain::model::{Absences, Advisory, Period, SalaAttendance, Senator, SessionRecord};
use crate::domain::ports::{PageFetcher, SourceProvider};
use crate::utils::error::{AttendanceError, Result};
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

const ASISTENCIA_POLICY: NumericPolicy = NumericPolicy::Required;
// Senators without justified absences have no link in that cell.
const JUSTIFICADAS_POLICY: NumericPolicy = NumericPolicy::DefaultTo(0);

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("#main h2"));
static SENATOR_ROWS: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"#main table tr[align="left"]:not(:first-child)"#));
static FIRST_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:first-child"));
static ATTENDANCE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("td a:not([id])"));
static JUSTIFIED_LINK: LazyLock<Selector> = LazyLock::new(|| selector("td a[id]"));

static TABLES: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tr:not(:first-child)"));
static SESSION_LINK: LazyLock<Selector> = LazyLock::new(|| selector("td:last-child a"));
static PRESENCE_MARK: LazyLock<Selector> = LazyLock::new(|| selector("td:first-child img"));

// "<sesion> <tipo>, <weekday> <day> de <month> de <year>"
static SESSION_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d*) ([\s\S]*), [\s\S]* (\d*) de (\w*) de (\d*)")
        .expect("valid session text pattern")
});

/// Fetches the plenary summary for `senator` in `period`, then its session detail.
pub async fn fetch_attendance<F, S>(
    fetcher: &F,
    source: &S,
    senator: &Senator,
    period: &Period,
    include_senator: bool,
) -> Result<SalaAttendance>
where
    F: PageFetcher + ?Sized,
    S: SourceProvider + ?Sized,
{
    senator.validate()?;

    let url = template::fill(source.sala_url_template(), period.legislatura, None);
    tracing::debug!("Fetching plenary attendance from: {}", url);
    let body = fetcher.fetch_page(&url).await?;

    let summary = parse_summary(&body, senator, period, include_senator)?;
    tracing::debug!(
        "Senator {} attended {} sessions, {} absences",
        senator.id,
        summary.asistencia,
        summary.inasistencias.total
    );

    fetch_detail(fetcher, source, summary, senator, period).await
}

/// Fetches the session-by-session detail and stores it in `summary.detalle`.
pub async fn fetch_detail<F, S>(
    fetcher: &F,
    source: &S,
    mut summary: SalaAttendance,
    senator: &Senator,
    period: &Period,
) -> Result<SalaAttendance>
where
    F: PageFetcher + ?Sized,
    S: SourceProvider + ?Sized,
{
    let url = template::fill(
        source.sala_detail_url_template(),
        period.legislatura,
        Some(&senator.id),
    );
    tracing::debug!("Fetching plenary session detail from: {}", url);
    let body = fetcher.fetch_page(&url).await?;

    summary.detalle = parse_detail(&body)?;
    tracing::debug!("Parsed {} session rows", summary.detalle.len());
    Ok(summary)
}

pub fn parse_summary(
    body: &str,
    senator: &Senator,
    period: &Period,
    include_senator: bool,
) -> Result<SalaAttendance> {
    let document = Document::parse(body);

    let heading = document.text_of(&HEADING);
    let total = last_number(&heading).ok_or_else(|| AttendanceError::MalformedSummary {
        field: "total",
        value: heading.trim().to_string(),
    })?;

    let row = document.select(&SENATOR_ROWS).find(|row| {
        row.select(&FIRST_CELL)
            .next()
            .is_some_and(|cell| text(&cell).trim() == senator.nombre.trim())
    });

    let mut avisos = Vec::new();
    let (asistencia, justificadas) = match row {
        Some(row) => {
            let raw = text_within(&row, &ATTENDANCE_LINK);
            let asistencia = parse_count(&raw, ASISTENCIA_POLICY, || {
                AttendanceError::MalformedSummary {
                    field: "asistencia",
                    value: raw.trim().to_string(),
                }
            })?;

            let raw = text_within(&row, &JUSTIFIED_LINK);
            let justificadas = parse_count(&raw, JUSTIFICADAS_POLICY, || {
                AttendanceError::MalformedSummary {
                    field: "justificadas",
                    value: raw.trim().to_string(),
                }
            })?;
            (asistencia, justificadas)
        }
        None => {
            let advisory = Advisory::SenatorRowMissing {
                nombre: senator.nombre.clone(),
            };
            tracing::warn!("{}", advisory);
            avisos.push(advisory);
            (0, 0)
        }
    };

    Ok(SalaAttendance {
        senador: include_senator.then(|| senator.clone()),
        periodo: period.clone(),
        asistencia,
        inasistencias: Absences::derive(total, asistencia, justificadas),
        detalle: Vec::new(),
        avisos,
    })
}

/// Parses every row of the page's last table, header excluded, in page order.
pub fn parse_detail(body: &str) -> Result<Vec<SessionRecord>> {
    let document = Document::parse(body);
    let Some(table) = document.select(&TABLES).last() else {
        return Ok(Vec::new());
    };

    table
        .select(&BODY_ROWS)
        .map(|row| {
            let description = text_within(&row, &SESSION_LINK);
            let asiste = row.select(&PRESENCE_MARK).next().is_some();
            parse_session_text(description.trim(), asiste)
        })
        .collect()
}

pub fn parse_session_text(description: &str, asiste: bool) -> Result<SessionRecord> {
    let malformed = || AttendanceError::MalformedSessionText {
        text: description.to_string(),
    };
    let caps = SESSION_TEXT.captures(description).ok_or_else(malformed)?;

    let month = month_number(&caps[4])?;
    let sesion: i32 = caps[1].parse().map_err(|_| malformed())?;
    let day: u32 = caps[3].parse().map_err(|_| malformed())?;
    let year: i32 = caps[5].parse().map_err(|_| malformed())?;
    let fecha = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)?;

    Ok(SessionRecord {
        sesion,
        tipo: caps[2].to_string(),
        fecha,
        asiste,
    })
}

/// 1-based month for a Spanish month name, ignoring case.
pub fn month_number(name: &str) -> Result<u32> {
    MONTHS
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| AttendanceError::UnknownMonth {
            month: name.to_string(),
        })
}
