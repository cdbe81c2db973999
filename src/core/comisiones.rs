//! Committee ("comisiones") attendance for one senator and one calendar year.

use crate::core::document::{parse_count, selector, text_within, Document, NumericPolicy};
use crate::core::template;
use crate::domain::model::{Advisory, CommitteeAttendance, OfficialCommittee, OtherCommittee, Senator};
use crate::domain::ports::{PageFetcher, SourceProvider};
use crate::utils::error::{AttendanceError, Result};
use crate::utils::validation::Validate;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

// Every numeric committee column must hold a number.
const COUNT_POLICY: NumericPolicy = NumericPolicy::Required;

static TABLES: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tr:not(:first-child)"));
static COLUMNS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("td:nth-child(1)"),
        selector("td:nth-child(2)"),
        selector("td:nth-child(3)"),
    ]
});

pub async fn fetch_attendance<F, S>(
    fetcher: &F,
    source: &S,
    senator: &Senator,
    year: i32,
    include_senator: bool,
) -> Result<CommitteeAttendance>
where
    F: PageFetcher + ?Sized,
    S: SourceProvider + ?Sized,
{
    senator.validate()?;

    let url = template::fill(source.comisiones_url_template(), year, Some(&senator.id));
    tracing::debug!("Fetching committee attendance from: {}", url);
    let body = fetcher.fetch_page(&url).await?;

    let attendance = parse_committees(&body, senator, year, include_senator)?;
    tracing::debug!(
        "Parsed {} official and {} other committees",
        attendance.oficiales.len(),
        attendance.otras.len()
    );
    Ok(attendance)
}

/// Reads official committees from the first table and substitutions from the last one.
pub fn parse_committees(
    body: &str,
    senator: &Senator,
    year: i32,
    include_senator: bool,
) -> Result<CommitteeAttendance> {
    let document = Document::parse(body);
    let tables: Vec<ElementRef<'_>> = document.select(&TABLES).collect();

    let mut avisos = Vec::new();
    if tables.len() == 1 {
        let advisory = Advisory::SingleCommitteeTable;
        tracing::warn!("{}", advisory);
        avisos.push(advisory);
    }

    let oficiales = match tables.first() {
        Some(table) => rows(table, "oficiales")?
            .into_iter()
            .map(|row| OfficialCommittee {
                nombre: row.nombre,
                total: row.first,
                asiste: row.second,
            })
            .collect(),
        None => Vec::new(),
    };
    let otras = match tables.last() {
        Some(table) => rows(table, "otras")?
            .into_iter()
            .map(|row| OtherCommittee {
                nombre: row.nombre,
                reemplazante: row.first,
                asistente: row.second,
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(CommitteeAttendance {
        senador: include_senator.then(|| senator.clone()),
        periodo: year,
        oficiales,
        otras,
        avisos,
    })
}

/// One body row: a name and the two counts that follow it.
struct CommitteeRow {
    nombre: String,
    first: i64,
    second: i64,
}

fn rows(table: &ElementRef<'_>, table_name: &'static str) -> Result<Vec<CommitteeRow>> {
    table
        .select(&BODY_ROWS)
        .enumerate()
        .map(|(index, row)| {
            let cell = |column: usize| text_within(&row, &COLUMNS[column]).trim().to_string();
            let count = |column: usize| {
                let raw = cell(column);
                parse_count(&raw, COUNT_POLICY, || AttendanceError::MalformedRow {
                    table: table_name,
                    row: index + 1,
                    column: column + 1,
                    value: raw.clone(),
                })
            };
            Ok(CommitteeRow {
                nombre: cell(0),
                first: count(1)?,
                second: count(2)?,
            })
        })
        .collect()
}
