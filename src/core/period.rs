//! Translates a caller's period reference into what the website understands:
//! a legislature for plenary pages, a calendar year for committee pages.

use crate::config::consts::COMISIONES_YEAR_THRESHOLD;
use crate::domain::model::{Advisory, Period, PeriodReference, PeriodTable, Resolution};
use crate::utils::error::{AttendanceError, Result};
use chrono::Datelike;

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Resolves a plenary period.
///
/// A number is first matched against legislature ids; only when no id
/// matches is it read as a calendar year, in which case the first period
/// in table order spanning that year wins. A date must fall inside a
/// period's inclusive `[desde, hasta]` interval.
pub fn resolve_sala(periods: &PeriodTable, reference: PeriodReference) -> Result<Resolution<Period>> {
    match reference {
        PeriodReference::Number(number) => {
            if let Some(period) = periods.by_id(number) {
                return Ok(Resolution::exact(period.clone()));
            }

            let candidates: Vec<&Period> = periods.iter().filter(|p| p.spans_year(number)).collect();
            let chosen = candidates
                .first()
                .copied()
                .cloned()
                .ok_or_else(|| AttendanceError::period_not_found(number))?;

            if candidates.len() > 1 {
                let advisory = Advisory::AmbiguousYear {
                    year: number,
                    chosen: chosen.legislatura,
                    candidates: candidates.iter().map(|p| p.legislatura).collect(),
                };
                return Ok(Resolution::with_advisory(chosen, advisory));
            }
            Ok(Resolution::exact(chosen))
        }
        PeriodReference::Date(instant) => periods
            .iter()
            .find(|p| p.contains(instant))
            .cloned()
            .map(Resolution::exact)
            .ok_or_else(|| AttendanceError::period_not_found(instant)),
    }
}

/// Resolves a committee year, rejecting anything after `current_year`.
///
/// Numbers below the threshold are legislature ids and map to the year
/// their period ends in.
pub fn resolve_comisiones(
    periods: &PeriodTable,
    reference: PeriodReference,
    current_year: i32,
) -> Result<Resolution<i32>> {
    let requested = match reference {
        PeriodReference::Number(number) => number,
        PeriodReference::Date(instant) => instant.year(),
    };
    if requested > current_year {
        return Err(AttendanceError::FuturePeriod {
            requested,
            current: current_year,
        });
    }

    match reference {
        PeriodReference::Number(id) if id < COMISIONES_YEAR_THRESHOLD => {
            let period = periods
                .by_id(id)
                .ok_or_else(|| AttendanceError::period_not_found(id))?;
            let year = period.hasta.year();

            if period.desde.year() != year {
                let advisory = Advisory::MultiYearLegislature {
                    legislatura: id,
                    chosen_year: year,
                };
                return Ok(Resolution::with_advisory(year, advisory));
            }
            Ok(Resolution::exact(year))
        }
        _ => Ok(Resolution::exact(requested)),
    }
}
