//! Static data for the Senate record-keeping website.

use crate::domain::model::Period;
use chrono::NaiveDate;

pub const PERIOD_PLACEHOLDER: &str = ":periodo:";
pub const SENATOR_PLACEHOLDER: &str = ":senador-id:";

pub const URL_ASISTENCIA_SALA: &str = "http://www.senado.cl/appsenado/index.php?mo=sesionessala&ac=asistenciaSenadores&camara=S&legiini=361&legiid=:periodo:";
pub const URL_ASISTENCIA_SALA_DETALLE: &str = "http://www.senado.cl/appsenado/index.php?mo=sesionessala&ac=asistenciaSenador&parlid=:senador-id:&legiid=:periodo:";
pub const URL_ASISTENCIA_COMISIONES: &str = "http://www.senado.cl/appsenado/index.php?mo=comisiones&ac=asistencia_senadores&parlid=:senador-id:&ano=:periodo:";

pub const DEFAULT_USER_AGENT: &str = concat!("senadores-asistencia/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Committee references below this value are legislature ids, not calendar years.
pub const COMISIONES_YEAR_THRESHOLD: i32 = 2002;

/// Month names as the website prints them, in calendar order.
pub const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

// (legislatura, desde, hasta); each runs from March 11 to March 10 of the next year.
const DEFAULT_PERIODS: [(i32, (i32, u32, u32), (i32, u32, u32)); 18] = [
    (357, (2009, 3, 11), (2010, 3, 10)),
    (358, (2010, 3, 11), (2011, 3, 10)),
    (359, (2011, 3, 11), (2012, 3, 10)),
    (360, (2012, 3, 11), (2013, 3, 10)),
    (361, (2013, 3, 11), (2014, 3, 10)),
    (362, (2014, 3, 11), (2015, 3, 10)),
    (363, (2015, 3, 11), (2016, 3, 10)),
    (364, (2016, 3, 11), (2017, 3, 10)),
    (365, (2017, 3, 11), (2018, 3, 10)),
    (366, (2018, 3, 11), (2019, 3, 10)),
    (367, (2019, 3, 11), (2020, 3, 10)),
    (368, (2020, 3, 11), (2021, 3, 10)),
    (369, (2021, 3, 11), (2022, 3, 10)),
    (370, (2022, 3, 11), (2023, 3, 10)),
    (371, (2023, 3, 11), (2024, 3, 10)),
    (372, (2024, 3, 11), (2025, 3, 10)),
    (373, (2025, 3, 11), (2026, 3, 10)),
    (374, (2026, 3, 11), (2027, 3, 10)),
];

pub fn default_periods() -> Vec<Period> {
    DEFAULT_PERIODS
        .iter()
        .filter_map(|&(legislatura, (y0, m0, d0), (y1, m1, d1))| {
            Some(Period {
                legislatura,
                desde: NaiveDate::from_ymd_opt(y0, m0, d0)?.and_hms_opt(0, 0, 0)?,
                hasta: NaiveDate::from_ymd_opt(y1, m1, d1)?.and_hms_opt(23, 59, 59)?,
            })
        })
        .collect()
}
