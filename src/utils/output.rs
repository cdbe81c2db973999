use crate::domain::model::{CommitteeAttendance, SalaAttendance};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One line per session: `sesion,tipo,fecha,asiste`.
pub fn sala_to_csv(attendance: &SalaAttendance) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &attendance.detalle {
        writer.serialize(record)?;
    }
    finish(writer)
}

/// Both committee lists in one sheet, tagged by list; columns not used by a list stay empty.
pub fn comisiones_to_csv(attendance: &CommitteeAttendance) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["lista", "nombre", "total", "asiste", "reemplazante", "asistente"])?;
    for c in &attendance.oficiales {
        let (total, asiste) = (c.total.to_string(), c.asiste.to_string());
        writer.write_record(["oficial", c.nombre.as_str(), total.as_str(), asiste.as_str(), "", ""])?;
    }
    for c in &attendance.otras {
        let (reemplazante, asistente) = (c.reemplazante.to_string(), c.asistente.to_string());
        writer.write_record([
            "otra",
            c.nombre.as_str(),
            "",
            "",
            reemplazante.as_str(),
            asistente.as_str(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
