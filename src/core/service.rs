use crate::config::SourceConfig;
use crate::core::{comisiones, period, sala};
use crate::domain::model::{
    Advisory, CommitteeAttendance, Period, PeriodReference, Resolution, SalaAttendance, Senator,
};
use crate::domain::ports::{PageFetcher, SourceProvider};
use crate::utils::error::Result;

/// Entry point for callers: resolves the period reference, then scrapes the matching pages.
pub struct AttendanceService<F: PageFetcher, S: SourceProvider = SourceConfig> {
    fetcher: F,
    source: S,
}

impl<F: PageFetcher, S: SourceProvider> AttendanceService<F, S> {
    pub fn new(fetcher: F, source: S) -> Self {
        Self { fetcher, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resolve_sala(&self, reference: PeriodReference) -> Result<Resolution<Period>> {
        period::resolve_sala(self.source.periods(), reference)
    }

    pub fn resolve_comisiones(&self, reference: PeriodReference) -> Result<Resolution<i32>> {
        period::resolve_comisiones(self.source.periods(), reference, period::current_year())
    }

    /// Plenary attendance, always including the per-session detail.
    pub async fn asistencia_sala(
        &self,
        senator: &Senator,
        reference: PeriodReference,
        include_senator: bool,
    ) -> Result<SalaAttendance> {
        let resolution = self.resolve_sala(reference)?;
        tracing::info!(
            "Plenary attendance for {} in legislature {}",
            senator.nombre,
            resolution.value.legislatura
        );

        let mut attendance = sala::fetch_attendance(
            &self.fetcher,
            &self.source,
            senator,
            &resolution.value,
            include_senator,
        )
        .await?;
        attendance.avisos = prepend(resolution.advisories, attendance.avisos);
        Ok(attendance)
    }

    pub async fn asistencia_comisiones(
        &self,
        senator: &Senator,
        reference: PeriodReference,
        include_senator: bool,
    ) -> Result<CommitteeAttendance> {
        let resolution = self.resolve_comisiones(reference)?;
        tracing::info!(
            "Committee attendance for {} in {}",
            senator.nombre,
            resolution.value
        );

        let mut attendance = comisiones::fetch_attendance(
            &self.fetcher,
            &self.source,
            senator,
            resolution.value,
            include_senator,
        )
        .await?;
        attendance.avisos = prepend(resolution.advisories, attendance.avisos);
        Ok(attendance)
    }
}

fn prepend(mut first: Vec<Advisory>, mut rest: Vec<Advisory>) -> Vec<Advisory> {
    first.append(&mut rest);
    first
}
