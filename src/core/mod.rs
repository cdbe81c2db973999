pub mod comisiones;
pub mod document;
pub mod period;
pub mod sala;
pub mod service;
pub mod template;

pub use crate::domain::model::{
    CommitteeAttendance, Period, PeriodReference, PeriodTable, Resolution, SalaAttendance, Senator,
};
pub use crate::domain::ports::{PageFetcher, SourceProvider};
pub use crate::utils::error::Result;
