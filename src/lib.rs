pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpFetcher;
pub use config::SourceConfig;
pub use crate::core::service::AttendanceService;
pub use domain::model::{
    Absences, Advisory, CommitteeAttendance, OfficialCommittee, OtherCommittee, Period,
    PeriodReference, PeriodTable, Resolution, SalaAttendance, Senator, SessionRecord,
};
pub use domain::ports::{PageFetcher, SourceProvider};
pub use utils::error::{AttendanceError, Result};
