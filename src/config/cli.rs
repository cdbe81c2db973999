use crate::domain::model::{PeriodReference, Senator};
use crate::utils::error::Result;
use crate::utils::output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "senadores-asistencia")]
#[command(about = "Plenary and committee attendance of senators, scraped from the Senate website")]
pub struct CliConfig {
    /// TOML file overriding URL templates, HTTP settings and the legislature table
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plenary session attendance, with per-session detail
    Sala(QueryArgs),
    /// Committee attendance for a calendar year
    Comisiones(QueryArgs),
    /// Show how a period reference resolves, without fetching anything
    Periodo {
        #[arg(long, value_enum, default_value_t = Contexto::Sala)]
        contexto: Contexto,

        /// Legislature id, year, or date (YYYY-MM-DD)
        periodo: PeriodReference,
    },
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(long)]
    pub senador_id: String,

    /// Name exactly as it appears on the attendance table
    #[arg(long)]
    pub nombre: String,

    /// Legislature id, year, or date (YYYY-MM-DD)
    #[arg(long)]
    pub periodo: PeriodReference,

    #[arg(long, help = "Embed the senator in the result")]
    pub incluye_senador: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl QueryArgs {
    pub fn senator(&self) -> Result<Senator> {
        Senator::new(self.senador_id.trim(), self.nombre.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Contexto {
    Sala,
    Comisiones,
}
