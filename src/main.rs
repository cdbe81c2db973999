use clap::Parser;
use senadores_asistencia::config::cli::{Command, Contexto};
use senadores_asistencia::utils::error::ErrorSeverity;
use senadores_asistencia::utils::output::{self, OutputFormat};
use senadores_asistencia::utils::{logger, validation::Validate};
use senadores_asistencia::{AttendanceService, CliConfig, HttpFetcher, Result, SourceConfig};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);
    tracing::debug!("CLI config: {:?}", config);

    match run(config).await {
        Ok(rendered) => {
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Query failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<String> {
    let source = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            SourceConfig::from_file(path)?
        }
        None => SourceConfig::default(),
    };
    source.validate()?;

    let fetcher = HttpFetcher::new(&source.http)?;
    let service = AttendanceService::new(fetcher, source);

    match config.command {
        Command::Sala(args) => {
            let senator = args.senator()?;
            let attendance = service
                .asistencia_sala(&senator, args.periodo, args.incluye_senador)
                .await?;
            match args.format {
                OutputFormat::Json => output::to_json(&attendance),
                OutputFormat::Csv => output::sala_to_csv(&attendance),
            }
        }
        Command::Comisiones(args) => {
            let senator = args.senator()?;
            let attendance = service
                .asistencia_comisiones(&senator, args.periodo, args.incluye_senador)
                .await?;
            match args.format {
                OutputFormat::Json => output::to_json(&attendance),
                OutputFormat::Csv => output::comisiones_to_csv(&attendance),
            }
        }
        Command::Periodo { contexto, periodo } => match contexto {
            Contexto::Sala => output::to_json(&service.resolve_sala(periodo)?),
            Contexto::Comisiones => output::to_json(&service.resolve_comisiones(periodo)?),
        },
    }
}
