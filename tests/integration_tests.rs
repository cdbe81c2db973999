use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use senadores_asistencia::utils::validation::Validate;
use senadores_asistencia::{
    Advisory, AttendanceError, AttendanceService, HttpFetcher, PeriodReference, Senator,
    SourceConfig,
};

const SUMMARY_PAGE: &str = r#"
<html><body><div id="main">
  <h2>Asistencia a Sala - Legislatura 362 - Total de sesiones: 20</h2>
  <table>
    <tr align="left"><th>Senador</th><th>Asistencia</th><th>Justificadas</th></tr>
    <tr align="left"><td>Allende Bussi, Isabel</td><td><a href="/asistencia">15</a></td><td><a id="j905" href="/asistencia">3</a></td></tr>
    <tr align="left"><td>Larraín Fernández, Hernán</td><td><a href="/asistencia">19</a></td><td></td></tr>
  </table>
</div></body></html>"#;

const DETAIL_PAGE: &str = r#"
<html><body>
<table><tr><td>Senado de Chile</td></tr></table>
<table>
  <tr><th>Asiste</th><th>Sesión</th></tr>
  <tr><td><img src="/img/si.gif"></td><td><a href="/asistencia">12 Sesión Ordinaria, miércoles 5 de marzo de 2014</a></td></tr>
  <tr><td></td><td><a href="/asistencia">13 Sesión Ordinaria, martes 11 de Marzo de 2014</a></td></tr>
</table>
</body></html>"#;

const COMMITTEE_PAGE: &str = r#"
<html><body>
<table>
  <tr><th>Comisión</th><th>Sesiones</th><th>Asistencia</th></tr>
  <tr><td>Hacienda</td><td>25</td><td>20</td></tr>
  <tr><td>Salud</td><td>12</td><td>12</td></tr>
  <tr><td>Educación</td><td>30</td><td>27</td></tr>
</table>
<table>
  <tr><th>Comisión</th><th>Reemplazante</th><th>Asistente</th></tr>
  <tr><td>Minería y Energía</td><td>2</td><td>0</td></tr>
  <tr><td>Transportes</td><td>0</td><td>1</td></tr>
</table>
</body></html>"#;

fn source_for(server: &MockServer) -> SourceConfig {
    let content = format!(
        r#"
[urls]
sala = "{sala}?legiid=:periodo:"
sala_detalle = "{detalle}?parlid=:senador-id:&legiid=:periodo:"
comisiones = "{comisiones}?parlid=:senador-id:&ano=:periodo:"

[http]
timeout_seconds = 5

[[periodos]]
legislatura = 361
desde = "2013-03-11T00:00:00"
hasta = "2014-03-10T23:59:59"

[[periodos]]
legislatura = 362
desde = "2014-03-11T00:00:00"
hasta = "2015-03-10T23:59:59"
"#,
        sala = server.url("/sala"),
        detalle = server.url("/detalle"),
        comisiones = server.url("/comisiones"),
    );
    let config = SourceConfig::from_toml_str(&content).unwrap();
    config.validate().unwrap();
    config
}

fn service_for(server: &MockServer) -> AttendanceService<HttpFetcher> {
    let source = source_for(server);
    let fetcher = HttpFetcher::new(&source.http).unwrap();
    AttendanceService::new(fetcher, source)
}

fn isabel() -> Senator {
    Senator::new("905", "Allende Bussi, Isabel").unwrap()
}

#[tokio::test]
async fn test_sala_attendance_by_date_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let summary_mock = server.mock(|when, then| {
        when.method(GET).path("/sala").query_param("legiid", "362");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(SUMMARY_PAGE);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/detalle")
            .query_param("parlid", "905")
            .query_param("legiid", "362");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(DETAIL_PAGE);
    });

    let service = service_for(&server);
    let reference: PeriodReference = "2014-09-18".parse()?;
    let result = service.asistencia_sala(&isabel(), reference, true).await?;

    summary_mock.assert();
    detail_mock.assert();

    assert_eq!(result.periodo.legislatura, 362);
    assert_eq!(result.asistencia, 15);
    assert_eq!(result.inasistencias.total, 5);
    assert_eq!(result.inasistencias.justificadas, 3);
    assert_eq!(result.inasistencias.injustificadas, 2);
    assert!(result.avisos.is_empty());
    assert_eq!(result.senador.as_ref().map(|s| s.id.as_str()), Some("905"));

    assert_eq!(result.detalle.len(), 2);
    assert_eq!(result.detalle[0].sesion, 12);
    assert_eq!(result.detalle[0].tipo, "Sesión Ordinaria");
    assert_eq!(result.detalle[0].fecha, NaiveDate::from_ymd_opt(2014, 3, 5).unwrap());
    assert!(result.detalle[0].asiste);
    assert!(!result.detalle[1].asiste);
    Ok(())
}

#[tokio::test]
async fn test_sala_attendance_by_ambiguous_year() -> Result<()> {
    let server = MockServer::start();
    let summary_mock = server.mock(|when, then| {
        when.method(GET).path("/sala").query_param("legiid", "361");
        then.status(200).body(SUMMARY_PAGE);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/detalle").query_param("legiid", "361");
        then.status(200).body(DETAIL_PAGE);
    });

    let service = service_for(&server);
    let larrain = Senator::new("911", "Larraín Fernández, Hernán")?;
    let result = service
        .asistencia_sala(&larrain, PeriodReference::Number(2014), false)
        .await?;

    summary_mock.assert();
    detail_mock.assert();

    assert_eq!(result.periodo.legislatura, 361);
    assert!(result.senador.is_none());
    assert_eq!(result.asistencia, 19);
    assert_eq!(result.inasistencias.justificadas, 0);
    assert_eq!(result.inasistencias.injustificadas, 1);
    assert_eq!(
        result.avisos,
        vec![Advisory::AmbiguousYear {
            year: 2014,
            chosen: 361,
            candidates: vec![361, 362],
        }]
    );

    let json = serde_json::to_value(&result)?;
    assert_eq!(json["avisos"][0]["tipo"], "ambiguous_year");
    Ok(())
}

#[tokio::test]
async fn test_sala_detail_failure_propagates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/sala");
        then.status(200).body(SUMMARY_PAGE);
    });
    let detail_mock = server.mock(|when, then| {
        when.method(GET).path("/detalle");
        then.status(500);
    });

    let service = service_for(&server);
    let err = service
        .asistencia_sala(&isabel(), PeriodReference::Number(362), false)
        .await
        .unwrap_err();

    detail_mock.assert();
    assert!(matches!(err, AttendanceError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_committee_attendance_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let committee_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/comisiones")
            .query_param("parlid", "905")
            .query_param("ano", "2014");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(COMMITTEE_PAGE);
    });

    let service = service_for(&server);
    let result = service
        .asistencia_comisiones(&isabel(), PeriodReference::Number(2014), false)
        .await?;

    committee_mock.assert();
    assert_eq!(result.periodo, 2014);
    assert_eq!(result.oficiales.len(), 3);
    assert_eq!(result.oficiales[0].nombre, "Hacienda");
    assert_eq!(result.oficiales[0].total, 25);
    assert_eq!(result.oficiales[0].asiste, 20);
    assert_eq!(result.otras.len(), 2);
    assert_eq!(result.otras[0].nombre, "Minería y Energía");
    assert_eq!(result.otras[0].reemplazante, 2);
    assert_eq!(result.otras[0].asistente, 0);
    assert!(result.avisos.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_committee_attendance_rejects_future_year_without_fetching() {
    let server = MockServer::start();
    let committee_mock = server.mock(|when, then| {
        when.method(GET).path("/comisiones");
        then.status(200).body(COMMITTEE_PAGE);
    });

    let service = service_for(&server);
    let future = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
    let err = service
        .asistencia_comisiones(&isabel(), future.into(), false)
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceError::FuturePeriod { requested: 2999, .. }));
    committee_mock.assert_hits(0);
}
