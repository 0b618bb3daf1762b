use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::domain::RosterError;
use super::load_roster;
use super::report::{export_file_name, AnalysisOptions, ExportTable, RosterAnalysis};

#[derive(Debug, Deserialize)]
pub(crate) struct RosterRequest {
    pub(crate) roster_csv: String,
    #[serde(flatten)]
    pub(crate) options: AnalysisOptions,
}

/// Router exposing roster analysis and CSV export. Requests carry the whole
/// roster, so the router holds no state.
pub fn roster_router() -> Router {
    Router::new()
        .route("/api/v1/roster/analyze", post(analyze_handler))
        .route("/api/v1/roster/export/:table", post(export_handler))
}

pub(crate) async fn analyze_handler(Json(request): Json<RosterRequest>) -> Response {
    let table = match load_roster(request.roster_csv.as_bytes()) {
        Ok(table) => table,
        Err(error) => return error_response(error),
    };

    let analysis = RosterAnalysis::build(&table, &request.options);
    info!(
        employees = analysis.employees,
        departments = analysis.departments.entries.len(),
        "roster analyzed"
    );
    (StatusCode::OK, Json(analysis)).into_response()
}

pub(crate) async fn export_handler(
    Path(table_name): Path<String>,
    Json(request): Json<RosterRequest>,
) -> Response {
    let export = match table_name.parse::<ExportTable>() {
        Ok(export) => export,
        Err(error) => return error_response(error),
    };

    let options = &request.options;
    let rendered = load_roster(request.roster_csv.as_bytes()).and_then(|table| {
        export.render(&table, options.department.as_deref(), options.queue.as_deref())
    });

    match rendered {
        Ok(csv) => {
            let file_name = export_file_name(export.file_stem(), Local::now().naive_local());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: RosterError) -> Response {
    let status = match error {
        RosterError::UnknownExport(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!(error = %error, status = status.as_u16(), "roster request rejected");

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    const ROSTER: &str = "Name,LOB,Phone Queue,Title,QueueStatus\n\
        Ada,Sales,Pro Support,Manager,Normal\n\
        Bo,Sales,Chat,Agent,LOA\n\
        Cy,Support,Email,Agent,Normal\n";

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn read_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json body")
    }

    #[tokio::test]
    async fn analyze_returns_summary_and_insights() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/analyze",
                json!({ "roster_csv": ROSTER, "department": "Sales" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["employees"], 3);
        assert_eq!(body["lob_summary"]["rows"][2]["label"], "Total");
        assert_eq!(body["lob_summary"]["rows"][2]["total"], 3);
        assert_eq!(body["vertical_summary"]["department"], "Sales");
        assert!(body.get("records").is_none());
        assert_eq!(
            body["insights"][0],
            "33.3% of employees are currently on Leave of Absence"
        );
    }

    #[tokio::test]
    async fn analyze_rejects_single_column_roster() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/analyze",
                json!({ "roster_csv": "Name\nAda\n" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("at least 2 columns")));
    }

    #[tokio::test]
    async fn export_returns_csv_attachment() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/export/queue",
                json!({ "roster_csv": ROSTER }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .expect("ascii header")
            .to_string();
        assert!(disposition.contains("queue_distribution_"));

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let csv = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(csv.starts_with("Queue Type,Count,Percentage\n"));
    }

    #[tokio::test]
    async fn export_department_records_for_one_vertical() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/export/department_records",
                json!({ "roster_csv": ROSTER, "department": "Sales", "queue": "Chat" }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let csv = String::from_utf8(body.to_vec()).expect("utf8");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Bo,Sales,Chat,"));
    }

    #[tokio::test]
    async fn export_unknown_table_is_not_found() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/export/payroll",
                json!({ "roster_csv": ROSTER }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vertical_export_requires_department() {
        let response = roster_router()
            .oneshot(post_json(
                "/api/v1/roster/export/vertical",
                json!({ "roster_csv": ROSTER }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
