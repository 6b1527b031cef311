#![allow(dead_code)]

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

fn column(name: &str, data_type: &str, max_length: Option<i64>, pk: bool, nullable: bool) -> Value {
    json!({
        "COLUMN_NAME": name,
        "DATA_TYPE": data_type,
        "CHARACTER_MAXIMUM_LENGTH": max_length,
        "PRIMARY_KEY": pk,
        "NULLABLE": nullable,
        "IDENTITY": pk,
        "COLUMN_COMMENT": null
    })
}

pub fn member_scan() -> Value {
    json!({
        "central_table_metadata": [{
            "table_name": "member",
            "total_rows": 1250,
            "columns": [
                column("MemberID", "int", None, true, false),
                column("FirstName", "varchar", Some(50), false, false),
                column("LastName", "varchar", Some(50), false, false),
                column("DateOfBirth", "date", None, false, false),
                column("Gender", "char", Some(1), false, false),
                column("AddressLine1", "varchar", Some(100), false, false),
                column("AddressLine2", "varchar", Some(100), false, true),
                column("City", "varchar", Some(50), false, false),
                column("State", "char", Some(2), false, false),
                column("ZipCode", "varchar", Some(10), false, false),
                column("PhoneNumber", "varchar", Some(15), false, true),
                column("EmailAddress", "varchar", Some(100), false, true)
            ]
        }],
        "parent_tables_metadata": [],
        "child_tables_metadata": [{
            "table_name": "claim",
            "total_rows": 8800,
            "columns": [
                column("ClaimID", "int", None, true, false),
                column("MemberID", "int", None, false, false),
                column("ClaimDate", "date", None, false, false)
            ]
        }],
        "constraint_details": [{
            "ConstraintName": "FK_claim_member",
            "ChildTable": "claim",
            "ChildColumn": "MemberID",
            "ReferencedTable": "member",
            "ReferencedColumn": "MemberID"
        }]
    })
}

pub fn provider_scan() -> Value {
    json!({
        "central_table_metadata": [{
            "table_name": "provider",
            "total_rows": 40,
            "columns": [column("ProviderID", "int", None, true, false)]
        }],
        "parent_tables_metadata": [],
        "child_tables_metadata": [],
        "constraint_details": []
    })
}

pub fn member_recommendations() -> Value {
    json!({
        "central_table_metadata": [{
            "table_name": "member",
            "columns": [
                {"COLUMN_NAME": "MemberID", "generator": "randomNumber", "confidence": 100},
                {"COLUMN_NAME": "FirstName", "generator": "firstName", "confidence": 100},
                {"COLUMN_NAME": "Gender", "generator": "gender", "confidence": 60},
                {"COLUMN_NAME": "City", "generator": "city", "confidence": 97},
                {"COLUMN_NAME": "PhoneNumber", "generator": "not known", "confidence": 100}
            ]
        }],
        "parent_tables_metadata": [],
        "child_tables_metadata": [{
            "table_name": "claim",
            "columns": [
                {"COLUMN_NAME": "ClaimDate", "generator": "pastDate", "confidence": 93}
            ]
        }]
    })
}

async fn metadata(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("table_name").map(String::as_str) {
        Some("member") => Json(member_scan()).into_response(),
        Some("provider") => Json(provider_scan()).into_response(),
        Some("garbled") => (StatusCode::OK, "<html>not json</html>").into_response(),
        Some("partial") => Json(json!({"central_table_metadata": []})).into_response(),
        Some("slow") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(member_scan()).into_response()
        }
        Some("boom") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

// Echoes the central table name back so tests can see the scan was posted.
async fn ask(Json(body): Json<Value>) -> Response {
    let central = body["central_table_metadata"][0]["table_name"].as_str();
    match central {
        Some("member") => Json(member_recommendations()).into_response(),
        Some("provider") => Json(json!({
            "central_table_metadata": [{
                "table_name": "provider",
                "columns": [{"COLUMN_NAME": "ProviderID", "generator": "randomNumber", "confidence": 250}]
            }]
        }))
        .into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Starts the stub scan + recommendation service on an ephemeral port.
pub async fn spawn_stub() -> Url {
    let app = Router::new()
        .route("/metadata", get(metadata))
        .route("/ask", post(ask));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// A base URL nothing is listening on.
pub async fn closed_port() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}
