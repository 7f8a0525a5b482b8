//! HTTP-level integration tests for forced-telework reports.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, build_test_app, get, get_auth, post_json_auth, user_token};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const ALICE: Uuid = Uuid::from_u128(0xa11ce);
const ADMIN: Uuid = Uuid::from_u128(0xad);

async fn file_report(pool: &PgPool, user: Uuid, date: &str) -> serde_json::Value {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/reports/shortage",
        json!({ "date": date }),
        &user_token(user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// POST /reports/shortage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_captures_snapshot(pool: PgPool) {
    for (i, slot) in ["place_1", "place_2", "place_3"].iter().enumerate() {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/v1/reservations",
            json!({ "resource_id": slot, "date": "2024-06-10" }),
            &user_token(Uuid::from_u128(100 + i as u128)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let report = file_report(&pool, ALICE, "2024-06-10").await;

    assert_eq!(report["user_id"], ALICE.to_string());
    assert_eq!(report["date"], "2024-06-10");
    assert_eq!(report["reason"], "space_shortage");
    assert_eq!(report["details"]["parking_availability"]["total"], 12);
    assert_eq!(report["details"]["parking_availability"]["available"], 9);
    assert_eq!(report["details"]["desk_availability"]["total"], 0);
    assert_eq!(report["details"]["baby_availability"]["total"], 0);
    assert_eq!(report["details"]["total_reservations"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_reports_are_kept(pool: PgPool) {
    let first = file_report(&pool, ALICE, "2024-06-10").await;
    let second = file_report(&pool, ALICE, "2024-06-10").await;
    assert_ne!(first["id"], second["id"]);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reports/mine",
        &user_token(ALICE),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_requires_auth(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/reports/mine").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// GET /reports/mine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_my_reports_newest_date_first(pool: PgPool) {
    file_report(&pool, ALICE, "2024-06-10").await;
    file_report(&pool, ALICE, "2024-06-12").await;
    file_report(&pool, ADMIN, "2024-06-11").await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/reports/mine",
        &user_token(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let dates: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-06-12", "2024-06-10"]);

    // Admins only see their own reports here too.
    let response = get_auth(
        build_test_app(pool),
        "/api/v1/reports/mine",
        &admin_token(ADMIN),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
