mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use chrono::{Duration, Utc};
use multicloud_backend::entities::{cloud_accounts, cost_records, performance_records};
use multicloud_backend::{handlers, AppState};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

use crate::common::setup_test_db;

async fn build_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await.expect("Failed to connect to test DB");
    let state = AppState { db: db.clone() };

    let app = Router::new()
        .route(
            "/recommendations",
            get(handlers::recommendations::get_recommendations),
        )
        .with_state(state);

    (app, db)
}

async fn get_json(app: Router, uri: &str) -> Value {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn insert_account(
    db: &DatabaseConnection,
    provider: &str,
    name: &str,
    identifier: &str,
) -> i32 {
    let account = cloud_accounts::ActiveModel {
        provider: Set(provider.to_string()),
        account_name: Set(name.to_string()),
        account_identifier: Set(identifier.to_string()),
        tags: Set(None),
        ..Default::default()
    };
    account.insert(db).await.expect("insert account").id
}

async fn insert_cost(db: &DatabaseConnection, provider: &str, account_id: i32, cost_amount: f64) {
    let record = cost_records::ActiveModel {
        provider: Set(provider.to_string()),
        account_id: Set(account_id),
        service: Set("Compute".to_string()),
        region: Set("us-east-1".to_string()),
        usage_amount: Set(100.0),
        usage_unit: Set("Hours".to_string()),
        cost_amount: Set(cost_amount),
        currency: Set("USD".to_string()),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    record.insert(db).await.expect("insert cost record");
}

async fn insert_performance(
    db: &DatabaseConnection,
    provider: &str,
    account_id: i32,
    resource_id: &str,
    cpu_utilization: f64,
) {
    let record = performance_records::ActiveModel {
        provider: Set(provider.to_string()),
        account_id: Set(account_id),
        resource_id: Set(resource_id.to_string()),
        service: Set("Compute".to_string()),
        region: Set("us-east-1".to_string()),
        cpu_utilization: Set(cpu_utilization),
        memory_utilization: Set(55.0),
        network_io: Set(12.0),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    record.insert(db).await.expect("insert performance record");
}

/// Two comparable Compute workloads where GCP runs 40% cheaper at a
/// similar CPU profile.
async fn seed_compute_workloads(db: &DatabaseConnection, aws_cpu: f64) {
    let aws_id = insert_account(db, "AWS", "aws-prod", "aws-account").await;
    let gcp_id = insert_account(db, "GCP", "gcp-prod", "gcp-account").await;

    insert_cost(db, "AWS", aws_id, 200.0).await;
    insert_cost(db, "GCP", gcp_id, 120.0).await;

    insert_performance(db, "AWS", aws_id, "aws-workload", aws_cpu).await;
    insert_performance(db, "GCP", gcp_id, "gcp-workload", 63.5).await;
}

#[tokio::test]
async fn test_recommends_cheaper_provider_for_comparable_workload() {
    let (app, db) = build_test_app().await;
    seed_compute_workloads(&db, 65.0).await;

    let json = get_json(app, "/recommendations").await;

    let recs = json.as_array().unwrap();
    assert_eq!(recs.len(), 1, "expected exactly one recommendation");

    let rec = &recs[0];
    assert_eq!(rec["current_provider"], "AWS");
    assert_eq!(rec["recommended_provider"], "GCP");
    assert_eq!(rec["estimated_savings_percent"].as_f64().unwrap(), 40.0);
    assert!(rec["workload_id"]
        .as_str()
        .unwrap()
        .starts_with("aws-account:Compute@us-east-1"));
    assert!(rec["explanation"]
        .as_str()
        .unwrap()
        .contains("to save ~40.00%."));
}

/// Workloads with CPU profiles further than 10 points apart are not
/// comparable.
#[tokio::test]
async fn test_skips_workloads_with_divergent_cpu() {
    let (app, db) = build_test_app().await;
    seed_compute_workloads(&db, 80.0).await;

    let json = get_json(app, "/recommendations").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_recommendation_for_lone_workload() {
    let (app, db) = build_test_app().await;

    let aws_id = insert_account(&db, "AWS", "aws-prod", "aws-account").await;
    insert_cost(&db, "AWS", aws_id, 200.0).await;
    insert_performance(&db, "AWS", aws_id, "aws-workload", 65.0).await;

    let json = get_json(app, "/recommendations").await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_threshold_param_filters_small_savings() {
    let (app, db) = build_test_app().await;
    seed_compute_workloads(&db, 65.0).await;

    // 40% savings clears 0.2 but not 0.5
    let json = get_json(app.clone(), "/recommendations?threshold=0.5").await;
    assert!(json.as_array().unwrap().is_empty());

    let json = get_json(app, "/recommendations?threshold=0.2").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_days_param_bounds_the_window() {
    let (app, db) = build_test_app().await;

    let aws_id = insert_account(&db, "AWS", "aws-prod", "aws-account").await;
    let gcp_id = insert_account(&db, "GCP", "gcp-prod", "gcp-account").await;

    let stale = Utc::now() - Duration::days(40);
    for (provider, account_id, cost) in [("AWS", aws_id, 200.0), ("GCP", gcp_id, 120.0)] {
        let record = cost_records::ActiveModel {
            provider: Set(provider.to_string()),
            account_id: Set(account_id),
            service: Set("Compute".to_string()),
            region: Set("us-east-1".to_string()),
            usage_amount: Set(100.0),
            usage_unit: Set("Hours".to_string()),
            cost_amount: Set(cost),
            currency: Set("USD".to_string()),
            timestamp: Set(stale),
            ..Default::default()
        };
        record.insert(&db).await.expect("insert cost record");
    }
    for (provider, account_id, resource, cpu) in [
        ("AWS", aws_id, "aws-workload", 65.0),
        ("GCP", gcp_id, "gcp-workload", 63.5),
    ] {
        let record = performance_records::ActiveModel {
            provider: Set(provider.to_string()),
            account_id: Set(account_id),
            resource_id: Set(resource.to_string()),
            service: Set("Compute".to_string()),
            region: Set("us-east-1".to_string()),
            cpu_utilization: Set(cpu),
            memory_utilization: Set(55.0),
            network_io: Set(12.0),
            timestamp: Set(stale),
            ..Default::default()
        };
        record.insert(&db).await.expect("insert performance record");
    }

    // Records sit 40 days back: invisible at the default 30, visible at 60
    let json = get_json(app.clone(), "/recommendations").await;
    assert!(json.as_array().unwrap().is_empty());

    let json = get_json(app, "/recommendations?days=60").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeat_calls_are_deterministic() {
    let (app, db) = build_test_app().await;
    seed_compute_workloads(&db, 65.0).await;

    let first = get_json(app.clone(), "/recommendations").await;
    let second = get_json(app, "/recommendations").await;
    assert_eq!(first, second);
}
