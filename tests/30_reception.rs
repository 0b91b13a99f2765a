mod common;

use anyhow::Result;
use axum::http::StatusCode;
use pvz_service::models::{ReceptionStatus, Role};
use pvz_service::services::ServiceError;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn second_open_reception_is_rejected_until_closed() -> Result<()> {
    let app = common::spawn_app();
    let client = app.token(Role::Client);
    let pvz_id = app.create_pvz("москва").await?;

    let (status, _) = app.post("/receptions", &client, json!({ "pvzId": pvz_id })).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post("/receptions", &client, json!({ "pvzId": pvz_id })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "there is an active reception for this PVZ");

    let (status, body) = app.post(&format!("/pvz/{pvz_id}/close_last_reception"), &client, json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "closed");
    assert_eq!(body["pvzId"], pvz_id.to_string());

    let (status, _) = app.post("/receptions", &client, json!({ "pvzId": pvz_id })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.store.receptions_of(pvz_id).len(), 2);
    Ok(())
}

#[tokio::test]
async fn closing_without_open_reception_fails() -> Result<()> {
    let app = common::spawn_app();
    let client = app.token(Role::Client);
    let pvz_id = app.create_pvz("казань").await?;

    let (status, _) = app.post(&format!("/pvz/{pvz_id}/close_last_reception"), &client, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&format!("/pvz/{}/close_last_reception", Uuid::new_v4()), &client, json!({}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn reception_for_unknown_pvz_is_bad_request() -> Result<()> {
    let app = common::spawn_app();
    let client = app.token(Role::Client);

    let (status, _) = app.post("/receptions", &client, json!({ "pvzId": Uuid::new_v4() })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.post("/receptions", &client, json!({ "pvzId": "nope" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid body");
    Ok(())
}

#[tokio::test]
async fn concurrent_opens_leave_exactly_one_reception() -> Result<()> {
    let app = common::spawn_app();
    let pvz_id = app.create_pvz("москва").await?;
    let receptions = app.state.services.receptions.clone();

    let attempts = (0..8).map(|_| {
        let receptions = receptions.clone();
        tokio::spawn(async move { receptions.create(pvz_id).await })
    });
    let results = futures::future::join_all(attempts).await;

    let mut opened = 0;
    for result in results {
        match result? {
            Ok(_) => opened += 1,
            Err(ServiceError::ActiveReceptionExists) => {}
            Err(other) => anyhow::bail!("unexpected error: {other}"),
        }
    }
    assert_eq!(opened, 1);
    assert_eq!(app.store.receptions_of(pvz_id).len(), 1);

    let active = receptions.get_active(pvz_id).await?;
    assert_eq!(active.map(|r| r.status), Some(ReceptionStatus::InProgress));
    Ok(())
}
