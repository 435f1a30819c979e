//! HTTP-level integration tests for categories.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_category, create_exercise, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_category_uses_default_color() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;

    let response = app
        .post_json("/api/categories", json!({ "name": "  Fuerza " }), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["name"], "Fuerza");
    assert_eq!(data["color"], "bg-gray-100 text-gray-800");
}

#[tokio::test]
async fn test_duplicate_name_is_case_insensitive() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;
    create_category(&app, &token, "Fuerza").await;

    let response = app
        .post_json("/api/categories", json!({ "name": "fuerza" }), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let list = body_json(app.get("/api/categories", Some(&token)).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_blocked_while_exercises_use_it() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;
    let category_id = create_category(&app, &token, "Fuerza").await;
    let exercise_id = create_exercise(&app, &token, "Sentadillas", category_id).await;
    let uri = format!("/api/categories/{category_id}");

    let response = app.delete(&uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("1 exercise"));

    // Still there.
    assert_eq!(app.get(&uri, Some(&token)).await.status(), StatusCode::OK);

    app.delete(&format!("/api/exercises/{exercise_id}"), Some(&token))
        .await;
    assert_eq!(app.delete(&uri, Some(&token)).await.status(), StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&token)).await.status(), StatusCode::NOT_FOUND);

    // The name is free again.
    create_category(&app, &token, "fuerza").await;
}

#[tokio::test]
async fn test_update_keeps_color_and_checks_other_names() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;
    let response = app
        .post_json(
            "/api/categories",
            json!({ "name": "Fuerza", "color": "bg-red-100 text-red-800" }),
            Some(&token),
        )
        .await;
    let fuerza = body_json(response).await["data"]["id"].as_i64().unwrap();
    create_category(&app, &token, "Resistencia").await;

    // Renaming to its own name in another case is fine.
    let response = app
        .put_json(
            &format!("/api/categories/{fuerza}"),
            json!({ "name": "FUERZA" }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["name"], "FUERZA");
    assert_eq!(data["color"], "bg-red-100 text-red-800");

    let response = app
        .put_json(
            &format!("/api/categories/{fuerza}"),
            json!({ "name": "resistencia" }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_blank_name_and_unknown_id() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;

    let response = app
        .post_json("/api/categories", json!({ "name": "   " }), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .put_json("/api/categories/77", json!({ "name": "Fuerza" }), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(
        app.delete("/api/categories/77", Some(&token)).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_list_is_ordered_by_name() {
    let app = TestApp::new();
    let (_user, token) = app.trainer("ana@sanse.test", "Ana Trainer").await;
    for name in ["Velocidad", "Fuerza", "Resistencia"] {
        create_category(&app, &token, name).await;
    }

    let json = body_json(app.get("/api/categories", Some(&token)).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fuerza", "Resistencia", "Velocidad"]);
}
