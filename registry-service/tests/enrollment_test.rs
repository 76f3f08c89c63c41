mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn enroll_profile_and_cascade_on_delete() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Diabetes Management").await;
    let client_id = app.register_client("Mary", "m@x.com").await;

    let response = app
        .post(&format!("/clients/{}/enroll", client_id), json!([program_id]))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Client enrolled in programs successfully"
    );

    let profile = app.get(&format!("/clients/{}", client_id)).await;
    assert_eq!(
        profile.body["enrolled_programs"],
        json!([{ "id": program_id, "name": "Diabetes Management" }])
    );

    let response = app.delete(&format!("/programs/{}", program_id)).await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(app.enrolled_ids(&client_id).await.is_empty());
}

#[tokio::test]
async fn repeated_batch_enroll_does_not_duplicate() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Cardiac Care").await;
    let client_id = app.register_client("James", "j@x.com").await;
    let uri = format!("/clients/{}/enroll", client_id);

    app.post(&uri, json!([program_id, program_id])).await;
    let response = app.post(&uri, json!([program_id])).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.enrolled_ids(&client_id).await, vec![program_id]);
}

#[tokio::test]
async fn unenroll_removes_only_requested_programs() {
    let app = TestApp::spawn();
    let diabetes = app.create_program("Diabetes Management").await;
    let cardiac = app.create_program("Cardiac Care").await;
    let client_id = app.register_client("James", "j@x.com").await;
    app.post(
        &format!("/clients/{}/enroll", client_id),
        json!([diabetes, cardiac]),
    )
    .await;

    let response = app
        .post(
            &format!("/clients/{}/unenroll", client_id),
            json!([diabetes]),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Client unenrolled from programs successfully"
    );
    assert_eq!(app.enrolled_ids(&client_id).await, vec![cardiac]);
}

#[tokio::test]
async fn enroll_with_malformed_program_id_is_400() {
    let app = TestApp::spawn();
    let client_id = app.register_client("Mary", "m@x.com").await;

    let response = app
        .post(&format!("/clients/{}/enroll", client_id), json!(["bogus"]))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid ID format");
    assert!(app.enrolled_ids(&client_id).await.is_empty());
}

#[tokio::test]
async fn enroll_unknown_client_is_404() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Weight Loss").await;

    let response = app
        .post(
            "/clients/65f1a2b3c4d5e6f708192a3b/enroll",
            json!([program_id]),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn program_centric_enroll_rejects_duplicates() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Weight Loss").await;
    let client_id = app.register_client("Mary", "m@x.com").await;
    let uri = format!("/programs/{}/enroll?client_id={}", program_id, client_id);

    let response = app.post(&uri, json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Successfully enrolled");
    assert_eq!(response.body["client"]["id"], client_id.as_str());
    assert_eq!(
        response.body["client"]["enrolled_programs"],
        json!([program_id])
    );

    let response = app.post(&uri, json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Client already enrolled in this program"
    );
}

#[tokio::test]
async fn program_centric_enroll_checks_both_records() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Weight Loss").await;
    let client_id = app.register_client("Mary", "m@x.com").await;
    let missing = "65f1a2b3c4d5e6f708192a3b";

    let response = app
        .post(
            &format!("/programs/{}/enroll?client_id={}", missing, client_id),
            json!({}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Program not found");

    let response = app
        .post(
            &format!("/programs/{}/enroll?client_id={}", program_id, missing),
            json!({}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Client not found");

    let response = app
        .post(
            &format!("/programs/{}/enroll?client_id=nope", program_id),
            json!({}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_program_cleans_every_client() {
    let app = TestApp::spawn();
    let doomed = app.create_program("Diabetes Management").await;
    let kept = app.create_program("Cardiac Care").await;
    let james = app.register_client("James", "j@x.com").await;
    let mary = app.register_client("Mary", "m@x.com").await;
    app.post(&format!("/clients/{}/enroll", james), json!([doomed, kept]))
        .await;
    app.post(&format!("/clients/{}/enroll", mary), json!([doomed]))
        .await;

    app.delete(&format!("/programs/{}", doomed)).await;

    assert_eq!(app.enrolled_ids(&james).await, vec![kept]);
    assert!(app.enrolled_ids(&mary).await.is_empty());
}

#[tokio::test]
async fn unenroll_with_malformed_client_id_is_400() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Weight Loss").await;

    let response = app
        .post("/clients/not-an-id/unenroll", json!([program_id]))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid ID format");
}

#[tokio::test]
async fn program_centric_enroll_with_malformed_program_id_is_400() {
    let app = TestApp::spawn();
    let client_id = app.register_client("Mary", "m@x.com").await;

    let response = app
        .post(
            &format!("/programs/not-an-id/enroll?client_id={}", client_id),
            json!({}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid ID format");
}

#[tokio::test]
async fn non_string_program_ids_are_a_json_400() {
    let app = TestApp::spawn();
    let client_id = app.register_client("Mary", "m@x.com").await;

    for route in ["enroll", "unenroll"] {
        let response = app
            .post(&format!("/clients/{}/{}", client_id, route), json!([1]))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers.get("content-type").map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        assert!(response.body["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Json parse error")));
    }
}

#[tokio::test]
async fn program_centric_enroll_without_client_id_is_a_json_400() {
    let app = TestApp::spawn();
    let program_id = app.create_program("Weight Loss").await;

    let response = app
        .post(&format!("/programs/{}/enroll", program_id), json!({}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers.get("content-type").map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
    assert!(response.body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Query parse error")));
}
