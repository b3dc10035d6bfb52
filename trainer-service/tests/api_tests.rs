mod common;

use auth::SessionClaims;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("Expected a number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("nicola", "pass_word!").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user_id"], "1");
}

#[tokio::test]
async fn test_register_stores_only_the_hash() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;

    let hash = app
        .store
        .password_hash("nicola")
        .expect("User was not stored");
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("pass_word!"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("ab", "pass_word!").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid username"));
    assert_eq!(app.store.user_count(), 0);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let (status, body) = app.register("nicola", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola", "pass_word!").await;
    let (status, body) = app.register("nicola", "other_password").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "Database error"})
    );
    assert_eq!(app.store.user_count(), 1);

    // The first registration is left intact
    let (status, _) = app.login("nicola", "pass_word!").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_store_failure() {
    let app = TestApp::spawn().await;
    app.store.fail_writes();

    let (status, body) = app.register("nicola", "pass_word!").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Database error");
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .header("content-type", "application/json")
        .body("{\"username\": \"nicola\",")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid request body"})
    );
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .json(&json!({ "username": "nicola" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let (_, registered) = app.register("nicola", "pass_word!").await;
    let (status, body) = app.login("nicola", "pass_word!").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");

    let token = body["token"].as_str().expect("Missing token");
    let claims = app
        .jwt_handler
        .decode(token)
        .expect("Token did not validate");
    assert_eq!(claims.sub, registered["user_id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, Duration::hours(72).num_seconds());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!").await;

    let (wrong_password_status, wrong_password) = app.login("nicola", "not_it").await;
    let (unknown_user_status, unknown_user) = app.login("nobody", "pass_word!").await;
    let (invalid_name_status, invalid_name) = app.login("x", "pass_word!").await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_name_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password,
        json!({"success": false, "message": "Invalid username or password"})
    );
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password, invalid_name);
}

#[tokio::test]
async fn test_protected_route_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/food/create")
        .json(&json!({
            "food_name": "Oats",
            "calories_100": 389.0,
            "protein_100": 16.9,
            "carbs_100": 66.3,
            "fats_100": 6.9
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"success": false, "message": "Missing or malformed authorization header"})
    );
    assert!(app.store.food_items().is_empty());
}

#[tokio::test]
async fn test_protected_route_rejects_bad_tokens() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let expired = app
        .jwt_handler
        .encode(&SessionClaims::issued_at(
            1,
            Utc::now().timestamp() - 3 * 3600,
            Duration::hours(1),
        ))
        .unwrap();
    let tampered = format!("{}x", token);

    for bad in [expired.as_str(), tampered.as_str(), "garbage"] {
        let response = app
            .post_authenticated("/training/log", bad)
            .json(&json!({
                "exercise_name": "Squat",
                "weight": 100.0,
                "sets": 5,
                "reps": 5,
                "rpe": 8.0
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body,
            json!({"success": false, "message": "Invalid or expired token"})
        );
    }
}

#[tokio::test]
async fn test_create_food_item() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/food/create", &token)
        .json(&json!({
            "food_name": "Oats",
            "calories_100": 389.0,
            "protein_100": 16.9,
            "carbs_100": 66.3,
            "fats_100": 6.9
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["food"]["food_name"], "Oats");
    assert_eq!(body["food"]["user_id"], 1);
    assert_close(&body["food"]["calories_100"], 389.0);
}

#[tokio::test]
async fn test_create_food_item_rejects_negative_values() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/food/create", &token)
        .json(&json!({
            "food_name": "Oats",
            "calories_100": -1.0,
            "protein_100": 16.9,
            "carbs_100": 66.3,
            "fats_100": 6.9
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(app.store.food_items().is_empty());
}

#[tokio::test]
async fn test_create_food_item_store_failure() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;
    app.store.fail_writes();

    let response = app
        .post_authenticated("/food/create", &token)
        .json(&json!({
            "food_name": "Oats",
            "calories_100": 389.0,
            "protein_100": 16.9,
            "carbs_100": 66.3,
            "fats_100": 6.9
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"success": false, "message": "Database error"}));
}

#[tokio::test]
async fn test_log_and_view_food() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/food/log", &token)
        .json(&json!({
            "food_name": "Rice",
            "total_grams": 250.0,
            "calories": 500.0,
            "protein": 25.0,
            "carbs": 50.0,
            "fats": 20.0
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["entry"]["food_name"], "Rice");
    assert_close(&body["entry"]["total_grams"], 250.0);
    assert_close(&body["entry"]["calories"], 500.0);

    // The food itself is stored normalised to 100 g
    let items = app.store.food_items();
    assert_eq!(items.len(), 1);
    assert!((items[0].per_100g.calories() - 200.0).abs() < 1e-9);
    assert!((items[0].per_100g.protein() - 10.0).abs() < 1e-9);
    assert!((items[0].per_100g.carbs() - 20.0).abs() < 1e-9);
    assert!((items[0].per_100g.fats() - 8.0).abs() < 1e-9);

    let response = app
        .get_authenticated(&format!("/food/view?from={0}&to={0}", today()), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    let foods = body["foods"].as_array().expect("Missing foods");
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["food_name"], "Rice");
}

#[tokio::test]
async fn test_log_food_rejects_zero_grams() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/food/log", &token)
        .json(&json!({
            "food_name": "Rice",
            "total_grams": 0.0,
            "calories": 500.0,
            "protein": 25.0,
            "carbs": 50.0,
            "fats": 20.0
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.food_items().is_empty());
}

#[tokio::test]
async fn test_log_food_rejects_portion_too_small_for_totals() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/food/log", &token)
        .json(&json!({
            "food_name": "Rice",
            "total_grams": 1e-300,
            "calories": 1e10,
            "protein": 1.0,
            "carbs": 1.0,
            "fats": 1.0
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(app.store.food_items().is_empty());
}

#[tokio::test]
async fn test_view_food_is_scoped_to_caller() {
    let app = TestApp::spawn().await;
    let nicola = app.signed_in("nicola").await;
    let other = app.signed_in("someone_else").await;

    app.post_authenticated("/food/log", &nicola)
        .json(&json!({
            "food_name": "Rice",
            "total_grams": 100.0,
            "calories": 130.0,
            "protein": 2.7,
            "carbs": 28.0,
            "fats": 0.3
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated(&format!("/food/view?from={0}&to={0}", today()), &other)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["foods"], json!([]));
}

#[tokio::test]
async fn test_view_food_requires_dates() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .get_authenticated("/food/view?to=2024-01-31", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "'from' date parameter is required. Format: YYYY-MM-DD"
        })
    );
}

#[tokio::test]
async fn test_view_food_rejects_bad_dates() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    for query in [
        "from=2024-13-01&to=2024-12-31",
        "from=01/02/2024&to=2024-12-31",
        "from=2024-02-01&to=2024-01-01",
    ] {
        let response = app
            .get_authenticated(&format!("/food/view?{}", query), &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query: {}", query);
    }
}

#[tokio::test]
async fn test_log_exercise() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/training/log", &token)
        .json(&json!({
            "exercise_name": "Squat",
            "weight": 100.0,
            "sets": 5,
            "reps": 5,
            "rpe": 8.5,
            "notes": "felt heavy"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["exercise"]["exercise_name"], "Squat");
    assert_eq!(body["exercise"]["sets"], 5);
    assert_close(&body["exercise"]["rpe"], 8.5);
    assert_eq!(body["exercise"]["notes"], "felt heavy");
}

#[tokio::test]
async fn test_log_exercise_without_notes() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/training/log", &token)
        .json(&json!({
            "exercise_name": "Bench press",
            "weight": 60.0,
            "sets": 3,
            "reps": 8,
            "rpe": 7.0
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["exercise"]["notes"], Value::Null);
}

#[tokio::test]
async fn test_log_exercise_rejects_rpe_out_of_range() {
    let app = TestApp::spawn().await;
    let token = app.signed_in("nicola").await;

    let response = app
        .post_authenticated("/training/log", &token)
        .json(&json!({
            "exercise_name": "Squat",
            "weight": 100.0,
            "sets": 5,
            "reps": 5,
            "rpe": 11.0
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}
