use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use gametracker_app::AppState;
use gametracker_kernel::settings::Settings;

fn app() -> Router {
    gametracker_app::router(&AppState::in_memory(), &Settings::default())
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create_game(app: &Router, body: Value) -> String {
    let (status, game) = call(app, Method::POST, "/api/games", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{game}");
    game["_id"].as_str().unwrap().to_string()
}

async fn create_review(app: &Router, game: &str, rating: u8) -> Value {
    let (status, review) = call(
        app,
        Method::POST,
        "/api/reviews",
        Some(json!({ "game": game, "rating": rating, "comment": "worth it", "author": "Sam" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{review}");
    review
}

async fn patch_game(app: &Router, id: &str, field: &str, value: Value) -> (StatusCode, Value) {
    let uri = format!("/api/games/{id}/{field}");
    let mut body = serde_json::Map::new();
    body.insert(field.to_string(), value);
    call(app, Method::PATCH, &uri, Some(Value::Object(body))).await
}

#[tokio::test]
async fn welcome_and_unknown_routes() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("GameTracker API is running!"));

    let (status, body) = call(&app, Method::GET, "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found - /api/nothing-here");
}

#[tokio::test]
async fn unsupported_methods_get_json_not_found() {
    let app = app();

    let (status, body) = call(&app, Method::DELETE, "/api/games", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found - /api/games");
    assert_eq!(body["code"], "not_found");

    let (status, body) = call(&app, Method::POST, "/api/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found - /api/stats");
}

#[tokio::test]
async fn game_crud_round() {
    let app = app();

    let (status, body) =
        call(&app, Method::POST, "/api/games", Some(json!({ "genre": "RPG" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "title is required");

    let id = create_game(
        &app,
        json!({ "title": "Chrono Trigger", "genre": "RPG", "releaseDate": "1995-03-11" }),
    )
    .await;
    let uri = format!("/api/games/{id}");

    let (status, game) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["title"], "Chrono Trigger");
    assert_eq!(game["completed"], json!(false));
    assert_eq!(game["hoursPlayed"].as_f64(), Some(0.0));
    assert_eq!(game["rating"].as_f64(), Some(0.0));
    assert!(game["releaseDate"].as_str().unwrap().starts_with("1995-03-11"));

    let update = json!({ "platform": "SNES", "completed": true, "hoursPlayed": 24 });
    let (status, game) = call(&app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["platform"], "SNES");
    assert_eq!(game["completed"], json!(true));
    assert_eq!(game["genre"], "RPG");

    let (_, list) = call(&app, Method::GET, "/api/games", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Game deleted");

    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_endpoints_keep_falsy_values() {
    let app = app();
    let id = create_game(
        &app,
        json!({ "title": "Portal", "rating": 5, "completed": true, "hoursPlayed": 4 }),
    )
    .await;

    let (status, game) = patch_game(&app, &id, "rating", json!(0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["rating"].as_f64(), Some(0.0));

    let (_, game) = patch_game(&app, &id, "completed", json!(false)).await;
    assert_eq!(game["completed"], json!(false));

    let (_, game) = patch_game(&app, &id, "hoursPlayed", json!(0)).await;
    assert_eq!(game["hoursPlayed"].as_f64(), Some(0.0));

    let (status, _) = patch_game(&app, &id, "rating", json!(6)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, game) = call(&app, Method::GET, &format!("/api/games/{id}"), None).await;
    assert_eq!(game["rating"].as_f64(), Some(0.0));
    assert_eq!(game["title"], "Portal");
}

#[tokio::test]
async fn malformed_ids_are_400_and_missing_ids_are_404() {
    let app = app();
    let missing = "65a1f0c2e4b0a1b2c3d4e5f6";

    for uri in ["/api/games/123", "/api/reviews/not-an-id"] {
        let (status, body) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "validation_error");
    }

    for uri in [format!("/api/games/{missing}"), format!("/api/reviews/{missing}")] {
        let (status, body) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], "not_found");
    }
}

#[tokio::test]
async fn malformed_json_bodies_are_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/games")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reviews_reference_existing_games() {
    let app = app();
    let game = create_game(&app, json!({ "title": "Outer Wilds" })).await;

    let (status, body) =
        call(&app, Method::POST, "/api/reviews", Some(json!({ "rating": 4 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/reviews",
        Some(json!({ "game": "65a1f0c2e4b0a1b2c3d4e5f6", "rating": 4, "comment": "?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for rating in [0, 6] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/reviews",
            Some(json!({ "game": game, "rating": rating, "comment": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, reviews) = call(&app, Method::GET, "/api/reviews", None).await;
    assert!(reviews.as_array().unwrap().is_empty());

    let review = create_review(&app, &game, 5).await;
    assert_eq!(review["gameTitle"], "Outer Wilds");
    assert_eq!(review["author"], "Sam");
    let uri = format!("/api/reviews/{}", review["_id"].as_str().unwrap());

    let update = json!({ "comment": "even better the second time" });
    let (status, updated) = call(&app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["comment"], "even better the second time");
    assert_eq!(updated["rating"].as_f64(), Some(5.0));

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted");
}

#[tokio::test]
async fn blank_game_on_review_update_keeps_the_reference() {
    let app = app();
    let game = create_game(&app, json!({ "title": "Celeste" })).await;
    let review = create_review(&app, &game, 3).await;
    let uri = format!("/api/reviews/{}", review["_id"].as_str().unwrap());

    let (status, updated) =
        call(&app, Method::PUT, &uri, Some(json!({ "game": "", "rating": 4 }))).await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["game"], json!(game));
    assert_eq!(updated["gameTitle"], "Celeste");
    assert_eq!(updated["rating"].as_f64(), Some(4.0));
}

#[tokio::test]
async fn reviews_of_deleted_games_use_sentinel_title() {
    let app = app();
    let game = create_game(&app, json!({ "title": "Ephemeral" })).await;
    let review = create_review(&app, &game, 3).await;

    call(&app, Method::DELETE, &format!("/api/games/{game}"), None).await;

    let (status, reviews) = call(&app, Method::GET, "/api/reviews", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews[0]["gameTitle"], "Unknown Game");

    let uri = format!("/api/reviews/{}", review["_id"].as_str().unwrap());
    let (_, single) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(single["gameTitle"], "Unknown Game");
}

#[tokio::test]
async fn stats_summarize_games_and_reviews() {
    let app = app();

    let (status, empty) = call(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty["avgRating"].is_null());
    assert_eq!(empty["mostPlayedGenre"], "N/A");
    assert_eq!(empty["totalReviews"], json!(0));

    let a = create_game(&app, json!({ "title": "A", "genre": "RPG", "hoursPlayed": 10 })).await;
    let b = create_game(&app, json!({ "title": "B", "genre": "FPS", "hoursPlayed": 5 })).await;
    create_review(&app, &a, 4).await;
    create_review(&app, &a, 2).await;
    create_review(&app, &b, 5).await;

    let (status, stats) = call(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalGamesReviewed"], json!(2));
    assert_eq!(stats["totalReviews"], json!(3));
    assert_eq!(stats["avgRating"].as_f64(), Some(3.7));
    assert_eq!(stats["totalHoursPlayed"].as_f64(), Some(15.0));
    assert_eq!(stats["mostPlayedGenre"], "RPG");
}

#[tokio::test]
async fn stats_average_rounds_ties_to_even() {
    let app = app();
    let game = create_game(&app, json!({ "title": "Tetris", "genre": "Puzzle" })).await;
    for rating in [3, 3, 3, 4] {
        create_review(&app, &game, rating).await;
    }

    let (_, stats) = call(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(stats["avgRating"].as_f64(), Some(3.2));
}
