//! HTTP integration tests: the full router over an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use reel_api::{build_router, AppState, IdentityVerifier};
use reel_core::FixedClock;
use reel_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    state: AppState,
    clock: Arc<FixedClock>,
}

impl TestApp {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
        ));
        let state = AppState::new(db, IdentityVerifier::new(SECRET, 3600), clock.clone());
        TestApp {
            router: build_router(state.clone()),
            state,
            clock,
        }
    }

    fn token(&self, is_admin: bool) -> String {
        let user = if is_admin { "admin-1" } else { "clerk-1" };
        self.state.gate.verifier().issue(user, is_admin).unwrap()
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let raw = body.map(|b| b.to_string());
        self.send_raw(method, uri, token, raw).await
    }

    async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn create_genre(&self, name: &str) -> String {
        let token = self.token(false);
        let response = self
            .send("POST", "/api/genres", Some(&token), Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    async fn create_customer(&self, name: &str) -> String {
        let token = self.token(false);
        let response = self
            .send(
                "POST",
                "/api/customers",
                Some(&token),
                Some(json!({ "name": name, "phone": "555-0100" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    async fn create_movie(&self, title: &str, stock: i64, rate_cents: i64) -> String {
        let genre_id = self.create_genre("Science Fiction").await;
        let token = self.token(false);
        let response = self
            .send(
                "POST",
                "/api/movies",
                Some(&token),
                Some(json!({
                    "title": title,
                    "genreId": genre_id,
                    "numberInStock": stock,
                    "dailyRentalRateCents": rate_cents,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    async fn stock(&self, movie_id: &str) -> i64 {
        let response = self
            .send("GET", &format!("/api/movies/{movie_id}"), None, None)
            .await;
        body_json(response).await["numberInStock"].as_i64().unwrap()
    }
}

async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_ok() {
    let app = TestApp::new().await;
    let response = app.send("GET", "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_health_unavailable_after_close() {
    let app = TestApp::new().await;
    app.state.db.close().await;

    let response = app.send("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Access control
// =============================================================================

#[tokio::test]
async fn test_anonymous_write_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .send("POST", "/api/genres", None, Some(json!({ "name": "Comedy" })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[tokio::test]
async fn test_anonymous_with_broken_body_is_still_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .send_raw("POST", "/api/rentals", None, Some("{not json".to_string()))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_admin_route_is_unauthenticated_not_forbidden() {
    let app = TestApp::new().await;
    let genre_id = app.create_genre("Documentary").await;

    let response = app
        .send("DELETE", &format!("/api/genres/{genre_id}"), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let app = TestApp::new().await;

    let response = app
        .send("POST", "/api/genres", Some("garbage"), Some(json!({ "name": "Comedy" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_from_another_secret_is_invalid() {
    let app = TestApp::new().await;
    let forged = IdentityVerifier::new("some-other-secret", 3600)
        .issue("admin-1", true)
        .unwrap();

    let response = app
        .send("POST", "/api/genres", Some(&forged), Some(json!({ "name": "Comedy" })))
        .await;
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_authorization_header_schemes() {
    let app = TestApp::new().await;

    let basic = Request::builder()
        .method("POST")
        .uri("/api/genres")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Comedy" }).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(basic).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");

    let bearer = Request::builder()
        .method("POST")
        .uri("/api/genres")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token(false)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Comedy" }).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(bearer).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let app = TestApp::new().await;
    let genre_id = app.create_genre("Thriller").await;
    let uri = format!("/api/genres/{genre_id}");

    let clerk = app.token(false);
    let response = app.send("DELETE", &uri, Some(&clerk), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let admin = app.token(true);
    let response = app.send("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Thriller");

    let response = app.send("GET", &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_genre_crud() {
    let app = TestApp::new().await;
    let token = app.token(false);
    app.create_genre("Western").await;
    let drama = app.create_genre("Drama").await;

    let response = app.send("GET", "/api/genres", None, None).await;
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Drama", "Western"]);

    let response = app
        .send(
            "PUT",
            &format!("/api/genres/{drama}"),
            Some(&token),
            Some(json!({ "name": "Melodrama" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send("GET", &format!("/api/genres/{drama}"), None, None)
        .await;
    assert_eq!(body_json(response).await["name"], "Melodrama");
}

#[tokio::test]
async fn test_genre_name_validation() {
    let app = TestApp::new().await;
    let token = app.token(false);

    let response = app
        .send("POST", "/api/genres", Some(&token), Some(json!({ "name": "War" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = app
        .send_raw("POST", "/api/genres", Some(&token), Some("{not json".to_string()))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_path_ids_are_not_found() {
    let app = TestApp::new().await;

    let response = app.send("GET", "/api/movies/not-a-uuid", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "The movie with the given ID was not found.");

    let response = app
        .send(
            "GET",
            "/api/customers/0d7c3c5e-7a8e-4d4b-9f0f-1c2d3e4f5a6b",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let admin = app.token(true);
    let response = app
        .send(
            "DELETE",
            "/api/genres/0d7c3c5e-7a8e-4d4b-9f0f-1c2d3e4f5a6b",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_gold_flag_defaults_to_false() {
    let app = TestApp::new().await;
    let id = app.create_customer("Grace Hopper").await;

    let response = app
        .send("GET", &format!("/api/customers/{id}"), None, None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["isGold"], false);
    assert_eq!(body["phone"], "555-0100");
}

#[tokio::test]
async fn test_movie_snapshots_genre_and_rejects_unknown_genre() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let movie_id = app.create_movie("Solaris 1972", 4, 250).await;

    let response = app
        .send("GET", &format!("/api/movies/{movie_id}"), None, None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["genre"]["name"], "Science Fiction");
    assert_eq!(body["dailyRentalRateCents"], 250);
    assert_eq!(body["numberInStock"], 4);

    let response = app
        .send(
            "POST",
            "/api/movies",
            Some(&token),
            Some(json!({
                "title": "Stalker 1979",
                "genreId": "0d7c3c5e-7a8e-4d4b-9f0f-1c2d3e4f5a6b",
                "numberInStock": 1,
                "dailyRentalRateCents": 100,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid genre.");
}

#[tokio::test]
async fn test_movie_update_sets_stock() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let movie_id = app.create_movie("Blade Runner", 1, 300).await;
    let genre_id = app.create_genre("Neo-noir").await;

    let response = app
        .send(
            "PUT",
            &format!("/api/movies/{movie_id}"),
            Some(&token),
            Some(json!({
                "title": "Blade Runner (Final Cut)",
                "genreId": genre_id,
                "numberInStock": 9,
                "dailyRentalRateCents": 350,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send("GET", &format!("/api/movies/{movie_id}"), None, None)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["title"], "Blade Runner (Final Cut)");
    assert_eq!(body["genre"]["name"], "Neo-noir");
    assert_eq!(body["numberInStock"], 9);
    assert_eq!(body["dailyRentalRateCents"], 350);
}

#[tokio::test]
async fn test_movie_field_ranges() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let genre_id = app.create_genre("Animation").await;

    for (stock, rate) in [(-1, 100), (256, 100), (1, 0)] {
        let response = app
            .send(
                "POST",
                "/api/movies",
                Some(&token),
                Some(json!({
                    "title": "Spirited Away",
                    "genreId": genre_id,
                    "numberInStock": stock,
                    "dailyRentalRateCents": rate,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Rentals
// =============================================================================

#[tokio::test]
async fn test_checkout_and_return_flow() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Ada Lovelace").await;
    let movie_id = app.create_movie("Metropolis", 2, 200).await;
    let pair = json!({ "customerId": customer_id, "movieId": movie_id });

    let response = app
        .send("POST", "/api/rentals", Some(&token), Some(pair.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rental = body_json(response).await;
    assert_eq!(rental["customer"]["name"], "Ada Lovelace");
    assert_eq!(rental["movie"]["title"], "Metropolis");
    assert_eq!(rental["movie"]["dailyRentalRateCents"], 200);
    assert!(rental["dateReturned"].is_null());
    assert!(rental["rentalFeeCents"].is_null());
    assert_eq!(app.stock(&movie_id).await, 1);

    let rental_id = rental["id"].as_str().unwrap();
    let response = app
        .send("GET", &format!("/api/rentals/{rental_id}"), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    app.clock.advance(Duration::days(7));

    let response = app
        .send("POST", "/api/returns", Some(&token), Some(pair.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let returned = body_json(response).await;
    assert_eq!(returned["rentalFeeCents"], 1400);
    assert!(!returned["dateReturned"].is_null());
    assert_eq!(app.stock(&movie_id).await, 2);

    let response = app
        .send("POST", "/api/returns", Some(&token), Some(pair))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "ALREADY_RETURNED");
    assert_eq!(app.stock(&movie_id).await, 2);
}

#[tokio::test]
async fn test_checkout_out_of_stock() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Alan Turing").await;
    let movie_id = app.create_movie("The Machine", 0, 200).await;

    let response = app
        .send(
            "POST",
            "/api/rentals",
            Some(&token),
            Some(json!({ "customerId": customer_id, "movieId": movie_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Movie not in stock.");

    let response = app.send("GET", "/api/rentals", None, None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_checkout_with_unknown_references() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Alan Turing").await;
    let unknown = "0d7c3c5e-7a8e-4d4b-9f0f-1c2d3e4f5a6b";

    let response = app
        .send(
            "POST",
            "/api/rentals",
            Some(&token),
            Some(json!({ "customerId": customer_id, "movieId": unknown })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid movie.");

    let response = app
        .send(
            "POST",
            "/api/rentals",
            Some(&token),
            Some(json!({ "customerId": customer_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_open_rental_for_pair_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Ada Lovelace").await;
    let movie_id = app.create_movie("Nosferatu", 3, 150).await;
    let pair = json!({ "customerId": customer_id, "movieId": movie_id });

    let response = app
        .send("POST", "/api/rentals", Some(&token), Some(pair.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send("POST", "/api/rentals", Some(&token), Some(pair.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Customer already has this movie.");
    assert_eq!(app.stock(&movie_id).await, 2);

    let response = app.send("GET", "/api/rentals", None, None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // returning frees the pair
    let response = app
        .send("POST", "/api/returns", Some(&token), Some(pair.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .send("POST", "/api/rentals", Some(&token), Some(pair))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_return_without_rental_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Alan Turing").await;
    let movie_id = app.create_movie("Enigma Code", 1, 200).await;

    let response = app
        .send(
            "POST",
            "/api/returns",
            Some(&token),
            Some(json!({ "customerId": customer_id, "movieId": movie_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rentals_listed_newest_first() {
    let app = TestApp::new().await;
    let token = app.token(false);
    let customer_id = app.create_customer("Ada Lovelace").await;
    let first = app.create_movie("First Feature", 1, 100).await;
    let second = app.create_movie("Second Feature", 1, 100).await;

    for movie_id in [&first, &second] {
        let response = app
            .send(
                "POST",
                "/api/rentals",
                Some(&token),
                Some(json!({ "customerId": customer_id, "movieId": movie_id })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        app.clock.advance(Duration::hours(1));
    }

    let response = app.send("GET", "/api/rentals", None, None).await;
    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["movie"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Second Feature", "First Feature"]);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_register_me_and_login() {
    let app = TestApp::new().await;
    let registration = json!({
        "name": "Katherine J",
        "email": "Katherine@Example.com",
        "password": "orbital-mechanics",
    });

    let clerk = app.token(false);
    let response = app
        .send("POST", "/api/users", Some(&clerk), Some(registration.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = response
        .headers()
        .get("x-auth-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = body_json(response).await;
    assert_eq!(body["email"], "katherine@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    let response = app.send("GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["name"], "Katherine J");
    assert_eq!(me["isAdmin"], false);

    let response = app
        .send("POST", "/api/users", Some(&clerk), Some(registration))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already registered.");

    let response = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "KATHERINE@example.com", "password": "orbital-mechanics" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let login_token = body_text(response).await;
    let identity = app.state.gate.verifier().verify(&login_token).unwrap();
    assert!(!identity.is_admin);

    let response = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "katherine@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid email or password."
    );

    let response = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "orbital-mechanics" })),
        )
        .await;
    assert_eq!(
        body_json(response).await["message"],
        "Invalid email or password."
    );
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;
    let clerk = app.token(false);

    let response = app
        .send(
            "POST",
            "/api/users",
            Some(&clerk),
            Some(json!({ "name": "Al", "email": "not-an-email", "password": "pw" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-auth-token").is_none());
}

#[tokio::test]
async fn test_anonymous_register_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .send(
            "POST",
            "/api/users",
            None,
            Some(json!({
                "name": "Dorothy V",
                "email": "dorothy@example.com",
                "password": "fortran-66",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-auth-token").is_none());
    assert_eq!(body_json(response).await["code"], "UNAUTHENTICATED");

    let response = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "dorothy@example.com", "password": "fortran-66" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
