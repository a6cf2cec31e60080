mod auth;
mod bookings;
mod clients;
mod contact;
pub mod error;
mod extract;
mod providers;
mod reviews;
mod services;
mod team_members;
pub mod validation;

pub use auth::{hash_password, verify_password, AuthSession};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let mut api_routes = Router::new()
        // Services
        .route("/services", get(services::list_services))
        .route("/services/popular", get(services::popular_services))
        .route("/services/new", get(services::new_services))
        .route("/services/category/:category", get(services::services_by_category))
        .route("/services/:id", get(services::get_service))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        // Reviews
        .route("/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/reviews/service/:serviceId", get(reviews::reviews_by_service))
        .route("/reviews/:id", get(reviews::get_review))
        // Team
        .route("/team-members", get(team_members::list_team_members))
        .route("/team-members/:id", get(team_members::get_team_member))
        // Contact form
        .route("/contact", post(contact::submit_contact));

    if state.config.auth.enabled {
        let auth_routes = Router::new()
            .route("/register", post(auth::register))
            .route("/login", post(auth::login))
            .route("/logout", post(auth::logout))
            .route("/me", get(auth::me));

        let provider_routes = Router::new()
            .route(
                "/profile",
                get(providers::get_profile)
                    .post(providers::create_profile)
                    .patch(providers::update_profile),
            )
            .route("/bookings", get(providers::provider_bookings));

        let client_routes =
            Router::new().route("/bookings", get(clients::client_bookings));

        api_routes = api_routes
            .nest("/auth", auth_routes)
            .nest("/providers", provider_routes)
            .nest("/clients", client_routes);
    }

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::db::{NewUser, UserType};
    use axum::{
        body::Body,
        http::{header, HeaderMap, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(config: Config) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::in_memory(config));
        (create_router(state.clone()), state)
    }

    fn app() -> (Router, Arc<AppState>) {
        app_with(Config::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, headers, body)
    }

    fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn session_cookie(headers: &HeaderMap) -> String {
        let raw = headers
            .get(header::SET_COOKIE)
            .expect("set-cookie header")
            .to_str()
            .unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    fn booking_body() -> Value {
        json!({
            "firstName": "Dana",
            "lastName": "Reyes",
            "email": "dana@example.com",
            "phone": "5125550100",
            "address": "12 Elm St",
            "serviceCategory": "plumbing",
            "date": "2025-03-01",
            "time": "09:00"
        })
    }

    fn registration(username: &str, email: &str, user_type: &str) -> Value {
        json!({
            "username": username,
            "password": "secret1",
            "confirmPassword": "secret1",
            "email": email,
            "userType": user_type,
            "firstName": "Sam",
            "lastName": "Lee"
        })
    }

    fn provider_profile() -> Value {
        json!({
            "bio": "Licensed plumber",
            "experienceYears": 8,
            "hourlyRate": "75.00",
            "skills": ["pipes", "water heaters"],
            "serviceCategories": ["plumbing"],
            "availability": "weekdays",
            "city": "Austin",
            "state": "TX"
        })
    }

    /// Register a user and log in, returning the cookie to send back
    async fn login_as(app: &Router, username: &str, user_type: &str) -> String {
        let email = format!("{}@example.com", username);
        let (status, _, _) = send(
            app,
            json_req("POST", "/api/auth/register", &registration(username, &email, user_type), None),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, headers, _) = send(
            app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": email, "password": "secret1"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        session_cookie(&headers)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = app();
        let (status, _, body) = send(&app, get_req("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("OK"));
    }

    #[tokio::test]
    async fn test_list_seeded_services() {
        let (app, _) = app();
        let (status, _, body) = send(&app, get_req("/api/services", None)).await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(body[0]["name"], "Plumbing Services");
        assert!(body[0].get("isPopular").is_some());
    }

    #[tokio::test]
    async fn test_service_filters() {
        let (app, _) = app();

        let (_, _, popular) = send(&app, get_req("/api/services/popular", None)).await;
        assert!(popular.as_array().unwrap().iter().all(|s| s["isPopular"] == true));
        assert_eq!(popular.as_array().unwrap().len(), 2);

        let (_, _, fresh) = send(&app, get_req("/api/services/new", None)).await;
        assert!(fresh.as_array().unwrap().iter().all(|s| s["isNew"] == true));

        let (_, _, plumbing) = send(&app, get_req("/api/services/category/plumbing", None)).await;
        assert_eq!(plumbing.as_array().unwrap().len(), 1);

        let (status, _, none) = send(&app, get_req("/api/services/category/roofing", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(none, json!([]));
    }

    #[tokio::test]
    async fn test_get_service_errors() {
        let (app, _) = app();

        let (status, _, body) = send(&app, get_req("/api/services/2", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);

        let (status, _, body) = send(&app, get_req("/api/services/abc", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid service ID");

        let (status, _, body) = send(&app, get_req("/api/services/99", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_booking_is_stored() {
        let (app, state) = app();
        let (status, _, body) =
            send(&app, json_req("POST", "/api/bookings", &booking_body(), None)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert!(body["createdAt"].is_string());
        assert!(body["clientUserId"].is_null());

        let stored = state.storage.list_bookings();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "dana@example.com");
    }

    #[tokio::test]
    async fn test_invalid_booking_reports_every_field() {
        let (app, state) = app();
        let mut body = booking_body();
        body["email"] = json!("not-an-email");
        body["phone"] = json!("123");

        let (status, _, body) = send(&app, json_req("POST", "/api/bookings", &body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(body["error"]["details"]["email"].is_array());
        assert!(body["error"]["details"]["phone"].is_array());
        assert!(state.storage.list_bookings().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_reviews() {
        let (app, _) = app();

        let (_, _, all) = send(&app, get_req("/api/reviews", None)).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let review = json!({
            "name": "Jo",
            "serviceId": 42,
            "rating": 5,
            "comment": "Quick and tidy work."
        });
        let (status, _, created) = send(&app, json_req("POST", "/api/reviews", &review, None)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 4);
        assert!(created["date"].is_string());

        let (_, _, for_service) = send(&app, get_req("/api/reviews/service/42", None)).await;
        assert_eq!(for_service.as_array().unwrap().len(), 1);

        let (status, _, _) = send(&app, get_req("/api/reviews/4", None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(&app, get_req("/api/reviews/service/x", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid service ID");

        let mut bad = review.clone();
        bad["rating"] = json!(6);
        let (status, _, body) = send(&app, json_req("POST", "/api/reviews", &bad, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["details"]["rating"].is_array());
    }

    #[tokio::test]
    async fn test_team_members() {
        let (app, _) = app();

        let (_, _, all) = send(&app, get_req("/api/team-members", None)).await;
        assert_eq!(all.as_array().unwrap().len(), 4);

        let (status, _, member) = send(&app, get_req("/api/team-members/2", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(member["id"], 2);

        let (status, _, _) = send(&app, get_req("/api/team-members/9", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_receipt() {
        let (app, state) = app();
        let message = json!({
            "firstName": "Al",
            "lastName": "Ng",
            "email": "al@example.com",
            "phone": "5125550199",
            "message": "Need a quote for a new deck."
        });

        let (status, _, body) = send(&app, json_req("POST", "/api/contact", &message, None)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"success": true, "message": "Contact message sent successfully", "id": 1})
        );
        assert_eq!(state.storage.list_contact_messages().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let (app, _) = app();

        let (status, _, user) = send(
            &app,
            json_req("POST", "/api/auth/register", &registration("sam", "sam@example.com", "client"), None),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["userType"], "client");
        assert!(user.get("password").is_none());

        let (status, _, body) = send(
            &app,
            json_req("POST", "/api/auth/register", &registration("sam", "other@example.com", "client"), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Username already taken");

        let (status, _, body) = send(
            &app,
            json_req("POST", "/api/auth/register", &registration("sammy", "sam@example.com", "client"), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Email already in use");
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let (app, _) = app();
        send(
            &app,
            json_req("POST", "/api/auth/register", &registration("sam", "sam@example.com", "client"), None),
        )
        .await;

        let (status, headers, user) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": "sam@example.com", "password": "secret1"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["username"], "sam");

        let raw = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(raw.starts_with("handyfix.sid="));
        assert!(raw.contains("HttpOnly"));
        assert!(raw.contains("SameSite=Lax"));
        assert!(raw.contains("Max-Age=86400"));
        assert!(!raw.contains("Secure"));

        let cookie = session_cookie(&headers);
        let (status, _, me) = send(&app, get_req("/api/auth/me", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "sam@example.com");
    }

    #[tokio::test]
    async fn test_bad_credentials_share_one_message() {
        let (app, state) = app();
        send(
            &app,
            json_req("POST", "/api/auth/register", &registration("sam", "sam@example.com", "client"), None),
        )
        .await;

        let (status, headers, wrong_password) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": "sam@example.com", "password": "wrong-pass"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(headers.get(header::SET_COOKIE).is_none());

        let (status, _, unknown_email) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": "nobody@example.com", "password": "secret1"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password["error"]["message"], "Invalid email or password");
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_login_is_unauthorized() {
        let (app, _) = app();
        for body in [json!({}), json!({"email": 5, "password": true}), json!(["sam"])] {
            let (status, _, response) =
                send(&app, json_req("POST", "/api/auth/login", &body, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(response["error"]["message"], "Invalid email or password");
        }
    }

    #[tokio::test]
    async fn test_me_for_deleted_user_ends_session() {
        let (app, state) = app();
        let ghost = NewUser {
            username: "ghost".to_string(),
            password: "unused".to_string(),
            email: "ghost@example.com".to_string(),
            user_type: UserType::Client,
            first_name: "Gus".to_string(),
            last_name: "Host".to_string(),
            phone: None,
        }
        .into_user(999, chrono::Utc::now());

        let token = state.sessions.start(&ghost, state.config.session_ttl());
        let cookie = format!("handyfix.sid={}", token);

        let (status, _, body) = send(&app, get_req("/api/auth/me", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "User not found");
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_custom_cookie_name() {
        let mut config = Config::default();
        config.auth.cookie_name = "hf_session".to_string();
        config.auth.session_ttl_hours = 2;
        let (app, _) = app_with(config);

        let cookie = login_as(&app, "sam", "client").await;
        assert!(cookie.starts_with("hf_session="));

        let (status, _, _) = send(&app, get_req("/api/auth/me", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, headers, _) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": "sam@example.com", "password": "secret1"}),
                None,
            ),
        )
        .await;
        let raw = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(raw.contains("Max-Age=7200"));
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (app, _) = app();
        let cookie = login_as(&app, "sam", "client").await;

        let (status, headers, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logged out successfully");
        assert!(headers.get(header::SET_COOKIE).is_some());

        let (status, _, body) = send(&app, get_req("/api/auth/me", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Unauthorized. Please log in.");
    }

    #[tokio::test]
    async fn test_role_checks() {
        let (app, _) = app();

        let (status, _, _) = send(&app, get_req("/api/providers/profile", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) =
            send(&app, get_req("/api/auth/me", Some("handyfix.sid=forged"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let client = login_as(&app, "cal", "client").await;
        let (status, _, body) = send(&app, get_req("/api/providers/profile", Some(client.as_str()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "Access denied");

        let provider = login_as(&app, "pat", "provider").await;
        let (status, _, _) = send(&app, get_req("/api/clients/bookings", Some(provider.as_str()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_provider_profile_flow() {
        let (app, _) = app();
        let cookie = login_as(&app, "pat", "provider").await;

        let (status, _, _) = send(&app, get_req("/api/providers/profile", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, profile) = send(
            &app,
            json_req("POST", "/api/providers/profile", &provider_profile(), Some(cookie.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(profile["isVerified"], false);
        assert_eq!(profile["rating"], "0.0");
        assert_eq!(profile["totalJobs"], 0);

        let (status, _, body) = send(
            &app,
            json_req("POST", "/api/providers/profile", &provider_profile(), Some(cookie.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Provider profile already exists");

        let (status, _, updated) = send(
            &app,
            json_req("PATCH", "/api/providers/profile", &json!({"city": "Dallas"}), Some(cookie.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["city"], "Dallas");
        assert_eq!(updated["bio"], "Licensed plumber");

        let mut booking = booking_body();
        booking["providerId"] = profile["id"].clone();
        send(&app, json_req("POST", "/api/bookings", &booking, None)).await;
        send(&app, json_req("POST", "/api/bookings", &booking_body(), None)).await;

        let (status, _, bookings) =
            send(&app, get_req("/api/providers/bookings", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bookings.as_array().unwrap().len(), 1);
        assert_eq!(bookings[0]["providerId"], profile["id"]);
    }

    #[tokio::test]
    async fn test_client_sees_own_bookings() {
        let (app, _) = app();
        let cookie = login_as(&app, "cal", "client").await;
        let (_, _, me) = send(&app, get_req("/api/auth/me", Some(cookie.as_str()))).await;

        let (status, _, booking) =
            send(&app, json_req("POST", "/api/bookings", &booking_body(), Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["clientUserId"], me["id"]);

        send(&app, json_req("POST", "/api/bookings", &booking_body(), None)).await;

        let (status, _, mine) = send(&app, get_req("/api/clients/bookings", Some(cookie.as_str()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_auth_routes_absent_when_disabled() {
        let mut config = Config::default();
        config.auth.enabled = false;
        let (app, _) = app_with(config);

        let (status, _, _) = send(
            &app,
            json_req("POST", "/api/auth/login", &json!({"email": "a@b.co", "password": "x"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, get_req("/api/clients/bookings", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, get_req("/api/services", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_production_cookie_is_secure() {
        let mut config = Config::default();
        config.server.environment = Environment::Production;
        let (app, _) = app_with(config);

        let cookie = login_as(&app, "sam", "client").await;
        assert!(cookie.starts_with("handyfix.sid="));

        let (_, headers, _) = send(
            &app,
            json_req(
                "POST",
                "/api/auth/login",
                &json!({"email": "sam@example.com", "password": "secret1"}),
                None,
            ),
        )
        .await;
        let raw = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(raw.contains("Secure"));
    }
}
