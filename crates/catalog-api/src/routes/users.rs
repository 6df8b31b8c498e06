//! User API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /users` - 사용자 생성 (보호)
//! - `GET /users?email=` - 이메일로 사용자 조회 (보호)
//! - `POST /users/generate_token` - 자격증명으로 Access Token 발급 (공개)

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use catalog_core::User;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::AuthError;
use crate::error::{ApiError, ApiResult};
use crate::repository::RepositoryError;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 사용자 생성 요청
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// 토큰 발급 요청
#[derive(Debug, Deserialize)]
pub struct GetJwtInput {
    pub email: String,
    pub password: String,
}

/// 토큰 발급 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// 사용자 조회 쿼리
#[derive(Debug, Default, Deserialize)]
pub struct FindUserQuery {
    #[serde(default)]
    pub email: Option<String>,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /users - 사용자 생성
async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(input) = payload?;

    // 해싱은 블로킹 풀에서 수행
    let user = tokio::task::spawn_blocking(move || {
        User::new(input.name, input.email, &input.password)
    })
    .await??;

    state.users.create(&user).await?;

    info!(user_id = %user.id(), "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users?email= - 이메일로 사용자 조회
async fn find_user_by_email(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FindUserQuery>, QueryRejection>,
) -> ApiResult<Json<User>> {
    let Query(query) = query?;
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::validation("Email is required"))?;

    let user = state.users.find_by_email(&email).await.map_err(|e| match e {
        RepositoryError::NotFound => ApiError::not_found("User not found"),
        other => other.into(),
    })?;

    Ok(Json(user))
}

/// POST /users/generate_token - Access Token 발급
///
/// 존재하지 않는 이메일과 틀린 비밀번호는 구분되지 않는 401을 반환합니다.
async fn generate_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetJwtInput>, JsonRejection>,
) -> ApiResult<Json<AccessToken>> {
    let Json(input) = payload?;
    if input.email.is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    let user = match state.users.find_by_email(&input.email).await {
        Ok(user) => user,
        Err(RepositoryError::NotFound) => {
            warn!("Token request for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    let subject = user.id().to_string();
    let password = input.password;
    let valid = tokio::task::spawn_blocking(move || user.validate_password(&password)).await?;
    if !valid {
        warn!(user_id = %subject, "Token request with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = state.token.issue(&subject)?;

    info!(user_id = %subject, "Access token issued");
    Ok(Json(AccessToken { access_token }))
}

// ================================================================================================
// Router
// ================================================================================================

/// 사용자 관리 라우터 생성 (보호 체인용).
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user).get(find_user_by_email))
}

/// 토큰 발급 라우터 생성 (공개 체인용).
pub fn token_router() -> Router<Arc<AppState>> {
    Router::new().route("/users/generate_token", post(generate_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt;
    use crate::error::ApiErrorResponse;
    use crate::state::{create_test_state, TEST_JWT_SECRET};
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> (Router, Arc<AppState>) {
        let state = Arc::new(create_test_state().await);
        let app = users_router()
            .merge(token_router())
            .with_state(state.clone());
        (app, state)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn seed_user(state: &AppState) -> User {
        let user = User::new("John", "j@j.com", "123456").unwrap();
        state.users.create(&user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn test_create_user() {
        let (app, state) = test_app().await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/users",
                json!({"name": "John", "email": "j@j.com", "password": "123456"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = body_json(response).await;
        assert_eq!(created["email"], "j@j.com");
        assert!(created.get("password").is_none());
        assert!(created.get("password_hash").is_none());

        let stored = state.users.find_by_email("j@j.com").await.unwrap();
        assert!(stored.validate_password("123456"));
    }

    #[tokio::test]
    async fn test_create_user_validation() {
        let (app, _) = test_app().await;
        let long_password = "a".repeat(73);

        let cases = [
            json!({"name": "", "email": "j@j.com", "password": "123456"}),
            json!({"name": "John", "email": "j@j", "password": "123456"}),
            json!({"name": "John", "email": "j@j.com", "password": ""}),
            json!({"name": "John", "email": "j@j.com", "password": long_password}),
        ];

        for body in cases {
            let response = app
                .clone()
                .oneshot(json_request(Method::POST, "/users", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let (app, state) = test_app().await;
        seed_user(&state).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/users",
                json!({"name": "Jane", "email": "j@j.com", "password": "654321"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let (app, state) = test_app().await;
        let user = seed_user(&state).await;

        let request = Request::builder()
            .uri("/users?email=j@j.com")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let found: Value = body_json(response).await;
        assert_eq!(found["id"], user.id().to_string());
        assert!(found.get("password_hash").is_none());

        let request = Request::builder()
            .uri("/users?email=missing@j.com")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = Request::builder().uri("/users").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_token() {
        let (app, state) = test_app().await;
        let user = seed_user(&state).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/users/generate_token",
                json!({"email": "j@j.com", "password": "123456"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let token: AccessToken = body_json(response).await;
        let subject = jwt::verify(&token.access_token, TEST_JWT_SECRET).unwrap();
        assert_eq!(subject, user.id().to_string());
    }

    #[tokio::test]
    async fn test_generate_token_invalid_credentials() {
        let (app, state) = test_app().await;
        seed_user(&state).await;

        let cases = [
            json!({"email": "j@j.com", "password": "wrong"}),
            json!({"email": "missing@j.com", "password": "123456"}),
        ];

        for body in cases {
            let response = app
                .clone()
                .oneshot(json_request(Method::POST, "/users/generate_token", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let error: ApiErrorResponse = body_json(response).await;
            assert_eq!(error.message, "Invalid credentials");
        }
    }
}
