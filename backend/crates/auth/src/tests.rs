//! Unit tests for Auth crate

#[cfg(test)]
mod user_name_tests {
    use crate::domain::value_object::user_name::{USER_NAME_MAX_LENGTH, UserName, UserNameError};

    #[test]
    fn test_trims_surrounding_whitespace() {
        let name = UserName::new("  alice ").unwrap();
        assert_eq!(name.as_str(), "alice");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_rejects_inner_whitespace_and_control() {
        assert_eq!(
            UserName::new("ali ce").unwrap_err(),
            UserNameError::InvalidCharacter
        );
        assert_eq!(
            UserName::new("ali\u{0000}ce").unwrap_err(),
            UserNameError::InvalidCharacter
        );
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_nfkc_normalization() {
        assert_eq!(UserName::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }
}

#[cfg(test)]
mod middleware_tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use crate::error::AuthError;
    use crate::presentation::middleware::extract_bearer_token;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(&headers("bEaReR abc")).unwrap(), "abc");
    }

    #[test]
    fn test_malformed_headers() {
        for value in ["Bearer", "Token abc", "Bearer a b", "Bearer  abc", "abc"] {
            assert!(
                matches!(
                    extract_bearer_token(&headers(value)),
                    Err(AuthError::InvalidAuthHeader)
                ),
                "{value:?} should be rejected"
            );
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use platform::token::{TokenError, TokenService};

    use parking_lot::Mutex;

    use crate::application::{
        AuthConfig, LoginInput, LoginUseCase, ManageUsersUseCase, PasswordService,
        RefreshUseCase, RegisterInput, RegisterUseCase, UpdateUserInput,
    };
    use crate::domain::entity::user::User;
    use crate::domain::hook::UserDeletionHook;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::UserId;
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryUserRepository;

    struct Fixture {
        repo: Arc<InMemoryUserRepository>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = AuthConfig::with_random_secret();
            let tokens = Arc::new(config.token_service());
            Self {
                repo: Arc::new(InMemoryUserRepository::new()),
                passwords: config.password_service(),
                tokens,
            }
        }

        async fn register(&self, name: &str, password: &str) -> Result<User, AuthError> {
            RegisterUseCase::new(self.repo.clone(), self.passwords.clone())
                .execute(RegisterInput {
                    user_name: name.to_string(),
                    password: password.to_string(),
                })
                .await
        }

        fn login(&self) -> LoginUseCase<InMemoryUserRepository> {
            LoginUseCase::new(self.repo.clone(), self.passwords.clone(), self.tokens.clone())
        }

        fn users(&self) -> ManageUsersUseCase<InMemoryUserRepository, ()> {
            self.users_with(Arc::new(()))
        }

        fn users_with<H: UserDeletionHook>(
            &self,
            hook: Arc<H>,
        ) -> ManageUsersUseCase<InMemoryUserRepository, H> {
            ManageUsersUseCase::new(self.repo.clone(), self.passwords.clone(), hook)
        }
    }

    /// Records every user id it is called with
    #[derive(Default)]
    struct RecordingHook {
        seen: Mutex<Vec<UserId>>,
        fail: bool,
    }

    impl UserDeletionHook for RecordingHook {
        async fn before_user_deleted(&self, user_id: UserId) -> AuthResult<()> {
            self.seen.lock().push(user_id);
            if self.fail {
                Err(AuthError::Internal("cleanup failed".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn credentials(name: &str, password: &str) -> LoginInput {
        LoginInput {
            user_name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let fx = Fixture::new();
        let first = fx.register("alice", "pw1").await.unwrap();
        assert_eq!(first.user_name.as_str(), "alice");

        let second = fx.register("alice", "pw2").await;
        assert!(matches!(second, Err(AuthError::UserNameTaken)));
        assert_eq!(fx.repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_password() {
        let fx = Fixture::new();
        assert!(matches!(
            fx.register("alice", "  ").await,
            Err(AuthError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_login_issues_pair_for_user() {
        let fx = Fixture::new();
        let user = fx.register("alice", "pw1").await.unwrap();

        let pair = fx.login().execute(credentials("alice", "pw1")).await.unwrap();
        let claims = fx.tokens.verify(&pair.access_token).unwrap();
        assert_eq!(claims.user_id, user.user_id.value());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = Fixture::new();
        fx.register("alice", "pw1").await.unwrap();

        let wrong_password = fx.login().execute(credentials("alice", "nope")).await;
        let unknown_user = fx.login().execute(credentials("bob", "pw1")).await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_user_login_still_verifies_a_hash() {
        let fx = Fixture::new();
        fx.register("alice", "pw1").await.unwrap();
        assert_eq!(fx.passwords.verification_count(), 0);

        let _ = fx.login().execute(credentials("alice", "nope")).await;
        assert_eq!(fx.passwords.verification_count(), 1);

        let result = fx.login().execute(credentials("bob", "pw1")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(fx.passwords.verification_count(), 2);

        let result = fx.login().execute(credentials("not valid", "pw1")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(fx.passwords.verification_count(), 3);
    }

    #[tokio::test]
    async fn test_delete_runs_hook_before_removing_user() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();
        let hook = Arc::new(RecordingHook::default());

        fx.users_with(hook.clone())
            .delete(alice.user_id, alice.user_id)
            .await
            .unwrap();

        assert_eq!(*hook.seen.lock(), vec![alice.user_id]);
        assert!(matches!(
            fx.repo.find_by_id(alice.user_id).await,
            Err(AuthError::UserNotFound)
        ));

        // Already gone: the hook is not called again
        let result = fx
            .users_with(hook.clone())
            .delete(alice.user_id, alice.user_id)
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert_eq!(hook.seen.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_hook_keeps_user() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();
        let hook = Arc::new(RecordingHook {
            fail: true,
            ..Default::default()
        });

        let result = fx
            .users_with(hook)
            .delete(alice.user_id, alice.user_id)
            .await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
        assert!(fx.repo.find_by_id(alice.user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let fx = Fixture::new();
        fx.register("alice", "pw1").await.unwrap();
        let pair = fx.login().execute(credentials("alice", "pw1")).await.unwrap();

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&pair.access_token)
            .await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidToken(TokenError::WrongKind { .. }))
        ));
    }

    #[tokio::test]
    async fn test_refresh_fails_for_deleted_user() {
        let fx = Fixture::new();
        let user = fx.register("alice", "pw1").await.unwrap();
        let pair = fx.login().execute(credentials("alice", "pw1")).await.unwrap();

        fx.users().delete(user.user_id, user.user_id).await.unwrap();

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute(&pair.refresh_token)
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_other_user_is_forbidden() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();
        let bob = fx.register("bob", "pw2").await.unwrap();

        let result = fx
            .users()
            .update(alice.user_id, bob.user_id, UpdateUserInput::default())
            .await;
        assert!(matches!(result, Err(AuthError::Forbidden)));

        let result = fx.users().delete(alice.user_id, bob.user_id).await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_with_empty_password_keeps_hash() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();

        let updated = fx
            .users()
            .update(
                alice.user_id,
                alice.user_id,
                UpdateUserInput {
                    user_name: Some("alice2".to_string()),
                    password: Some(String::new()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_name.as_str(), "alice2");
        assert_eq!(updated.password_hash, alice.password_hash);
        assert!(fx.login().execute(credentials("alice2", "pw1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();

        fx.users()
            .update(
                alice.user_id,
                alice.user_id,
                UpdateUserInput {
                    user_name: None,
                    password: Some("pw2".to_string()),
                },
            )
            .await
            .unwrap();

        assert!(fx.login().execute(credentials("alice", "pw1")).await.is_err());
        assert!(fx.login().execute(credentials("alice", "pw2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_name_conflicts() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();
        fx.register("bob", "pw2").await.unwrap();

        let result = fx
            .users()
            .update(
                alice.user_id,
                alice.user_id,
                UpdateUserInput {
                    user_name: Some("bob".to_string()),
                    password: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserNameTaken)));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let fx = Fixture::new();
        let alice = fx.register("alice", "pw1").await.unwrap();
        fx.users().delete(alice.user_id, alice.user_id).await.unwrap();

        assert!(matches!(
            fx.users().get(alice.user_id).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            fx.users().delete(alice.user_id, alice.user_id).await,
            Err(AuthError::UserNotFound)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::AuthConfig;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::router::auth_router_generic;

    fn app() -> Router {
        let config = AuthConfig::with_random_secret();
        let tokens = Arc::new(config.token_service());
        auth_router_generic(InMemoryUserRepository::new(), config, tokens)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register_and_login(app: &Router, name: &str) -> (i64, String, String) {
        let (status, body) = send(
            app,
            "POST",
            "/register",
            None,
            Some(json!({"username": name, "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({"username": name, "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (
            id,
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_hides_password() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "alice", "password": "pw1"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let app = app();
        register_and_login(&app, "alice").await;

        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "alice", "password": "other"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_register_malformed_body() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid payload");
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register_and_login(&app, "alice").await;

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens() {
        let app = app();
        let (_, access, refresh) = register_and_login(&app, "alice").await;

        let (status, body) = send(
            &app,
            "POST",
            "/refresh",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(body["data"]["access_token"].as_str().unwrap(), access);
    }

    #[tokio::test]
    async fn test_users_require_auth_header() {
        let app = app();
        let (status, body) = send(&app, "GET", "/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "no auth header");

        let request = Request::builder()
            .uri("/users")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_a_bearer_token() {
        let app = app();
        let (_, _, refresh) = register_and_login(&app, "alice").await;

        let (status, _) = send(&app, "GET", "/users", Some(&refresh), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_and_get_users() {
        let app = app();
        let (alice_id, token, _) = register_and_login(&app, "alice").await;
        register_and_login(&app, "bob").await;

        let (status, body) = send(&app, "GET", "/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["total"], 2);

        let uri = format!("/users/{alice_id}");
        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");

        let (status, _) = send(&app, "GET", "/users/abc", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/users/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_users_can_only_modify_themselves() {
        let app = app();
        let (alice_id, alice_token, _) = register_and_login(&app, "alice").await;
        let (bob_id, _, _) = register_and_login(&app, "bob").await;

        let bob_uri = format!("/users/{bob_id}");
        let (status, _) = send(&app, "DELETE", &bob_uri, Some(&alice_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "PUT",
            &bob_uri,
            Some(&alice_token),
            Some(json!({"username": "mallory"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let alice_uri = format!("/users/{alice_id}");
        let (status, body) = send(&app, "DELETE", &alice_uri, Some(&alice_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
    }
}
