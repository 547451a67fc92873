use application::service::AuthService;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, DatabaseModule};

use super::user::UserRequest;
use self::request::{LoginRequest, Transformer as AuthTransformer};
use self::response::Presenter as AuthPresenter;

mod request;
mod response;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl<D: DatabaseModule> AuthRouter for Router<AppModule<D>> {
    fn route_auth(self) -> Self {
        self.route(
            "/auth/register",
            post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): WithRejection<Json<UserRequest>, ErrorStatus>| async move {
                    Controller::new(AuthTransformer, AuthPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.database().register(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/login",
            post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ErrorStatus>| async move {
                    Controller::new(AuthTransformer, AuthPresenter)
                        .intake(req)
                        .handle(|dto| module.database().login(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::route::test_support::{router, send};

    #[tokio::test]
    async fn register_and_login() {
        let router = router();
        let manager = json!({
            "login": "manager1",
            "password": "manager1",
            "name": "John",
            "age": 36,
            "city": "New-York",
            "roles": ["MANAGER"]
        });
        let (status, body) = send(&router, Method::POST, "/auth/register", Some(manager.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "id": 1 }));

        let (status, body) = send(&router, Method::POST, "/auth/register", Some(manager)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].is_string());

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/login",
            Some(json!({ "login": "manager1", "password": "manager1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "roles": ["MANAGER"] }));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let router = router();
        let client = json!({
            "login": "client2",
            "password": "client2",
            "name": "Valera",
            "age": 45,
            "city": "Milan"
        });
        send(&router, Method::POST, "/auth/register", Some(client)).await;

        for credentials in [
            json!({ "login": "client2", "password": "nope" }),
            json!({ "login": "ghost", "password": "client2" }),
        ] {
            let (status, body) = send(&router, Method::POST, "/auth/login", Some(credentials)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["message"], "Invalid login or password");
        }
    }
}
