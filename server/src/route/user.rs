use application::service::{GetOrderService, GetUserService, SaveUserService};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, DatabaseModule};
use crate::route::{FilterQuery, IdQuery};

use super::order::OrderPresenter;
use self::request::{GetUserOrdersRequest, GetUserRequest, SortQuery, Transformer as UserTransformer};
pub(crate) use self::request::UserRequest;
use self::response::Presenter as UserPresenter;

mod request;
mod response;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl<D: DatabaseModule> UserRouter for Router<AppModule<D>> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), UserPresenter)
                    .bypass(|| module.database().get_all_users())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .put(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<IdQuery>, ErrorStatus>,
                 WithRejection(Json(req), _): WithRejection<Json<UserRequest>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .try_intake((query, req))?
                        .handle(|dto| module.database().save_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/filter",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<FilterQuery>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .try_intake(query)?
                        .handle(|filter| module.database().filter_users(filter))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/sort",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<SortQuery>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .try_intake(query)?
                        .handle(|key| module.database().sort_users(key))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): WithRejection<Path<i32>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| module.database().get_user(dto))
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| ErrorStatus::not_found(format!("User {id} not found")))
                },
            ),
        )
        .route(
            "/users/:id/orders",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): WithRejection<Path<i32>, ErrorStatus>| async move {
                    Controller::new(UserTransformer, OrderPresenter)
                        .intake(GetUserOrdersRequest::new(id))
                        .handle(|dto| module.database().get_user_orders(dto))
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| ErrorStatus::not_found(format!("User {id} not found")))
                },
            ),
        )
    }
}
