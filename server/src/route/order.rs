use application::service::{CreateOrderService, GetOrderService, UpdateOrderService};
use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, DatabaseModule};
use crate::route::{FilterQuery, IdQuery};

use self::request::{ChangeStatusQuery, GetOrderRequest, OrderRequest, Transformer as OrderTransformer};
pub(crate) use self::response::Presenter as OrderPresenter;

mod request;
mod response;

pub trait OrderRouter {
    fn route_order(self) -> Self;
}

impl<D: DatabaseModule> OrderRouter for Router<AppModule<D>> {
    fn route_order(self) -> Self {
        self.route(
            "/orders",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), OrderPresenter)
                    .bypass(|| module.database().get_all_orders())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): WithRejection<Json<OrderRequest>, ErrorStatus>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.database().create_order(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/filter",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<FilterQuery>, ErrorStatus>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .try_intake(query)?
                        .handle(|filter| module.database().filter_orders(filter))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/canceled",
            put(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<IdQuery>, ErrorStatus>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .intake(query)
                        .handle(|dto| module.database().cancel_order(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/change-status",
            put(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<ChangeStatusQuery>, ErrorStatus>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .try_intake(query)?
                        .handle(|dto| module.database().change_order_status(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): WithRejection<Path<i32>, ErrorStatus>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .intake(GetOrderRequest::new(id))
                        .handle(|dto| module.database().get_order(dto))
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| ErrorStatus::not_found(format!("Order {id} not found")))
                },
            ),
        )
    }
}
