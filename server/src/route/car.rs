use application::service::{DeleteCarService, GetCarService, SaveCarService};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, DatabaseModule};
use crate::route::{FilterQuery, IdQuery};

use self::request::{CarRequest, GetCarRequest, Transformer as CarTransformer};
use self::response::Presenter as CarPresenter;

mod request;
mod response;

pub trait CarRouter {
    fn route_car(self) -> Self;
}

impl<D: DatabaseModule> CarRouter for Router<AppModule<D>> {
    fn route_car(self) -> Self {
        self.route(
            "/cars",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), CarPresenter)
                    .bypass(|| module.database().get_all_cars())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): WithRejection<Json<CarRequest>, ErrorStatus>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.database().save_car(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<IdQuery>, ErrorStatus>,
                 WithRejection(Json(req), _): WithRejection<Json<CarRequest>, ErrorStatus>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .try_intake((query, req))?
                        .handle(|dto| module.database().save_car(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<IdQuery>, ErrorStatus>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake(query)
                        .handle(|dto| module.database().delete_car(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/cars/filter",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(query), _): WithRejection<Query<FilterQuery>, ErrorStatus>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .try_intake(query)?
                        .handle(|filter| module.database().filter_cars(filter))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/cars/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): WithRejection<Path<i32>, ErrorStatus>| async move {
                    Controller::new(CarTransformer, CarPresenter)
                        .intake(GetCarRequest::new(id))
                        .handle(|dto| module.database().get_car(dto))
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| ErrorStatus::not_found(format!("Car {id} not found")))
                },
            ),
        )
    }
}
