use std::net::SocketAddr;

use driver::database::{seed_demo_data, InMemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::{ServerConfig, Storage};
use crate::error::StackTrace;
use crate::handler::{AppModule, DatabaseModule};
use crate::route::app_router;

mod config;
mod controller;
mod error;
mod handler;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "application=debug,driver=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting with {:?}", config);

    match config.storage {
        Storage::Postgres => {
            let database = PostgresDatabase::new().await?;
            serve(AppModule::new(database), config.port).await?;
        }
        Storage::Memory => {
            let database = InMemoryDatabase::new(driver::releasing_statuses());
            seed_demo_data(&database).await?;
            serve(AppModule::new(database), config.port).await?;
        }
    }

    Ok(())
}

async fn serve<D: DatabaseModule>(
    module: AppModule<D>,
    port: u16,
) -> error_stack::Result<(), KernelError> {
    let router = app_router(module);

    let bind = SocketAddr::from(([0, 0, 0, 0], port));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("Listening on {}", bind);

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
