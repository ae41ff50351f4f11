use std::time::Duration;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use shiftdock::config::Config;
use shiftdock::docs::ApiDoc;
use shiftdock::routes;
use shiftdock::schedule::service::Scheduler;
use shiftdock::store::Bucket;
use shiftdock::store::business::BusinessStore;
use shiftdock::store::employees::EmployeeStore;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Shiftdock"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let bucket = Bucket::new();
    let employees = EmployeeStore::new(bucket.clone(), config.horizon_months);
    let business = BusinessStore::new(bucket.clone());
    let scheduler = Scheduler::new(
        employees.clone(),
        business.clone(),
        Duration::from_millis(config.op_timeout_ms),
    );

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();
    let scheduler = Data::new(scheduler);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(employees.clone()))
            .app_data(Data::new(business.clone()))
            .app_data(scheduler.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
