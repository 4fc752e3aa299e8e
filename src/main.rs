use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;

use leave_desk::adapters::cache::CachedEmployeeLookup;
use leave_desk::adapters::clock::SystemClock;
use leave_desk::adapters::mailer::LogMailer;
use leave_desk::adapters::mysql::{MySqlEmployeeDirectory, MySqlLeaveRequests};
use leave_desk::config::Config;
use leave_desk::db::init_db;
use leave_desk::docs::ApiDoc;
use leave_desk::leave::SubmitLeave;
use leave_desk::routes;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Leave desk is running"
}

fn build_workflow(config: &Config, pool: MySqlPool) -> SubmitLeave {
    let directory = Arc::new(MySqlEmployeeDirectory::new(pool.clone()));
    let employees = Arc::new(CachedEmployeeLookup::new(
        directory,
        config.employee_cache_capacity,
        Duration::from_secs(config.employee_cache_ttl_secs),
    ));
    let requests = Arc::new(MySqlLeaveRequests::new(pool));

    SubmitLeave::new(
        employees,
        requests.clone(),
        requests,
        Arc::new(LogMailer::new(&config.manager_email)),
        Arc::new(SystemClock),
    )
    .with_calendar(Arc::new(config.fiscal_year))
    .with_policy(config.policy)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        fiscal_year_month = config.fiscal_year.month(),
        fiscal_year_day = config.fiscal_year.day(),
        minimum_tenure_months = config.policy.minimum_tenure_months,
        yearly_quota = config.policy.yearly_quota,
        "Server starting..."
    );

    let pool = init_db(&config.database_url).await?;
    let workflow = Data::new(build_workflow(&config, pool.clone()));
    let submit_limiter = routes::build_limiter(config.rate_submit_per_min)?;
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(workflow.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, submit_limiter.clone()))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    // Pool lives exactly as long as the server.
    pool.close().await;
    info!("Server stopped");
    Ok(())
}
