use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use hiring_portal_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let integration_api = Router::new()
        .route(
            "/api/integration/invites",
            get(routes::invite_routes::list_invites).post(routes::invite_routes::create_invite),
        )
        .route(
            "/api/integration/invites/bulk",
            post(routes::invite_routes::bulk_dispatch),
        )
        .route(
            "/api/integration/invites/:id",
            get(routes::invite_routes::get_invite).delete(routes::invite_routes::delete_invite),
        )
        .route(
            "/api/integration/invites/:id/send",
            post(routes::invite_routes::mark_sent),
        )
        .route(
            "/api/integration/invites/:id/revoke",
            post(routes::invite_routes::revoke_invite),
        )
        .route(
            "/api/integration/jobs",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route(
            "/api/integration/jobs/:id",
            get(routes::job_routes::get_job)
                .patch(routes::job_routes::update_job)
                .delete(routes::job_routes::delete_job),
        )
        .route(
            "/api/integration/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/integration/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .patch(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/integration/applications",
            get(routes::application_routes::list_applications),
        )
        .route(
            "/api/integration/applications/:id",
            get(routes::application_routes::get_application),
        )
        .route(
            "/api/integration/applications/:id/status",
            post(routes::application_routes::update_application_status),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_hr_or_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.integration_rps),
            middleware::rate_limit::rps_middleware,
        ));

    // Interviewers share these routes with HR; role gating is looser here.
    let evaluation_api = Router::new()
        .route(
            "/api/integration/applications/:id/evaluations",
            get(routes::evaluation_routes::list_evaluations)
                .post(routes::evaluation_routes::record_evaluation),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_staff))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.integration_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route(
            "/api/public/applications/:token",
            get(routes::public::get_application_context)
                .post(routes::public::submit_application),
        )
        .route(
            "/api/public/checkin/:token",
            get(routes::public::check_in),
        )
        .route(
            "/api/public/jobs",
            get(routes::public::list_public_jobs),
        )
        .route(
            "/api/public/jobs/:id",
            get(routes::public::get_public_job),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(integration_api)
        .merge(evaluation_api)
        .merge(public_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
