// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod actor;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use pedregal_api::{
    ApiError, BasketResponse, CountersResponse, CreateItemRequest, CreateStaffRequest,
    CreateWorkerRequest, DeleteResponse, DeliverBasketRequest, DeliverGiftsRequest, GiftResponse,
    LogListResponse, NationalIdRequest, ObservationRequest, StaffInfo, UpdateWorkerRequest,
    WorkerFlowResponse, WorkerInfo, WorkerResponse, bootstrap_admin, create_basket, create_gift,
    create_staff_user, create_worker, delete_log, delete_worker, deliver_basket, deliver_gifts,
    enter_basket_hall, enter_gift_hall, get_counters, get_worker, get_worker_flow,
    list_logs_by_actor, list_logs_by_worker, lookup_worker, record_observation,
    register_at_window, update_worker, validate_basket_code, validate_gift_code,
};
use pedregal_persistence::{Persistence, PersistencePool, PooledPersistence};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::actor::ActorHeader;

/// Pedregal Server - HTTP server for the El Pedregal flow engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Create an ADMIN staff member with this id if no staff exist yet
    #[arg(long, value_name = "ID")]
    bootstrap_admin: Option<String>,

    /// Maximum number of database connections for a file database
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..=64))]
    pool_size: u32,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    pool: PersistencePool,
}

impl AppState {
    /// Runs `work` on its own pooled connection, off the async workers.
    ///
    /// Diesel calls block, so each request checks out a connection inside
    /// `spawn_blocking`; requests for different workers never share one.
    async fn run<T, F>(&self, work: F) -> Result<T, HttpError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Persistence) -> Result<T, ApiError> + Send + 'static,
    {
        let pool: PersistencePool = self.pool.clone();
        let result: Result<T, ApiError> = tokio::task::spawn_blocking(move || {
            let mut persistence: PooledPersistence =
                pool.get().map_err(|e| ApiError::Internal {
                    message: format!("No database connection available: {e}"),
                })?;
            work(&mut persistence)
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Blocking request task failed");
            HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from("Internal error: request task failed"),
            }
        })?;
        result.map_err(HttpError::from)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::PreconditionViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Flow handlers
// ============================================================================

async fn handle_lookup_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(national_id): Path<String>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(actor_id = %actor.id, national_id = %national_id, "Handling lookup_worker request");
    let response: WorkerResponse = app_state
        .run(move |persistence| lookup_worker(persistence, &actor, &national_id))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/flow/window/register`.
async fn handle_register_at_window(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<NationalIdRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        "Handling register_at_window request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| register_at_window(persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/flow/halls/basket/enter`.
async fn handle_enter_basket_hall(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<NationalIdRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        "Handling enter_basket_hall request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| enter_basket_hall(persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/flow/halls/gift/enter`.
async fn handle_enter_gift_hall(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<NationalIdRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        "Handling enter_gift_hall request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| enter_gift_hall(persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_validate_basket_code(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(code): Path<String>,
) -> Result<Json<BasketResponse>, HttpError> {
    info!(actor_id = %actor.id, code = %code, "Handling validate_basket_code request");
    let response: BasketResponse = app_state
        .run(move |persistence| validate_basket_code(persistence, &actor, &code))
        .await?;
    Ok(Json(response))
}

async fn handle_validate_gift_code(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(code): Path<String>,
) -> Result<Json<GiftResponse>, HttpError> {
    info!(actor_id = %actor.id, code = %code, "Handling validate_gift_code request");
    let response: GiftResponse = app_state
        .run(move |persistence| validate_gift_code(persistence, &actor, &code))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/flow/baskets/deliver`.
///
/// Accepts either the basket's id or its scanned code.
async fn handle_deliver_basket(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<DeliverBasketRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        basket = %req.basket,
        "Handling deliver_basket request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| deliver_basket(persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH `/flow/gifts/deliver`.
async fn handle_deliver_gifts(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<DeliverGiftsRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        gift_count = req.gift_ids.len(),
        "Handling deliver_gifts request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| deliver_gifts(persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_get_worker_flow(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
) -> Result<Json<WorkerFlowResponse>, HttpError> {
    info!(actor_id = %actor.id, worker_id = %worker_id, "Handling get_worker_flow request");
    let response: WorkerFlowResponse = app_state
        .run(move |persistence| get_worker_flow(persistence, &actor, &worker_id))
        .await?;
    Ok(Json(response))
}

// ============================================================================
// Admin handlers
// ============================================================================

async fn handle_create_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<WorkerResponse>), HttpError> {
    info!(
        actor_id = %actor.id,
        national_id = %req.national_id,
        "Handling create_worker request"
    );
    let response: WorkerResponse = app_state
        .run(move |persistence| create_worker(persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_get_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
) -> Result<Json<WorkerInfo>, HttpError> {
    let response: WorkerInfo = app_state
        .run(move |persistence| get_worker(persistence, &actor, &worker_id))
        .await?;
    Ok(Json(response))
}

async fn handle_update_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
    Json(req): Json<UpdateWorkerRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(actor_id = %actor.id, worker_id = %worker_id, "Handling update_worker request");
    let response: WorkerResponse = app_state
        .run(move |persistence| update_worker(persistence, &actor, &worker_id, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_delete_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, worker_id = %worker_id, "Handling delete_worker request");
    let response: DeleteResponse = app_state
        .run(move |persistence| delete_worker(persistence, &actor, &worker_id))
        .await?;
    Ok(Json(response))
}

async fn handle_record_observation(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
    Json(req): Json<ObservationRequest>,
) -> Result<Json<WorkerResponse>, HttpError> {
    info!(actor_id = %actor.id, worker_id = %worker_id, "Handling record_observation request");
    let response: WorkerResponse = app_state
        .run(move |persistence| record_observation(persistence, &actor, &worker_id, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_create_basket(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<BasketResponse>), HttpError> {
    info!(actor_id = %actor.id, code = %req.code, "Handling create_basket request");
    let response: BasketResponse = app_state
        .run(move |persistence| create_basket(persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_create_gift(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<GiftResponse>), HttpError> {
    info!(actor_id = %actor.id, code = %req.code, "Handling create_gift request");
    let response: GiftResponse = app_state
        .run(move |persistence| create_gift(persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_create_staff_user(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(req): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffInfo>), HttpError> {
    info!(
        actor_id = %actor.id,
        user_id = %req.user_id,
        role = %req.role,
        "Handling create_staff_user request"
    );
    let response: StaffInfo = app_state
        .run(move |persistence| create_staff_user(persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_list_logs_by_worker(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(worker_id): Path<String>,
) -> Result<Json<LogListResponse>, HttpError> {
    let response: LogListResponse = app_state
        .run(move |persistence| list_logs_by_worker(persistence, &actor, &worker_id))
        .await?;
    Ok(Json(response))
}

async fn handle_list_logs_by_actor(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(actor_id): Path<String>,
) -> Result<Json<LogListResponse>, HttpError> {
    let response: LogListResponse = app_state
        .run(move |persistence| list_logs_by_actor(persistence, &actor, &actor_id))
        .await?;
    Ok(Json(response))
}

async fn handle_delete_log(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
    Path(log_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, log_id, "Handling delete_log request");
    let response: DeleteResponse = app_state
        .run(move |persistence| delete_log(persistence, &actor, log_id))
        .await?;
    Ok(Json(response))
}

async fn handle_get_counters(
    AxumState(app_state): AxumState<AppState>,
    ActorHeader(actor): ActorHeader,
) -> Result<Json<CountersResponse>, HttpError> {
    let response: CountersResponse = app_state
        .run(move |persistence| get_counters(persistence, &actor))
        .await?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/flow/workers/national-id/{national_id}",
            get(handle_lookup_worker),
        )
        .route("/flow/window/register", patch(handle_register_at_window))
        .route("/flow/halls/basket/enter", patch(handle_enter_basket_hall))
        .route("/flow/halls/gift/enter", patch(handle_enter_gift_hall))
        .route(
            "/flow/baskets/validate/{code}",
            get(handle_validate_basket_code),
        )
        .route("/flow/gifts/validate/{code}", get(handle_validate_gift_code))
        .route("/flow/baskets/deliver", patch(handle_deliver_basket))
        .route("/flow/gifts/deliver", patch(handle_deliver_gifts))
        .route("/flow/workers/{worker_id}/flow", get(handle_get_worker_flow))
        .route("/workers", post(handle_create_worker))
        .route(
            "/workers/{worker_id}",
            get(handle_get_worker)
                .patch(handle_update_worker)
                .delete(handle_delete_worker),
        )
        .route(
            "/workers/{worker_id}/observation",
            post(handle_record_observation),
        )
        .route("/baskets", post(handle_create_basket))
        .route("/gifts", post(handle_create_gift))
        .route("/staff", post(handle_create_staff_user))
        .route("/logs/workers/{worker_id}", get(handle_list_logs_by_worker))
        .route("/logs/actors/{actor_id}", get(handle_list_logs_by_actor))
        .route("/logs/{log_id}", delete(handle_delete_log))
        .route("/counters", get(handle_get_counters))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Pedregal Server");

    let pool: PersistencePool = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::pool_with_file(db_path, args.pool_size)?
    } else {
        info!("Using in-memory database");
        Persistence::pool_in_memory()?
    };

    if let Some(admin_id) = &args.bootstrap_admin {
        let mut persistence: PooledPersistence = pool.get()?;
        match bootstrap_admin(&mut persistence, admin_id) {
            Ok(staff) => info!(user_id = %staff.user_id, "Created first admin"),
            Err(ApiError::Conflict { message }) => info!("Skipping admin bootstrap: {message}"),
            Err(e) => return Err(e.into()),
        }
    }

    let app_state: AppState = AppState { pool };

    let app: Router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use pedregal_domain::{StaffRole, StaffUser};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::actor::ACTOR_HEADER;

    const STAFF: [StaffRole; 7] = [
        StaffRole::WindowAssistant,
        StaffRole::BasketSecurity,
        StaffRole::GiftSecurity,
        StaffRole::BasketDeliveryClerk,
        StaffRole::GiftDeliveryClerk,
        StaffRole::ProcessLead,
        StaffRole::Admin,
    ];

    /// Creates app state with one staff member per role, id = lowercase role.
    fn create_test_app_state() -> AppState {
        let pool: PersistencePool =
            Persistence::pool_in_memory().expect("Failed to create in-memory pool");
        seed_staff(&pool);
        AppState { pool }
    }

    fn seed_staff(pool: &PersistencePool) {
        let mut persistence: PooledPersistence = pool.get().unwrap();
        for role in STAFF {
            persistence
                .create_staff_user(&StaffUser {
                    id: role.as_str().to_lowercase(),
                    first_name: String::from("Test"),
                    last_name: role.as_str().to_string(),
                    role,
                    is_active: true,
                })
                .unwrap();
        }
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        actor_id: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor_id) = actor_id {
            builder = builder.header(ACTOR_HEADER, actor_id);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, value)
    }

    async fn seed_worker(app: &Router, national_id: &str, gift_hall: Option<&str>) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/workers",
            Some("admin"),
            Some(json!({
                "national_id": national_id,
                "full_name": "Ana Torres",
                "onboarding_date": "2018-06-11",
                "children_count": 1,
                "basket_hall": "HALL_2",
                "gift_hall": gift_hall,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        body["worker"]["worker_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_full_journey_over_http() {
        let app: Router = build_router(create_test_app_state());
        let worker_id = seed_worker(&app, "40123456", Some("HALL_1")).await;
        let (status, _) = send(
            &app,
            "POST",
            "/baskets",
            Some("admin"),
            Some(json!({ "code": "B-001" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        let (_, gift) = send(
            &app,
            "POST",
            "/gifts",
            Some("admin"),
            Some(json!({ "code": "G-001" })),
        )
        .await;
        let gift_id = gift["gift"]["gift_id"].as_str().unwrap().to_string();
        let scan = json!({ "national_id": "40123456" });

        let (status, body) = send(
            &app,
            "PATCH",
            "/flow/window/register",
            Some("window_assistant"),
            Some(scan.clone()),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["message"], "Worker 40123456 registered at the window");

        let (status, _) = send(
            &app,
            "PATCH",
            "/flow/halls/basket/enter",
            Some("basket_security"),
            Some(scan.clone()),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let (status, _) = send(
            &app,
            "PATCH",
            "/flow/halls/gift/enter",
            Some("gift_security"),
            Some(scan),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(
            &app,
            "GET",
            "/flow/baskets/validate/B-001",
            Some("basket_delivery_clerk"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["message"], "Basket is valid");

        let (status, body) = send(
            &app,
            "PATCH",
            "/flow/baskets/deliver",
            Some("basket_delivery_clerk"),
            Some(json!({ "national_id": "40123456", "basket": "B-001" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["worker"]["basket_status"], "BASKET_DELIVERED");

        let (status, body) = send(
            &app,
            "PATCH",
            "/flow/gifts/deliver",
            Some("gift_delivery_clerk"),
            Some(json!({ "national_id": "40123456", "gift_ids": [gift_id] })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["message"], "1 gift(s) delivered to Ana Torres");

        let (status, flow) = send(
            &app,
            "GET",
            &format!("/flow/workers/{worker_id}/flow"),
            Some("process_lead"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(flow["summary"]["total_logs"], 5);
        assert_eq!(flow["summary"]["gift_status"], "GIFTS_DELIVERED");

        let (status, counters) = send(&app, "GET", "/counters", Some("admin"), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(counters["hall_2_baskets"], 1);
        assert_eq!(counters["total_gifts"], 1);
    }

    #[tokio::test]
    async fn test_requests_for_different_workers_run_on_separate_connections() {
        let dir = tempfile::tempdir().unwrap();
        let pool: PersistencePool =
            Persistence::pool_with_file(dir.path().join("server.db"), 3).unwrap();
        seed_staff(&pool);
        // Stands in for a long request on a third worker.
        let held: PooledPersistence = pool.get().unwrap();
        let app: Router = build_router(AppState { pool });
        seed_worker(&app, "40123456", None).await;
        seed_worker(&app, "40654321", None).await;

        let ((first, _), (second, _)) = tokio::join!(
            send(
                &app,
                "PATCH",
                "/flow/window/register",
                Some("window_assistant"),
                Some(json!({ "national_id": "40123456" })),
            ),
            send(
                &app,
                "PATCH",
                "/flow/window/register",
                Some("window_assistant"),
                Some(json!({ "national_id": "40654321" })),
            ),
        );

        assert_eq!(first, HttpStatusCode::OK);
        assert_eq!(second, HttpStatusCode::OK);
        let (status, body) = send(
            &app,
            "GET",
            "/flow/baskets/validate/B-404",
            Some("basket_delivery_clerk"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
        drop(held);
    }

    #[tokio::test]
    async fn test_missing_actor_header_returns_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/counters", None, None).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        let error_response: ErrorResponse = serde_json::from_value(body).unwrap();
        assert!(error_response.error);
        assert!(error_response.message.contains(ACTOR_HEADER));
    }

    #[tokio::test]
    async fn test_unknown_actor_returns_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/counters", Some("nobody"), None).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("nobody"));
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden_and_writes_nothing() {
        let app: Router = build_router(create_test_app_state());
        let worker_id = seed_worker(&app, "40123456", None).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/flow/window/register",
            Some("basket_security"),
            Some(json!({ "national_id": "40123456" })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert!(body["message"].as_str().unwrap().contains("Unauthorized"));
        let (_, logs) = send(
            &app,
            "GET",
            &format!("/logs/workers/{worker_id}"),
            Some("process_lead"),
            None,
        )
        .await;
        assert_eq!(logs["logs"].as_array().unwrap().len(), 0);
        let (_, worker) = send(
            &app,
            "GET",
            &format!("/workers/{worker_id}"),
            Some("admin"),
            None,
        )
        .await;
        assert_eq!(worker["basket_status"], "PENDING");
    }

    #[tokio::test]
    async fn test_unknown_national_id_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            "/flow/workers/national-id/99999999",
            Some("window_assistant"),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_hall_before_window_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());
        seed_worker(&app, "40123456", None).await;

        let (status, _) = send(
            &app,
            "PATCH",
            "/flow/halls/basket/enter",
            Some("basket_security"),
            Some(json!({ "national_id": "40123456" })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_basket_code_returns_conflict() {
        let app: Router = build_router(create_test_app_state());
        let code = json!({ "code": "B-001" });

        let (first, _) = send(&app, "POST", "/baskets", Some("admin"), Some(code.clone())).await;
        let (second, body) = send(&app, "POST", "/baskets", Some("admin"), Some(code)).await;

        assert_eq!(first, HttpStatusCode::CREATED);
        assert_eq!(second, HttpStatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().starts_with("Conflict"));
    }

    #[tokio::test]
    async fn test_delete_worker_then_get_returns_not_found() {
        let app: Router = build_router(create_test_app_state());
        let worker_id = seed_worker(&app, "40123456", None).await;
        let uri = format!("/workers/{worker_id}");

        let (deleted, _) = send(&app, "DELETE", &uri, Some("admin"), None).await;
        let (status, _) = send(&app, "GET", &uri, Some("admin"), None).await;

        assert_eq!(deleted, HttpStatusCode::OK);
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }
}
