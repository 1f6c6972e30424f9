//! 面包屑 HTTP 处理器
//!
//! 每个请求按 get → 修改 → put 的方式操作会话中的 trail。

use crate::{
    error::{ApiError, TrailError},
    store::{MemorySessionStore, SessionStore},
    trail::BreadcrumbTrail,
    types::{
        CreateSessionResponse, EntriesResponse, EntryRequest, FindQuery, FindResponse,
        HealthResponse, RemoveTopRequest, SizeResponse, TruncateRequest,
    },
};
use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{delete, get, post},
};
use navtrail_common::config::SessionConfig;
use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 面包屑服务状态
#[derive(Clone)]
pub struct TrailState {
    pub store: Arc<dyn SessionStore>,
    /// 新建 trail 的诊断开关
    pub debug: bool,
    cleanup_interval: u32,
    /// 请求计数器（用于惰性清理触发）
    request_counter: Arc<AtomicU32>,
}

impl TrailState {
    pub fn new<S: SessionStore + 'static>(store: S, debug: bool, cleanup_interval: u32) -> Self {
        Self {
            store: Arc::new(store),
            debug,
            cleanup_interval: cleanup_interval.max(1),
            request_counter: Arc::new(AtomicU32::new(0)),
        }
    }

    /// 惰性清理：每 cleanup_interval 次请求在后台清理一次过期会话
    fn maybe_purge_expired(&self) {
        let count = self.request_counter.fetch_add(1, Ordering::Relaxed);
        if count % self.cleanup_interval != 0 {
            return;
        }

        let store = self.store.clone();
        tokio::spawn(async move {
            let purged = store.purge_expired().await;
            if purged > 0 {
                info!("Lazy cleanup: removed {} expired sessions", purged);
            }
        });
    }

    async fn load(&self, session_id: &str) -> Result<BreadcrumbTrail, ApiError> {
        self.maybe_purge_expired();
        self.store.get(session_id).await.ok_or_else(|| {
            debug!("Unknown session: {}", session_id);
            ApiError::SessionNotFound(session_id.to_string())
        })
    }

    /// Applies `op` to the session's trail under the store's write lock.
    ///
    /// Returns `op`'s value and the resulting size. A rejected operation
    /// leaves the stored trail unchanged.
    async fn update<T, F>(&self, session_id: &str, op: F) -> Result<(T, usize), ApiError>
    where
        T: Send,
        F: FnOnce(&mut BreadcrumbTrail) -> Result<T, TrailError> + Send,
    {
        self.maybe_purge_expired();
        let mut outcome = None;
        self.store
            .update(
                session_id,
                Box::new(|trail: &mut BreadcrumbTrail| {
                    outcome = Some(op(trail).map(|value| (value, trail.len())));
                }),
            )
            .await;

        match outcome {
            Some(Ok(done)) => Ok(done),
            Some(Err(e)) => {
                warn!("Trail operation rejected for session {}: {}", session_id, e);
                Err(e.into())
            }
            None => {
                debug!("Unknown session: {}", session_id);
                Err(ApiError::SessionNotFound(session_id.to_string()))
            }
        }
    }
}

/// 从会话配置创建使用内存存储的 TrailState
pub fn create_trail_state(config: &SessionConfig) -> TrailState {
    info!(
        "Initializing trail state (idle_timeout_secs={}, debug={})",
        config.idle_timeout_secs, config.debug
    );
    TrailState::new(
        MemorySessionStore::new(config.idle_timeout()),
        config.debug,
        config.cleanup_interval,
    )
}

/// 创建面包屑服务的路由
pub fn create_router(state: TrailState) -> Router {
    Router::new()
        .route("/", post(create_session_handler))
        .route("/health", get(health_check_handler))
        .route("/{session_id}", delete(delete_session_handler))
        .route(
            "/{session_id}/trail",
            get(render_all_handler).delete(remove_all_handler),
        )
        .route(
            "/{session_id}/trail/entries",
            get(list_entries_handler).post(append_handler),
        )
        .route(
            "/{session_id}/trail/entries/{index}",
            get(render_entry_handler)
                .put(replace_handler)
                .delete(remove_at_handler),
        )
        .route("/{session_id}/trail/visit", post(visit_handler))
        .route("/{session_id}/trail/remove-last", post(remove_last_handler))
        .route("/{session_id}/trail/truncate", post(truncate_handler))
        .route("/{session_id}/trail/remove-top", post(remove_top_handler))
        .route("/{session_id}/trail/find", get(find_handler))
        .with_state(state)
}

async fn create_session_handler(
    State(state): State<TrailState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = Uuid::new_v4().to_string();
    state
        .store
        .put(&session_id, BreadcrumbTrail::new(state.debug))
        .await;
    info!("Created session {}", session_id);
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
}

async fn delete_session_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&session_id).await {
        info!("Discarded session {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(session_id))
    }
}

async fn health_check_handler(State(state): State<TrailState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        sessions: state.store.len().await,
    })
}

async fn render_all_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let trail = state.load(&session_id).await?;
    Ok(Html(trail.render_all()))
}

async fn remove_all_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
) -> Result<Json<SizeResponse>, ApiError> {
    let ((), size) = state
        .update(&session_id, |trail| {
            trail.remove_all();
            Ok(())
        })
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn list_entries_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
) -> Result<Json<EntriesResponse>, ApiError> {
    let trail = state.load(&session_id).await?;
    Ok(Json(EntriesResponse {
        size: trail.size(),
        entries: trail.entries().to_vec(),
    }))
}

async fn append_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let ((), size) = state
        .update(&session_id, |trail| {
            trail.append(request.label, request.link, request.display);
            Ok(())
        })
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn render_entry_handler(
    State(state): State<TrailState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Result<Html<String>, ApiError> {
    let trail = state.load(&session_id).await?;
    Ok(Html(trail.render_entry(index)?))
}

async fn replace_handler(
    State(state): State<TrailState>,
    Path((session_id, index)): Path<(String, usize)>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let (_, size) = state
        .update(&session_id, |trail| {
            trail.replace_at(request.label, request.link, request.display, index)
        })
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn remove_at_handler(
    State(state): State<TrailState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Result<Json<SizeResponse>, ApiError> {
    let (_, size) = state
        .update(&session_id, |trail| trail.remove_at(index))
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn visit_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let (size, _) = state
        .update(&session_id, |trail| {
            Ok(trail.visit(request.label, request.link, request.display))
        })
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn remove_last_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
) -> Result<Json<SizeResponse>, ApiError> {
    let (_, size) = state
        .update(&session_id, |trail| Ok(trail.remove_last()))
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn truncate_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
    Json(request): Json<TruncateRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let ((), size) = state
        .update(&session_id, |trail| trail.truncate_from(request.index))
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn remove_top_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
    Json(request): Json<RemoveTopRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let ((), size) = state
        .update(&session_id, |trail| trail.remove_top_n(request.count))
        .await?;
    Ok(Json(SizeResponse { size }))
}

async fn find_handler(
    State(state): State<TrailState>,
    Path(session_id): Path<String>,
    Query(query): Query<FindQuery>,
) -> Result<Json<FindResponse>, ApiError> {
    let trail = state.load(&session_id).await?;
    Ok(Json(FindResponse {
        index: trail.find_index_or_sentinel(&query.label),
    }))
}
