pub mod middleware;
pub mod routes;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use self::middleware::auth;
use self::routes::{admin, health, landmarks, notifications, profile, saved, signup};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/dashboard", get(admin::dashboard_handler))
        .route("/api/admin/landmarks", post(admin::create_landmark_handler))
        .route(
            "/api/admin/landmarks/:landmark_id",
            put(admin::update_landmark_handler).delete(admin::delete_landmark_handler),
        )
        .route(
            "/api/admin/landmarks/:landmark_id/status",
            patch(admin::set_status_handler),
        )
        .route("/api/admin/broadcast", post(admin::broadcast_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    let protected_routes = Router::new()
        .route("/api/home", get(landmarks::home_handler))
        .route(
            "/api/categories/:category_id/landmarks",
            get(landmarks::category_list_handler),
        )
        .route("/api/search", get(landmarks::search_handler))
        .route("/api/map", get(landmarks::map_handler))
        .route("/api/landmarks/:landmark_id", get(landmarks::detail_handler))
        .route(
            "/api/landmarks/:landmark_id/bookmark",
            post(landmarks::toggle_bookmark_handler),
        )
        .route("/api/saved", get(saved::saved_handler))
        .route("/api/saved/:landmark_id", delete(saved::remove_saved_handler))
        .route(
            "/api/notifications",
            get(notifications::notifications_handler).delete(notifications::delete_all_handler),
        )
        .route(
            "/api/notifications/unread-count",
            get(notifications::unread_count_handler),
        )
        .route(
            "/api/notifications/read-all",
            post(notifications::mark_all_read_handler),
        )
        .route(
            "/api/notifications/:notification_id",
            delete(notifications::delete_handler),
        )
        .route(
            "/api/notifications/:notification_id/read",
            post(notifications::mark_read_handler),
        )
        .route(
            "/api/profile",
            get(profile::profile_handler).put(profile::save_profile_handler),
        )
        .merge(admin_routes)
        .route_layer(axum_middleware::from_fn(auth::require_auth));

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/categories", get(landmarks::categories_handler))
        .route("/api/signup", post(signup::start_handler))
        .route("/api/signup/resend", post(signup::resend_handler))
        .route("/api/signup/verify", post(signup::verify_handler))
        .merge(protected_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
