pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::qna::handlers as qna;
use crate::recommendations::handlers as recommendations;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::timeline::handlers as timeline;

pub fn build_router(state: AppState) -> Router {
    // Allow a little envelope overhead above the raw file limit; the
    // handler enforces the exact byte cap.
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes + 64 * 1024);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resume::handle_upload_resume))
        .route("/api/v1/resumes", get(resume::handle_list_resumes))
        .route("/api/v1/resumes/:id", get(resume::handle_get_resume))
        .route("/api/v1/resumes/:id", delete(resume::handle_delete_resume))
        // Timeline API
        .route("/api/v1/milestones", get(timeline::handle_list_milestones))
        .route("/api/v1/milestones", post(timeline::handle_create_milestone))
        .route("/api/v1/milestones/:id", put(timeline::handle_update_milestone))
        .route(
            "/api/v1/milestones/:id",
            delete(timeline::handle_delete_milestone),
        )
        .route(
            "/api/v1/timeline/analytics",
            get(timeline::handle_timeline_analytics),
        )
        // Recommendations API
        .route(
            "/api/v1/recommendations/jobs",
            get(recommendations::handle_job_recommendations),
        )
        .route(
            "/api/v1/recommendations/courses",
            get(recommendations::handle_course_recommendations),
        )
        .route(
            "/api/v1/recommendations/refresh",
            post(recommendations::handle_refresh_recommendations),
        )
        .route(
            "/api/v1/recommendations/:id/save",
            post(recommendations::handle_toggle_save),
        )
        .route(
            "/api/v1/recommendations/:id/applied",
            post(recommendations::handle_mark_applied),
        )
        .route(
            "/api/v1/recommendations/stats",
            get(recommendations::handle_recommendation_stats),
        )
        // Q&A API
        .route("/api/v1/qna/ask", post(qna::handle_ask))
        .route("/api/v1/qna/history", get(qna::handle_history))
        .route("/api/v1/qna/:id/rate", post(qna::handle_rate))
        .layer(body_limit)
        .with_state(state)
}
