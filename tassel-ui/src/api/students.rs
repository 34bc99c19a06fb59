//! Student profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use tassel_common::db::students;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<i64>,
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let students = students::list_students(&state.db).await?;

    Ok(Json(json!({ "students": students, "count": students.len() })))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(user_id), Some(name)) = (
        req.user_id.filter(|v| !v.is_empty()),
        req.name.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::Validation("user_id and name are required".to_string()));
    };

    let student = students::create_student(
        &state.db,
        &user_id,
        &name,
        req.email.as_deref(),
        req.major.as_deref(),
        req.year,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "student": student }))))
}

/// GET /api/students/:user_id
pub async fn get_student(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let student = students::get_student(&state.db, &user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(Json(json!({ "student": student })))
}

/// Build student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/api/students", get(list_students).post(create_student))
        .route("/api/students/:user_id", get(get_student))
}
