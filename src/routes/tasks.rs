use crate::{
    auth::CurrentUser,
    error::AppError,
    models::task::{CreateTaskRequest, UpdateTaskRequest},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Retrieves the authenticated user's tasks, most recently created first.
#[get("")]
pub async fn get_tasks(
    service: web::Data<TaskService>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = service.get_tasks(user.user_id()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "tasks": tasks,
    })))
}

/// Completion statistics for the authenticated user's tasks.
#[get("/count")]
pub async fn get_task_count(
    service: web::Data<TaskService>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task_count = service.get_task_count(user.user_id()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "task_count": task_count,
    })))
}

/// Creates a task owned by the authenticated user.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    data: web::Json<CreateTaskRequest>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service.create_task(&data.content, user.user_id()).await?;

    Ok(HttpResponse::Created().json(json!({
        "status": "ok",
        "data": task,
    })))
}

/// Updates a task's content. The ownership gate runs before the write.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    data: web::Json<UpdateTaskRequest>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .update_task(task_id.into_inner(), &data.content, user.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": task,
    })))
}

/// Soft-deletes a task. The id is unusable afterwards.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .delete_task(task_id.into_inner(), user.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": task,
    })))
}

/// Marks a task complete. Completing an already-complete task is not an error.
#[post("/{id}/complete")]
pub async fn complete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .complete_task(task_id.into_inner(), user.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": task,
    })))
}

/// Marks a task incomplete.
#[post("/{id}/uncomplete")]
pub async fn uncomplete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .uncomplete_task(task_id.into_inner(), user.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": task,
    })))
}
