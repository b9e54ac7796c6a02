use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, Json, TodoErrorResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Query, State};
use axum::response::ErrorResponse;
use axum::routing::post;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(
    paths(create_todo, read_todos, update_todo, delete_todos),
    components(schemas(
        dto::TodoItem,
        dto::CreateTodoRequest,
        dto::CreateTodoResponse,
        dto::UpdateTodoRequest,
        dto::UpdateTodoResponse,
        dto::ReadTodoResponse,
        dto::DeleteTodoRequest,
        dto::DeleteTodoResponse,
        BasicErrorResponse,
    ))
)]
/// Defines the OpenAPI documentation for the TODO API
pub struct TodoApi;
/// Constant used to group TODO endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "TODO";

/// Adds the "/todos" resource to the application router, dispatching on HTTP method
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new().route(
        "/todos",
        post(
            |State(app_state): AppState, Json(new_todo): Json<dto::CreateTodoRequest>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                create_todo(new_todo, &mut ext_cxn, &todo_service).await
            },
        )
        .get(
            |State(app_state): AppState, query: Option<Query<HashMap<String, String>>>| async move {
                let params = query.map(|Query(params)| params).unwrap_or_default();
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                read_todos(dto::ReadTodoRequest::from(&params), &mut ext_cxn, &todo_service).await
            },
        )
        .put(
            |State(app_state): AppState, Json(update): Json<dto::UpdateTodoRequest>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                update_todo(update, &mut ext_cxn, &todo_service).await
            },
        )
        .delete(
            |State(app_state): AppState, Json(to_delete): Json<dto::DeleteTodoRequest>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                delete_todos(to_delete, &mut ext_cxn, &todo_service).await
            },
        ),
    )
}

/// Logs a failed service call at a level matching how surprising the failure is
fn log_failure(action: &str, err: &TodoError) {
    match err {
        TodoError::PortError(cause) => error!("Failed to {action}: {cause:#}"),
        _ => info!("Could not {action}: {err}"),
    }
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::CreateTodoRequest,
    responses(
        (status = 200, description = "TODO item was created", body = dto::CreateTodoResponse),
        (status = 400, description = "Subject was empty or the body was not valid JSON"),
        (status = 500, description = "The store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Creates a TODO item
async fn create_todo(
    new_todo: dto::CreateTodoRequest,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::CreateTodoResponse>, ErrorResponse> {
    info!("Creating TODO item: {new_todo}");
    new_todo
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let domain_todo = domain::todo::NewTodo::from(new_todo);
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let create_result = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await;
    match create_result {
        Ok(todo) => Ok(Json(dto::CreateTodoResponse { todo: todo.into() })),
        Err(todo_err) => {
            log_failure("create a TODO item", &todo_err);
            Err(TodoErrorResponse::from(todo_err).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    params(
        ("prev_id" = Option<i64>, Query, description = "Only list items older than this ID. 0 or unparsable lists from the newest item."),
        ("size" = Option<i64>, Query, description = "Maximum number of items to return. Defaults to 5."),
    ),
    responses(
        (status = 200, description = "Newest-first page of TODO items", body = dto::ReadTodoResponse),
        (status = 500, description = "The store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Lists TODO items newest-first, paging backwards from an optional cursor
async fn read_todos(
    page: dto::ReadTodoRequest,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::ReadTodoResponse>, ErrorResponse> {
    info!(
        "Reading up to {} TODO items before ID {}",
        page.size, page.prev_id
    );
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

    let read_result = todo_service
        .read_todos(page.prev_id, page.size, &mut *ext_cxn, &todo_reader)
        .await;
    match read_result {
        Ok(todos) => Ok(Json(dto::ReadTodoResponse {
            todos: todos.into_iter().map(dto::TodoItem::from).collect(),
        })),
        Err(todo_err) => {
            log_failure("read TODO items", &todo_err);
            Err(TodoErrorResponse::from(todo_err).into())
        }
    }
}

#[utoipa::path(
    put,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::UpdateTodoRequest,
    responses(
        (status = 200, description = "TODO item was updated", body = dto::UpdateTodoResponse),
        (status = 400, description = "ID was missing, subject was empty or the body was not valid JSON"),
        (status = 404, description = "No TODO item has the given ID", body = BasicErrorResponse),
        (status = 500, description = "The store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Replaces the subject and description of a TODO item
async fn update_todo(
    update: dto::UpdateTodoRequest,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::UpdateTodoResponse>, ErrorResponse> {
    info!("Updating TODO item {}", update.id);
    update.validate().map_err(ValidationErrorResponse::from)?;

    let todo_id = update.id;
    let domain_update = domain::todo::UpdateTodo::from(update);
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let update_result = todo_service
        .update_todo(
            todo_id,
            &domain_update,
            &mut *ext_cxn,
            &todo_reader,
            &todo_writer,
        )
        .await;
    match update_result {
        Ok(todo) => Ok(Json(dto::UpdateTodoResponse { todo: todo.into() })),
        Err(todo_err) => {
            log_failure("update a TODO item", &todo_err);
            Err(TodoErrorResponse::from(todo_err).into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::DeleteTodoRequest,
    responses(
        (status = 200, description = "TODO items were removed", body = dto::DeleteTodoResponse),
        (status = 400, description = "The body was not valid JSON"),
        (status = 404, description = "None of the given IDs exist", body = BasicErrorResponse),
        (status = 500, description = "The store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Deletes every TODO item whose ID is listed
async fn delete_todos(
    to_delete: dto::DeleteTodoRequest,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::DeleteTodoResponse>, ErrorResponse> {
    info!("Deleting TODO items {:?}", to_delete.ids);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let delete_result = todo_service
        .delete_todos(&to_delete.ids, &mut *ext_cxn, &todo_writer)
        .await;
    match delete_result {
        Ok(()) => Ok(Json(dto::DeleteTodoResponse {})),
        Err(todo_err) => {
            log_failure("delete TODO items", &todo_err);
            Err(TodoErrorResponse::from(todo_err).into())
        }
    }
}
