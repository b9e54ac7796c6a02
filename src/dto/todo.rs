use crate::domain;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

/// Page size used when the `size` query parameter is absent or unusable
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// DTO for a TODO item returned on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = "Buy groceries")]
    pub subject: String,
    #[schema(example = "Milk, eggs and bread")]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            subject: value.subject,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO for creating a TODO item via the API
#[derive(Deserialize, Display, Validate, ToSchema)]
#[display("{subject}")]
#[cfg_attr(test, derive(Serialize))]
pub struct CreateTodoRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "Buy groceries")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "Milk, eggs and bread")]
    pub description: String,
}

impl From<CreateTodoRequest> for domain::todo::NewTodo {
    fn from(value: CreateTodoRequest) -> Self {
        domain::todo::NewTodo {
            subject: value.subject,
            description: value.description,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct CreateTodoResponse {
    pub todo: TodoItem,
}

/// DTO for replacing the content of an existing TODO item. A missing `id` reads as 0,
/// which fails validation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTodoRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    #[schema(example = 3)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 1))]
    #[schema(example = "Buy groceries")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "Oat milk instead")]
    pub description: String,
}

impl From<UpdateTodoRequest> for domain::todo::UpdateTodo {
    fn from(value: UpdateTodoRequest) -> Self {
        domain::todo::UpdateTodo {
            subject: value.subject,
            description: value.description,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct UpdateTodoResponse {
    pub todo: TodoItem,
}

/// Paging parameters for listing TODO items, taken from the query string
#[derive(Debug, PartialEq, Eq)]
pub struct ReadTodoRequest {
    pub prev_id: i64,
    pub size: i64,
}

impl From<&HashMap<String, String>> for ReadTodoRequest {
    /// Anything missing or unparsable falls back to the defaults instead of failing the request
    fn from(params: &HashMap<String, String>) -> Self {
        let prev_id = params
            .get("prev_id")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let size = params
            .get("size")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|size| *size >= 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        ReadTodoRequest { prev_id, size }
    }
}

#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct ReadTodoResponse {
    pub todos: Vec<TodoItem>,
}

/// DTO for removing a set of TODO items
#[derive(Debug, Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct DeleteTodoRequest {
    #[serde(default)]
    #[schema(example = json!([1, 2, 3]))]
    pub ids: Vec<i64>,
}

/// Serializes as an empty JSON object
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct DeleteTodoResponse {}
