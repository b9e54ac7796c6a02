use crate::domain;
use crate::domain::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, query, query_as};

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i64,
    subject: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TodoRow> for domain::todo::TodoItem {
    fn from(value: TodoRow) -> Self {
        TodoItem {
            id: value.id,
            subject: value.subject,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn recent_todos(
        &self,
        before_id: Option<i64>,
        size: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let rows = match before_id {
            None => {
                query_as::<_, TodoRow>(
                    "SELECT id, subject, description, created_at, updated_at FROM todos ORDER BY id DESC LIMIT ?",
                )
                .bind(size)
                .fetch_all(cxn.borrow_connection())
                .await
            }
            Some(before_id) => {
                query_as::<_, TodoRow>(
                    "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id < ? ORDER BY id DESC LIMIT ?",
                )
                .bind(before_id)
                .bind(size)
                .fetch_all(cxn.borrow_connection())
                .await
            }
        }
        .context("trying to fetch a page of todo items")?;

        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    async fn todo_by_id(
        &self,
        id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo_item = query_as::<_, TodoRow>(
            "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo item by ID")?
        .map(TodoItem::from);

        Ok(todo_item)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let insert_result = query("INSERT INTO todos(subject, description) VALUES (?, ?)")
            .bind(&new_todo.subject)
            .bind(&new_todo.description)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to insert a new todo item into the database")?;

        Ok(insert_result.last_insert_rowid())
    }

    async fn update_todo(
        &self,
        id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<u64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let update_result = query("UPDATE todos SET subject = ?, description = ? WHERE id = ?")
            .bind(&update.subject)
            .bind(&update.description)
            .bind(id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a todo item in the database")?;

        Ok(update_result.rows_affected())
    }

    async fn delete_todos(
        &self,
        ids: &[i64],
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<u64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // One bound placeholder per ID
        let mut delete_query = QueryBuilder::<Sqlite>::new("DELETE FROM todos WHERE id IN (");
        let mut id_list = delete_query.separated(", ");
        for id in ids {
            id_list.push_bind(*id);
        }
        id_list.push_unseparated(")");

        let delete_result = delete_query
            .build()
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove todo items from the database")?;

        Ok(delete_result.rows_affected())
    }
}
