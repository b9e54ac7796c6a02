use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use tracing::error;

/// A TODO item as it exists in the store
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoItem {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub subject: String,
    pub description: String,
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct UpdateTodo {
    pub subject: String,
    pub description: String,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader: Sync {
        /// Fetches up to [size] items newest-first. When [before_id] is set, only items with
        /// a smaller ID are considered.
        async fn recent_todos(
            &self,
            before_id: Option<i64>,
            size: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;

        async fn todo_by_id(
            &self,
            id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter: Sync {
        /// Inserts a new item and returns its generated ID
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i64, anyhow::Error>;

        /// Returns the number of rows that were changed
        async fn update_todo(
            &self,
            id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<u64, anyhow::Error>;

        /// Returns the number of rows that were removed
        async fn delete_todos(
            &self,
            ids: &[i64],
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<u64, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("A TODO item must have a non-empty subject.")]
        EmptySubject,
        #[error("The requested TODO item does not exist.")]
        NotFound,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;
        async fn read_todos(
            &self,
            prev_id: i64,
            size: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, TodoError>;
        async fn update_todo(
            &self,
            id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;
        async fn delete_todos(
            &self,
            ids: &[i64],
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), TodoError>;
    }
}

pub struct TodoService {}

impl TodoService {
    /// Reads back a row that was just written so the caller sees store-computed fields
    async fn reread(
        id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<TodoItem, TodoError> {
        let todo = todo_read
            .todo_by_id(id, &mut *ext_cxn)
            .await
            .context("re-reading a written TODO item")?;

        todo.ok_or_else(|| {
            error!("TODO item {id} disappeared right after being written");
            TodoError::PortError(anyhow!("TODO item {id} could not be read back"))
        })
    }
}

impl driving_ports::TodoPort for TodoService {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        if new_todo.subject.is_empty() {
            return Err(TodoError::EmptySubject);
        }

        let new_id = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a TODO item")?;

        Self::reread(new_id, &mut *ext_cxn, todo_read).await
    }

    async fn read_todos(
        &self,
        prev_id: i64,
        size: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, TodoError> {
        let before_id = (prev_id != 0).then_some(prev_id);
        let todos = todo_read
            .recent_todos(before_id, size, &mut *ext_cxn)
            .await
            .context("reading TODO items")?;

        Ok(todos)
    }

    async fn update_todo(
        &self,
        id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        if update.subject.is_empty() {
            return Err(TodoError::EmptySubject);
        }

        let updated_rows = todo_write
            .update_todo(id, update, &mut *ext_cxn)
            .await
            .context("updating a TODO item")?;
        if updated_rows == 0 {
            return Err(TodoError::NotFound);
        }

        Self::reread(id, &mut *ext_cxn, todo_read).await
    }

    async fn delete_todos(
        &self,
        ids: &[i64],
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), TodoError> {
        if ids.is_empty() {
            return Ok(());
        }

        let deleted_rows = todo_write
            .delete_todos(ids, &mut *ext_cxn)
            .await
            .context("deleting TODO items")?;
        if deleted_rows == 0 {
            return Err(TodoError::NotFound);
        }

        Ok(())
    }
}
