//! Copies repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::copy::{Copy, CopyStatus, CopyWithBook, CreateCopy, UpdateCopy},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Copy> {
        sqlx::query_as::<_, Copy>("SELECT * FROM copies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// List copies of a book, ordered by due date
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Copy>> {
        let rows = sqlx::query_as::<_, Copy>(
            "SELECT * FROM copies WHERE book_id = $1 ORDER BY due_back",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new copy of a book with a fresh collision-resistant id
    pub async fn create(&self, book_id: i32, copy: &CreateCopy) -> AppResult<Copy> {
        let row = sqlx::query_as::<_, Copy>(
            r#"
            INSERT INTO copies (id, book_id, imprint, due_back, borrower_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(book_id)
        .bind(&copy.imprint)
        .bind(copy.due_back)
        .bind(copy.borrower_id)
        .bind(copy.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Administrative update, written directly to the stored record.
    /// due_back and borrower_id are written as given so an edit can clear
    /// them when a copy comes back.
    pub async fn update(&self, id: Uuid, copy: &UpdateCopy) -> AppResult<Copy> {
        let row = sqlx::query_as::<_, Copy>(
            r#"
            UPDATE copies
            SET imprint = COALESCE($1, imprint),
                due_back = $2,
                borrower_id = $3,
                status = COALESCE($4, status)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&copy.imprint)
        .bind(copy.due_back)
        .bind(copy.borrower_id)
        .bind(copy.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))?;

        Ok(row)
    }

    /// Delete a copy
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }
        Ok(())
    }

    /// Overwrite the due date of a copy. Status is untouched.
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<Copy> {
        sqlx::query_as::<_, Copy>(
            "UPDATE copies SET due_back = $1 WHERE id = $2 RETURNING *",
        )
        .bind(due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))
    }

    /// Copies on loan to one borrower, ordered by due date
    pub async fn by_borrower(&self, borrower_id: i32) -> AppResult<Vec<CopyWithBook>> {
        let rows = sqlx::query_as::<_, CopyWithBook>(
            r#"
            SELECT c.id, c.book_id, b.title as book_title, c.imprint,
                   c.due_back, c.borrower_id, c.status
            FROM copies c
            LEFT JOIN books b ON c.book_id = b.id
            WHERE c.borrower_id = $1 AND c.status = $2
            ORDER BY c.due_back
            "#,
        )
        .bind(borrower_id)
        .bind(CopyStatus::OnLoan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All copies on loan, ordered by due date
    pub async fn on_loan(&self) -> AppResult<Vec<CopyWithBook>> {
        let rows = sqlx::query_as::<_, CopyWithBook>(
            r#"
            SELECT c.id, c.book_id, b.title as book_title, c.imprint,
                   c.due_back, c.borrower_id, c.status
            FROM copies c
            LEFT JOIN books b ON c.book_id = b.id
            WHERE c.status = $1
            ORDER BY c.due_back
            "#,
        )
        .bind(CopyStatus::OnLoan)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies currently available
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies WHERE status = $1")
            .bind(CopyStatus::Available)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
