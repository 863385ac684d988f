//! Books repository for database operations

use sqlx::{Pool, Postgres};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
    error::{AppError, AppResult},
    models::author::Author,
    models::book::{Book, BookDetails, BookQuery, BookShort, CreateBook, UpdateBook},
    models::copy::Copy,
    models::genre::Genre,
    models::language::Language,
};

/// Lowercased, accent-stripped form used for title search
pub(crate) fn normalize_title(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book with author, genres, language and copies
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
                    .bind(author_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let language = match book.language_id {
            Some(language_id) => {
                sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
                    .bind(language_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let copies = sqlx::query_as::<_, Copy>(
            "SELECT * FROM copies WHERE book_id = $1 ORDER BY due_back",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookDetails {
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            genres,
            language,
            copies,
        })
    }

    /// List books with optional title search and pagination
    pub async fn list(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let (books, total) = if let Some(ref title) = query.title {
            let pattern = format!("%{}%", normalize_title(title));

            let books = sqlx::query_as::<_, BookShort>(
                r#"
                SELECT id, title, isbn, author_id FROM books
                WHERE title_norm LIKE $1
                ORDER BY title
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(&pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            let total: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title_norm LIKE $1")
                    .bind(&pattern)
                    .fetch_one(&self.pool)
                    .await?;

            (books, total)
        } else {
            let books = sqlx::query_as::<_, BookShort>(
                "SELECT id, title, isbn, author_id FROM books ORDER BY title LIMIT $1 OFFSET $2",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
                .fetch_one(&self.pool)
                .await?;

            (books, total)
        };

        Ok((books, total))
    }

    /// Create a new book and its genre links
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, title_norm, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(normalize_title(&book.title))
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(row.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Update an existing book; a present genre_ids replaces the genre set
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let title_norm = book.title.as_deref().map(normalize_title);

        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                title_norm = COALESCE($2, title_norm),
                summary = COALESCE($3, summary),
                isbn = COALESCE($4, isbn),
                author_id = COALESCE($5, author_id),
                language_id = COALESCE($6, language_id)
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(title_norm)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref genre_ids) = book.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a book. Copies keep their rows: copies.book_id is cleared by
    /// the ON DELETE SET NULL constraint, never cascaded.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_title;

    #[test]
    fn normalization_strips_case_and_accents() {
        assert_eq!(normalize_title("Le Père Goriot"), "le pere goriot");
        assert_eq!(normalize_title("WAR AND PEACE"), "war and peace");
    }
}
