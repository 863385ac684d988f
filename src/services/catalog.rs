//! Catalog management service: authors, books, genres, languages, copies

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDetails, CreateAuthor, UpdateAuthor},
    models::book::{Book, BookDetails, BookQuery, BookShort, CreateBook, UpdateBook},
    models::copy::{Copy, CreateCopy, UpdateCopy},
    models::genre::{CreateGenre, Genre},
    models::language::{CreateLanguage, Language},
    repository::Repository,
};

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Validation(e.to_string())
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- Authors ---

    pub async fn list_authors(&self, page: i64, per_page: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(page.max(1), per_page.clamp(1, 100)).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.books_by_author(id).await?;
        Ok(AuthorDetails { author, books })
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author; their books survive with the reference cleared
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // --- Books ---

    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate().map_err(validation_error)?;

        // Referenced rows must exist; the FK errors would otherwise surface
        // as opaque 500s
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = book.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        for genre_id in &book.genre_ids {
            self.repository.genres.get_by_id(*genre_id).await?;
        }

        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate().map_err(validation_error)?;

        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = book.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        if let Some(ref genre_ids) = book.genre_ids {
            for genre_id in genre_ids {
                self.repository.genres.get_by_id(*genre_id).await?;
            }
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book; its copies survive with the reference cleared
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // --- Genres / Languages ---

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        self.repository.genres.create(&genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    pub async fn create_language(&self, language: CreateLanguage) -> AppResult<Language> {
        self.repository.languages.create(&language).await
    }

    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }

    // --- Copies ---

    pub async fn list_copies(&self, book_id: i32) -> AppResult<Vec<Copy>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.copies.list_for_book(book_id).await
    }

    pub async fn create_copy(&self, book_id: i32, copy: CreateCopy) -> AppResult<Copy> {
        self.repository.books.get_by_id(book_id).await?;
        if let Some(borrower_id) = copy.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.copies.create(book_id, &copy).await
    }

    pub async fn get_copy(&self, id: Uuid) -> AppResult<Copy> {
        self.repository.copies.get_by_id(id).await
    }

    pub async fn update_copy(&self, id: Uuid, copy: UpdateCopy) -> AppResult<Copy> {
        if let Some(borrower_id) = copy.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.copies.update(id, &copy).await
    }

    pub async fn delete_copy(&self, id: Uuid) -> AppResult<()> {
        self.repository.copies.delete(id).await
    }
}
