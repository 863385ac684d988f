//! Book model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::copy::Copy;
use super::genre::Genre;
use super::language::Language;

/// ISBN-13: thirteen digits, no separators
static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{13}$").unwrap());

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub author_id: Option<i32>,
}

/// Book with author, genres, language and copies for the detail view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub language: Option<Language>,
    pub copies: Vec<Copy>,
}

impl BookDetails {
    /// Genre display string: first three genre names, comma separated
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(3)
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Brief description of the book
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: String,
    #[validate(regex(path = *ISBN_RE, message = "ISBN must be 13 digits"))]
    pub isbn: String,
    pub author_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    pub language_id: Option<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(regex(path = *ISBN_RE, message = "ISBN must be 13 digits"))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    /// When present, replaces the book's genre set
    pub genre_ids: Option<Vec<i32>>,
    pub language_id: Option<i32>,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Search by title (case- and accent-insensitive)
    pub title: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_with_genres(names: &[&str]) -> BookDetails {
        BookDetails {
            id: 1,
            title: "Test".to_string(),
            summary: String::new(),
            isbn: "9780000000000".to_string(),
            author: None,
            genres: names
                .iter()
                .enumerate()
                .map(|(i, n)| Genre { id: i as i32 + 1, name: n.to_string() })
                .collect(),
            language: None,
            copies: Vec::new(),
        }
    }

    #[test]
    fn display_genre_joins_first_three() {
        let details = details_with_genres(&["Fantasy", "Poetry", "History", "Drama"]);
        assert_eq!(details.display_genre(), "Fantasy, Poetry, History");
    }

    #[test]
    fn display_genre_empty_for_no_genres() {
        let details = details_with_genres(&[]);
        assert_eq!(details.display_genre(), "");
    }

    #[test]
    fn isbn_must_be_thirteen_digits() {
        let mut book = CreateBook {
            title: "T".to_string(),
            summary: String::new(),
            isbn: "9780306406157".to_string(),
            author_id: None,
            genre_ids: Vec::new(),
            language_id: None,
        };
        assert!(book.validate().is_ok());

        book.isbn = "978-030640615".to_string();
        assert!(book.validate().is_err());

        book.isbn = "97803064061".to_string();
        assert!(book.validate().is_err());
    }
}
