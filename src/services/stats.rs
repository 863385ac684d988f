//! Statistics service for the dashboard summary

use crate::{api::dashboard::CatalogCounts, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Headline counts for the dashboard
    pub async fn catalog_counts(&self) -> AppResult<CatalogCounts> {
        let num_books = self.repository.books.count().await?;
        let num_copies = self.repository.copies.count().await?;
        let num_copies_available = self.repository.copies.count_available().await?;
        let num_authors = self.repository.authors.count().await?;

        Ok(CatalogCounts {
            num_books,
            num_copies,
            num_copies_available,
            num_authors,
        })
    }
}
