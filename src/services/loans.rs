//! Loan management service: renewal validation and loan listings

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::copy::{Copy, CopyWithBook},
    repository::Repository,
};

/// Renewals may push the due date at most four weeks out
const MAX_RENEWAL_DAYS: i64 = 28;

/// Suggested renewal period offered to callers (not enforced)
const DEFAULT_RENEWAL_DAYS: i64 = 21;

/// Validate a proposed new due-back date against today.
///
/// Accepts any date in the inclusive window [today, today + 4 weeks] and
/// returns it unchanged. Pure function of its arguments.
pub fn validate_renewal_date(proposed: NaiveDate, today: NaiveDate) -> AppResult<NaiveDate> {
    if proposed < today {
        return Err(AppError::InvalidDate(
            "Invalid date - renewal in past".to_string(),
        ));
    }
    if proposed > today + Duration::days(MAX_RENEWAL_DAYS) {
        return Err(AppError::InvalidDate(
            "Invalid date - renewal more than 4 weeks ahead".to_string(),
        ));
    }
    Ok(proposed)
}

/// Default proposed renewal date: three weeks from today
pub fn proposed_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_RENEWAL_DAYS)
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to the given user, soonest due first
    pub async fn my_loans(&self, user_id: i32) -> AppResult<Vec<CopyWithBook>> {
        self.repository.copies.by_borrower(user_id).await
    }

    /// All copies on loan, soonest due first
    pub async fn all_loans(&self) -> AppResult<Vec<CopyWithBook>> {
        self.repository.copies.on_loan().await
    }

    /// Extend a copy's due date. Validates the proposed date, then
    /// overwrites due_back; the copy's status is untouched.
    pub async fn renew_copy(&self, copy_id: Uuid, proposed: NaiveDate) -> AppResult<Copy> {
        // 404 before validation so a bad date on a missing copy reports NotFound
        self.repository.copies.get_by_id(copy_id).await?;

        let today = Utc::now().date_naive();
        let renewal_date = validate_renewal_date(proposed, today)?;

        self.repository.copies.set_due_back(copy_id, renewal_date).await
    }

    /// The suggested renewal date for the renewal form
    pub async fn renewal_proposal(&self, copy_id: Uuid) -> AppResult<NaiveDate> {
        self.repository.copies.get_by_id(copy_id).await?;
        Ok(proposed_renewal_date(Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_date_in_past() {
        let today = date(2024, 1, 1);
        let err = validate_renewal_date(date(2023, 12, 31), today).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn rejects_date_more_than_four_weeks_ahead() {
        let today = date(2024, 1, 1);
        let err = validate_renewal_date(date(2024, 1, 30), today).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn accepts_today() {
        let today = date(2024, 1, 1);
        assert_eq!(validate_renewal_date(today, today).unwrap(), today);
    }

    #[test]
    fn accepts_exactly_four_weeks_ahead() {
        let today = date(2024, 1, 1);
        let limit = date(2024, 1, 29);
        assert_eq!(validate_renewal_date(limit, today).unwrap(), limit);
    }

    #[test]
    fn accepts_dates_inside_the_window_unchanged() {
        let today = date(2024, 1, 1);
        for offset in 0..=28 {
            let proposed = today + Duration::days(offset);
            assert_eq!(validate_renewal_date(proposed, today).unwrap(), proposed);
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let today = date(2024, 1, 1);
        let proposed = date(2024, 1, 15);
        let first = validate_renewal_date(proposed, today).unwrap();
        let second = validate_renewal_date(first, today).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn proposal_is_three_weeks_out() {
        assert_eq!(proposed_renewal_date(date(2024, 1, 1)), date(2024, 1, 22));
    }
}
