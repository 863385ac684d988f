//! Copy model: a single loanable instance of a book

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a copy (stored as a one-character code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CopyStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl CopyStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            CopyStatus::Maintenance => "m",
            CopyStatus::OnLoan => "o",
            CopyStatus::Available => "a",
            CopyStatus::Reserved => "r",
        }
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Maintenance
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::OnLoan => "On loan",
            CopyStatus::Available => "Available",
            CopyStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for CopyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(CopyStatus::Maintenance),
            "o" => Ok(CopyStatus::OnLoan),
            "a" => Ok(CopyStatus::Available),
            "r" => Ok(CopyStatus::Reserved),
            _ => Err(format!("Invalid copy status code: {}", s)),
        }
    }
}

// SQLx conversion for CopyStatus (stored as TEXT)
impl sqlx::Type<Postgres> for CopyStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for CopyStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for CopyStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Copy row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Copy {
    /// Unique id for this particular copy across the whole library
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: CopyStatus,
}

impl Copy {
    /// A copy is overdue when it has a due date strictly before today.
    /// Derived, never stored.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_back {
            Some(due) => due < today,
            None => false,
        }
    }
}

/// Copy with its book title, for loan listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CopyWithBook {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: CopyStatus,
}

impl CopyWithBook {
    /// Display string: "<id> (<book title>)"
    pub fn display(&self) -> String {
        format!(
            "{} ({})",
            self.id,
            self.book_title.as_deref().unwrap_or("unknown")
        )
    }
}

/// Create copy request (under a book)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCopy {
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    /// Defaults to maintenance
    pub status: Option<CopyStatus>,
}

/// Administrative copy update: writes the stored record directly, no
/// lifecycle validation
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCopy {
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: Option<CopyStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_due(due_back: Option<NaiveDate>) -> Copy {
        Copy {
            id: Uuid::nil(),
            book_id: Some(1),
            imprint: "First edition".to_string(),
            due_back,
            borrower_id: None,
            status: CopyStatus::OnLoan,
        }
    }

    #[test]
    fn overdue_when_due_back_before_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let copy = copy_due(NaiveDate::from_ymd_opt(2024, 1, 9));
        assert!(copy.is_overdue(today));
    }

    #[test]
    fn not_overdue_on_due_date_or_later() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert!(!copy_due(NaiveDate::from_ymd_opt(2024, 1, 10)).is_overdue(today));
        assert!(!copy_due(NaiveDate::from_ymd_opt(2024, 1, 11)).is_overdue(today));
    }

    #[test]
    fn not_overdue_without_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert!(!copy_due(None).is_overdue(today));
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            CopyStatus::Maintenance,
            CopyStatus::OnLoan,
            CopyStatus::Available,
            CopyStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<CopyStatus>().unwrap(), status);
        }
        assert!("x".parse::<CopyStatus>().is_err());
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(CopyStatus::default(), CopyStatus::Maintenance);
    }
}
