//! Member records for the member service.
//!
//! Username and email are unique columns; inserting a duplicate surfaces as
//! `DbError::Conflict`, so callers that pre-check with `exists_by_*` still
//! get a clean error when two requests race.

use crate::repositories::{like_pattern, timestamp};
use crate::{DbError, Result as DbErrorResult};

use error_location::ErrorLocation;
use ms_core::{Member, MemberStatus, NewMember};

use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

const TABLE: &str = "members";
const COLUMNS: &str = "id, username, password_hash, email, full_name, phone_number, status, created_at, updated_at";

#[derive(FromRow)]
struct MemberRow {
    id: i64,
    username: String,
    password_hash: String,
    email: String,
    full_name: String,
    phone_number: Option<String>,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<MemberRow> for Member {
    type Error = DbError;

    fn try_from(row: MemberRow) -> DbErrorResult<Self> {
        let status = MemberStatus::from_str(&row.status).map_err(|e| DbError::InvalidRow {
            table: TABLE,
            message: format!("Invalid MemberStatus in members.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Member {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            full_name: row.full_name,
            phone_number: row.phone_number,
            status,
            created_at: timestamp(TABLE, "created_at", row.created_at)?,
            updated_at: timestamp(TABLE, "updated_at", row.updated_at)?,
        })
    }
}

/// Editable member fields; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<MemberStatus>,
}

#[derive(Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, member: &NewMember) -> DbErrorResult<Member> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO members (
                    username, password_hash, email, full_name, phone_number, status,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&member.username)
        .bind(&member.password_hash)
        .bind(&member.email)
        .bind(&member.full_name)
        .bind(&member.phone_number)
        .bind(member.status.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or_else(|| DbError::Initialization {
            message: format!("member {} vanished after insert", id),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Member>> {
        let sql = format!("SELECT {COLUMNS} FROM members WHERE id = ?");
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Member::try_from).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<Member>> {
        self.fetch_one_where("username = ?", username).await
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Member>> {
        self.fetch_one_where("email = ?", email).await
    }

    pub async fn exists_by_username(&self, username: &str) -> DbErrorResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    pub async fn exists_by_email(&self, email: &str) -> DbErrorResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// One zero-based page ordered by id.
    pub async fn find_page(&self, page: i64, size: i64) -> DbErrorResult<Vec<Member>> {
        let sql = format!("SELECT {COLUMNS} FROM members ORDER BY id LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(size)
            .bind(page.saturating_mul(size))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Member>> {
        let sql = format!("SELECT {COLUMNS} FROM members ORDER BY id");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    pub async fn find_by_status(&self, status: MemberStatus) -> DbErrorResult<Vec<Member>> {
        let sql = format!("SELECT {COLUMNS} FROM members WHERE status = ? ORDER BY id");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    /// Members whose full name contains `name`.
    pub async fn search_by_name(&self, name: &str) -> DbErrorResult<Vec<Member>> {
        let sql =
            format!("SELECT {COLUMNS} FROM members WHERE full_name LIKE ? ESCAPE '\\' ORDER BY id");
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(like_pattern(name))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    pub async fn count_active(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE status = ?")
            .bind(MemberStatus::Active.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Apply an update; `None` when no member has this id.
    pub async fn update(&self, id: i64, update: &MemberUpdate) -> DbErrorResult<Option<Member>> {
        let Some(mut member) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(full_name) = &update.full_name {
            member.full_name = full_name.clone();
        }
        if let Some(phone_number) = &update.phone_number {
            member.phone_number = Some(phone_number.clone());
        }
        if let Some(status) = update.status {
            member.status = status;
        }

        sqlx::query(
            r#"
                UPDATE members
                SET full_name = ?, phone_number = ?, status = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&member.full_name)
        .bind(&member.phone_number)
        .bind(member.status.as_str())
        .bind(Utc::now().timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Returns false when nothing was deleted.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_one_where(&self, predicate: &str, value: &str) -> DbErrorResult<Option<Member>> {
        let sql = format!("SELECT {COLUMNS} FROM members WHERE {predicate}");
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Member::try_from).transpose()
    }
}
