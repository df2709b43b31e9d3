//! Document storage over SQLite.
//!
//! Members and loans are stored one JSON document per row; the columns next
//! to `doc` mirror the join keys inside the document so lookups stay indexed
//! while the document itself remains schemaless. Connections are opened per
//! operation, and the schema is applied idempotently on open.

use crate::error::ApiError;
use common::model::loan::Loan;
use common::model::member::Member;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS members (
    id                TEXT PRIMARY KEY,
    membership_number TEXT NOT NULL UNIQUE,
    doc               TEXT NOT NULL,
    created_at        TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS loans (
    id                TEXT PRIMARY KEY,
    member_id         TEXT,
    membership_number TEXT NOT NULL,
    doc               TEXT NOT NULL,
    created_at        TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_loans_member_id ON loans (member_id);
CREATE INDEX IF NOT EXISTS idx_loans_membership_number ON loans (membership_number);
";

pub fn open(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

fn map_unique_membership(e: rusqlite::Error) -> ApiError {
    if let rusqlite::Error::SqliteFailure(f, _) = &e {
        if f.code == rusqlite::ErrorCode::ConstraintViolation {
            return ApiError::Validation("Membership number already exists".to_string());
        }
    }
    e.into()
}

pub fn insert_member(conn: &Connection, member: &Member) -> Result<(), ApiError> {
    let doc = serde_json::to_string(member)?;
    conn.execute(
        "INSERT INTO members (id, membership_number, doc) VALUES (?1, ?2, ?3)",
        params![
            member.id,
            member.personal_details.membership_number,
            doc
        ],
    )
    .map_err(map_unique_membership)?;
    Ok(())
}

pub fn member_by_id(conn: &Connection, id: &str) -> Result<Option<Member>, ApiError> {
    let doc: Option<String> = conn
        .query_row("SELECT doc FROM members WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    match doc {
        Some(d) => Ok(Some(serde_json::from_str(&d)?)),
        None => Ok(None),
    }
}

pub fn member_by_membership_number(
    conn: &Connection,
    membership_number: &str,
) -> Result<Option<Member>, ApiError> {
    let doc: Option<String> = conn
        .query_row(
            "SELECT doc FROM members WHERE membership_number = ?1",
            params![membership_number],
            |row| row.get(0),
        )
        .optional()?;
    match doc {
        Some(d) => Ok(Some(serde_json::from_str(&d)?)),
        None => Ok(None),
    }
}

pub fn all_members(conn: &Connection) -> Result<Vec<Member>, ApiError> {
    let mut stmt = conn.prepare("SELECT doc FROM members ORDER BY rowid")?;
    let docs = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut members = Vec::new();
    for doc in docs {
        members.push(serde_json::from_str(&doc?)?);
    }
    Ok(members)
}

/// Replaces a member document. Returns false when the id is unknown.
pub fn update_member(conn: &Connection, member: &Member) -> Result<bool, ApiError> {
    let doc = serde_json::to_string(member)?;
    let changed = conn
        .execute(
            "UPDATE members SET membership_number = ?1, doc = ?2, updated_at = datetime('now')
             WHERE id = ?3",
            params![
                member.personal_details.membership_number,
                doc,
                member.id
            ],
        )
        .map_err(map_unique_membership)?;
    Ok(changed > 0)
}

pub fn delete_member(conn: &Connection, id: &str) -> Result<bool, ApiError> {
    let changed = conn.execute("DELETE FROM members WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

pub fn insert_loan(conn: &Connection, loan: &Loan) -> Result<(), ApiError> {
    let doc = serde_json::to_string(loan)?;
    conn.execute(
        "INSERT INTO loans (id, member_id, membership_number, doc) VALUES (?1, ?2, ?3, ?4)",
        params![loan.id, loan.member_id, loan.membership_number, doc],
    )?;
    Ok(())
}

pub fn loan_by_id(conn: &Connection, id: &str) -> Result<Option<Loan>, ApiError> {
    let doc: Option<String> = conn
        .query_row("SELECT doc FROM loans WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    match doc {
        Some(d) => Ok(Some(serde_json::from_str(&d)?)),
        None => Ok(None),
    }
}

fn collect_loans(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Loan>, ApiError> {
    let mut stmt = conn.prepare(sql)?;
    let docs = stmt.query_map(args, |row| row.get::<_, String>(0))?;
    let mut loans = Vec::new();
    for doc in docs {
        loans.push(serde_json::from_str(&doc?)?);
    }
    Ok(loans)
}

/// All loans, newest first.
pub fn all_loans(conn: &Connection) -> Result<Vec<Loan>, ApiError> {
    collect_loans(
        conn,
        "SELECT doc FROM loans ORDER BY created_at DESC, rowid DESC",
        &[],
    )
}

pub fn loans_by_membership_number(
    conn: &Connection,
    membership_number: &str,
) -> Result<Vec<Loan>, ApiError> {
    collect_loans(
        conn,
        "SELECT doc FROM loans WHERE membership_number = ?1
         ORDER BY created_at DESC, rowid DESC",
        &[&membership_number],
    )
}

pub fn loans_by_member_id(conn: &Connection, member_id: &str) -> Result<Vec<Loan>, ApiError> {
    collect_loans(
        conn,
        "SELECT doc FROM loans WHERE member_id = ?1 ORDER BY created_at DESC, rowid DESC",
        &[&member_id],
    )
}

/// Replaces a loan document. Returns false when the id is unknown.
pub fn update_loan(conn: &Connection, loan: &Loan) -> Result<bool, ApiError> {
    let doc = serde_json::to_string(loan)?;
    let changed = conn.execute(
        "UPDATE loans SET member_id = ?1, membership_number = ?2, doc = ?3,
                updated_at = datetime('now')
         WHERE id = ?4",
        params![loan.member_id, loan.membership_number, doc, loan.id],
    )?;
    Ok(changed > 0)
}

pub fn delete_loan(conn: &Connection, id: &str) -> Result<bool, ApiError> {
    let changed = conn.execute("DELETE FROM loans WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn member_roundtrip_and_unique_membership_number() {
        let tmp = tempfile::tempdir().unwrap();
        let conn = open(&tmp.path().join("db.sqlite")).unwrap();

        let member = testutil::member("M-1", "Ravi Kumar", "9000000001", "ravi@example.com");
        insert_member(&conn, &member).unwrap();

        let loaded = member_by_membership_number(&conn, "M-1").unwrap().unwrap();
        assert_eq!(loaded.id, member.id);
        assert_eq!(loaded.personal_details.name_of_member, "Ravi Kumar");

        let dup = testutil::member("M-1", "Someone Else", "9000000002", "");
        let err = insert_member(&conn, &dup).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn loans_sorted_newest_first_by_rowid_tiebreak() {
        let tmp = tempfile::tempdir().unwrap();
        let conn = open(&tmp.path().join("db.sqlite")).unwrap();

        for n in 1..=3 {
            let mut loan = testutil::loan("M-1");
            loan.purpose_of_loan = format!("loan {n}");
            insert_loan(&conn, &loan).unwrap();
        }
        let loans = all_loans(&conn).unwrap();
        assert_eq!(loans.len(), 3);
        assert_eq!(loans[0].purpose_of_loan, "loan 3");
        assert_eq!(loans[2].purpose_of_loan, "loan 1");
    }

    #[test]
    fn delete_reports_missing_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let conn = open(&tmp.path().join("db.sqlite")).unwrap();
        assert!(!delete_loan(&conn, "no-such-id").unwrap());
        assert!(!delete_member(&conn, "no-such-id").unwrap());
    }
}
