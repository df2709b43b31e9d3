//! Guarantor relation resolver.
//!
//! Resolves a search term (membership number, or case-insensitive name
//! substring with first match winning) to a member, then computes two views:
//! the guarantors on every loan the member owns, and every loan anywhere in
//! the system on which the member stands surety. For the second view the
//! borrower's display fields are re-resolved from the member store; the
//! loan's embedded snapshot may be stale.

use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::flatten_sureties;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::model::relations::{GuaranteedLoan, GuarantorRelations};
use common::requests::{ApiResponse, RelationsQuery};
use rusqlite::Connection;

pub(crate) async fn process(
    config: web::Data<Config>,
    query: web::Query<RelationsQuery>,
) -> impl Responder {
    match guarantor_relations(&config, &query) {
        Ok(relations) => HttpResponse::Ok().json(ApiResponse::data(relations)),
        Err(e) => e.error_response(),
    }
}

fn guarantor_relations(
    config: &Config,
    query: &RelationsQuery,
) -> Result<GuarantorRelations, ApiError> {
    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Search term is required".to_string()))?;

    let conn = db::open(&config.db_path)?;
    let member = resolve_member(&conn, term)?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;
    let number = member.personal_details.membership_number.clone();

    let own_loans = db::loans_by_membership_number(&conn, &number)?;
    let my_guarantors = flatten_sureties(&own_loans, |l| &l.surety_given);

    // scan every loan for suretyGiven entries naming this member, by number
    // or by id so records without a member reference still match
    let mut for_whom_i_am_guarantor = Vec::new();
    for loan in db::all_loans(&conn)? {
        let names_me = loan.surety_given.iter().any(|g| {
            g.membership_number == number || g.member_id.as_deref() == Some(member.id.as_str())
        });
        if !names_me {
            continue;
        }
        let (borrower_name, borrower_phone) =
            match db::member_by_membership_number(&conn, &loan.membership_number)? {
                Some(b) => (
                    b.personal_details.name_of_member,
                    b.personal_details.phone_no,
                ),
                None => (String::new(), String::new()),
            };
        for_whom_i_am_guarantor.push(GuaranteedLoan {
            loan_id: loan.id.clone(),
            borrower_name,
            borrower_membership_number: loan.membership_number.clone(),
            borrower_phone,
            loan_amount: loan.loan_amount.clone(),
            type_of_loan: loan.type_of_loan,
            loan_date: loan.context_date().to_string(),
        });
    }

    Ok(GuarantorRelations {
        my_guarantors,
        for_whom_i_am_guarantor,
    })
}

/// Exact membership-number match first, then case-insensitive name substring;
/// the first matching member wins.
fn resolve_member(conn: &Connection, term: &str) -> Result<Option<Member>, ApiError> {
    if let Some(member) = db::member_by_membership_number(conn, term)? {
        return Ok(Some(member));
    }
    let needle = term.to_lowercase();
    for member in db::all_members(conn)? {
        if member
            .personal_details
            .name_of_member
            .to_lowercase()
            .contains(&needle)
        {
            return Ok(Some(member));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::loans::create::create_loan;
    use crate::services::members::update::apply_update;
    use crate::testutil;
    use common::requests::SuretyRef;

    fn search(term: &str) -> RelationsQuery {
        RelationsQuery {
            search: Some(term.to_string()),
        }
    }

    #[test]
    fn missing_search_term_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let err = guarantor_relations(&config, &RelationsQuery { search: None }).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = guarantor_relations(&config, &search("  ")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn unknown_member_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let err = guarantor_relations(&config, &search("nobody")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn both_views_resolve_with_current_borrower_name() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let conn = db::open(&config.db_path).unwrap();

        let borrower = testutil::member("B-1", "Old Name", "111", "");
        let guarantor = testutil::member("G-1", "Guarantor Devi", "222", "");
        db::insert_member(&conn, &borrower).unwrap();
        db::insert_member(&conn, &guarantor).unwrap();

        // G-1 guarantees B-1's loan L; G-1 also owns a loan of their own
        create_loan(&config, testutil::loan_request("G-1")).unwrap();
        let mut req = testutil::loan_request("B-1");
        req.surety_given = vec![SuretyRef {
            membership_number: "G-1".into(),
            ..SuretyRef::default()
        }];
        let loan = create_loan(&config, req).unwrap();

        // borrower renamed after the snapshot was embedded
        let mut renamed = borrower.clone();
        renamed.personal_details.name_of_member = "New Name".into();
        apply_update(&config, &borrower.id, renamed).unwrap();

        // searched by case-insensitive name substring
        let relations = guarantor_relations(&config, &search("guarantor d")).unwrap();
        assert!(relations.my_guarantors.is_empty());
        assert_eq!(relations.for_whom_i_am_guarantor.len(), 1);
        let row = &relations.for_whom_i_am_guarantor[0];
        assert_eq!(row.loan_id, loan.id);
        assert_eq!(row.borrower_membership_number, "B-1");
        assert_eq!(row.borrower_name, "New Name");

        // and the borrower's side lists the guarantor
        let relations = guarantor_relations(&config, &search("B-1")).unwrap();
        assert_eq!(relations.my_guarantors.len(), 1);
        assert_eq!(relations.my_guarantors[0].party.membership_number, "G-1");
        assert!(relations.for_whom_i_am_guarantor.is_empty());
    }
}
