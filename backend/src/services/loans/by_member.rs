use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::attach_borrower;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::loan::LoanWithBorrower;
use common::requests::ApiResponse;

pub(crate) async fn process(
    config: web::Data<Config>,
    membership_number: web::Path<String>,
) -> impl Responder {
    match member_loans(&config, &membership_number) {
        Ok(loans) => HttpResponse::Ok().json(ApiResponse::list(loans)),
        Err(e) => e.error_response(),
    }
}

fn member_loans(
    config: &Config,
    membership_number: &str,
) -> Result<Vec<LoanWithBorrower>, ApiError> {
    let conn = db::open(&config.db_path)?;
    if db::member_by_membership_number(&conn, membership_number)?.is_none() {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }
    db::loans_by_membership_number(&conn, membership_number)?
        .into_iter()
        .map(|loan| attach_borrower(&conn, loan))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn unknown_member_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        assert!(matches!(
            member_loans(&config, "ghost"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn returns_only_that_members_loans_with_borrower() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let conn = db::open(&config.db_path).unwrap();

        db::insert_member(&conn, &testutil::member("M-1", "Asha Verma", "98", "")).unwrap();
        db::insert_member(&conn, &testutil::member("M-2", "Other", "", "")).unwrap();
        db::insert_loan(&conn, &testutil::loan("M-1")).unwrap();
        db::insert_loan(&conn, &testutil::loan("M-2")).unwrap();

        let loans = member_loans(&config, "M-1").unwrap();
        assert_eq!(loans.len(), 1);
        let borrower = loans[0].borrower.as_ref().unwrap();
        assert_eq!(borrower.name_of_member, "Asha Verma");
    }
}
