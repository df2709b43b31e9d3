//! Loan management endpoints.
//!
//! Routes under `/api/loans`:
//! - `POST /api/loans` — create a loan. Validates the variant-dependent
//!   fields (`Loan`/`LAP` need loan date, purpose and amount; `LAF` needs
//!   LAF date, FDR amount and scheme), resolves each listed guarantor to an
//!   identity snapshot and mirrors a taken-entry onto every loan the
//!   guarantor owns, all inside one transaction.
//! - `GET /api/loans`, `GET /api/loans/{id}`,
//!   `GET /api/loans/member/{membership_number}` — reads, with the
//!   borrower's current display fields attached.
//! - `PUT /api/loans/{id}`, `DELETE /api/loans/{id}` — update and delete.
//! - `GET /api/loans/surety-summary/{membership_number}` — flattened
//!   given/taken surety lists across the member's loans.
//! - `GET /api/loans/guarantor-relations?search=` — the two relationship
//!   views for a member found by membership number or name substring.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

use crate::db;
use crate::error::ApiError;
use common::model::loan::{BorrowerSummary, Loan, LoanWithBorrower, SuretyParty};
use common::model::relations::SuretyEntry;
use rusqlite::Connection;

pub(crate) mod create;
mod by_member;
mod delete_loan;
mod get;
mod guarantor_relations;
mod list;
mod surety_summary;
mod update;

const API_PATH: &str = "/api/loans";

/// Configures and returns the Actix scope for loan routes. Literal paths are
/// registered ahead of `/{id}` so they are not captured as ids.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route(
            "/surety-summary/{membership_number}",
            get().to(surety_summary::process),
        )
        .route(
            "/guarantor-relations",
            get().to(guarantor_relations::process),
        )
        .route("/member/{membership_number}", get().to(by_member::process))
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete_loan::process))
}

/// Resolves the borrower's current display fields for a loan read. `None`
/// when the membership number no longer matches a member.
pub(crate) fn attach_borrower(
    conn: &Connection,
    loan: Loan,
) -> Result<LoanWithBorrower, ApiError> {
    let borrower =
        db::member_by_membership_number(conn, &loan.membership_number)?.map(|m| BorrowerSummary {
            name_of_member: m.personal_details.name_of_member,
            membership_number: m.personal_details.membership_number,
            phone_no: m.personal_details.phone_no,
        });
    Ok(LoanWithBorrower { loan, borrower })
}

/// Flattens surety parties across loans: one row per party per loan, with
/// the loan's amount, type and context date attached.
pub(crate) fn flatten_sureties<'a>(
    loans: &'a [Loan],
    pick: impl Fn(&'a Loan) -> &'a [SuretyParty],
) -> Vec<SuretyEntry> {
    let mut entries = Vec::new();
    for loan in loans {
        for party in pick(loan) {
            entries.push(SuretyEntry {
                loan_id: loan.id.clone(),
                party: party.clone(),
                loan_amount: loan.loan_amount.clone(),
                type_of_loan: loan.type_of_loan,
                loan_date: loan.context_date().to_string(),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::testutil;
    use actix_web::{test, web, App};
    use serde_json::json;

    macro_rules! app {
        ($cfg:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($cfg))
                    .service(super::configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn laf_without_fdr_amount_is_rejected_with_400() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::for_tests(tmp.path());
        let conn = crate::db::open(&cfg.db_path).unwrap();
        crate::db::insert_member(&conn, &testutil::member("M-1", "Borrower", "", "")).unwrap();

        let app = app!(cfg);
        let req = test::TestRequest::post()
            .uri("/api/loans")
            .set_json(json!({
                "membershipNumber": "M-1",
                "typeOfLoan": "LAF",
                "lafDate": "2024-05-01",
                "fdrSchema": "quarterly"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn delete_of_unknown_loan_returns_404() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::for_tests(tmp.path());
        let app = app!(cfg);

        let req = test::TestRequest::delete()
            .uri("/api/loans/no-such-id")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn fetching_a_loan_twice_returns_identical_json() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::for_tests(tmp.path());
        let conn = crate::db::open(&cfg.db_path).unwrap();
        crate::db::insert_member(&conn, &testutil::member("M-1", "Borrower", "", "")).unwrap();
        let loan = testutil::loan("M-1");
        crate::db::insert_loan(&conn, &loan).unwrap();

        let app = app!(cfg);
        let uri = format!("/api/loans/{}", loan.id);

        let first: serde_json::Value = test::read_body_json(
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
        )
        .await;
        let second: serde_json::Value = test::read_body_json(
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
        )
        .await;
        assert_eq!(first, second);
        assert_eq!(first["success"], true);
    }
}
