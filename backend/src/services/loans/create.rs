//! Loan creation and the surety synchronizer.
//!
//! A new loan carries guarantor references (`suretyGiven`); each one is
//! resolved against the member store to a full identity snapshot, and a
//! mirrored taken-entry — snapshotting the new loan's borrower — is appended
//! to every loan the guarantor already owns. The insert and the fan-out run
//! in one transaction, so a fan-out failure rolls the insert back instead of
//! leaving the guarantee graph half-written.

use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::loan::{Loan, LoanType, SuretyParty};
use common::model::member::Member;
use common::requests::{ApiResponse, LoanRequest, SuretyRef};
use log::{info, warn};
use rusqlite::Connection;

pub(crate) async fn process(
    config: web::Data<Config>,
    body: web::Json<LoanRequest>,
) -> impl Responder {
    match create_loan(&config, body.into_inner()) {
        Ok(loan) => HttpResponse::Created()
            .json(ApiResponse::with_message("Loan created successfully", loan)),
        Err(e) => e.error_response(),
    }
}

pub(crate) fn create_loan(config: &Config, req: LoanRequest) -> Result<Loan, ApiError> {
    let type_of_loan = validate_loan_request(&req)?;

    let mut conn = db::open(&config.db_path)?;
    let borrower = db::member_by_membership_number(&conn, &req.membership_number)?
        .ok_or_else(|| ApiError::NotFound("Main member not found".to_string()))?;

    let surety_given = resolve_sureties(&conn, &req.surety_given)?;
    let surety_taken = resolve_sureties(&conn, &req.surety_taken)?;

    let loan = Loan {
        id: uuid::Uuid::new_v4().to_string(),
        member_id: Some(borrower.id.clone()),
        membership_number: borrower.personal_details.membership_number.clone(),
        type_of_loan,
        loan_date: req.loan_date,
        purpose_of_loan: req.purpose_of_loan,
        loan_amount: req.loan_amount,
        laf_date: req.laf_date,
        fdr_amount: req.fdr_amount,
        fdr_schema: req.fdr_schema,
        pdc_details: req.pdc_details,
        bank_details: req.bank_details,
        surety_given,
        surety_taken,
    };

    let tx = conn.transaction()?;
    db::insert_loan(&tx, &loan)?;
    mirror_to_guarantors(&tx, &loan, &borrower)?;
    tx.commit()?;

    info!(
        "loan {} created for member {} with {} guarantor(s)",
        loan.id,
        loan.membership_number,
        loan.surety_given.len()
    );
    Ok(loan)
}

/// Checks the variant-dependent required fields and returns the loan type.
pub(crate) fn validate_loan_request(req: &LoanRequest) -> Result<LoanType, ApiError> {
    if req.membership_number.trim().is_empty() {
        return Err(ApiError::Validation(
            "membershipNumber is required".to_string(),
        ));
    }
    let type_of_loan = req
        .type_of_loan
        .ok_or_else(|| ApiError::Validation("typeOfLoan is required".to_string()))?;

    let require = |field: &str, value: &str| -> Result<(), ApiError> {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
        Ok(())
    };

    match type_of_loan {
        LoanType::Loan | LoanType::Lap => {
            require("loanDate", &req.loan_date)?;
            require("purposeOfLoan", &req.purpose_of_loan)?;
            require("loanAmount", &req.loan_amount)?;
        }
        LoanType::Laf => {
            require("lafDate", &req.laf_date)?;
            require("fdrAmount", &req.fdr_amount)?;
            require("fdrSchema", &req.fdr_schema)?;
        }
    }
    Ok(type_of_loan)
}

/// Resolves guarantor references to identity snapshots. Entries that do not
/// match a member are dropped, matching the behavior of the registration
/// flow that tolerates stale guarantor numbers.
pub(crate) fn resolve_sureties(
    conn: &Connection,
    refs: &[SuretyRef],
) -> Result<Vec<SuretyParty>, ApiError> {
    let mut parties = Vec::new();
    for r in refs {
        match db::member_by_membership_number(conn, &r.membership_number)? {
            Some(m) => parties.push(SuretyParty {
                member_id: Some(m.id),
                member_name: m.personal_details.name_of_member,
                membership_number: m.personal_details.membership_number,
                mobile_number: m.personal_details.phone_no,
                pdc_details: r.pdc_details.clone(),
            }),
            None => warn!(
                "surety reference {} does not match a member, dropping",
                r.membership_number
            ),
        }
    }
    Ok(parties)
}

/// The fan-out half of the surety synchronizer: for every guarantor on the
/// new loan, append a taken-entry referencing the borrower onto each loan
/// the guarantor owns. A guarantor with no loans is a no-op; one without a
/// member id is skipped.
fn mirror_to_guarantors(
    conn: &Connection,
    loan: &Loan,
    borrower: &Member,
) -> Result<(), ApiError> {
    if loan.surety_given.is_empty() {
        return Ok(());
    }

    let taken_entry = SuretyParty {
        member_id: loan.member_id.clone(),
        member_name: borrower.personal_details.name_of_member.clone(),
        membership_number: loan.membership_number.clone(),
        mobile_number: borrower.personal_details.phone_no.clone(),
        pdc_details: loan.pdc_details.clone(),
    };

    for guarantor in &loan.surety_given {
        let Some(guarantor_id) = guarantor.member_id.as_deref() else {
            continue;
        };
        for mut guarantor_loan in db::loans_by_member_id(conn, guarantor_id)? {
            guarantor_loan.surety_taken.push(taken_entry.clone());
            db::update_loan(conn, &guarantor_loan)?;
        }
    }
    Ok(())
}
