use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::create::{resolve_sureties, validate_loan_request};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::loan::Loan;
use common::requests::{ApiResponse, LoanRequest};

pub(crate) async fn process(
    config: web::Data<Config>,
    id: web::Path<String>,
    body: web::Json<LoanRequest>,
) -> impl Responder {
    match update_loan(&config, &id, body.into_inner()) {
        Ok(loan) => {
            HttpResponse::Ok().json(ApiResponse::with_message("Loan updated successfully", loan))
        }
        Err(e) => e.error_response(),
    }
}

/// Replaces the loan document. Surety lists are re-resolved only when the
/// payload supplies them; empty lists keep what is stored, so an update
/// cannot silently wipe mirrored taken-entries. No fan-out runs here —
/// mirroring happens at creation only.
fn update_loan(config: &Config, id: &str, req: LoanRequest) -> Result<Loan, ApiError> {
    let type_of_loan = validate_loan_request(&req)?;

    let conn = db::open(&config.db_path)?;
    let existing = db::loan_by_id(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Loan not found".to_string()))?;

    let member = db::member_by_membership_number(&conn, &req.membership_number)?;
    let surety_given = if req.surety_given.is_empty() {
        existing.surety_given.clone()
    } else {
        resolve_sureties(&conn, &req.surety_given)?
    };
    let surety_taken = if req.surety_taken.is_empty() {
        existing.surety_taken.clone()
    } else {
        resolve_sureties(&conn, &req.surety_taken)?
    };

    let loan = Loan {
        id: existing.id.clone(),
        member_id: member.map(|m| m.id).or(existing.member_id),
        membership_number: req.membership_number,
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
    db::update_loan(&conn, &loan)?;
    Ok(loan)
}
