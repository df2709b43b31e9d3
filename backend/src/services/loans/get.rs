use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::attach_borrower;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::loan::LoanWithBorrower;
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>, id: web::Path<String>) -> impl Responder {
    match get_loan(&config, &id) {
        Ok(loan) => HttpResponse::Ok().json(ApiResponse::data(loan)),
        Err(e) => e.error_response(),
    }
}

fn get_loan(config: &Config, id: &str) -> Result<LoanWithBorrower, ApiError> {
    let conn = db::open(&config.db_path)?;
    let loan = db::loan_by_id(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Loan not found".to_string()))?;
    attach_borrower(&conn, loan)
}
