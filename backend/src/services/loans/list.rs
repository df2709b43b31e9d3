use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::attach_borrower;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::loan::LoanWithBorrower;
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>) -> impl Responder {
    match list_loans(&config) {
        Ok(loans) => HttpResponse::Ok().json(ApiResponse::list(loans)),
        Err(e) => e.error_response(),
    }
}

/// All loans newest first, each with the borrower's current display fields.
fn list_loans(config: &Config) -> Result<Vec<LoanWithBorrower>, ApiError> {
    let conn = db::open(&config.db_path)?;
    db::all_loans(&conn)?
        .into_iter()
        .map(|loan| attach_borrower(&conn, loan))
        .collect()
}
