use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>, id: web::Path<String>) -> impl Responder {
    match delete_loan(&config, &id) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Loan deleted successfully")),
        Err(e) => e.error_response(),
    }
}

/// Taken-entries mirrored onto other loans are left in place; the guarantee
/// history survives the deleted loan.
fn delete_loan(config: &Config, id: &str) -> Result<(), ApiError> {
    let conn = db::open(&config.db_path)?;
    if !db::delete_loan(&conn, id)? {
        return Err(ApiError::NotFound("Loan not found".to_string()));
    }
    Ok(())
}
