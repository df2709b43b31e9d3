use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>, id: web::Path<String>) -> impl Responder {
    match delete_member(&config, &id) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Member deleted successfully")),
        Err(e) => e.error_response(),
    }
}

/// Loans referencing the member are left untouched; their embedded snapshots
/// keep working and readers tolerate the dangling reference.
fn delete_member(config: &Config, id: &str) -> Result<(), ApiError> {
    let conn = db::open(&config.db_path)?;
    if !db::delete_member(&conn, id)? {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }
    Ok(())
}
