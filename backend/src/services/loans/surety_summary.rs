use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::loans::flatten_sureties;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::relations::SuretySummary;
use common::requests::ApiResponse;

pub(crate) async fn process(
    config: web::Data<Config>,
    membership_number: web::Path<String>,
) -> impl Responder {
    match surety_summary(&config, &membership_number) {
        Ok(summary) => HttpResponse::Ok().json(ApiResponse::data(summary)),
        Err(e) => e.error_response(),
    }
}

/// Flattened given/taken surety lists across every loan the member owns.
fn surety_summary(config: &Config, membership_number: &str) -> Result<SuretySummary, ApiError> {
    let conn = db::open(&config.db_path)?;
    if db::member_by_membership_number(&conn, membership_number)?.is_none() {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }
    let loans = db::loans_by_membership_number(&conn, membership_number)?;
    Ok(SuretySummary {
        surety_given: flatten_sureties(&loans, |l| &l.surety_given),
        surety_taken: flatten_sureties(&loans, |l| &l.surety_taken),
    })
}
