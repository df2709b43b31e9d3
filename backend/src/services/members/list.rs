use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>) -> impl Responder {
    match list_members(&config) {
        Ok(members) => HttpResponse::Ok().json(ApiResponse::list(members)),
        Err(e) => e.error_response(),
    }
}

fn list_members(config: &Config) -> Result<Vec<Member>, ApiError> {
    let conn = db::open(&config.db_path)?;
    db::all_members(&conn)
}
