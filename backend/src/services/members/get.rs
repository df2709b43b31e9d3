use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::requests::ApiResponse;

pub(crate) async fn process(config: web::Data<Config>, id: web::Path<String>) -> impl Responder {
    match get_member(&config, &id) {
        Ok(member) => HttpResponse::Ok().json(ApiResponse::data(member)),
        Err(e) => e.error_response(),
    }
}

fn get_member(config: &Config, id: &str) -> Result<Member, ApiError> {
    let conn = db::open(&config.db_path)?;
    db::member_by_id(&conn, id)?.ok_or_else(|| ApiError::NotFound("Member not found".to_string()))
}
