use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::members::upload;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::requests::ApiResponse;
use log::info;

pub(crate) async fn process(config: web::Data<Config>, payload: Multipart) -> impl Responder {
    match create_member(&config, payload).await {
        Ok(member) => HttpResponse::Created()
            .json(ApiResponse::with_message("Member created successfully", member)),
        Err(e) => e.error_response(),
    }
}

async fn create_member(config: &Config, payload: Multipart) -> Result<Member, ApiError> {
    let member = upload::read_member_upload(payload, &config.uploads_dir).await?;
    insert_new_member(config, member)
}

/// Assigns a fresh id and persists the document. The membership number must
/// be present and unused.
pub(crate) fn insert_new_member(config: &Config, mut member: Member) -> Result<Member, ApiError> {
    if member.personal_details.membership_number.trim().is_empty() {
        return Err(ApiError::Validation(
            "membershipNumber is required".to_string(),
        ));
    }
    member.id = uuid::Uuid::new_v4().to_string();

    let conn = db::open(&config.db_path)?;
    db::insert_member(&conn, &member)?;
    info!(
        "member {} registered as {}",
        member.personal_details.membership_number, member.id
    );
    Ok(member)
}
