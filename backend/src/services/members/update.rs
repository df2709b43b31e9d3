use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::services::members::upload;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::requests::ApiResponse;

pub(crate) async fn process(
    config: web::Data<Config>,
    id: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    match update_member(&config, &id, payload).await {
        Ok(member) => HttpResponse::Ok()
            .json(ApiResponse::with_message("Member updated successfully", member)),
        Err(e) => e.error_response(),
    }
}

async fn update_member(config: &Config, id: &str, payload: Multipart) -> Result<Member, ApiError> {
    let incoming = upload::read_member_upload(payload, &config.uploads_dir).await?;
    apply_update(config, id, incoming)
}

/// Replaces the stored document with the incoming one, keeping the storage id
/// and any photo URLs the update did not resupply.
pub(crate) fn apply_update(
    config: &Config,
    id: &str,
    mut incoming: Member,
) -> Result<Member, ApiError> {
    let conn = db::open(&config.db_path)?;
    let existing = db::member_by_id(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;

    if incoming.personal_details.membership_number.trim().is_empty() {
        return Err(ApiError::Validation(
            "membershipNumber is required".to_string(),
        ));
    }

    incoming.id = existing.id.clone();
    upload::carry_over_photos(&mut incoming, &existing);
    db::update_member(&conn, &incoming)?;
    Ok(incoming)
}
