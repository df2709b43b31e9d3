//! Bulk member import from the society's membership register.
//!
//! The register is exported as CSV with a fixed column layout; positions are
//! hard-coded to that sheet:
//!
//! 0 membership no. | 1 member name | 2 father's name | 3 date of birth |
//! 4 membership date | 5 area/street | 6 pincode | 7 phone | 8 PAN
//!
//! Rows whose membership number collides with an existing member are skipped
//! rather than failing the whole import.

use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::member::Member;
use common::requests::{ApiResponse, ImportSummary};
use futures_util::StreamExt;
use log::info;

pub(crate) async fn process(config: web::Data<Config>, payload: Multipart) -> impl Responder {
    match import_members(&config, payload).await {
        Ok(summary) => HttpResponse::Ok().json(ApiResponse::with_message(
            format!("Imported {} member(s)", summary.inserted),
            summary,
        )),
        Err(e) => e.error_response(),
    }
}

async fn import_members(config: &Config, mut payload: Multipart) -> Result<ImportSummary, ApiError> {
    let mut csv_bytes: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| ApiError::Validation(format!("invalid multipart payload: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.ends_with(".csv") {
            return Err(ApiError::Validation(
                "The file must end with .csv".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| ApiError::Validation(format!("invalid multipart payload: {e}")))?;
            bytes.extend_from_slice(&chunk);
        }
        csv_bytes = Some(bytes);
    }

    let bytes = csv_bytes.ok_or_else(|| ApiError::Validation("No file uploaded".to_string()))?;
    let members = parse_member_rows(&bytes)?;
    insert_rows(config, members)
}

/// Maps register rows to member documents. The header row is skipped by the
/// reader; stray repeated header lines inside the data are dropped too.
pub(crate) fn parse_member_rows(data: &[u8]) -> Result<Vec<Member>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut members = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ApiError::Validation(format!("invalid CSV row: {e}")))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let membership_number = cell(0);
        if membership_number.is_empty() || membership_number.eq_ignore_ascii_case("MEMBERSHIP NO.")
        {
            continue;
        }

        let mut member = Member {
            id: uuid::Uuid::new_v4().to_string(),
            ..Member::default()
        };
        member.personal_details.membership_number = membership_number;
        member.personal_details.name_of_member = cell(1);
        member.personal_details.name_of_father = cell(2);
        member.personal_details.date_of_birth = cell(3);
        member.personal_details.membership_date = cell(4);
        member.address_details.permanent_address.area_street_sector = cell(5);
        member.address_details.permanent_address.pincode = cell(6);
        member.personal_details.phone_no = cell(7);
        member.documents.pan_no = cell(8);
        members.push(member);
    }
    Ok(members)
}

pub(crate) fn insert_rows(
    config: &Config,
    members: Vec<Member>,
) -> Result<ImportSummary, ApiError> {
    let conn = db::open(&config.db_path)?;
    let mut summary = ImportSummary::default();
    for member in &members {
        match db::insert_member(&conn, member) {
            Ok(()) => summary.inserted += 1,
            // duplicate membership numbers are skipped, not fatal
            Err(ApiError::Validation(_)) => summary.skipped += 1,
            Err(e) => return Err(e),
        }
    }
    info!(
        "member import finished: {} inserted, {} skipped",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}
