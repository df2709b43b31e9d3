use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use crate::storage;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::notice::Notice;
use common::requests::{ApiResponse, NoticeRequest};
use futures_util::StreamExt;
use log::{info, warn};
use regex::Regex;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) async fn process(config: web::Data<Config>, payload: Multipart) -> impl Responder {
    match handle_send(&config, payload).await {
        Ok(notice) => {
            let message = format!(
                "Notice sent successfully to {} member(s).",
                notice.recipients.len()
            );
            HttpResponse::Ok().json(ApiResponse::with_message(message, notice))
        }
        Err(e) => e.error_response(),
    }
}

async fn handle_send(config: &Config, mut payload: Multipart) -> Result<Notice, ApiError> {
    let mut request: Option<NoticeRequest> = None;
    let mut attachment_url: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| ApiError::Validation(format!("invalid multipart payload: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("json") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        ApiError::Validation(format!("invalid multipart payload: {e}"))
                    })?;
                    bytes.extend_from_slice(&chunk);
                }
                request = Some(
                    serde_json::from_slice(&bytes)
                        .map_err(|e| ApiError::Validation(format!("invalid notice JSON: {e}")))?,
                );
            }
            Some("attachment") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        ApiError::Validation(format!("invalid multipart payload: {e}"))
                    })?;
                    bytes.extend_from_slice(&chunk);
                }
                // a failed attachment store downgrades to a plain notice
                attachment_url = match storage::store_upload(&config.uploads_dir, &filename, &bytes)
                {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!("failed to store notice attachment: {e}");
                        None
                    }
                };
            }
            _ => {}
        }
    }

    let request = request
        .ok_or_else(|| ApiError::Validation("Missing json part in notice payload".to_string()))?;
    send_notice(config, request, attachment_url)
}

/// Resolves recipients and queues the composed notice in the outbox.
pub(crate) fn send_notice(
    config: &Config,
    request: NoticeRequest,
    attachment_url: Option<String>,
) -> Result<Notice, ApiError> {
    if request.member_ids.is_empty() {
        return Err(ApiError::Validation("No members selected".to_string()));
    }

    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| ApiError::Internal(format!("Regex error: {e}")))?;

    let conn = db::open(&config.db_path)?;
    let mut recipients = Vec::new();
    for id in &request.member_ids {
        if let Some(member) = db::member_by_id(&conn, id)? {
            let email = member.personal_details.email_id.trim().to_string();
            if email_re.is_match(&email) {
                recipients.push(email);
            }
        }
    }
    if recipients.is_empty() {
        return Err(ApiError::NotFound("No valid emails found".to_string()));
    }

    let queued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let notice = Notice {
        id: uuid::Uuid::new_v4().to_string(),
        html_body: render_html(&request.subject, &request.message, attachment_url.as_deref()),
        recipients,
        subject: request.subject,
        message: request.message,
        attachment_url,
        queued_at,
    };

    let path = config.outbox_dir.join(format!("notice-{}.json", notice.id));
    fs::write(&path, serde_json::to_vec_pretty(&notice)?)?;
    info!(
        "notice {} queued for {} recipient(s) at {}",
        notice.id,
        notice.recipients.len(),
        path.display()
    );
    Ok(notice)
}

fn render_html(subject: &str, message: &str, attachment_url: Option<&str>) -> String {
    let attachment_link = attachment_url
        .map(|url| format!("<p><a href=\"{url}\" target=\"_blank\">View Attachment</a></p>"))
        .unwrap_or_default();
    format!(
        "<div style=\"font-family:sans-serif; padding:10px;\">\
         <h3>{subject}</h3>\
         <p>{message}</p>\
         {attachment_link}\
         <hr/>\
         <small>This is an automated notice from the society management system.</small>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn request(ids: Vec<String>) -> NoticeRequest {
        NoticeRequest {
            member_ids: ids,
            subject: "AGM 2026".into(),
            message: "The annual general meeting is on 15 September.".into(),
        }
    }

    #[test]
    fn empty_selection_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let err = send_notice(&config, request(vec![]), None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn members_without_valid_emails_yield_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let conn = db::open(&config.db_path).unwrap();

        let no_email = testutil::member("M-1", "No Email", "", "");
        let bad_email = testutil::member("M-2", "Bad Email", "", "not-an-address");
        db::insert_member(&conn, &no_email).unwrap();
        db::insert_member(&conn, &bad_email).unwrap();

        let err = send_notice(&config, request(vec![no_email.id, bad_email.id]), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn notice_lands_in_the_outbox_with_resolved_recipients() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::for_tests(tmp.path());
        let conn = db::open(&config.db_path).unwrap();

        let a = testutil::member("M-1", "A", "", "a@example.com");
        let b = testutil::member("M-2", "B", "", "");
        db::insert_member(&conn, &a).unwrap();
        db::insert_member(&conn, &b).unwrap();

        let notice = send_notice(
            &config,
            request(vec![a.id, b.id, "ghost".into()]),
            Some("/uploads/agenda.pdf".into()),
        )
        .unwrap();

        assert_eq!(notice.recipients, vec!["a@example.com"]);
        assert!(notice.html_body.contains("/uploads/agenda.pdf"));

        let path = config.outbox_dir.join(format!("notice-{}.json", notice.id));
        let stored: Notice = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(stored.subject, "AGM 2026");
        assert_eq!(stored.recipients.len(), 1);
    }
}
