//! Shared multipart reader for member create/update.
//!
//! The payload carries one `json` part with the member document plus any
//! number of file parts named after the photo slots below. Files are stored
//! as they stream in; a storage failure leaves the slot empty instead of
//! failing the whole request.

use crate::error::ApiError;
use crate::storage;
use actix_multipart::Multipart;
use common::model::member::Member;
use futures_util::StreamExt;
use log::warn;
use std::path::Path;

/// Multipart field names that map to photo URL slots in the member document.
pub(crate) const PHOTO_FIELDS: [&str; 9] = [
    "passportSize",
    "panNoPhoto",
    "aadhaarNoPhoto",
    "rationCardPhoto",
    "drivingLicensePhoto",
    "voterIdPhoto",
    "passportNoPhoto",
    "permanentAddressBillPhoto",
    "currentResidentalBillPhoto",
];

pub(crate) fn photo_slot_mut<'a>(member: &'a mut Member, slot: &str) -> Option<&'a mut String> {
    match slot {
        "passportSize" => Some(&mut member.documents.passport_size),
        "panNoPhoto" => Some(&mut member.documents.pan_no_photo),
        "aadhaarNoPhoto" => Some(&mut member.documents.aadhaar_no_photo),
        "rationCardPhoto" => Some(&mut member.documents.ration_card_photo),
        "drivingLicensePhoto" => Some(&mut member.documents.driving_license_photo),
        "voterIdPhoto" => Some(&mut member.documents.voter_id_photo),
        "passportNoPhoto" => Some(&mut member.documents.passport_no_photo),
        "permanentAddressBillPhoto" => {
            Some(&mut member.address_details.permanent_address_bill_photo)
        }
        "currentResidentalBillPhoto" => {
            Some(&mut member.address_details.current_residental_bill_photo)
        }
        _ => None,
    }
}

/// Keeps previously stored photo URLs when an update carries no replacement.
pub(crate) fn carry_over_photos(incoming: &mut Member, existing: &Member) {
    let mut old = existing.clone();
    for slot in PHOTO_FIELDS {
        let old_url = photo_slot_mut(&mut old, slot)
            .map(|s| s.clone())
            .unwrap_or_default();
        if let Some(new_slot) = photo_slot_mut(incoming, slot) {
            if new_slot.is_empty() {
                *new_slot = old_url;
            }
        }
    }
}

/// Reads the member multipart payload: the `json` part is deserialized, file
/// parts in [`PHOTO_FIELDS`] are persisted and their URLs applied to the
/// document. Part order does not matter; unknown parts are ignored.
pub(crate) async fn read_member_upload(
    mut payload: Multipart,
    uploads_dir: &Path,
) -> Result<Member, ApiError> {
    let mut member: Option<Member> = None;
    let mut photos: Vec<(String, String)> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| ApiError::Validation(format!("invalid multipart payload: {e}")))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("json") => {
                let bytes = collect_field(&mut field).await?;
                member = Some(
                    serde_json::from_slice(&bytes)
                        .map_err(|e| ApiError::Validation(format!("invalid member JSON: {e}")))?,
                );
            }
            Some(slot) if PHOTO_FIELDS.contains(&slot) => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let slot = slot.to_string();
                let bytes = collect_field(&mut field).await?;
                let url = match storage::store_upload(uploads_dir, &filename, &bytes) {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("failed to store {slot} upload: {e}");
                        String::new()
                    }
                };
                photos.push((slot, url));
            }
            _ => {}
        }
    }

    let mut member = member
        .ok_or_else(|| ApiError::Validation("Missing json part in member payload".to_string()))?;
    for (slot, url) in photos {
        if let Some(target) = photo_slot_mut(&mut member, &slot) {
            *target = url;
        }
    }
    Ok(member)
}

async fn collect_field(field: &mut actix_multipart::Field) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| ApiError::Validation(format!("invalid multipart payload: {e}")))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn every_photo_field_has_a_slot() {
        let mut member = Member::default();
        for slot in PHOTO_FIELDS {
            assert!(photo_slot_mut(&mut member, slot).is_some(), "{slot}");
        }
        assert!(photo_slot_mut(&mut member, "noSuchSlot").is_none());
    }

    #[test]
    fn carry_over_fills_only_empty_slots() {
        let mut existing = testutil::member("M-1", "A", "", "");
        existing.documents.pan_no_photo = "/uploads/old-pan.jpg".into();
        existing.documents.passport_size = "/uploads/old-passport.jpg".into();

        let mut incoming = testutil::member("M-1", "A", "", "");
        incoming.documents.passport_size = "/uploads/new-passport.jpg".into();

        carry_over_photos(&mut incoming, &existing);
        assert_eq!(incoming.documents.pan_no_photo, "/uploads/old-pan.jpg");
        assert_eq!(incoming.documents.passport_size, "/uploads/new-passport.jpg");
    }
}
