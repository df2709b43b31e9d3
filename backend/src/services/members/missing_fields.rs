//! Missing-field audit.
//!
//! Compares a stored member document against the hand-maintained schema
//! template below and reports every empty leaf, both as a flat dotted-path
//! list and as a nested object holding the template default at each missing
//! leaf. Empty string, null and absent are all treated as missing; nested
//! objects are recursed, arrays are not.

use crate::config::Config;
use crate::db;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::audit::MissingFieldReport;
use common::requests::ApiResponse;
use serde_json::{json, Map, Value};

/// The schema template: one default per auditable leaf. Kept by hand in step
/// with the member model; photo slots count as auditable so an un-uploaded
/// document shows up in the report.
pub(crate) fn member_template() -> Value {
    json!({
        "personalDetails": {
            "membershipNumber": "",
            "nameOfMember": "",
            "nameOfFather": "",
            "dateOfBirth": "",
            "membershipDate": "",
            "phoneNo": "",
            "emailId": "",
            "minor": false
        },
        "addressDetails": {
            "permanentAddress": {
                "areaStreetSector": "",
                "cityVillageTown": "",
                "state": "",
                "pincode": ""
            },
            "permanentAddressBillPhoto": "",
            "currentResidentalBillPhoto": ""
        },
        "familyDetails": {
            "spouseName": "",
            "motherName": "",
            "numberOfDependents": ""
        },
        "referenceDetails": {
            "nameOfReference": "",
            "membershipNumber": "",
            "phoneNo": ""
        },
        "documents": {
            "panNo": "",
            "aadhaarNo": "",
            "passportSize": "",
            "panNoPhoto": "",
            "aadhaarNoPhoto": "",
            "rationCardPhoto": "",
            "drivingLicensePhoto": "",
            "voterIdPhoto": "",
            "passportNoPhoto": ""
        },
        "professionalDetails": {
            "occupation": "",
            "organisation": "",
            "designation": "",
            "annualIncome": ""
        },
        "bankDetails": {
            "bankName": "",
            "branchName": "",
            "accountNumber": "",
            "ifscCode": "",
            "accountHolderName": ""
        }
    })
}

pub(crate) async fn process(config: web::Data<Config>, id: web::Path<String>) -> impl Responder {
    match audit_member(&config, &id) {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::data(report)),
        Err(e) => e.error_response(),
    }
}

fn audit_member(config: &Config, id: &str) -> Result<MissingFieldReport, ApiError> {
    let conn = db::open(&config.db_path)?;
    let member = db::member_by_id(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;
    let doc = serde_json::to_value(&member)?;
    Ok(audit(&doc, &member_template()))
}

/// Diffs `doc` against `template`, collecting missing leaves.
pub(crate) fn audit(doc: &Value, template: &Value) -> MissingFieldReport {
    let mut missing = Vec::new();
    let mut detailed = Map::new();
    if let (Some(template), doc) = (template.as_object(), doc.as_object()) {
        walk(String::new(), template, doc, &mut missing, &mut detailed);
    }
    MissingFieldReport {
        missing_fields: missing,
        detailed: Value::Object(detailed),
    }
}

fn walk(
    prefix: String,
    template: &Map<String, Value>,
    doc: Option<&Map<String, Value>>,
    missing: &mut Vec<String>,
    detailed: &mut Map<String, Value>,
) {
    for (key, default) in template {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let value = doc.and_then(|d| d.get(key));

        match default {
            Value::Object(section) => {
                let mut nested = Map::new();
                walk(
                    path,
                    section,
                    value.and_then(Value::as_object),
                    missing,
                    &mut nested,
                );
                if !nested.is_empty() {
                    detailed.insert(key.clone(), Value::Object(nested));
                }
            }
            // arrays are not audited
            Value::Array(_) => {}
            _ => {
                let is_missing = match value {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.is_empty(),
                    Some(_) => false,
                };
                if is_missing {
                    missing.push(path);
                    detailed.insert(key.clone(), default.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a document filled at every template leaf.
    fn fully_populated(template: &Value) -> Value {
        match template {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), fully_populated(v)))
                    .collect(),
            ),
            Value::Bool(_) => Value::Bool(true),
            _ => Value::String("x".to_string()),
        }
    }

    #[test]
    fn empty_phone_is_reported_flat_and_nested() {
        let mut doc = fully_populated(&member_template());
        doc["personalDetails"]["phoneNo"] = Value::String(String::new());

        let report = audit(&doc, &member_template());
        assert_eq!(report.missing_fields, vec!["personalDetails.phoneNo"]);
        assert_eq!(
            report.detailed,
            json!({ "personalDetails": { "phoneNo": "" } })
        );
    }

    #[test]
    fn fully_populated_member_yields_empty_report() {
        let doc = fully_populated(&member_template());
        let report = audit(&doc, &member_template());
        assert!(report.missing_fields.is_empty());
        assert_eq!(report.detailed, json!({}));
    }

    #[test]
    fn absent_sections_report_every_leaf() {
        let report = audit(&json!({}), &json!({"bankDetails": {"bankName": "", "ifscCode": ""}}));
        assert_eq!(
            report.missing_fields,
            vec!["bankDetails.bankName", "bankDetails.ifscCode"]
        );
        assert_eq!(
            report.detailed,
            json!({"bankDetails": {"bankName": "", "ifscCode": ""}})
        );
    }

    #[test]
    fn null_and_false_bool_behave_as_specified() {
        let doc = json!({"personalDetails": {"minor": false, "phoneNo": null}});
        let tmpl = json!({"personalDetails": {"minor": false, "phoneNo": ""}});
        let report = audit(&doc, &tmpl);
        // false is a present value; null is missing
        assert_eq!(report.missing_fields, vec!["personalDetails.phoneNo"]);
    }
}
