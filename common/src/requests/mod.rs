use crate::model::loan::{LoanBankDetails, LoanType};
use crate::model::pdc::PdcDetails;
use serde::{Deserialize, Serialize};

/// The JSON envelope every endpoint answers with:
/// `{"success": bool, "message"?: ..., "count"?: ..., "data"?: ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: Some(data),
        }
    }

    /// List response carrying an explicit element count.
    pub fn list(data: Vec<T>) -> ApiResponse<Vec<T>> {
        ApiResponse {
            success: true,
            message: None,
            count: Some(data.len()),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Success response with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

/// Reference to a guarantor in a loan create/update payload. Only the
/// membership number and that guarantor's own cheques are supplied; the rest
/// of the identity snapshot is resolved against the member store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuretyRef {
    pub membership_number: String,
    pub pdc_details: Vec<PdcDetails>,
}

/// Payload for `POST /api/loans` and `PUT /api/loans/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanRequest {
    pub membership_number: String,
    pub type_of_loan: Option<LoanType>,
    pub loan_date: String,
    pub purpose_of_loan: String,
    pub loan_amount: String,
    pub laf_date: String,
    pub fdr_amount: String,
    pub fdr_schema: String,
    pub pdc_details: Vec<PdcDetails>,
    pub bank_details: LoanBankDetails,
    pub surety_given: Vec<SuretyRef>,
    pub surety_taken: Vec<SuretyRef>,
}

/// JSON part of `POST /api/notices/send`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoticeRequest {
    pub member_ids: Vec<String>,
    pub subject: String,
    pub message: String,
}

/// Query string of `GET /api/loans/guarantor-relations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationsQuery {
    pub search: Option<String>,
}

/// Outcome of a bulk member import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}
