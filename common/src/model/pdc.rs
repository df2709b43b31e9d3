use serde::{Deserialize, Serialize};

/// A post-dated-cheque record, embedded in loans and surety entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PdcDetails {
    pub bank_name: String,
    pub branch_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub number_of_cheques: u32,
    pub cheque_series: String,
    pub series_date: String,
}
