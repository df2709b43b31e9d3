use crate::model::loan::{LoanType, SuretyParty};
use serde::{Deserialize, Serialize};

/// One guarantee relation row: a party snapshot flattened together with the
/// context of the loan it belongs to. Used both for "my guarantors" rows and
/// for flattened surety summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuretyEntry {
    pub loan_id: String,
    #[serde(flatten)]
    pub party: SuretyParty,
    pub loan_amount: String,
    pub type_of_loan: LoanType,
    pub loan_date: String,
}

/// A loan someone else owns, on which the searched member stands surety.
/// Borrower display fields are re-resolved from the member store at read
/// time rather than taken from the loan's embedded snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedLoan {
    pub loan_id: String,
    pub borrower_name: String,
    pub borrower_membership_number: String,
    pub borrower_phone: String,
    pub loan_amount: String,
    pub type_of_loan: LoanType,
    pub loan_date: String,
}

/// The two relationship views computed per member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuarantorRelations {
    pub my_guarantors: Vec<SuretyEntry>,
    pub for_whom_i_am_guarantor: Vec<GuaranteedLoan>,
}

/// Flattened given/taken surety lists across all of one member's loans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuretySummary {
    pub surety_given: Vec<SuretyEntry>,
    pub surety_taken: Vec<SuretyEntry>,
}
