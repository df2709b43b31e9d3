use crate::model::pdc::PdcDetails;
use serde::{Deserialize, Serialize};

/// The three loan variants, each with its own required fields:
/// `Loan`/`LAP` need loan date, purpose and amount, `LAF` needs the
/// LAF date plus FDR amount and scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    #[default]
    Loan,
    #[serde(rename = "LAF")]
    Laf,
    #[serde(rename = "LAP")]
    Lap,
}

/// One loan document.
///
/// The borrower is identified twice: `memberId` is an optional reference that
/// may be absent for legacy entries, `membershipNumber` is the durable join
/// key and always set. `suretyGiven` holds identity snapshots of this loan's
/// guarantors; `suretyTaken` is filled in by the synchronizer when this
/// loan's owner stands surety on somebody else's loan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub member_id: Option<String>,
    pub membership_number: String,
    pub type_of_loan: LoanType,
    pub loan_date: String,
    pub purpose_of_loan: String,
    pub loan_amount: String,
    pub laf_date: String,
    pub fdr_amount: String,
    pub fdr_schema: String,
    pub pdc_details: Vec<PdcDetails>,
    pub bank_details: LoanBankDetails,
    pub surety_given: Vec<SuretyParty>,
    pub surety_taken: Vec<SuretyParty>,
}

impl Loan {
    /// The date that identifies the loan in relationship views: the LAF date
    /// for LAF entries, the loan date otherwise.
    pub fn context_date(&self) -> &str {
        match self.type_of_loan {
            LoanType::Laf => &self.laf_date,
            LoanType::Loan | LoanType::Lap => &self.loan_date,
        }
    }
}

/// An identity snapshot of one party in a guarantee relation, taken at loan
/// creation. Display fields here may go stale; readers that need current
/// values re-resolve against the member store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuretyParty {
    pub member_id: Option<String>,
    pub member_name: String,
    pub membership_number: String,
    pub mobile_number: String,
    pub pdc_details: Vec<PdcDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanBankDetails {
    pub bank_name: String,
    pub branch_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_name_holder: String,
}

/// Current borrower display fields attached to loan reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerSummary {
    pub name_of_member: String,
    pub membership_number: String,
    pub phone_no: String,
}

/// A loan document together with the borrower's resolved display fields.
/// `borrower` is `None` when the membership number no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanWithBorrower {
    #[serde(flatten)]
    pub loan: Loan,
    pub borrower: Option<BorrowerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_type_uses_wire_names() {
        assert_eq!(serde_json::to_string(&LoanType::Loan).unwrap(), "\"Loan\"");
        assert_eq!(serde_json::to_string(&LoanType::Laf).unwrap(), "\"LAF\"");
        assert_eq!(serde_json::to_string(&LoanType::Lap).unwrap(), "\"LAP\"");
        let parsed: LoanType = serde_json::from_str("\"LAF\"").unwrap();
        assert_eq!(parsed, LoanType::Laf);
    }

    #[test]
    fn context_date_picks_laf_date_for_laf() {
        let loan = Loan {
            type_of_loan: LoanType::Laf,
            laf_date: "2024-01-05".into(),
            loan_date: "ignored".into(),
            ..Loan::default()
        };
        assert_eq!(loan.context_date(), "2024-01-05");

        let loan = Loan {
            type_of_loan: LoanType::Lap,
            loan_date: "2024-02-01".into(),
            ..Loan::default()
        };
        assert_eq!(loan.context_date(), "2024-02-01");
    }
}
