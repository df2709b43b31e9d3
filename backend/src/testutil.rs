//! Shared fixtures for the service tests.

use common::model::loan::Loan;
use common::model::member::Member;
use common::requests::LoanRequest;
use uuid::Uuid;

pub(crate) fn member(membership_number: &str, name: &str, phone: &str, email: &str) -> Member {
    let mut m = Member {
        id: Uuid::new_v4().to_string(),
        ..Member::default()
    };
    m.personal_details.membership_number = membership_number.to_string();
    m.personal_details.name_of_member = name.to_string();
    m.personal_details.phone_no = phone.to_string();
    m.personal_details.email_id = email.to_string();
    m
}

pub(crate) fn loan(membership_number: &str) -> Loan {
    Loan {
        id: Uuid::new_v4().to_string(),
        membership_number: membership_number.to_string(),
        loan_date: "2024-01-01".to_string(),
        purpose_of_loan: "working capital".to_string(),
        loan_amount: "50000".to_string(),
        ..Loan::default()
    }
}

/// A valid `typeOfLoan = "Loan"` request for the given borrower.
pub(crate) fn loan_request(membership_number: &str) -> LoanRequest {
    LoanRequest {
        membership_number: membership_number.to_string(),
        type_of_loan: Some(common::model::loan::LoanType::Loan),
        loan_date: "2024-03-01".to_string(),
        purpose_of_loan: "house repair".to_string(),
        loan_amount: "120000".to_string(),
        ..LoanRequest::default()
    }
}
