use serde::{Deserialize, Serialize};

/// One society member, stored as a single document.
///
/// Every section defaults to empty so that partial documents (legacy imports,
/// incomplete registrations) deserialize without errors. The membership number
/// inside `personalDetails` is the unique business key; `id` is the storage key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub personal_details: PersonalDetails,
    pub address_details: AddressDetails,
    pub family_details: FamilyDetails,
    pub reference_details: ReferenceDetails,
    /// Guarantees this member has given in other societies.
    pub guarantee_details: Vec<GuaranteeDetail>,
    pub documents: Documents,
    pub professional_details: ProfessionalDetails,
    pub bank_details: MemberBankDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub membership_number: String,
    pub name_of_member: String,
    pub name_of_father: String,
    pub date_of_birth: String,
    pub membership_date: String,
    pub phone_no: String,
    pub email_id: String,
    pub minor: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressDetails {
    pub permanent_address: Address,
    /// Address history, oldest first.
    pub previous_current_address: Vec<Address>,
    /// Photo URL slots, filled by the upload pipeline.
    pub permanent_address_bill_photo: String,
    pub current_residental_bill_photo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub area_street_sector: String,
    pub city_village_town: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyDetails {
    pub spouse_name: String,
    pub mother_name: String,
    pub number_of_dependents: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceDetails {
    pub name_of_reference: String,
    pub membership_number: String,
    pub phone_no: String,
}

/// A guarantee given in another society, recorded for reference only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuaranteeDetail {
    pub society_name: String,
    pub member_name: String,
    pub membership_number: String,
    pub amount: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Documents {
    pub pan_no: String,
    pub aadhaar_no: String,
    pub passport_size: String,
    pub pan_no_photo: String,
    pub aadhaar_no_photo: String,
    pub ration_card_photo: String,
    pub driving_license_photo: String,
    pub voter_id_photo: String,
    pub passport_no_photo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfessionalDetails {
    pub occupation: String,
    pub organisation: String,
    pub designation: String,
    pub annual_income: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberBankDetails {
    pub bank_name: String,
    pub branch_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_deserializes_with_defaults() {
        let doc = r#"{
            "personalDetails": {
                "membershipNumber": "A-101",
                "nameOfMember": "Asha Verma"
            }
        }"#;
        let member: Member = serde_json::from_str(doc).unwrap();
        assert_eq!(member.personal_details.membership_number, "A-101");
        assert_eq!(member.personal_details.name_of_member, "Asha Verma");
        assert_eq!(member.personal_details.phone_no, "");
        assert!(!member.personal_details.minor);
        assert!(member.guarantee_details.is_empty());
        assert_eq!(member.documents.pan_no, "");
    }

    #[test]
    fn sections_serialize_camel_case() {
        let member = Member::default();
        let value = serde_json::to_value(&member).unwrap();
        assert!(value.get("personalDetails").is_some());
        assert!(value.get("addressDetails").is_some());
        assert!(
            value["addressDetails"]
                .get("currentResidentalBillPhoto")
                .is_some()
        );
    }
}
