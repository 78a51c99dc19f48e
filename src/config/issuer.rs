use serde::Deserialize;
use std::env;

/// Business details printed on every invoice.
///
/// These are static branding and payment instructions, never derived from an
/// invoice or client record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IssuerProfile {
    pub business_name: String,
    pub company_id: String,
    pub address: String,
    pub phone: String,
    /// Printed in the bill-to block when the client has no address
    pub default_jurisdiction: String,
    pub thank_you: String,
    pub contact_line: String,
    pub payment_terms: String,
    pub bank: BankDetails,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BankDetails {
    pub account_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub branch: String,
    pub ifsc: String,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        Self {
            business_name: "AXIOM AI".to_string(),
            company_id: "AXIOMAI".to_string(),
            address: "Bangalore, Karnataka, India".to_string(),
            phone: "9886709463".to_string(),
            default_jurisdiction: "India".to_string(),
            thank_you: "Thank you for your business!".to_string(),
            contact_line: "For queries, contact AXIOM AI".to_string(),
            payment_terms: "Due upon receipt".to_string(),
            bank: BankDetails {
                account_name: "AXIOM AI".to_string(),
                bank_name: "ICICI Bank".to_string(),
                account_number: "10095001122".to_string(),
                branch: "Banashankari 3rd Stage".to_string(),
                ifsc: "ICIC000109".to_string(),
            },
        }
    }
}

impl IssuerProfile {
    /// Defaults overridden field by field from `ISSUER_*` variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |key: &str, fallback: String| env::var(key).unwrap_or(fallback);

        Self {
            business_name: var("ISSUER_BUSINESS_NAME", defaults.business_name),
            company_id: var("ISSUER_COMPANY_ID", defaults.company_id),
            address: var("ISSUER_ADDRESS", defaults.address),
            phone: var("ISSUER_PHONE", defaults.phone),
            default_jurisdiction: var("ISSUER_DEFAULT_JURISDICTION", defaults.default_jurisdiction),
            thank_you: var("ISSUER_THANK_YOU", defaults.thank_you),
            contact_line: var("ISSUER_CONTACT_LINE", defaults.contact_line),
            payment_terms: var("ISSUER_PAYMENT_TERMS", defaults.payment_terms),
            bank: BankDetails {
                account_name: var("ISSUER_BANK_ACCOUNT_NAME", defaults.bank.account_name),
                bank_name: var("ISSUER_BANK_NAME", defaults.bank.bank_name),
                account_number: var("ISSUER_BANK_ACCOUNT_NUMBER", defaults.bank.account_number),
                branch: var("ISSUER_BANK_BRANCH", defaults.bank.branch),
                ifsc: var("ISSUER_BANK_IFSC", defaults.bank.ifsc),
            },
        }
    }
}
