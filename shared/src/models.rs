use serde::{Serialize, Deserialize};
use time::OffsetDateTime;

use crate::validation::TRI_STATE_ANY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchStep {
    #[default]
    Count,
    Full,
}

// Tri-state filters use 0 = any, 1 = without, 2 = with.
// All criteria fields default to empty so the client may omit them;
// `step` is required because it decides the response shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub step: SearchStep,
    #[serde(default)]
    pub company_city: String,
    #[serde(default)]
    pub company_post_code: String,
    #[serde(default)]
    pub company_countries: Vec<String>,
    #[serde(default)]
    pub company_industries: Vec<String>,
    #[serde(default)]
    pub company_sizes: Vec<String>,
    #[serde(default)]
    pub company_types: Vec<String>,
    #[serde(default)]
    pub company_has_phone: i32,
    #[serde(default)]
    pub company_has_email: i32,
    #[serde(default)]
    pub company_domains: Vec<String>,
    #[serde(default)]
    pub excluded_company_domains: Vec<String>,
    #[serde(default)]
    pub contact_city: String,
    #[serde(default)]
    pub contact_post_code: String,
    #[serde(default)]
    pub contact_countries: Vec<String>,
    #[serde(default)]
    pub contact_industries: Vec<String>,
    #[serde(default)]
    pub contact_job_title: String,
    #[serde(default)]
    pub contact_functions: Vec<String>,
    #[serde(default)]
    pub contact_job_levels: Vec<String>,
    #[serde(default)]
    pub contact_has_email: i32,
    #[serde(default)]
    pub contact_remote_accounts: Vec<String>,
    #[serde(default)]
    pub excluded_contact_remote_accounts: Vec<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.company_city.is_empty()
            && self.company_post_code.is_empty()
            && self.company_countries.is_empty()
            && self.company_industries.is_empty()
            && self.company_sizes.is_empty()
            && self.company_types.is_empty()
            && self.company_has_phone == TRI_STATE_ANY
            && self.company_has_email == TRI_STATE_ANY
            && self.company_domains.is_empty()
            && self.excluded_company_domains.is_empty()
            && self.contact_city.is_empty()
            && self.contact_post_code.is_empty()
            && self.contact_countries.is_empty()
            && self.contact_industries.is_empty()
            && self.contact_job_title.is_empty()
            && self.contact_functions.is_empty()
            && self.contact_job_levels.is_empty()
            && self.contact_has_email == TRI_STATE_ANY
            && self.contact_remote_accounts.is_empty()
            && self.excluded_contact_remote_accounts.is_empty()
    }
}

// One grouped search result row. Every nullable column is serialized as an
// explicit `null` so the client sees all 43 keys on every row. The two
// social-profile keys spell URL in capitals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompanyContactRow {
    pub comp_id: String,
    pub comp_name: Option<String>,
    pub comp_domain: Option<String>,
    pub comp_website: Option<String>,
    pub comp_telephone: Option<String>,
    pub comp_fax_number: Option<String>,
    pub comp_size: Option<String>,
    pub comp_founded: Option<String>,
    pub comp_created_on: Option<String>,
    pub comp_updated_on: Option<String>,
    pub comp_street_number: Option<String>,
    pub comp_route: Option<String>,
    pub comp_postal_code: Option<String>,
    pub comp_locality: Option<String>,
    pub comp_administrative_area_level_2: Option<String>,
    pub comp_administrative_area_level_1: Option<String>,
    pub comp_country: Option<String>,
    pub comp_email: Option<String>,
    #[serde(rename = "compSocProfURL")]
    pub comp_soc_prof_url: Option<String>,
    pub comp_type: Option<String>,
    pub comp_industry: Option<String>,
    pub cont_id: Option<String>,
    pub cont_gender: Option<String>,
    pub cont_first_name: Option<String>,
    pub cont_last_name: Option<String>,
    pub cont_job_title: Option<String>,
    pub cont_telephone: Option<String>,
    pub cont_created_on: Option<String>,
    pub cont_updated_on: Option<String>,
    pub cont_street_number: Option<String>,
    pub cont_route: Option<String>,
    pub cont_postal_code: Option<String>,
    pub cont_locality: Option<String>,
    pub cont_administrative_area_level_2: Option<String>,
    pub cont_administrative_area_level_1: Option<String>,
    pub cont_country: Option<String>,
    pub cont_job_function: Option<String>,
    pub cont_job_level: Option<String>,
    pub cont_email: Option<String>,
    pub cont_email_status: Option<String>,
    pub cont_email_created_on: Option<String>,
    #[serde(rename = "contSocProfURL")]
    pub cont_soc_prof_url: Option<String>,
    pub cont_industry: Option<String>,
}

// Verification results keep the legacy wire format of the
// email_checked_by_john table: lowercase single-word keys, optional
// fields omitted entirely when absent, timestamps in RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckedEmail {
    pub id: i32,
    #[serde(rename = "missionnumber")]
    pub mission_number: i32,
    #[serde(rename = "firstname", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastname", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "emaildomain", default, skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
    pub email: String,
    #[serde(rename = "contactfromc2lid", default, skip_serializing_if = "Option::is_none")]
    pub contact_from_c2l_id: Option<i32>,
    #[serde(rename = "qevresult", default, skip_serializing_if = "Option::is_none")]
    pub qev_result: Option<String>,
    #[serde(rename = "qevreason", default, skip_serializing_if = "Option::is_none")]
    pub qev_reason: Option<String>,
    #[serde(rename = "qevdisposable", default, skip_serializing_if = "Option::is_none")]
    pub qev_disposable: Option<bool>,
    #[serde(rename = "qevacceptall", default, skip_serializing_if = "Option::is_none")]
    pub qev_accept_all: Option<bool>,
    #[serde(rename = "qevrole", default, skip_serializing_if = "Option::is_none")]
    pub qev_role: Option<bool>,
    #[serde(rename = "qevfree", default, skip_serializing_if = "Option::is_none")]
    pub qev_free: Option<bool>,
    #[serde(rename = "qevsafetosend", default, skip_serializing_if = "Option::is_none")]
    pub qev_safe_to_send: Option<bool>,
    #[serde(rename = "qevdidyoumean", default, skip_serializing_if = "Option::is_none")]
    pub qev_did_you_mean: Option<String>,
    #[serde(rename = "qevsuccess", default, skip_serializing_if = "Option::is_none")]
    pub qev_success: Option<bool>,
    #[serde(rename = "qevmessage", default, skip_serializing_if = "Option::is_none")]
    pub qev_message: Option<String>,
    #[serde(
        rename = "apicheckdatetime",
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_check_datetime: Option<OffsetDateTime>,
    #[serde(
        rename = "manualemailsendingdatetime",
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_email_sending_datetime: Option<OffsetDateTime>,
    #[serde(
        rename = "manualemailerrorresponsedatetime",
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_email_error_response_datetime: Option<OffsetDateTime>,
    #[serde(rename = "contactid")]
    pub contact_id: i32,
}

impl CheckedEmail {
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryRow {
    pub country_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndustryRow {
    pub industry_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizeRow {
    pub size_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeRow {
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobFunctionRow {
    pub function_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobLevelRow {
    pub level_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorMessage {
    pub error: String,
    pub status: u16,
}

#[cfg(feature = "backend")]
mod db {
    use sqlx::postgres::PgRow;
    use sqlx::{FromRow, Row};

    use super::{CheckedEmail, CompanyContactRow};

    // Decoded by position: the search SELECT casts every scalar column to
    // text, so the 43 columns arrive in struct-field order as nullable text.
    impl<'r> FromRow<'r, PgRow> for CompanyContactRow {
        fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                comp_id: row.try_get(0)?,
                comp_name: row.try_get(1)?,
                comp_domain: row.try_get(2)?,
                comp_website: row.try_get(3)?,
                comp_telephone: row.try_get(4)?,
                comp_fax_number: row.try_get(5)?,
                comp_size: row.try_get(6)?,
                comp_founded: row.try_get(7)?,
                comp_created_on: row.try_get(8)?,
                comp_updated_on: row.try_get(9)?,
                comp_street_number: row.try_get(10)?,
                comp_route: row.try_get(11)?,
                comp_postal_code: row.try_get(12)?,
                comp_locality: row.try_get(13)?,
                comp_administrative_area_level_2: row.try_get(14)?,
                comp_administrative_area_level_1: row.try_get(15)?,
                comp_country: row.try_get(16)?,
                comp_email: row.try_get(17)?,
                comp_soc_prof_url: row.try_get(18)?,
                comp_type: row.try_get(19)?,
                comp_industry: row.try_get(20)?,
                cont_id: row.try_get(21)?,
                cont_gender: row.try_get(22)?,
                cont_first_name: row.try_get(23)?,
                cont_last_name: row.try_get(24)?,
                cont_job_title: row.try_get(25)?,
                cont_telephone: row.try_get(26)?,
                cont_created_on: row.try_get(27)?,
                cont_updated_on: row.try_get(28)?,
                cont_street_number: row.try_get(29)?,
                cont_route: row.try_get(30)?,
                cont_postal_code: row.try_get(31)?,
                cont_locality: row.try_get(32)?,
                cont_administrative_area_level_2: row.try_get(33)?,
                cont_administrative_area_level_1: row.try_get(34)?,
                cont_country: row.try_get(35)?,
                cont_job_function: row.try_get(36)?,
                cont_job_level: row.try_get(37)?,
                cont_email: row.try_get(38)?,
                cont_email_status: row.try_get(39)?,
                cont_email_created_on: row.try_get(40)?,
                cont_soc_prof_url: row.try_get(41)?,
                cont_industry: row.try_get(42)?,
            })
        }
    }

    // The email_checked_by_john table is read with SELECT *; column order
    // matches field order here.
    impl<'r> FromRow<'r, PgRow> for CheckedEmail {
        fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get(0)?,
                mission_number: row.try_get(1)?,
                first_name: row.try_get(2)?,
                last_name: row.try_get(3)?,
                email_domain: row.try_get(4)?,
                email: row.try_get(5)?,
                contact_from_c2l_id: row.try_get(6)?,
                qev_result: row.try_get(7)?,
                qev_reason: row.try_get(8)?,
                qev_disposable: row.try_get(9)?,
                qev_accept_all: row.try_get(10)?,
                qev_role: row.try_get(11)?,
                qev_free: row.try_get(12)?,
                qev_safe_to_send: row.try_get(13)?,
                qev_did_you_mean: row.try_get(14)?,
                qev_success: row.try_get(15)?,
                qev_message: row.try_get(16)?,
                api_check_datetime: row.try_get(17)?,
                manual_email_sending_datetime: row.try_get(18)?,
                manual_email_error_response_datetime: row.try_get(19)?,
                contact_id: row.try_get(20)?,
            })
        }
    }
}
