use crate::models::SearchCriteria;

pub const TRI_STATE_ANY: i32 = 0;
pub const TRI_STATE_WITHOUT: i32 = 1;
pub const TRI_STATE_WITH: i32 = 2;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("All search criteria are empty.")]
    EmptyCriteria,
    #[error("{0} should be text.")]
    NumericText(&'static str),
    #[error("Contact Remote Accounts ids should be integers.")]
    NonIntegerAccountId,
    #[error("{0} should be integer: 1, 2, or 0.")]
    TriStateOutOfRange(&'static str),
}

// Run before normalization so the user sees the value they typed rejected,
// not a trimmed version of it. The UI surfaces these messages verbatim.
pub fn validate_search_criteria(criteria: &SearchCriteria) -> Result<(), ValidationError> {
    if criteria.is_empty() { return Err(ValidationError::EmptyCriteria); }

    reject_numeric(&criteria.company_city, "Company City")?;
    reject_numeric(&criteria.contact_city, "Contact City")?;
    // Not a typo: the job title message has always read "Company".
    reject_numeric(&criteria.contact_job_title, "Company Job Title")?;

    reject_numeric_elements(&criteria.company_countries, "Company Countries")?;
    reject_numeric_elements(&criteria.company_industries, "Company Industries")?;
    reject_numeric_elements(&criteria.company_sizes, "Company Sizes")?;
    reject_numeric_elements(&criteria.company_types, "Company Types")?;
    reject_numeric_elements(&criteria.contact_countries, "Contact Countries")?;
    reject_numeric_elements(&criteria.contact_industries, "Contact Industries")?;
    reject_numeric_elements(&criteria.contact_functions, "Contact Functions")?;
    reject_numeric_elements(&criteria.contact_job_levels, "Contact Job Levels")?;

    let account_ids = criteria
        .contact_remote_accounts
        .iter()
        .chain(&criteria.excluded_contact_remote_accounts);
    for id in account_ids {
        if id.parse::<i64>().is_err() { return Err(ValidationError::NonIntegerAccountId); }
    }

    check_tri_state(criteria.company_has_phone, "Company Has Phone")?;
    check_tri_state(criteria.company_has_email, "Company Has Email")?;
    check_tri_state(criteria.contact_has_email, "Contact Has Email")?;

    Ok(())
}

// Trims the typed-in fields only; dropdown-sourced arrays never carry
// stray whitespace. Case folding happens in SQL with UPPER().
pub fn normalize_search_criteria(criteria: &mut SearchCriteria) {
    trim_in_place(&mut criteria.company_city);
    trim_in_place(&mut criteria.company_post_code);
    trim_each(&mut criteria.company_domains);
    trim_each(&mut criteria.excluded_company_domains);
    trim_in_place(&mut criteria.contact_city);
    trim_in_place(&mut criteria.contact_post_code);
    trim_in_place(&mut criteria.contact_job_title);
    trim_each(&mut criteria.contact_remote_accounts);
    trim_each(&mut criteria.excluded_contact_remote_accounts);
}

fn reject_numeric(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.parse::<i64>().is_ok() { return Err(ValidationError::NumericText(field)); }
    Ok(())
}

fn reject_numeric_elements(values: &[String], field: &'static str) -> Result<(), ValidationError> {
    for value in values {
        reject_numeric(value, field)?;
    }
    Ok(())
}

fn check_tri_state(value: i32, field: &'static str) -> Result<(), ValidationError> {
    if !(TRI_STATE_ANY..=TRI_STATE_WITH).contains(&value) {
        return Err(ValidationError::TriStateOutOfRange(field));
    }
    Ok(())
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_each(values: &mut [String]) {
    for value in values {
        trim_in_place(value);
    }
}
