#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::models::{
        CheckedEmail, CompanyContactRow, CountryRow, JobFunctionRow, JobLevelRow, SearchCriteria,
        SearchStep,
    };
    use crate::validation::{
        normalize_search_criteria, validate_search_criteria, ValidationError, TRI_STATE_WITH,
    };

    fn criteria_with(f: impl FnOnce(&mut SearchCriteria)) -> SearchCriteria {
        let mut criteria = SearchCriteria::default();
        f(&mut criteria);
        criteria
    }

    fn checked_email() -> CheckedEmail {
        CheckedEmail {
            id: 7,
            mission_number: 42,
            first_name: None,
            last_name: None,
            email_domain: None,
            email: "jane@corp.example".to_string(),
            contact_from_c2l_id: None,
            qev_result: None,
            qev_reason: None,
            qev_disposable: None,
            qev_accept_all: None,
            qev_role: None,
            qev_free: None,
            qev_safe_to_send: None,
            qev_did_you_mean: None,
            qev_success: None,
            qev_message: None,
            api_check_datetime: None,
            manual_email_sending_datetime: None,
            manual_email_error_response_datetime: None,
            contact_id: 99,
        }
    }

    #[test]
    fn test_criteria_keys_are_camel_case() {
        let criteria = criteria_with(|c| {
            c.step = SearchStep::Full;
            c.company_post_code = "75008".to_string();
            c.excluded_contact_remote_accounts = vec!["12".to_string()];
        });
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value["step"], "full");
        assert_eq!(value["companyPostCode"], "75008");
        assert_eq!(value["excludedContactRemoteAccounts"][0], "12");
    }

    #[test]
    fn test_criteria_fields_default_when_missing() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"step":"count","companyCity":"Lyon"}"#).unwrap();
        assert_eq!(criteria.step, SearchStep::Count);
        assert_eq!(criteria.company_city, "Lyon");
        assert!(criteria.company_countries.is_empty());
        assert_eq!(criteria.company_has_phone, 0);
    }

    #[test]
    fn test_step_is_required_and_closed() {
        assert!(serde_json::from_str::<SearchCriteria>(r#"{"companyCity":"Lyon"}"#).is_err());
        assert!(serde_json::from_str::<SearchCriteria>(r#"{"step":"export"}"#).is_err());
    }

    #[test]
    fn test_empty_criteria_rejected() {
        let err = validate_search_criteria(&SearchCriteria::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCriteria);
        assert_eq!(err.to_string(), "All search criteria are empty.");
    }

    #[test]
    fn test_single_criterion_is_enough() {
        let criteria = criteria_with(|c| c.company_has_phone = TRI_STATE_WITH);
        assert!(validate_search_criteria(&criteria).is_ok());
    }

    #[test]
    fn test_numeric_city_rejected() {
        let criteria = criteria_with(|c| c.company_city = "69001".to_string());
        let err = validate_search_criteria(&criteria).unwrap_err();
        assert_eq!(err.to_string(), "Company City should be text.");
    }

    #[test]
    fn test_job_title_message_says_company() {
        let criteria = criteria_with(|c| c.contact_job_title = "123".to_string());
        let err = validate_search_criteria(&criteria).unwrap_err();
        assert_eq!(err.to_string(), "Company Job Title should be text.");
    }

    #[test]
    fn test_numeric_array_element_rejected() {
        let criteria = criteria_with(|c| {
            c.contact_countries = vec!["France".to_string(), "42".to_string()];
        });
        let err = validate_search_criteria(&criteria).unwrap_err();
        assert_eq!(err.to_string(), "Contact Countries should be text.");
    }

    #[test]
    fn test_postcodes_and_domains_may_be_numeric() {
        let criteria = criteria_with(|c| {
            c.company_post_code = "75008".to_string();
            c.contact_post_code = "1010".to_string();
            c.company_domains = vec!["123-reg.example".to_string()];
        });
        assert!(validate_search_criteria(&criteria).is_ok());
    }

    #[test]
    fn test_remote_account_ids_must_be_integers() {
        let criteria = criteria_with(|c| {
            c.contact_remote_accounts = vec!["12".to_string(), "abc".to_string()];
        });
        let err = validate_search_criteria(&criteria).unwrap_err();
        assert_eq!(err, ValidationError::NonIntegerAccountId);
        assert_eq!(err.to_string(), "Contact Remote Accounts ids should be integers.");
    }

    #[test]
    fn test_untrimmed_account_id_is_rejected() {
        // Validation runs before normalization, so padding is not forgiven.
        let criteria = criteria_with(|c| {
            c.excluded_contact_remote_accounts = vec![" 12".to_string()];
        });
        assert!(validate_search_criteria(&criteria).is_err());
    }

    #[test]
    fn test_tri_state_bounds() {
        let criteria = criteria_with(|c| c.company_has_email = 3);
        let err = validate_search_criteria(&criteria).unwrap_err();
        assert_eq!(err.to_string(), "Company Has Email should be integer: 1, 2, or 0.");

        let criteria = criteria_with(|c| c.contact_has_email = -1);
        assert!(matches!(
            validate_search_criteria(&criteria),
            Err(ValidationError::TriStateOutOfRange("Contact Has Email"))
        ));
    }

    #[test]
    fn test_normalize_trims_typed_fields_only() {
        let mut criteria = criteria_with(|c| {
            c.company_city = "  Lyon ".to_string();
            c.company_domains = vec![" corp.example ".to_string()];
            c.contact_remote_accounts = vec![" 12 ".to_string()];
            c.contact_functions = vec![" CEO ".to_string()];
        });
        normalize_search_criteria(&mut criteria);
        assert_eq!(criteria.company_city, "Lyon");
        assert_eq!(criteria.company_domains, vec!["corp.example".to_string()]);
        assert_eq!(criteria.contact_remote_accounts, vec!["12".to_string()]);
        // Dropdown-sourced values pass through untouched.
        assert_eq!(criteria.contact_functions, vec![" CEO ".to_string()]);
    }

    #[test]
    fn test_result_row_serializes_all_keys_with_nulls() {
        let row = CompanyContactRow {
            comp_id: "17".to_string(),
            comp_name: Some("Acme".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&row).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 43);
        assert_eq!(value["compId"], "17");
        assert_eq!(value["compName"], "Acme");
        assert!(value["contEmail"].is_null());
        assert!(object.contains_key("compSocProfURL"));
        assert!(object.contains_key("contSocProfURL"));
        assert!(object.contains_key("compAdministrativeAreaLevel1"));
    }

    #[test]
    fn test_checked_email_omits_absent_fields() {
        let value = serde_json::to_value(checked_email()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["missionnumber"], 42);
        assert_eq!(value["contactid"], 99);
        assert!(!object.contains_key("firstname"));
        assert!(!object.contains_key("apicheckdatetime"));
    }

    #[test]
    fn test_checked_email_timestamps_are_rfc3339() {
        let mut email = checked_email();
        email.api_check_datetime = Some(OffsetDateTime::from_unix_timestamp(0).unwrap());
        let value = serde_json::to_value(&email).unwrap();
        assert_eq!(value["apicheckdatetime"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_checked_email_deserializes_sparse_json() {
        let email: CheckedEmail = serde_json::from_str(
            r#"{"id":1,"missionnumber":8,"email":"a@b.example","qevsafetosend":true,"contactid":3}"#,
        )
        .unwrap();
        assert_eq!(email.qev_safe_to_send, Some(true));
        assert_eq!(email.first_name, None);
        assert_eq!(email.mission_number, 8);
    }

    #[test]
    fn test_full_name_handles_missing_parts() {
        let mut email = checked_email();
        assert_eq!(email.full_name(), "");
        email.first_name = Some("Jane".to_string());
        assert_eq!(email.full_name(), "Jane");
        email.last_name = Some("Doe".to_string());
        assert_eq!(email.full_name(), "Jane Doe");
    }

    #[test]
    fn test_lookup_rows_use_their_wire_key() {
        let country: CountryRow = serde_json::from_str(r#"{"countryName":"France"}"#).unwrap();
        assert_eq!(country.country_name, "France");
        let function = serde_json::to_value(JobFunctionRow {
            function_name: "Sales".to_string(),
        })
        .unwrap();
        assert_eq!(function["functionName"], "Sales");
        let level = serde_json::to_value(JobLevelRow {
            level_name: "Director".to_string(),
        })
        .unwrap();
        assert_eq!(level["levelName"], "Director");
    }
}
