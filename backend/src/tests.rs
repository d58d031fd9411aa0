#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use shared::models::{CompanyContactRow, SearchCriteria};
    use shared::validation::{TRI_STATE_WITH, TRI_STATE_WITHOUT};
    use uuid::Uuid;

    use crate::config::{env_or, AppConfig, DbConfig};
    use crate::export;
    use crate::search::{SearchSql, SqlArg};

    fn test_config() -> AppConfig {
        AppConfig {
            local_db: DbConfig::local("127.0.0.1".to_string()),
            remote_db: DbConfig::remote("127.0.0.1".to_string()),
            cors_allowed_origin: "http://localhost:8080".to_string(),
            notification_email: "admin@example.com".to_string(),
            log_file: None,
        }
    }

    async fn client() -> Client {
        Client::tracked(crate::rocket(test_config()))
            .await
            .expect("valid rocket instance")
    }

    fn criteria_with(f: impl FnOnce(&mut SearchCriteria)) -> SearchCriteria {
        let mut criteria = SearchCriteria::default();
        f(&mut criteria);
        criteria
    }

    fn where_clause(statement: &str) -> &str {
        let start = statement.find("WHERE ").unwrap() + "WHERE ".len();
        let end = statement.find("GROUP BY").unwrap();
        &statement[start..end]
    }

    #[test]
    fn test_count_statement_shape() {
        let sql = SearchSql::count(&criteria_with(|c| c.company_city = "Lyon".to_string()));

        assert!(sql
            .statement()
            .starts_with("SELECT COUNT(comp.id) OVER() FROM company AS comp "));
        assert!(sql.statement().contains(
            "LEFT JOIN savelistprospectcustomersgroup AS cont_group ON cont_group.prospect_id = cont.id "
        ));
        assert_eq!(where_clause(sql.statement()), "UPPER(comp_ad.locality) = UPPER($1) ");
        assert_eq!(sql.args(), [SqlArg::Text("Lyon".to_string())].as_slice());
    }

    #[test]
    fn test_full_statement_selects_aggregated_columns() {
        let sql = SearchSql::full(&criteria_with(|c| c.company_city = "Lyon".to_string()));
        let statement = sql.statement();

        assert!(statement.starts_with("SELECT comp.id::text, comp.name::text, "));
        assert!(statement.contains("string_agg(DISTINCT companyemail.email,'¤'), "));
        assert!(statement.contains("string_agg(DISTINCT job_function.name,'¤'), "));
        // GROUP BY lists the scalar columns only and closes the statement.
        assert!(statement.contains("GROUP BY comp.id, comp.name, "));
        assert!(statement.ends_with("cont_soc_prof.industry"));
    }

    #[test]
    fn test_clauses_follow_criteria_order() {
        let criteria = criteria_with(|c| {
            c.company_city = "Lyon".to_string();
            c.company_countries = vec!["France".to_string(), "Spain".to_string()];
            c.company_has_email = TRI_STATE_WITH;
            c.company_domains = vec!["acme.example".to_string()];
            c.contact_remote_accounts = vec!["12".to_string(), "34".to_string()];
            c.excluded_contact_remote_accounts = vec!["56".to_string()];
        });
        let sql = SearchSql::full(&criteria);

        assert_eq!(
            where_clause(sql.statement()),
            "UPPER(comp_ad.locality) = UPPER($1) \
             AND (UPPER(comp_ad.country) = UPPER($2) OR UPPER(comp_ad.country) = UPPER($3) ) \
             AND (companyemail.email IS NOT NULL AND companyemail.email <> '') \
             AND UPPER(comp.domain) = UPPER($4) \
             AND (cont_group.group_id = $5 OR cont_group.group_id = $6 ) \
             AND cont_group.group_id <> $7 "
        );
        let expected = vec![
            SqlArg::Text("Lyon".to_string()),
            SqlArg::Text("France".to_string()),
            SqlArg::Text("Spain".to_string()),
            SqlArg::Text("acme.example".to_string()),
            SqlArg::Int(12),
            SqlArg::Int(34),
            SqlArg::Int(56),
        ];
        assert_eq!(sql.args(), expected.as_slice());
    }

    #[test]
    fn test_leading_presence_clause_joins_next_with_and() {
        let criteria = criteria_with(|c| {
            c.company_has_phone = TRI_STATE_WITHOUT;
            c.company_domains = vec!["acme.example".to_string()];
        });
        let sql = SearchSql::count(&criteria);

        assert_eq!(
            where_clause(sql.statement()),
            "(comp.telephone IS NULL OR comp.telephone = '') AND UPPER(comp.domain) = UPPER($1) "
        );
    }

    #[test]
    fn test_job_title_uses_like_with_wrapped_pattern() {
        let sql = SearchSql::count(&criteria_with(|c| c.contact_job_title = "engineer".to_string()));

        assert_eq!(where_clause(sql.statement()), "UPPER(cont.job_title) LIKE UPPER($1) ");
        assert_eq!(sql.args(), [SqlArg::Text("%engineer%".to_string())].as_slice());
    }

    #[test]
    fn test_excluded_domains_join_with_and() {
        let criteria = criteria_with(|c| {
            c.excluded_company_domains = vec!["a.example".to_string(), "b.example".to_string()];
        });
        let sql = SearchSql::count(&criteria);

        assert_eq!(
            where_clause(sql.statement()),
            "(UPPER(comp.domain) <> UPPER($1) AND UPPER(comp.domain) <> UPPER($2) ) "
        );
    }

    #[test]
    fn test_placeholders_match_bound_args() {
        let criteria = criteria_with(|c| {
            c.company_city = "Lyon".to_string();
            c.company_post_code = "69001x".to_string();
            c.company_countries = vec!["France".to_string(), "Spain".to_string()];
            c.company_has_phone = TRI_STATE_WITH;
            c.contact_job_title = "engineer".to_string();
            c.contact_functions = vec!["Sales".to_string()];
            c.contact_remote_accounts = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        });
        let sql = SearchSql::full(&criteria);

        assert_eq!(sql.statement().matches('$').count(), sql.args().len());
        assert_eq!(sql.args().len(), 9);
    }

    #[test]
    fn test_csv_header_and_field_order() {
        let row = CompanyContactRow {
            comp_id: "17".to_string(),
            comp_name: Some("Acme".to_string()),
            comp_founded: Some("1999".to_string()),
            comp_street_number: Some("12".to_string()),
            comp_administrative_area_level_1: Some("ARA".to_string()),
            comp_administrative_area_level_2: Some("Rhone".to_string()),
            comp_created_on: Some("2020-01-01".to_string()),
            cont_job_function: Some("Sales".to_string()),
            cont_updated_on: Some("2021-02-03".to_string()),
            ..Default::default()
        };
        let path = std::env::temp_dir().join(format!("csv_order_{}.csv", Uuid::new_v4()));
        export::write_csv(&[row], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = content.lines();
        let header: Vec<&str> = lines.next().unwrap().split(';').collect();
        assert_eq!(header.len(), 43);
        assert_eq!(header[0], "Company Id");
        assert_eq!(header[12], "Company Admin Area Level 1");
        assert_eq!(header[13], "Company Admin Area Level 2");
        assert_eq!(header[42], "Contact Update Date");

        let fields: Vec<&str> = lines.next().unwrap().split(';').collect();
        assert_eq!(fields.len(), 43);
        assert_eq!(fields[0], "17");
        // Street number follows founded; the dates close the company block.
        assert_eq!(fields[7], "1999");
        assert_eq!(fields[8], "12");
        assert_eq!(fields[12], "ARA");
        assert_eq!(fields[13], "Rhone");
        assert_eq!(fields[19], "2020-01-01");
        assert_eq!(fields[26], "Sales");
        assert_eq!(fields[42], "2021-02-03");
    }

    #[test]
    fn test_db_connect_options() {
        let options = DbConfig::local("db.internal".to_string()).connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "my_local_user");
        assert_eq!(options.get_database(), Some("my_local_db"));

        let remote = DbConfig::remote("10.0.0.9".to_string());
        assert_eq!(remote.user, "my_remote_user");
        assert_eq!(remote.database, "my_remote_db");
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("PROSPECT_TEST_UNSET_VARIABLE", "fallback"), "fallback");
    }

    #[rocket::async_test]
    async fn test_empty_criteria_rejected_with_message() {
        let client = client().await;
        let response = client
            .post("/get-companies-and-contacts")
            .header(ContentType::JSON)
            .body(serde_json::to_string(&SearchCriteria::default()).unwrap())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.into_string().await.unwrap(),
            "All search criteria are empty."
        );
    }

    #[rocket::async_test]
    async fn test_numeric_city_rejected_through_route() {
        let client = client().await;
        let criteria = criteria_with(|c| c.company_city = "69001".to_string());
        let response = client
            .post("/get-companies-and-contacts")
            .header(ContentType::JSON)
            .body(serde_json::to_string(&criteria).unwrap())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.into_string().await.unwrap(),
            "Company City should be text."
        );
    }

    #[rocket::async_test]
    async fn test_unparseable_step_is_unprocessable() {
        let client = client().await;
        let response = client
            .post("/get-companies-and-contacts")
            .header(ContentType::JSON)
            .body(r#"{"step":"export"}"#)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body["status"], 422);
    }

    #[rocket::async_test]
    async fn test_unknown_route_returns_json_not_found() {
        let client = client().await;
        let response = client.get("/does-not-exist").dispatch().await;

        assert_eq!(response.status(), Status::NotFound);
        let body: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body["error"], "The requested resource was not found.");
        assert_eq!(body["status"], 404);
    }

    #[rocket::async_test]
    async fn test_non_integer_mission_number_is_not_found() {
        let client = client().await;
        let response = client
            .get("/get-emails-checked-by-john/mission-number/abc")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn test_preflight_allows_configured_origin() {
        let client = client().await;
        let response = client
            .options("/get-companies-and-contacts")
            .header(Header::new("Origin", "http://localhost:8080"))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("http://localhost:8080")
        );
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Methods"),
            Some("POST, GET, OPTIONS")
        );
    }

    #[rocket::async_test]
    async fn test_foreign_origin_gets_no_cors_headers() {
        let client = client().await;
        let response = client
            .options("/get-companies-and-contacts")
            .header(Header::new("Origin", "http://evil.example"))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        assert!(response
            .headers()
            .get_one("Access-Control-Allow-Origin")
            .is_none());
    }
}
