use shared::models::{SearchCriteria, SearchStep};
use shared::validation::{TRI_STATE_ANY, TRI_STATE_WITH};

// The joins multiply rows per company (several emails, social profiles,
// job functions and saved groups per entity), so the query groups on every
// scalar column and folds the multi-valued ones with string_agg, using '¤'
// as the value separator. The count variant runs COUNT(..) OVER() on top
// of the same grouping, which repeats the total on every row; callers read
// the first one.
//
// Every scalar column is cast to text so the row decoder sees uniform
// nullable text whatever the underlying column type. Aggregates already
// produce text.
const RESULT_COLUMNS: &str = concat!(
    "comp.id::text, comp.name::text, comp.domain::text, comp.website::text, comp.telephone::text, comp.faxnumber::text, comp.size::text, comp.founded::text, comp.created_on::text, comp.updated_on::text, ",
    "comp_ad.street_number::text, comp_ad.route::text, comp_ad.postal_code::text, comp_ad.locality::text, comp_ad.administrative_area_level_2::text, comp_ad.administrative_area_level_1::text, comp_ad.country::text, ",
    "string_agg(DISTINCT companyemail.email,'¤'), ",
    "string_agg(DISTINCT comp_soc_prof.url,'¤'), comp_soc_prof.type::text, comp_soc_prof.industry::text, ",
    "cont.id::text, cont.gender::text, cont.first_name::text, cont.last_name::text, cont.job_title::text, cont.telephone::text, cont.created_on::text, cont.updated_on::text, ",
    "cont_ad.street_number::text, cont_ad.route::text, cont_ad.postal_code::text, cont_ad.locality::text, cont_ad.administrative_area_level_2::text, cont_ad.administrative_area_level_1::text, cont_ad.country::text, ",
    "string_agg(DISTINCT job_function.name,'¤'), ",
    "job_level.name::text, ",
    "cont_email.email::text, cont_email.status::text, cont_email.created_on::text, ",
    "string_agg(DISTINCT cont_soc_prof.url,'¤'), cont_soc_prof.industry::text ",
);

const FROM_AND_JOINS: &str = concat!(
    "FROM company AS comp ",
    "LEFT JOIN postal_address AS comp_ad ON comp_ad.id = comp.postal_address_id ",
    "LEFT JOIN companyemail ON companyemail.company_id = comp.id ",
    "LEFT JOIN companysocialprofile AS comp_soc_prof ON comp_soc_prof.company_id = comp.id ",
    "LEFT JOIN prospect AS cont ON cont.company_id = comp.id ",
    "LEFT JOIN postal_address AS cont_ad ON cont_ad.id = cont.postal_address_id ",
    "LEFT JOIN prospect_job_function_mapping ON prospect_job_function_mapping.prospect_id = cont.id ",
    "LEFT JOIN job_function ON job_function.id = prospect_job_function_mapping.job_function_id ",
    "LEFT JOIN job_level ON job_level.id = cont.job_level_id ",
    "LEFT JOIN prospectemail AS cont_email ON cont_email.id = cont.email_id ",
    "LEFT JOIN prospectsocialprofile AS cont_soc_prof ON cont_soc_prof.id = cont.social_profile_id ",
    "LEFT JOIN savelistprospectcustomersgroup AS cont_group ON cont_group.prospect_id = cont.id ",
);

const GROUP_BY: &str = concat!(
    "GROUP BY comp.id, comp.name, comp.domain, comp.website, comp.telephone, comp.faxnumber, comp.size, comp.founded, comp.created_on, comp.updated_on, ",
    "comp_ad.street_number, comp_ad.route, comp_ad.postal_code, comp_ad.locality, comp_ad.administrative_area_level_2, comp_ad.administrative_area_level_1, comp_ad.country, ",
    "comp_soc_prof.type, comp_soc_prof.industry, ",
    "cont.id, cont.gender, cont.first_name, cont.last_name, cont.job_title, cont.telephone, cont.created_on, cont.updated_on, ",
    "cont_ad.street_number, cont_ad.route, cont_ad.postal_code, cont_ad.locality, cont_ad.administrative_area_level_2, cont_ad.administrative_area_level_1, cont_ad.country, ",
    "job_level.name, ",
    "cont_email.email, cont_email.status, cont_email.created_on, ",
    "cont_soc_prof.industry",
);

#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
}

// A search statement with positional $N placeholders and the values to
// bind to them, assembled clause by clause from the non-empty criteria.
#[derive(Debug)]
pub struct SearchSql {
    statement: String,
    args: Vec<SqlArg>,
    has_clause: bool,
}

impl SearchSql {
    pub fn count(criteria: &SearchCriteria) -> Self {
        Self::build(criteria, SearchStep::Count)
    }

    pub fn full(criteria: &SearchCriteria) -> Self {
        Self::build(criteria, SearchStep::Full)
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    fn build(criteria: &SearchCriteria, step: SearchStep) -> Self {
        let mut sql = Self {
            statement: String::from("SELECT "),
            args: Vec::new(),
            has_clause: false,
        };

        match step {
            SearchStep::Count => sql.statement.push_str("COUNT(comp.id) OVER() "),
            SearchStep::Full => sql.statement.push_str(RESULT_COLUMNS),
        }
        sql.statement.push_str(FROM_AND_JOINS);
        sql.statement.push_str("WHERE ");

        sql.text_equals(&criteria.company_city, "comp_ad.locality");
        sql.text_equals(&criteria.company_post_code, "comp_ad.postal_code");
        sql.text_any_of(&criteria.company_countries, "comp_ad.country");
        sql.text_any_of(&criteria.company_industries, "comp_soc_prof.industry");
        sql.text_any_of(&criteria.company_sizes, "comp.size");
        sql.text_any_of(&criteria.company_types, "comp_soc_prof.type");
        sql.presence(criteria.company_has_email, "companyemail.email");
        sql.presence(criteria.company_has_phone, "comp.telephone");
        sql.text_any_of(&criteria.company_domains, "comp.domain");
        sql.text_none_of(&criteria.excluded_company_domains, "comp.domain");
        sql.text_equals(&criteria.contact_city, "cont_ad.locality");
        sql.text_equals(&criteria.contact_post_code, "cont_ad.postal_code");
        sql.text_any_of(&criteria.contact_countries, "cont_ad.country");
        sql.text_any_of(&criteria.contact_industries, "cont_soc_prof.industry");
        sql.text_like(&criteria.contact_job_title, "cont.job_title");
        sql.text_any_of(&criteria.contact_functions, "job_function.name");
        sql.text_any_of(&criteria.contact_job_levels, "job_level.name");
        sql.presence(criteria.contact_has_email, "cont_email.email");
        sql.int_any_of(&criteria.contact_remote_accounts, "cont_group.group_id");
        sql.int_none_of(&criteria.excluded_contact_remote_accounts, "cont_group.group_id");

        sql.statement.push_str(GROUP_BY);
        sql
    }

    // Joins consecutive clauses with AND, whether or not the previous
    // clause bound any argument.
    fn and(&mut self) {
        if self.has_clause {
            self.statement.push_str("AND ");
        }
        self.has_clause = true;
    }

    fn placeholder(&mut self, arg: SqlArg) -> usize {
        self.args.push(arg);
        self.args.len()
    }

    fn text_equals(&mut self, value: &str, column: &str) {
        if value.is_empty() {
            return;
        }
        self.and();
        let n = self.placeholder(SqlArg::Text(value.to_string()));
        self.statement
            .push_str(&format!("UPPER({column}) = UPPER(${n}) "));
    }

    fn text_like(&mut self, value: &str, column: &str) {
        if value.is_empty() {
            return;
        }
        self.and();
        let n = self.placeholder(SqlArg::Text(format!("%{value}%")));
        self.statement
            .push_str(&format!("UPPER({column}) LIKE UPPER(${n}) "));
    }

    // Tri-state presence filter: 0 matches anything, 1 requires the column
    // to be null or empty, 2 requires a non-empty value.
    fn presence(&mut self, value: i32, column: &str) {
        if value == TRI_STATE_ANY {
            return;
        }
        self.and();
        if value == TRI_STATE_WITH {
            self.statement
                .push_str(&format!("({column} IS NOT NULL AND {column} <> '') "));
        } else {
            self.statement
                .push_str(&format!("({column} IS NULL OR {column} = '') "));
        }
    }

    fn text_any_of(&mut self, values: &[String], column: &str) {
        self.text_group(values, column, "=", "OR ");
    }

    fn text_none_of(&mut self, values: &[String], column: &str) {
        self.text_group(values, column, "<>", "AND ");
    }

    fn text_group(&mut self, values: &[String], column: &str, op: &str, joiner: &str) {
        if values.is_empty() {
            return;
        }
        self.and();
        if values.len() == 1 {
            let n = self.placeholder(SqlArg::Text(values[0].clone()));
            self.statement
                .push_str(&format!("UPPER({column}) {op} UPPER(${n}) "));
            return;
        }
        self.statement.push('(');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.statement.push_str(joiner);
            }
            let n = self.placeholder(SqlArg::Text(value.clone()));
            self.statement
                .push_str(&format!("UPPER({column}) {op} UPPER(${n}) "));
        }
        self.statement.push_str(") ");
    }

    fn int_any_of(&mut self, values: &[String], column: &str) {
        self.int_group(values, column, "=", "OR ");
    }

    fn int_none_of(&mut self, values: &[String], column: &str) {
        self.int_group(values, column, "<>", "AND ");
    }

    fn int_group(&mut self, values: &[String], column: &str, op: &str, joiner: &str) {
        // Criteria are validated before SQL generation, so every value parses.
        let ids: Vec<i64> = values.iter().filter_map(|v| v.parse().ok()).collect();
        if ids.is_empty() {
            return;
        }
        self.and();
        if ids.len() == 1 {
            let n = self.placeholder(SqlArg::Int(ids[0]));
            self.statement.push_str(&format!("{column} {op} ${n} "));
            return;
        }
        self.statement.push('(');
        for (i, id) in ids.into_iter().enumerate() {
            if i > 0 {
                self.statement.push_str(joiner);
            }
            let n = self.placeholder(SqlArg::Int(id));
            self.statement.push_str(&format!("{column} {op} ${n} "));
        }
        self.statement.push_str(") ");
    }
}
