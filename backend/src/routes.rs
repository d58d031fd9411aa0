use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use shared::models::{
    CheckedEmail, CompanyContactRow, CountryRow, IndustryRow, JobFunctionRow, JobLevelRow,
    SearchCriteria, SearchStep, SizeRow, TypeRow,
};
use shared::validation::{normalize_search_criteria, validate_search_criteria};

use crate::error::ApiError;
use crate::export::{self, EXPORT_ROW_LIMIT};
use crate::queries::Queries;
use crate::search::SearchSql;

// The lookup lists and the verification results live in the local
// database; the company and contact data that searches run against live
// in the remote one.
pub struct AppState {
    pub local_db: PgPool,
    pub remote_db: PgPool,
    pub notification_email: String,
}

impl AppState {
    pub fn new(local_db: PgPool, remote_db: PgPool, notification_email: impl Into<String>) -> Self {
        Self {
            local_db,
            remote_db,
            notification_email: notification_email.into(),
        }
    }
}

// A search answers in one of three shapes depending on the step asked for
// and the size of the result.
pub enum SearchOutcome {
    Count(Json<i64>),
    Rows(Json<Vec<CompanyContactRow>>),
    SentByEmail,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for SearchOutcome {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        match self {
            SearchOutcome::Count(count) => count.respond_to(req),
            SearchOutcome::Rows(rows) => rows.respond_to(req),
            SearchOutcome::SentByEmail => Ok(rocket::Response::build()
                .status(Status::NoContent)
                .finalize()),
        }
    }
}

#[get("/get-countries-list")]
pub async fn countries_list(state: &State<AppState>) -> Result<Json<Vec<CountryRow>>, ApiError> {
    let rows = Queries::countries(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-companies-industries-list")]
pub async fn companies_industries_list(
    state: &State<AppState>,
) -> Result<Json<Vec<IndustryRow>>, ApiError> {
    let rows = Queries::company_industries(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-companies-sizes-list")]
pub async fn companies_sizes_list(
    state: &State<AppState>,
) -> Result<Json<Vec<SizeRow>>, ApiError> {
    let rows = Queries::company_sizes(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-companies-types-list")]
pub async fn companies_types_list(
    state: &State<AppState>,
) -> Result<Json<Vec<TypeRow>>, ApiError> {
    let rows = Queries::company_types(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-contacts-industries-list")]
pub async fn contacts_industries_list(
    state: &State<AppState>,
) -> Result<Json<Vec<IndustryRow>>, ApiError> {
    let rows = Queries::contact_industries(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-contacts-functions-list")]
pub async fn contacts_functions_list(
    state: &State<AppState>,
) -> Result<Json<Vec<JobFunctionRow>>, ApiError> {
    let rows = Queries::job_functions(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[get("/get-contacts-levels-list")]
pub async fn contacts_levels_list(
    state: &State<AppState>,
) -> Result<Json<Vec<JobLevelRow>>, ApiError> {
    let rows = Queries::job_levels(&state.local_db).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows))
}

#[instrument(skip(state, criteria))]
#[post("/get-companies-and-contacts", format = "json", data = "<criteria>")]
pub async fn companies_and_contacts(
    state: &State<AppState>,
    criteria: Json<SearchCriteria>,
) -> Result<SearchOutcome, ApiError> {
    let mut criteria = criteria.into_inner();
    debug!(?criteria, "received search criteria");

    validate_search_criteria(&criteria)?;
    normalize_search_criteria(&mut criteria);

    match criteria.step {
        SearchStep::Count => {
            let sql = SearchSql::count(&criteria);
            debug!(statement = sql.statement(), "running count search");
            let count = Queries::search_count(&state.remote_db, &sql).await?;
            Ok(SearchOutcome::Count(Json(count)))
        }
        SearchStep::Full => {
            let sql = SearchSql::full(&criteria);
            debug!(statement = sql.statement(), "running full search");
            let rows = Queries::search_full(&state.remote_db, &sql).await?;
            if rows.is_empty() {
                return Err(ApiError::NoSearchResult);
            }
            if rows.len() > EXPORT_ROW_LIMIT {
                info!(rows = rows.len(), "result too large for JSON, delivering by email");
                export::deliver_by_email(&rows, &state.notification_email).await?;
                return Ok(SearchOutcome::SentByEmail);
            }
            Ok(SearchOutcome::Rows(Json(rows)))
        }
    }
}

#[get("/get-emails-checked-by-john/mission-number/<mission_number>")]
pub async fn emails_checked_by_john(
    state: &State<AppState>,
    mission_number: i32,
) -> Result<Json<Vec<CheckedEmail>>, ApiError> {
    let emails = Queries::checked_emails(&state.local_db, mission_number).await?;
    if emails.is_empty() {
        info!(mission_number, "no checked emails for this mission");
        return Err(ApiError::NotFound);
    }
    Ok(Json(emails))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
