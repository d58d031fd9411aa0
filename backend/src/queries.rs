use shared::models::{
    CheckedEmail, CompanyContactRow, CountryRow, IndustryRow, JobFunctionRow, JobLevelRow,
    SizeRow, TypeRow,
};
use sqlx::PgPool;
use tracing::error;

use crate::error::ApiError;
use crate::search::{SearchSql, SqlArg};

pub struct Queries;

impl Queries {
    pub async fn countries(pool: &PgPool) -> Result<Vec<CountryRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT(country) FROM postal_address WHERE country <> ''",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("countries query failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(names
            .into_iter()
            .map(|country_name| CountryRow { country_name })
            .collect())
    }

    pub async fn company_industries(pool: &PgPool) -> Result<Vec<IndustryRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT(industry) FROM companysocialprofile WHERE industry <> ''",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("company industries query failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(names
            .into_iter()
            .map(|industry_name| IndustryRow { industry_name })
            .collect())
    }

    pub async fn company_sizes(pool: &PgPool) -> Result<Vec<SizeRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT(size) FROM company WHERE size <> ''",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("company sizes query failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(names
            .into_iter()
            .map(|size_name| SizeRow { size_name })
            .collect())
    }

    pub async fn company_types(pool: &PgPool) -> Result<Vec<TypeRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT(type) FROM companysocialprofile WHERE type <> ''",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("company types query failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(names
            .into_iter()
            .map(|type_name| TypeRow { type_name })
            .collect())
    }

    pub async fn contact_industries(pool: &PgPool) -> Result<Vec<IndustryRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT(industry) FROM prospectsocialprofile WHERE industry <> ''",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("contact industries query failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(names
            .into_iter()
            .map(|industry_name| IndustryRow { industry_name })
            .collect())
    }

    pub async fn job_functions(pool: &PgPool) -> Result<Vec<JobFunctionRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM job_function")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("job functions query failed: {e}");
                ApiError::Database(e.to_string())
            })?;

        Ok(names
            .into_iter()
            .map(|function_name| JobFunctionRow { function_name })
            .collect())
    }

    pub async fn job_levels(pool: &PgPool) -> Result<Vec<JobLevelRow>, ApiError> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM job_level")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("job levels query failed: {e}");
                ApiError::Database(e.to_string())
            })?;

        Ok(names
            .into_iter()
            .map(|level_name| JobLevelRow { level_name })
            .collect())
    }

    pub async fn checked_emails(
        pool: &PgPool,
        mission_number: i32,
    ) -> Result<Vec<CheckedEmail>, ApiError> {
        sqlx::query_as::<_, CheckedEmail>(
            "SELECT * FROM email_checked_by_john WHERE mission_number = $1",
        )
        .bind(mission_number)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("checked emails query failed: {e}");
            ApiError::Database(e.to_string())
        })
    }

    // COUNT(..) OVER() repeats the total on every grouped row; only the
    // first row is read. No row at all means no group matched.
    pub async fn search_count(pool: &PgPool, sql: &SearchSql) -> Result<i64, ApiError> {
        let mut query = sqlx::query_scalar::<_, i64>(sql.statement());
        for arg in sql.args() {
            query = match arg {
                SqlArg::Text(value) => query.bind(value.clone()),
                SqlArg::Int(value) => query.bind(*value),
            };
        }

        let count = query.fetch_optional(pool).await.map_err(|e| {
            error!("count search failed: {e}");
            ApiError::Database(e.to_string())
        })?;

        Ok(count.unwrap_or(0))
    }

    pub async fn search_full(
        pool: &PgPool,
        sql: &SearchSql,
    ) -> Result<Vec<CompanyContactRow>, ApiError> {
        let mut query = sqlx::query_as::<_, CompanyContactRow>(sql.statement());
        for arg in sql.args() {
            query = match arg {
                SqlArg::Text(value) => query.bind(value.clone()),
                SqlArg::Int(value) => query.bind(*value),
            };
        }

        query.fetch_all(pool).await.map_err(|e| {
            error!("full search failed: {e}");
            ApiError::Database(e.to_string())
        })
    }
}
