pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod export;
pub mod queries;
pub mod routes;
pub mod search;
pub use shared::models::*;
pub use shared::validation::*;

use rocket::{Build, Rocket};
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::cors::CORS;
use crate::routes::AppState;

pub fn rocket(config: AppConfig) -> Rocket<Build> {
    // Lazy pools: the server must come up even when a database is not
    // reachable yet. Connections are opened on first query.
    let local_db = PgPoolOptions::new().connect_lazy_with(config.local_db.connect_options());
    let remote_db = PgPoolOptions::new().connect_lazy_with(config.remote_db.connect_options());
    let state = AppState::new(local_db, remote_db, config.notification_email);

    let figment = rocket::Config::figment().merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(CORS::new(config.cors_allowed_origin))
        .manage(state)
        .mount(
            "/",
            rocket::routes![
                routes::countries_list,
                routes::companies_industries_list,
                routes::companies_sizes_list,
                routes::companies_types_list,
                routes::contacts_industries_list,
                routes::contacts_functions_list,
                routes::contacts_levels_list,
                routes::companies_and_contacts,
                routes::emails_checked_by_john,
                routes::all_options,
            ],
        )
        .register(
            "/",
            rocket::catchers![
                catchers::bad_request,
                catchers::not_found,
                catchers::unprocessable_entity,
                catchers::internal_error,
            ],
        )
}

#[cfg(test)]
mod tests;
