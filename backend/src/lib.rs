pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod mattermost;
pub mod processor;
pub mod queries;
pub mod routes;
pub mod store;

use rocket::{Build, Rocket, catchers, fairing::AdHoc, routes};
use tracing::info;

use crate::{
    catchers::{bad_request, internal_error, method_not_allowed, not_found, unprocessable},
    cors::CORS,
    routes::{all_options, cast_vote, create_poll, delete_poll, finish_poll, get_results, method_guards, AppState},
};

pub use shared::{models::*, error::*};

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    let cors = CORS::new(state.config.cors_origin_prefix.clone());

    rocket::build()
        .attach(cors)
        .attach(AdHoc::on_shutdown("Poll store shutdown", |rocket| Box::pin(async move {
            if let Some(state) = rocket.state::<AppState>() {
                state.processor.store().close().await;
                info!("🛑 Poll store released");
            }
        })))
        .manage(state)
        .mount(
            "/",
            routes![
                create_poll,
                cast_vote,
                get_results,
                finish_poll,
                delete_poll,
                mattermost::mattermost_command,
                mattermost::mattermost_fallback,
                all_options
            ],
        )
        .mount("/", method_guards())
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                method_not_allowed,
                unprocessable,
                internal_error
            ],
        )
}
