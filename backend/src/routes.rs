use rocket::{State, Request, Data, Route, get, post, delete, http::{Method, Status}, serde::json::{self, Json}};
use rocket::route::{self, Handler};
use tracing::{debug, instrument};
use shared::{models::*, validation::{parse_poll_id, validate_create_request}};
use crate::{config::Config, error::ApiError, processor::PollProcessor};

pub struct AppState {
    pub processor: PollProcessor,
    pub config: Config,
}

impl AppState {
    pub fn new(processor: PollProcessor, config: Config) -> Self {
        Self { processor, config }
    }
}

type JsonBody<'r, T> = Result<Json<T>, json::Error<'r>>;

fn decode_body<T>(body: JsonBody<'_, T>) -> Result<T, ApiError> {
    body.map(Json::into_inner)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))
}

#[instrument(skip(state, request))]
#[post("/create", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    request: JsonBody<'_, CreatePollRequest>,
) -> Result<Json<Poll>, ApiError> {
    let request = decode_body(request)?;
    validate_create_request(&request)?;

    let poll = state.processor
        .create_poll(&request.creator, &request.question, request.options)
        .await?;
    Ok(Json(poll))
}

#[instrument(skip(state, request))]
#[post("/vote", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: JsonBody<'_, VoteRequest>,
) -> Result<&'static str, ApiError> {
    let request = decode_body(request)?;
    let poll_id = parse_poll_id(&request.poll_id)?;

    state.processor.cast_vote(poll_id, &request.option).await?;
    Ok("Vote counted")
}

#[instrument(skip(state))]
#[get("/results?<poll_id>")]
pub async fn get_results(state: &State<AppState>, poll_id: Option<&str>) -> Result<Json<Poll>, ApiError> {
    let poll_id = parse_poll_id(poll_id.unwrap_or_default())?;
    state.processor.get_results(poll_id).await.map(Json).map_err(ApiError::from)
}

#[instrument(skip(state, request))]
#[post("/finish", data = "<request>")]
pub async fn finish_poll(
    state: &State<AppState>,
    request: JsonBody<'_, FinishPollRequest>,
) -> Result<&'static str, ApiError> {
    let request = decode_body(request)?;
    let poll_id = parse_poll_id(&request.poll_id)?;

    state.processor.finish_poll(poll_id, &request.creator).await?;
    Ok("Poll finished")
}

#[instrument(skip(state))]
#[delete("/delete?<poll_id>")]
pub async fn delete_poll(state: &State<AppState>, poll_id: Option<&str>) -> Result<&'static str, ApiError> {
    let poll_id = parse_poll_id(poll_id.unwrap_or_default())?;
    state.processor.delete_poll(poll_id).await?;
    Ok("Poll deleted")
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

/// Answers 405 for any method a known path does not serve.
#[derive(Clone)]
pub struct MethodNotAllowed;

#[rocket::async_trait]
impl Handler for MethodNotAllowed {
    async fn handle<'r>(&self, req: &'r Request<'_>, _data: Data<'r>) -> route::Outcome<'r> {
        debug!("No {} handler for {}", req.method(), req.uri().path());
        route::Outcome::from(req, ApiError::MethodNotAllowed)
    }
}

pub const ENDPOINTS: &[(&str, Method)] = &[
    ("/create", Method::Post),
    ("/vote", Method::Post),
    ("/results", Method::Get),
    ("/finish", Method::Post),
    ("/delete", Method::Delete),
    ("/mattermost/command", Method::Post),
];

const GUARDED_METHODS: &[Method] = &[
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Delete,
];

const GUARD_RANK: isize = 100;

pub fn method_guards() -> Vec<Route> {
    ENDPOINTS
        .iter()
        .flat_map(|&(path, allowed)| {
            GUARDED_METHODS
                .iter()
                .filter(move |&&method| method != allowed)
                .map(move |&method| Route::ranked(GUARD_RANK, method, path, MethodNotAllowed))
        })
        .collect()
}
