use rocket::http::Status;
use rocket::response::Responder;
use shared::PollError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MethodNotAllowed => Status::MethodNotAllowed,
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Poll(e) => match e {
                PollError::BadRequest(_) | PollError::InvalidOption(_) => Status::BadRequest,
                PollError::Forbidden => Status::Forbidden,
                PollError::NotFound => Status::NotFound,
                PollError::PollFinished | PollError::AlreadyFinished | PollError::Conflict => Status::Conflict,
                PollError::StoreUnavailable(_) | PollError::Decode(_) => Status::InternalServerError,
            },
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status.code >= 500 {
            error!("{} {} failed: {}", req.method(), req.uri(), self);
        } else {
            warn!("{} {} rejected: {}", req.method(), req.uri(), self);
        }

        rocket::Response::build_from(self.to_string().respond_to(req)?)
            .status(status)
            .ok()
    }
}
