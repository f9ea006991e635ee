use uuid::Uuid;
use crate::error::PollError;
use crate::models::CreatePollRequest;

/// Request-shape checks only. Option count and duplicate labels belong to
/// `Poll::new`, which owns the tally invariant.
pub fn validate_create_request(request: &CreatePollRequest) -> Result<(), PollError> {
    if request.options.iter().any(|opt| opt.is_empty()) {
        return Err(PollError::bad_request("Empty option text"));
    }
    Ok(())
}

pub fn parse_poll_id(id: &str) -> Result<Uuid, PollError> {
    if id.is_empty() {
        return Err(PollError::bad_request("Missing poll_id"));
    }
    Uuid::parse_str(id).map_err(|_| PollError::bad_request("Invalid poll_id"))
}
