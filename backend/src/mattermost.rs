use rocket::{State, FromForm, post, form::{Errors, Form}, serde::json::Json};
use tracing::{debug, instrument, warn};
use shared::{MattermostResponse, ResponseType};
use crate::routes::AppState;

pub const POLL_COMMAND: &str = "/poll";

#[derive(Debug, Default, FromForm)]
pub struct SlashCommand {
    #[field(default = String::new())]
    pub command: String,
    #[field(default = String::new())]
    pub text: String,
    #[field(default = String::new())]
    pub user_id: String,
}

/// Routes a slash command by name. Only `/poll` is known, and its
/// sub-commands are acknowledged without being parsed.
pub fn dispatch(slash: &SlashCommand, response_type: ResponseType) -> MattermostResponse {
    match slash.command.as_str() {
        POLL_COMMAND => {
            debug!("/poll from {}: {:?}", slash.user_id, slash.text);
            MattermostResponse::new(response_type, "Command received, processing...")
        }
        other => {
            warn!("Unknown slash command {:?} from {}", other, slash.user_id);
            MattermostResponse::new(response_type, "Unknown command")
        }
    }
}

#[instrument(skip(state, form))]
#[post("/mattermost/command", data = "<form>")]
pub async fn mattermost_command(
    state: &State<AppState>,
    form: Result<Form<SlashCommand>, Errors<'_>>,
) -> Json<MattermostResponse> {
    let response_type = state.config.response_type;
    let response = match form {
        Ok(form) => dispatch(&form, response_type),
        Err(errors) => {
            warn!("Malformed slash command form: {}", errors);
            MattermostResponse::new(response_type, "Error processing command")
        }
    };
    Json(response)
}

/// Catches bodies the form guard forwards (no form content type). They carry
/// no readable fields, so they get the same reply as an empty command.
#[instrument(skip(state))]
#[post("/mattermost/command", rank = 2)]
pub async fn mattermost_fallback(state: &State<AppState>) -> Json<MattermostResponse> {
    debug!("Slash command without a form body");
    Json(dispatch(&SlashCommand::default(), state.config.response_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash(command: &str, text: &str) -> SlashCommand {
        SlashCommand {
            command: command.into(),
            text: text.into(),
            user_id: "u1".into(),
        }
    }

    #[test]
    fn acknowledges_poll_command() {
        let response = dispatch(&slash("/poll", "create Lunch? pizza, sushi"), ResponseType::InChannel);
        assert_eq!(response.text, "Command received, processing...");
        assert_eq!(response.response_type, ResponseType::InChannel);
    }

    #[test]
    fn rejects_other_commands() {
        let response = dispatch(&slash("/weather", ""), ResponseType::Ephemeral);
        assert_eq!(response.text, "Unknown command");
        assert_eq!(response.response_type, ResponseType::Ephemeral);
    }
}
