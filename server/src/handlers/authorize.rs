use crate::state::StateRef;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use todoauth::extract::AuthorizerProvider;
use todoauth::AuthorizerResponse;
use tracing::info;

//--------------------------------------------------------------------------------------------------
// Types for the constant strings in the request
//--------------------------------------------------------------------------------------------------

pub struct EventTypeToken;

impl<'a> Deserialize<'a> for EventTypeToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        const VALID_EVENT_TYPE: &str = "TOKEN";

        let s: String = Deserialize::deserialize(deserializer)?;

        if s == VALID_EVENT_TYPE {
            Ok(EventTypeToken)
        } else {
            Err(serde::de::Error::custom(
                "invalid or unsupported authorizer event type",
            ))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Request type
//--------------------------------------------------------------------------------------------------

// Same field names the gateway uses for a token authorizer event
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuthorizerEvent {
    #[serde(rename = "type")]
    _event_type: EventTypeToken,
    #[serde(default)]
    pub authorization_token: Option<String>,
    #[serde(default)]
    pub method_arn: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

// A deny is a decision like any other, so this always answers 200 with a policy document
pub async fn handler(
    State(state): State<StateRef>,
    Json(event): Json<TokenAuthorizerEvent>,
) -> Json<AuthorizerResponse> {
    info!(
        "Authorizing a user for {}",
        event.method_arn.as_deref().unwrap_or("unspecified method")
    );

    let decision = state
        .authorizer()
        .authorize(event.authorization_token.as_deref());

    Json(decision.response())
}

//--------------------------------------------------------------------------------------------------
