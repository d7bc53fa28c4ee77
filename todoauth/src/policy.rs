use crate::Principal;
use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// Policy document wire types
//--------------------------------------------------------------------------------------------------

pub const POLICY_VERSION: &str = "2012-10-17";
pub const INVOKE_ACTION: &str = "execute-api:Invoke";
pub const ALL_RESOURCES: &str = "*";

/// Principal reported when no identity could be established
pub const ANONYMOUS_PRINCIPAL: &str = "user";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

/// What the routing layer receives for every request. Allow and deny differ only in the
/// principal and the statement's effect.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

impl AuthorizerResponse {
    pub fn allow(principal: &Principal) -> Self {
        Self::build(principal.as_str(), Effect::Allow)
    }

    pub fn deny() -> Self {
        Self::build(ANONYMOUS_PRINCIPAL, Effect::Deny)
    }

    fn build(principal_id: &str, effect: Effect) -> Self {
        AuthorizerResponse {
            principal_id: principal_id.to_string(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![Statement {
                    action: INVOKE_ACTION.to_string(),
                    effect,
                    resource: ALL_RESOURCES.to_string(),
                }],
            },
        }
    }

    /// Effect of the single statement
    pub fn effect(&self) -> Effect {
        self.policy_document
            .statement
            .first()
            .map_or(Effect::Deny, |statement| statement.effect)
    }
}

//--------------------------------------------------------------------------------------------------
