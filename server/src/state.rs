use crate::store::TodoStore;
use std::sync::Arc;
use todoauth::extract::AuthorizerProvider;
use todoauth::Authorizer;

//--------------------------------------------------------------------------------------------------
// State given to the handlers
//--------------------------------------------------------------------------------------------------

pub type StateRef = Arc<State>;

pub struct State {
    authorizer: Authorizer,
    todos: Box<dyn TodoStore>,
}

impl State {
    pub fn new(authorizer: Authorizer, todos: Box<dyn TodoStore>) -> Self {
        Self { authorizer, todos }
    }

    pub fn todos(&self) -> &dyn TodoStore {
        self.todos.as_ref()
    }
}

impl AuthorizerProvider for State {
    fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }
}

//--------------------------------------------------------------------------------------------------
