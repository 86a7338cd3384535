use shared::protocol::SessionUser;

/// Whether the backend has vouched for the held credential.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(SessionUser),
}

/// Credential plus the user the backend resolved it to.
///
/// Created empty when the gateway is built, restored from the credential
/// store on page load, and reset on logout or a failed verification.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    credential: Option<String>,
    user: Option<SessionUser>,
}

impl SessionContext {
    pub fn restore(credential: Option<String>) -> Self {
        Self {
            credential: credential.filter(|token| usable(token)),
            user: None,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref().filter(|token| usable(token))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match (self.credential(), &self.user) {
            (Some(_), Some(user)) => SessionState::Authenticated(user.clone()),
            _ => SessionState::Unauthenticated,
        }
    }

    /// An empty credential never establishes a session.
    pub fn establish(&mut self, credential: String, user: SessionUser) {
        if usable(&credential) {
            self.credential = Some(credential);
            self.user = Some(user);
        } else {
            self.clear();
        }
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.credential = None;
        self.user = None;
    }
}

fn usable(token: &str) -> bool {
    !token.trim().is_empty()
}
