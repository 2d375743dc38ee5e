use serde::{Deserialize, Serialize};

use crate::models::{AuthResponse, User};

/// The authenticated session, constructed once at startup and passed
/// explicitly into the API client. There is no ambient auth singleton; a
/// handler can only reach the backend through a client that was handed a
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub user: User,
}

impl SessionContext {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl From<AuthResponse> for SessionContext {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: auth.access_token,
            user: auth.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_becomes_session() {
        let auth: AuthResponse = serde_json::from_str(
            r#"{
                "access_token": "tok-123",
                "token_type": "bearer",
                "user": {
                    "id": 1,
                    "email": "vertrieb@example.com",
                    "full_name": "Kim Weber",
                    "is_active": true,
                    "created_at": "2024-01-02T08:00:00"
                }
            }"#,
        )
        .unwrap();

        let session = SessionContext::from(auth);
        assert_eq!(session.bearer(), "Bearer tok-123");
        assert_eq!(session.user.email, "vertrieb@example.com");
    }
}
