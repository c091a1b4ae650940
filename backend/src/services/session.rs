//! Session validation
//!
//! No token means anonymous. A token whose `exp` has already passed is torn
//! down without a network call; otherwise the backend's `/api/auth/me`
//! decides, and any failure there clears the token.

use std::sync::Arc;

use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::Serialize;
use serde_json::Value;

use shared::session::{Session, TokenStore};

use crate::external::YieldApi;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

/// True only for a well-formed JWT whose expiry is in the past.
/// Opaque or unparseable tokens are left for the backend to judge.
pub fn token_expired(token: &str) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.leeway = 0;

    match decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(_) => false,
        Err(e) => matches!(e.kind(), ErrorKind::ExpiredSignature),
    }
}

/// Session service checking tokens against the backend
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn YieldApi>,
}

impl SessionService {
    pub fn new(api: Arc<dyn YieldApi>) -> Self {
        Self { api }
    }

    pub async fn check<S: TokenStore + Send>(&self, session: &mut Session<S>) -> SessionStatus {
        let Some(token) = session.token().map(str::to_string) else {
            return SessionStatus::anonymous();
        };

        if token_expired(&token) {
            tracing::info!("Session token expired, tearing down");
            session.teardown();
            return SessionStatus::anonymous();
        }

        let header = format!("Bearer {}", token);
        match self.api.current_user(&header).await {
            Ok(user) => SessionStatus {
                authenticated: true,
                user: Some(user),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, tearing down");
                session.teardown();
                SessionStatus::anonymous()
            }
        }
    }
}
