//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use userhub_entity::account::PublicAccount;

/// Context for the current authenticated request.
///
/// Built by the session extractor and passed into service methods so
/// that every operation knows which account is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account, without credentials.
    pub account: PublicAccount,
    /// IP address of the request origin, when known.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        account: PublicAccount,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            account,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The authenticated account's ID.
    pub fn account_id(&self) -> Uuid {
        self.account.id
    }
}
