//! Dashboard load path
//!
//! Fetches the financial summary and turns the auth-required condition into
//! an explicit, one-shot redirect token instead of an ambient
//! "redirect in progress" flag.

use tracing::{info, warn};

use crate::error::GatewayError;
use crate::gateway::BackendGateway;
use crate::models::FinancialSummary;

/// One-shot login redirect token.
///
/// Handed to exactly one navigation handler; taking the URL consumes it, so
/// a stale handler observing the token later sees the redirect has already
/// happened.
#[derive(Debug)]
pub struct LoginRedirect {
    login_url: Option<String>,
}

impl LoginRedirect {
    fn new(login_url: String) -> Self {
        Self {
            login_url: Some(login_url),
        }
    }

    /// The login URL, without consuming the token.
    pub fn peek_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }

    /// Consume the token, yielding the URL the first time only.
    pub fn take_url(&mut self) -> Option<String> {
        self.login_url.take()
    }

    pub fn is_consumed(&self) -> bool {
        self.login_url.is_none()
    }
}

/// Outcome of a dashboard load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Summary fetched; immutable for the rest of the session.
    Loaded(FinancialSummary),
    /// The backend wants the user to complete an external login first.
    RedirectToLogin(LoginRedirect),
    /// Anything else; the user may reload to retry.
    Failed(GatewayError),
}

/// Drives the load-summary / redirect / resume flow for the dashboard page.
pub struct DashboardLoader;

impl DashboardLoader {
    /// Fetch the financial summary for `user_id` and classify the outcome.
    pub async fn load(gateway: &BackendGateway, user_id: &str) -> LoadOutcome {
        match gateway.fetch_financial_summary(user_id).await {
            Ok(summary) => {
                info!("Financial summary loaded");
                LoadOutcome::Loaded(summary)
            }
            Err(GatewayError::AuthRequired { login_url }) => {
                info!("Dashboard load requires external login");
                LoadOutcome::RedirectToLogin(LoginRedirect::new(login_url))
            }
            Err(e) => {
                warn!("Dashboard load failed: {}", e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Retry the load after the caller completed the external login flow.
    /// Nothing carries over from the redirected attempt.
    pub async fn resume(gateway: &BackendGateway, user_id: &str) -> LoadOutcome {
        Self::load(gateway, user_id).await
    }
}
