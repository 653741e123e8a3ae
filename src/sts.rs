//! STS role delegation.
//!
//! Exchanges the long-lived service user keys for short-lived credentials
//! bound to a named role in the caller's own account.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;
use aws_sdk_sts::config::{BehaviorVersion, Credentials, Region};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::config::{
    AWS_REGION, ROLE_SESSION_DURATION_SECONDS, ROLE_SESSION_NAME, ServiceUserConfig,
};
use crate::core::models::SessionCredentials;
use crate::errors::{AwsWrapperError, Result};

/// Validated input for a role assumption.
///
/// Only constructible through [`DelegationRequest::new`], so holding one means
/// the long-lived keys and role name have passed their sanity checks.
#[derive(Clone)]
pub struct DelegationRequest {
    access_key_id: String,
    secret_access_key: String,
    role_name: String,
    partition: String,
}

impl DelegationRequest {
    /// # Errors
    ///
    /// Returns a precondition error naming the first missing or invalid field,
    /// checked as access key, secret key, key equality, role name.
    pub fn new(config: &ServiceUserConfig) -> Result<Self> {
        let access_key_id = present(config.access_key_id.as_deref())
            .ok_or_else(|| AwsWrapperError::precondition("service user access key id is missing"))?;
        let secret_access_key = present(config.secret_access_key.as_deref()).ok_or_else(|| {
            AwsWrapperError::precondition("service user secret access key is missing")
        })?;
        if access_key_id == secret_access_key {
            return Err(AwsWrapperError::precondition(
                "service user access key id equals the secret access key",
            ));
        }
        let role_name = present(config.role_name.as_deref())
            .ok_or_else(|| AwsWrapperError::precondition("service role name is missing"))?;

        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            role_name: role_name.to_string(),
            partition: config.partition().to_string(),
        })
    }

    #[must_use]
    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    #[must_use]
    pub fn role_arn(&self, account_id: &str) -> String {
        role_arn(&self.partition, account_id, &self.role_name)
    }
}

impl std::fmt::Debug for DelegationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationRequest")
            .field("access_key_id", &self.access_key_id)
            .field("role_name", &self.role_name)
            .field("partition", &self.partition)
            .finish_non_exhaustive()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[must_use]
pub fn role_arn(partition: &str, account_id: &str, role_name: &str) -> String {
    format!("arn:{partition}:iam::{account_id}:role/{role_name}")
}

#[async_trait]
pub trait CredentialDelegator: Send + Sync {
    async fn assume_role(&self, request: &DelegationRequest) -> Result<SessionCredentials>;
}

/// Delegator backed by the real STS API.
#[derive(Debug, Clone, Default)]
pub struct StsDelegator;

impl StsDelegator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn client(request: &DelegationRequest) -> StsClient {
        let credentials = Credentials::new(
            &request.access_key_id,
            &request.secret_access_key,
            None,
            None,
            "service-user",
        );
        let config = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(AWS_REGION))
            .credentials_provider(credentials)
            .build();
        StsClient::from_conf(config)
    }
}

#[async_trait]
impl CredentialDelegator for StsDelegator {
    #[tracing::instrument(skip(self), fields(role = %request.role_name()))]
    async fn assume_role(&self, request: &DelegationRequest) -> Result<SessionCredentials> {
        let client = Self::client(request);

        let identity = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("GetCallerIdentity", e))?;
        let account_id = identity
            .account()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AwsWrapperError::upstream("Unable to determine AWS account ID"))?;

        let role_arn = request.role_arn(account_id);
        debug!("Assuming role {}", role_arn);

        let assumed = client
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(ROLE_SESSION_NAME)
            .duration_seconds(ROLE_SESSION_DURATION_SECONDS)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("AssumeRole", e))?;
        let creds = assumed
            .credentials()
            .ok_or_else(|| AwsWrapperError::upstream("AssumeRole returned no credentials"))?;

        let expiration = creds.expiration();
        let credentials = SessionCredentials {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            expiration: DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos()),
        };

        info!("Assumed role {}", role_arn);
        Ok(credentials)
    }
}

/// Reuses assumed-role credentials per role name until shortly before expiry.
///
/// Each role has its own slot lock, so a slow assumption for one role never
/// blocks another; the map lock is only held to look up the slot. Credentials
/// without an expiration are never cached.
pub struct CachedDelegator {
    inner: Arc<dyn CredentialDelegator>,
    refresh_window: Duration,
    slots: Mutex<HashMap<String, Arc<Mutex<Option<SessionCredentials>>>>>,
}

impl CachedDelegator {
    pub fn new(inner: Arc<dyn CredentialDelegator>, refresh_window: Duration) -> Self {
        Self {
            inner,
            refresh_window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, credentials: &SessionCredentials, now: DateTime<Utc>) -> bool {
        credentials
            .expiration
            .is_some_and(|expires| now + self.refresh_window < expires)
    }

    async fn slot(&self, role_name: &str) -> Arc<Mutex<Option<SessionCredentials>>> {
        let mut slots = self.slots.lock().await;
        Arc::clone(
            slots
                .entry(role_name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(None))),
        )
    }
}

#[async_trait]
impl CredentialDelegator for CachedDelegator {
    async fn assume_role(&self, request: &DelegationRequest) -> Result<SessionCredentials> {
        let slot = self.slot(request.role_name()).await;
        // Same-role callers queue here and reuse the first result.
        let mut cached = slot.lock().await;

        if let Some(credentials) = cached.as_ref() {
            if self.is_fresh(credentials, Utc::now()) {
                debug!("Reusing cached credentials for role {}", request.role_name());
                return Ok(credentials.clone());
            }
        }

        let fresh = self.inner.assume_role(request).await?;
        *cached = self
            .is_fresh(&fresh, Utc::now())
            .then(|| fresh.clone());
        Ok(fresh)
    }
}
