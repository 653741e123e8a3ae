//! Per-call service bootstrap.
//!
//! Every façade operation runs one of these from scratch: assume the service
//! role, resolve the secret, merge defaults, validate, then build the client.
//! Nothing is reused between calls unless the injected delegator caches.

use std::sync::Arc;

use tracing::debug;

use crate::clients::{GlacierApi, GlacierConnector, SnsApi, SnsConnector};
use crate::core::config::{ServiceUserConfig, SmsDefaults};
use crate::core::models::SessionCredentials;
use crate::errors::{AwsWrapperError, Result};
use crate::secrets::{SecretDocument, SecretResolver, SecretsManagerResolver};
use crate::sts::{CredentialDelegator, DelegationRequest, StsDelegator};

/// SMS defaults after merging overrides with the secret and validating them.
///
/// `is_prod` and `default_number` are resolved for callers inspecting the
/// session; the SMS operations themselves only send from `toll_free_number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSmsDefaults {
    pub app_name: String,
    pub is_prod: bool,
    pub toll_free_number: String,
    pub default_number: String,
    pub sender_id: Option<String>,
}

pub struct SmsSession {
    pub client: Box<dyn SnsApi>,
    pub defaults: ResolvedSmsDefaults,
}

pub struct GlacierSession {
    pub client: Box<dyn GlacierApi>,
}

/// Caller override wins; empty strings count as absent on both sides.
#[must_use]
pub fn resolve_default(override_value: Option<&str>, secret_value: Option<&str>) -> Option<String> {
    override_value
        .filter(|v| !v.is_empty())
        .or_else(|| secret_value.filter(|v| !v.is_empty()))
        .map(str::to_string)
}

#[must_use]
pub fn parse_is_prod(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

fn check_role_keys(credentials: &SessionCredentials) -> Result<()> {
    if credentials.access_key_id.is_empty() {
        return Err(AwsWrapperError::precondition("role access key id is missing"));
    }
    if credentials.secret_access_key.is_empty() {
        return Err(AwsWrapperError::precondition("role secret access key is missing"));
    }
    if credentials.access_key_id == credentials.secret_access_key {
        return Err(AwsWrapperError::precondition(
            "role access key id equals the secret access key",
        ));
    }
    Ok(())
}

fn check_session_token(credentials: &SessionCredentials) -> Result<()> {
    if credentials.session_token.is_empty() {
        return Err(AwsWrapperError::precondition("role session token is missing"));
    }
    Ok(())
}

/// Merges and validates SMS defaults.
///
/// Checks run in a fixed order and the first failure wins: access key,
/// secret key, key equality, toll-free number, default number, app name,
/// session token.
///
/// # Errors
///
/// Returns a precondition error naming the first missing or invalid value.
pub fn resolve_sms_defaults(
    credentials: &SessionCredentials,
    overrides: &SmsDefaults,
    secret: &SecretDocument,
) -> Result<ResolvedSmsDefaults> {
    let toll_free_number = resolve_default(
        overrides.toll_free_number.as_deref(),
        secret.aws.sns_toll_free_number.as_deref(),
    );
    let default_number = resolve_default(
        overrides.default_number.as_deref(),
        secret.aws.sns_default_number.as_deref(),
    );
    let sender_id = resolve_default(
        overrides.sender_id.as_deref(),
        secret.aws.sns_sender_id.as_deref(),
    );

    check_role_keys(credentials)?;
    let toll_free_number = toll_free_number
        .ok_or_else(|| AwsWrapperError::precondition("SNS toll-free number is missing"))?;
    let default_number = default_number
        .ok_or_else(|| AwsWrapperError::precondition("SNS default number is missing"))?;
    let app_name = overrides
        .app_name
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AwsWrapperError::precondition("app name is missing"))?;
    check_session_token(credentials)?;

    Ok(ResolvedSmsDefaults {
        app_name,
        is_prod: parse_is_prod(overrides.is_prod.as_deref()),
        toll_free_number,
        default_number,
        sender_id,
    })
}

/// Validates credentials for Glacier: access key, secret key, equality, session token.
///
/// # Errors
///
/// Returns a precondition error naming the first invalid value.
pub fn validate_glacier_credentials(credentials: &SessionCredentials) -> Result<()> {
    check_role_keys(credentials)?;
    check_session_token(credentials)
}

/// Combines a credential delegator and a secret resolver for one service user.
#[derive(Clone)]
pub struct Bootstrapper {
    service_user: ServiceUserConfig,
    delegator: Arc<dyn CredentialDelegator>,
    secrets: Arc<dyn SecretResolver>,
}

impl Bootstrapper {
    pub fn new(
        service_user: ServiceUserConfig,
        delegator: Arc<dyn CredentialDelegator>,
        secrets: Arc<dyn SecretResolver>,
    ) -> Self {
        Self {
            service_user,
            delegator,
            secrets,
        }
    }

    /// Wires the real STS delegator and Secrets Manager resolver.
    #[must_use]
    pub fn with_aws(service_user: ServiceUserConfig) -> Self {
        let secrets = Arc::new(SecretsManagerResolver::new(service_user.clone()));
        Self::new(service_user, Arc::new(StsDelegator::new()), secrets)
    }

    #[must_use]
    pub fn service_user(&self) -> &ServiceUserConfig {
        &self.service_user
    }

    async fn delegate(&self) -> Result<(SessionCredentials, SecretDocument)> {
        let request = DelegationRequest::new(&self.service_user)?;
        let credentials = self.delegator.assume_role(&request).await?;
        let secret = self
            .secrets
            .get_all_secrets_typed()
            .await?
            .ok_or_else(|| AwsWrapperError::upstream("secret is undefined"))?;
        Ok((credentials, secret))
    }

    /// # Errors
    ///
    /// Fails on any delegation, secret, or validation error; no client is built then.
    pub async fn bootstrap_sms(
        &self,
        overrides: &SmsDefaults,
        connector: &dyn SnsConnector,
    ) -> Result<SmsSession> {
        let (credentials, secret) = self.delegate().await?;
        let defaults = resolve_sms_defaults(&credentials, overrides, &secret)?;
        debug!("SMS bootstrap complete for app {}", defaults.app_name);
        Ok(SmsSession {
            client: connector.connect(&credentials),
            defaults,
        })
    }

    /// # Errors
    ///
    /// Fails on any delegation, secret, or validation error; no client is built then.
    pub async fn bootstrap_glacier(
        &self,
        connector: &dyn GlacierConnector,
    ) -> Result<GlacierSession> {
        let (credentials, _secret) = self.delegate().await?;
        validate_glacier_credentials(&credentials)?;
        debug!("Glacier bootstrap complete");
        Ok(GlacierSession {
            client: connector.connect(&credentials),
        })
    }
}
