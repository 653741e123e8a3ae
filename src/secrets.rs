use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_secretsmanager::config::{BehaviorVersion, Credentials, Region};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::core::config::{AWS_REGION, ServiceUserConfig};
use crate::errors::{AwsWrapperError, Result};

/// AWS-specific values stored under the `AWS` key of the secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AwsSecretSection {
    #[serde(rename = "AWS_SNS_TollFreeNumber", default)]
    pub sns_toll_free_number: Option<String>,
    #[serde(rename = "AWS_SNS_DefaultNumber", default)]
    pub sns_default_number: Option<String>,
    #[serde(rename = "AWS_SNS_SenderID", default)]
    pub sns_sender_id: Option<String>,
}

/// Parsed secret blob.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SecretDocument {
    #[serde(rename = "AWS", default)]
    pub aws: AwsSecretSection,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SecretDocument {
    /// # Errors
    ///
    /// Returns an upstream error if the payload is not a JSON object of the expected shape.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Resolves the whole secret, or `None` when the store holds no string payload.
    async fn get_all_secrets_typed(&self) -> Result<Option<SecretDocument>>;
}

/// Reads the secret from AWS Secrets Manager with the long-lived service user keys.
#[derive(Debug, Clone)]
pub struct SecretsManagerResolver {
    config: ServiceUserConfig,
}

impl SecretsManagerResolver {
    #[must_use]
    pub fn new(config: ServiceUserConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<SecretsManagerClient> {
        let access_key_id = self
            .config
            .access_key_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AwsWrapperError::precondition("service user access key id is missing"))?;
        let secret_access_key = self
            .config
            .secret_access_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AwsWrapperError::precondition("service user secret access key is missing")
            })?;

        let credentials =
            Credentials::new(access_key_id, secret_access_key, None, None, "service-user");
        let config = aws_sdk_secretsmanager::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(AWS_REGION))
            .credentials_provider(credentials)
            .build();
        Ok(SecretsManagerClient::from_conf(config))
    }
}

#[async_trait]
impl SecretResolver for SecretsManagerResolver {
    #[tracing::instrument(skip(self), fields(secret = ?self.config.secret_name))]
    async fn get_all_secrets_typed(&self) -> Result<Option<SecretDocument>> {
        let secret_name = self
            .config
            .secret_name
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AwsWrapperError::precondition("secret name is missing"))?;
        let client = self.client()?;

        let output = client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("GetSecretValue", e))?;

        let Some(raw) = output.secret_string() else {
            return Ok(None);
        };
        let document = SecretDocument::parse(raw)?;
        info!("Resolved secret {}", secret_name);
        Ok(Some(document))
    }
}
