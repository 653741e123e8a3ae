//! SNS client seam
//!
//! `SnsApi` is the narrow slice of SNS the SMS façade needs; `SnsConnector`
//! builds one from freshly assumed credentials.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_sns::operation::check_if_phone_number_is_opted_out::CheckIfPhoneNumberIsOptedOutOutput;
use aws_sdk_sns::operation::opt_in_phone_number::OptInPhoneNumberOutput;
use aws_sdk_sns::operation::publish::PublishOutput;
use aws_sdk_sns::types::MessageAttributeValue;
use tracing::debug;

use crate::core::config::{AWS_REGION, SNS_API_VERSION};
use crate::core::models::{PublishRequest, SessionCredentials};
use crate::errors::{AwsWrapperError, Result};

#[async_trait]
pub trait SnsApi: Send + Sync {
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutput>;

    async fn opt_in_phone_number(&self, phone_number: &str) -> Result<OptInPhoneNumberOutput>;

    async fn check_if_phone_number_is_opted_out(
        &self,
        phone_number: &str,
    ) -> Result<CheckIfPhoneNumberIsOptedOutOutput>;
}

pub trait SnsConnector: Send + Sync {
    fn connect(&self, credentials: &SessionCredentials) -> Box<dyn SnsApi>;
}

/// SDK-backed SNS client.
#[derive(Clone, Debug)]
pub struct SnsClient {
    inner: Client,
}

impl SnsClient {
    #[must_use]
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SnsApi for SnsClient {
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutput> {
        let mut builder = self
            .inner
            .publish()
            .phone_number(request.phone_number)
            .subject(request.subject)
            .message(request.message);

        for (name, attribute) in request.attributes {
            let value = MessageAttributeValue::builder()
                .data_type(attribute.data_type.as_str())
                .string_value(attribute.string_value)
                .build()
                .map_err(|e| AwsWrapperError::provider("Publish", e))?;
            builder = builder.message_attributes(name, value);
        }

        builder
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("Publish", e))
    }

    async fn opt_in_phone_number(&self, phone_number: &str) -> Result<OptInPhoneNumberOutput> {
        self.inner
            .opt_in_phone_number()
            .phone_number(phone_number)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("OptInPhoneNumber", e))
    }

    async fn check_if_phone_number_is_opted_out(
        &self,
        phone_number: &str,
    ) -> Result<CheckIfPhoneNumberIsOptedOutOutput> {
        self.inner
            .check_if_phone_number_is_opted_out()
            .phone_number(phone_number)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("CheckIfPhoneNumberIsOptedOut", e))
    }
}

/// Builds SNS clients bound to the fixed region with session credentials.
#[derive(Debug, Clone, Default)]
pub struct SdkSnsConnector;

impl SnsConnector for SdkSnsConnector {
    fn connect(&self, credentials: &SessionCredentials) -> Box<dyn SnsApi> {
        debug!(
            "Building SNS client in {} (api {})",
            AWS_REGION, SNS_API_VERSION
        );
        let provider = Credentials::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            Some(credentials.session_token.clone()),
            None,
            "assumed-role",
        );
        let config = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(AWS_REGION))
            .credentials_provider(provider)
            .build();
        Box::new(SnsClient::new(Client::from_conf(config)))
    }
}
