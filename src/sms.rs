//! SMS delivery over SNS.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{Bootstrapper, ResolvedSmsDefaults, SmsSession};
use crate::clients::{SdkSnsConnector, SnsConnector};
use crate::core::config::{ServiceUserConfig, SmsDefaults};
use crate::core::models::{
    BulkTextRequest, BulkTextResponse, MessageAttribute, OptInResponse, OptOutStatusResponse,
    OtpResponse, PhoneNumberRequest, PublishRequest, SendOtpRequest, SmsType,
};
use crate::errors::{AwsWrapperError, Result};
use crate::utils::otp::{bulk_message, generate_otp, otp_message};
use crate::utils::phone::validate_recipient;

pub const ORIGINATION_NUMBER_ATTRIBUTE: &str = "AWS.MM.SMS.OriginationNumber";
pub const SMS_TYPE_ATTRIBUTE: &str = "AWS.SNS.SMS.SMSType";
pub const SENDER_ID_ATTRIBUTE: &str = "AWS.SNS.SMS.SenderID";
const SUBJECT: &str = "OTP";

/// Message attributes pinning the originating number and the SMS type.
#[must_use]
pub fn sms_attributes(
    defaults: &ResolvedSmsDefaults,
    sms_type: SmsType,
) -> BTreeMap<String, MessageAttribute> {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        ORIGINATION_NUMBER_ATTRIBUTE.to_string(),
        MessageAttribute::string(&defaults.toll_free_number),
    );
    attributes.insert(
        SMS_TYPE_ATTRIBUTE.to_string(),
        MessageAttribute::string(sms_type.as_str()),
    );
    if let Some(sender_id) = &defaults.sender_id {
        attributes.insert(
            SENDER_ID_ATTRIBUTE.to_string(),
            MessageAttribute::string(sender_id),
        );
    }
    attributes
}

/// One method per SNS operation; each call bootstraps its own client.
#[derive(Clone)]
pub struct SmsService {
    bootstrapper: Bootstrapper,
    defaults: SmsDefaults,
    connector: Arc<dyn SnsConnector>,
}

impl SmsService {
    pub fn new(
        bootstrapper: Bootstrapper,
        defaults: SmsDefaults,
        connector: Arc<dyn SnsConnector>,
    ) -> Self {
        Self {
            bootstrapper,
            defaults,
            connector,
        }
    }

    /// Real STS, Secrets Manager and SNS, configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            Bootstrapper::with_aws(ServiceUserConfig::from_env()),
            SmsDefaults::from_env(),
            Arc::new(SdkSnsConnector),
        )
    }

    async fn session(&self) -> Result<SmsSession> {
        self.bootstrapper
            .bootstrap_sms(&self.defaults, self.connector.as_ref())
            .await
    }

    /// Sends a one-time passcode, or the caller's own message, to one number.
    ///
    /// # Errors
    ///
    /// Fails before any network call when the recipient is not numeric, or when
    /// a custom message is requested but empty.
    #[tracing::instrument(err, skip(self, request), fields(recipient = %request.recipient))]
    pub async fn send_otp(&self, request: SendOtpRequest) -> Result<OtpResponse> {
        let recipient = validate_recipient(&request.recipient)?.to_string();
        if !request.use_generated_otp_message && request.message.is_empty() {
            return Err(AwsWrapperError::precondition("message is empty"));
        }

        let session = self.session().await?;
        let otp = generate_otp();
        let message = if request.use_generated_otp_message {
            otp_message(&session.defaults.app_name, otp)
        } else {
            request.message
        };

        let response = session
            .client
            .publish(PublishRequest {
                phone_number: recipient,
                subject: SUBJECT.to_string(),
                message: message.clone(),
                attributes: sms_attributes(&session.defaults, SmsType::Transactional),
            })
            .await?;

        info!("OTP published, message id {:?}", response.message_id());
        Ok(OtpResponse {
            response,
            otp,
            message,
        })
    }

    /// Sends one app-prefixed text to a single recipient.
    ///
    /// Callers fan out over their recipient list; nothing is batched here.
    ///
    /// # Errors
    ///
    /// Fails before any network call when the recipient is not numeric.
    #[tracing::instrument(err, skip(self, request), fields(recipient = %request.recipient))]
    pub async fn send_bulk_text(&self, request: BulkTextRequest) -> Result<BulkTextResponse> {
        let recipient = validate_recipient(&request.recipient)?.to_string();

        let session = self.session().await?;
        let message = bulk_message(&session.defaults.app_name, &request.message);

        let response = session
            .client
            .publish(PublishRequest {
                phone_number: recipient,
                subject: SUBJECT.to_string(),
                message: message.clone(),
                attributes: sms_attributes(&session.defaults, SmsType::Transactional),
            })
            .await?;

        Ok(BulkTextResponse { response, message })
    }

    /// # Errors
    ///
    /// Fails before any network call when the recipient is not numeric.
    #[tracing::instrument(err, skip(self, request), fields(recipient = %request.recipient))]
    pub async fn opt_in_phone_number(&self, request: PhoneNumberRequest) -> Result<OptInResponse> {
        let recipient = validate_recipient(&request.recipient)?.to_string();

        let session = self.session().await?;
        let response = session.client.opt_in_phone_number(&recipient).await?;

        Ok(OptInResponse {
            response,
            to: recipient,
        })
    }

    /// Reports whether the number has opted out of SMS from this account.
    ///
    /// # Errors
    ///
    /// Fails before any network call when the recipient is not numeric.
    #[tracing::instrument(err, skip(self, request), fields(recipient = %request.recipient))]
    pub async fn check_opt_out_status(
        &self,
        request: PhoneNumberRequest,
    ) -> Result<OptOutStatusResponse> {
        let recipient = validate_recipient(&request.recipient)?.to_string();

        let session = self.session().await?;
        let response = session
            .client
            .check_if_phone_number_is_opted_out(&recipient)
            .await?;
        let is_opted_out = response.is_opted_out();

        Ok(OptOutStatusResponse {
            response,
            to: recipient,
            is_opted_out,
        })
    }
}
