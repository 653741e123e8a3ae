use std::collections::BTreeMap;
use std::fmt;

use aws_sdk_sns::operation::check_if_phone_number_is_opted_out::CheckIfPhoneNumberIsOptedOutOutput;
use aws_sdk_sns::operation::opt_in_phone_number::OptInPhoneNumberOutput;
use aws_sdk_sns::operation::publish::PublishOutput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short-lived credentials produced by a role assumption.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

// Keys never reach the logs.
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmsType {
    Transactional,
    Promotional,
}

impl SmsType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SmsType::Transactional => "Transactional",
            SmsType::Promotional => "Promotional",
        }
    }
}

/// SNS logical data types for message attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDataType {
    String,
    StringArray,
    Number,
    Binary,
}

impl AttributeDataType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeDataType::String => "String",
            AttributeDataType::StringArray => "String.Array",
            AttributeDataType::Number => "Number",
            AttributeDataType::Binary => "Binary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAttribute {
    pub data_type: AttributeDataType,
    pub string_value: String,
}

impl MessageAttribute {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: AttributeDataType::String,
            string_value: value.into(),
        }
    }
}

/// A single SMS publish, already validated and fully assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub phone_number: String,
    pub subject: String,
    pub message: String,
    pub attributes: BTreeMap<String, MessageAttribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub recipient: String,
    #[serde(default)]
    pub use_generated_otp_message: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkTextRequest {
    pub recipient: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumberRequest {
    pub recipient: String,
}

impl PhoneNumberRequest {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OtpResponse {
    pub response: PublishOutput,
    pub otp: u16,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BulkTextResponse {
    pub response: PublishOutput,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct OptInResponse {
    pub response: OptInPhoneNumberOutput,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct OptOutStatusResponse {
    pub response: CheckIfPhoneNumberIsOptedOutOutput,
    pub to: String,
    pub is_opted_out: bool,
}

#[derive(Debug, Clone)]
pub struct UploadArchiveRequest {
    pub vault_name: String,
    pub body: Vec<u8>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListVaultsRequest {
    pub limit: Option<i32>,
    pub marker: Option<String>,
}
