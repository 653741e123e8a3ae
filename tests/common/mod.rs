#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_glacier::operation::create_vault::CreateVaultOutput;
use aws_sdk_glacier::operation::delete_archive::DeleteArchiveOutput;
use aws_sdk_glacier::operation::delete_vault::DeleteVaultOutput;
use aws_sdk_glacier::operation::list_vaults::ListVaultsOutput;
use aws_sdk_glacier::operation::upload_archive::UploadArchiveOutput;
use aws_sdk_sns::operation::check_if_phone_number_is_opted_out::CheckIfPhoneNumberIsOptedOutOutput;
use aws_sdk_sns::operation::opt_in_phone_number::OptInPhoneNumberOutput;
use aws_sdk_sns::operation::publish::PublishOutput;

use delegated_aws::bootstrap::Bootstrapper;
use delegated_aws::clients::{GlacierApi, GlacierConnector, SnsApi, SnsConnector};
use delegated_aws::core::config::{ServiceUserConfig, SmsDefaults};
use delegated_aws::core::models::{
    ListVaultsRequest, PublishRequest, SessionCredentials, UploadArchiveRequest,
};
use delegated_aws::errors::{AwsWrapperError, Result};
use delegated_aws::secrets::{AwsSecretSection, SecretDocument, SecretResolver};
use delegated_aws::sts::{CredentialDelegator, DelegationRequest};

pub fn service_user() -> ServiceUserConfig {
    ServiceUserConfig {
        secret_name: Some("app/prod".to_string()),
        access_key_id: Some("AKIASERVICEUSER".to_string()),
        secret_access_key: Some("service-user-secret".to_string()),
        role_name: Some("serviceAccount".to_string()),
        partition: None,
    }
}

pub fn role_credentials() -> SessionCredentials {
    SessionCredentials {
        access_key_id: "ASIAROLE".to_string(),
        secret_access_key: "role-secret".to_string(),
        session_token: "role-token".to_string(),
        expiration: None,
    }
}

pub fn secret_document() -> SecretDocument {
    SecretDocument {
        aws: AwsSecretSection {
            sns_toll_free_number: Some("+18005550100".to_string()),
            sns_default_number: Some("+15555550100".to_string()),
            sns_sender_id: None,
        },
        ..SecretDocument::default()
    }
}

pub fn sms_defaults() -> SmsDefaults {
    SmsDefaults {
        app_name: Some("Acme".to_string()),
        ..SmsDefaults::default()
    }
}

/// Stand-in for an error raised by the AWS SDK.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FakeServiceError(pub &'static str);

fn service_failure(operation: &'static str, fail_with: Option<&'static str>) -> Result<()> {
    match fail_with {
        Some(message) => Err(AwsWrapperError::provider(operation, FakeServiceError(message))),
        None => Ok(()),
    }
}

pub struct FakeDelegator {
    pub calls: AtomicUsize,
    pub credentials: SessionCredentials,
    pub fail_with: Option<&'static str>,
}

impl FakeDelegator {
    pub fn new(credentials: SessionCredentials) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            credentials,
            fail_with: None,
        })
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            credentials: role_credentials(),
            fail_with: Some(message),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialDelegator for FakeDelegator {
    async fn assume_role(&self, _request: &DelegationRequest) -> Result<SessionCredentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        service_failure("AssumeRole", self.fail_with)?;
        Ok(self.credentials.clone())
    }
}

pub struct FakeSecrets {
    pub calls: AtomicUsize,
    pub document: Option<SecretDocument>,
}

impl FakeSecrets {
    pub fn new(document: Option<SecretDocument>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            document,
        })
    }
}

#[async_trait]
impl SecretResolver for FakeSecrets {
    async fn get_all_secrets_typed(&self) -> Result<Option<SecretDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.document.clone())
    }
}

/// Records everything sent through SNS clients built by this connector.
#[derive(Default)]
pub struct FakeSnsConnector {
    pub connects: AtomicUsize,
    pub published: Arc<Mutex<Vec<PublishRequest>>>,
    pub opted_in: Arc<Mutex<Vec<String>>>,
    pub opted_out: bool,
    pub fail_with: Option<&'static str>,
}

impl FakeSnsConnector {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().unwrap().clone()
    }
}

impl SnsConnector for FakeSnsConnector {
    fn connect(&self, _credentials: &SessionCredentials) -> Box<dyn SnsApi> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeSns {
            published: Arc::clone(&self.published),
            opted_in: Arc::clone(&self.opted_in),
            opted_out: self.opted_out,
            fail_with: self.fail_with,
        })
    }
}

struct FakeSns {
    published: Arc<Mutex<Vec<PublishRequest>>>,
    opted_in: Arc<Mutex<Vec<String>>>,
    opted_out: bool,
    fail_with: Option<&'static str>,
}

#[async_trait]
impl SnsApi for FakeSns {
    async fn publish(&self, request: PublishRequest) -> Result<PublishOutput> {
        service_failure("Publish", self.fail_with)?;
        self.published.lock().unwrap().push(request);
        Ok(PublishOutput::builder().message_id("msg-0001").build())
    }

    async fn opt_in_phone_number(&self, phone_number: &str) -> Result<OptInPhoneNumberOutput> {
        service_failure("OptInPhoneNumber", self.fail_with)?;
        self.opted_in.lock().unwrap().push(phone_number.to_string());
        Ok(OptInPhoneNumberOutput::builder().build())
    }

    async fn check_if_phone_number_is_opted_out(
        &self,
        _phone_number: &str,
    ) -> Result<CheckIfPhoneNumberIsOptedOutOutput> {
        service_failure("CheckIfPhoneNumberIsOptedOut", self.fail_with)?;
        Ok(CheckIfPhoneNumberIsOptedOutOutput::builder()
            .is_opted_out(self.opted_out)
            .build())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlacierCall {
    CreateVault(String),
    UploadArchive(String, usize, Option<String>),
    ListVaults(Option<i32>, Option<String>),
    DeleteVault(String),
    DeleteArchive(String, String),
}

#[derive(Default)]
pub struct FakeGlacierConnector {
    pub connects: AtomicUsize,
    pub calls: Arc<Mutex<Vec<GlacierCall>>>,
    pub fail_with: Option<&'static str>,
}

impl FakeGlacierConnector {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<GlacierCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl GlacierConnector for FakeGlacierConnector {
    fn connect(&self, _credentials: &SessionCredentials) -> Box<dyn GlacierApi> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeGlacier {
            calls: Arc::clone(&self.calls),
            fail_with: self.fail_with,
        })
    }
}

struct FakeGlacier {
    calls: Arc<Mutex<Vec<GlacierCall>>>,
    fail_with: Option<&'static str>,
}

impl FakeGlacier {
    fn record(&self, call: GlacierCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GlacierApi for FakeGlacier {
    async fn create_vault(&self, vault_name: &str) -> Result<CreateVaultOutput> {
        self.record(GlacierCall::CreateVault(vault_name.to_string()));
        service_failure("CreateVault", self.fail_with)?;
        Ok(CreateVaultOutput::builder()
            .location(format!("/123456789012/vaults/{vault_name}"))
            .build())
    }

    async fn upload_archive(&self, request: UploadArchiveRequest) -> Result<UploadArchiveOutput> {
        self.record(GlacierCall::UploadArchive(
            request.vault_name,
            request.body.len(),
            request.description,
        ));
        Ok(UploadArchiveOutput::builder().archive_id("archive-1").build())
    }

    async fn list_vaults(&self, request: ListVaultsRequest) -> Result<ListVaultsOutput> {
        self.record(GlacierCall::ListVaults(request.limit, request.marker));
        Ok(ListVaultsOutput::builder().build())
    }

    async fn delete_vault(&self, vault_name: &str) -> Result<DeleteVaultOutput> {
        self.record(GlacierCall::DeleteVault(vault_name.to_string()));
        Ok(DeleteVaultOutput::builder().build())
    }

    async fn delete_archive(
        &self,
        vault_name: &str,
        archive_id: &str,
    ) -> Result<DeleteArchiveOutput> {
        self.record(GlacierCall::DeleteArchive(
            vault_name.to_string(),
            archive_id.to_string(),
        ));
        service_failure("DeleteArchive", self.fail_with)?;
        Ok(DeleteArchiveOutput::builder().build())
    }
}

pub fn bootstrapper(
    config: ServiceUserConfig,
    delegator: Arc<FakeDelegator>,
    secrets: Arc<FakeSecrets>,
) -> Bootstrapper {
    Bootstrapper::new(config, delegator, secrets)
}
