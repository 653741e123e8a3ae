//! Glacier client seam
//!
//! Every call passes `-` as the account id so Glacier uses the account that
//! owns the signing credentials.

use async_trait::async_trait;
use aws_sdk_glacier::Client;
use aws_sdk_glacier::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_glacier::operation::create_vault::CreateVaultOutput;
use aws_sdk_glacier::operation::delete_archive::DeleteArchiveOutput;
use aws_sdk_glacier::operation::delete_vault::DeleteVaultOutput;
use aws_sdk_glacier::operation::list_vaults::ListVaultsOutput;
use aws_sdk_glacier::operation::upload_archive::UploadArchiveOutput;
use aws_sdk_glacier::primitives::ByteStream;
use tracing::debug;

use crate::core::config::{AWS_REGION, GLACIER_API_VERSION};
use crate::core::models::{ListVaultsRequest, SessionCredentials, UploadArchiveRequest};
use crate::errors::{AwsWrapperError, Result};

pub const ACCOUNT_ID_PLACEHOLDER: &str = "-";

#[async_trait]
pub trait GlacierApi: Send + Sync {
    async fn create_vault(&self, vault_name: &str) -> Result<CreateVaultOutput>;

    async fn upload_archive(&self, request: UploadArchiveRequest) -> Result<UploadArchiveOutput>;

    async fn list_vaults(&self, request: ListVaultsRequest) -> Result<ListVaultsOutput>;

    async fn delete_vault(&self, vault_name: &str) -> Result<DeleteVaultOutput>;

    async fn delete_archive(
        &self,
        vault_name: &str,
        archive_id: &str,
    ) -> Result<DeleteArchiveOutput>;
}

pub trait GlacierConnector: Send + Sync {
    fn connect(&self, credentials: &SessionCredentials) -> Box<dyn GlacierApi>;
}

#[derive(Clone, Debug)]
pub struct GlacierClient {
    inner: Client,
}

impl GlacierClient {
    #[must_use]
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GlacierApi for GlacierClient {
    async fn create_vault(&self, vault_name: &str) -> Result<CreateVaultOutput> {
        self.inner
            .create_vault()
            .account_id(ACCOUNT_ID_PLACEHOLDER)
            .vault_name(vault_name)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("CreateVault", e))
    }

    async fn upload_archive(&self, request: UploadArchiveRequest) -> Result<UploadArchiveOutput> {
        // Single request regardless of size; no multipart upload.
        self.inner
            .upload_archive()
            .account_id(ACCOUNT_ID_PLACEHOLDER)
            .vault_name(request.vault_name)
            .set_archive_description(request.description)
            .body(ByteStream::from(request.body))
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("UploadArchive", e))
    }

    async fn list_vaults(&self, request: ListVaultsRequest) -> Result<ListVaultsOutput> {
        self.inner
            .list_vaults()
            .account_id(ACCOUNT_ID_PLACEHOLDER)
            .set_limit(request.limit)
            .set_marker(request.marker)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("ListVaults", e))
    }

    async fn delete_vault(&self, vault_name: &str) -> Result<DeleteVaultOutput> {
        self.inner
            .delete_vault()
            .account_id(ACCOUNT_ID_PLACEHOLDER)
            .vault_name(vault_name)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("DeleteVault", e))
    }

    async fn delete_archive(
        &self,
        vault_name: &str,
        archive_id: &str,
    ) -> Result<DeleteArchiveOutput> {
        self.inner
            .delete_archive()
            .account_id(ACCOUNT_ID_PLACEHOLDER)
            .vault_name(vault_name)
            .archive_id(archive_id)
            .send()
            .await
            .map_err(|e| AwsWrapperError::provider("DeleteArchive", e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SdkGlacierConnector;

impl GlacierConnector for SdkGlacierConnector {
    fn connect(&self, credentials: &SessionCredentials) -> Box<dyn GlacierApi> {
        debug!(
            "Building Glacier client in {} (api {})",
            AWS_REGION, GLACIER_API_VERSION
        );
        let provider = Credentials::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            Some(credentials.session_token.clone()),
            None,
            "assumed-role",
        );
        let config = aws_sdk_glacier::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(AWS_REGION))
            .credentials_provider(provider)
            .build();
        Box::new(GlacierClient::new(Client::from_conf(config)))
    }
}
