//! Glacier vault and archive operations.

use std::sync::Arc;

use aws_sdk_glacier::operation::create_vault::CreateVaultOutput;
use aws_sdk_glacier::operation::delete_archive::DeleteArchiveOutput;
use aws_sdk_glacier::operation::delete_vault::DeleteVaultOutput;
use aws_sdk_glacier::operation::list_vaults::ListVaultsOutput;
use aws_sdk_glacier::operation::upload_archive::UploadArchiveOutput;
use tracing::info;

use crate::bootstrap::{Bootstrapper, GlacierSession};
use crate::clients::{GlacierConnector, SdkGlacierConnector};
use crate::core::config::{GlacierSettings, ServiceUserConfig};
use crate::core::models::{ListVaultsRequest, UploadArchiveRequest};
use crate::errors::{AwsWrapperError, Result};

pub const DEFAULT_LIST_LIMIT: i32 = 10;
pub const MAX_LIST_LIMIT: i32 = 1000;

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AwsWrapperError::precondition(format!("{field} is missing")));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ArchiveService {
    bootstrapper: Bootstrapper,
    settings: GlacierSettings,
    connector: Arc<dyn GlacierConnector>,
}

impl ArchiveService {
    pub fn new(
        bootstrapper: Bootstrapper,
        settings: GlacierSettings,
        connector: Arc<dyn GlacierConnector>,
    ) -> Self {
        Self {
            bootstrapper,
            settings,
            connector,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            Bootstrapper::with_aws(ServiceUserConfig::from_env()),
            GlacierSettings::from_env(),
            Arc::new(SdkGlacierConnector),
        )
    }

    #[must_use]
    pub fn settings(&self) -> &GlacierSettings {
        &self.settings
    }

    async fn session(&self) -> Result<GlacierSession> {
        self.bootstrapper
            .bootstrap_glacier(self.connector.as_ref())
            .await
    }

    /// # Errors
    ///
    /// Precondition error for an empty vault name; otherwise bootstrap or provider failures.
    #[tracing::instrument(err, skip(self))]
    pub async fn create_vault(&self, vault_name: &str) -> Result<CreateVaultOutput> {
        require(vault_name, "vault name")?;
        let session = self.session().await?;
        let output = session.client.create_vault(vault_name).await?;
        info!("Created vault {} at {:?}", vault_name, output.location());
        Ok(output)
    }

    /// Uploads the whole body as a single archive.
    ///
    /// # Errors
    ///
    /// Precondition error for an empty vault name; otherwise bootstrap or provider failures.
    #[tracing::instrument(err, skip(self, request), fields(vault = %request.vault_name, bytes = request.body.len()))]
    pub async fn upload_archive(
        &self,
        request: UploadArchiveRequest,
    ) -> Result<UploadArchiveOutput> {
        require(&request.vault_name, "vault name")?;
        let session = self.session().await?;
        session.client.upload_archive(request).await
    }

    /// Lists vaults for the account, `limit` defaulting to 10.
    ///
    /// # Errors
    ///
    /// Precondition error when the limit is outside `1..=1000`.
    #[tracing::instrument(err, skip(self))]
    pub async fn list_vaults(&self, request: ListVaultsRequest) -> Result<ListVaultsOutput> {
        let limit = request.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(AwsWrapperError::precondition(format!(
                "list limit {limit} must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }

        let session = self.session().await?;
        session
            .client
            .list_vaults(ListVaultsRequest {
                limit: Some(limit),
                marker: request.marker,
            })
            .await
    }

    /// # Errors
    ///
    /// Precondition error for an empty vault name; otherwise bootstrap or provider failures.
    #[tracing::instrument(err, skip(self))]
    pub async fn delete_vault(&self, vault_name: &str) -> Result<DeleteVaultOutput> {
        require(vault_name, "vault name")?;
        let session = self.session().await?;
        session.client.delete_vault(vault_name).await
    }

    /// Deletes one archive from a vault.
    ///
    /// # Errors
    ///
    /// Precondition error for an empty vault name or archive id.
    #[tracing::instrument(err, skip(self))]
    pub async fn delete_archive(
        &self,
        vault_name: &str,
        archive_id: &str,
    ) -> Result<DeleteArchiveOutput> {
        require(vault_name, "vault name")?;
        require(archive_id, "archive id")?;
        let session = self.session().await?;
        session.client.delete_archive(vault_name, archive_id).await
    }
}
