use std::env;

/// Region every client in this crate is bound to.
pub const AWS_REGION: &str = "us-east-2";
pub const DEFAULT_PARTITION: &str = "aws";

pub const SNS_API_VERSION: &str = "2010-03-31";
pub const GLACIER_API_VERSION: &str = "2012-06-01";

pub const ROLE_SESSION_NAME: &str = "service-role-session";
pub const ROLE_SESSION_DURATION_SECONDS: i32 = 3600;

/// Long-lived service user identity plus the role it delegates to.
///
/// Every field is optional here; presence is checked when a bootstrap runs so
/// that misconfiguration surfaces as a precondition error naming the field.
#[derive(Debug, Clone, Default)]
pub struct ServiceUserConfig {
    pub secret_name: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub role_name: Option<String>,
    pub partition: Option<String>,
}

impl ServiceUserConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            secret_name: non_empty_var("AWS_SECRETMANAGER_SECRET_NAME"),
            access_key_id: non_empty_var("AWS_IAM_SERVICEUSER_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("AWS_IAM_SERVICEUSER_SECRET_ACCESS_KEY"),
            role_name: non_empty_var("TERRAFORM_SERVICE_ROLE_NAME"),
            partition: non_empty_var("AWS_PARTITION"),
        }
    }

    #[must_use]
    pub fn partition(&self) -> &str {
        self.partition.as_deref().unwrap_or(DEFAULT_PARTITION)
    }
}

/// Caller-supplied SMS defaults. Any value set here overrides the secret.
#[derive(Debug, Clone, Default)]
pub struct SmsDefaults {
    pub app_name: Option<String>,
    pub is_prod: Option<String>,
    pub toll_free_number: Option<String>,
    pub default_number: Option<String>,
    pub sender_id: Option<String>,
}

impl SmsDefaults {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            app_name: non_empty_var("APP_NAME"),
            is_prod: non_empty_var("IS_PRODUCTION"),
            toll_free_number: non_empty_var("AWS_SNS_TOLL_FREE_NUMBER"),
            default_number: non_empty_var("AWS_SNS_DEFAULT_NUMBER"),
            sender_id: non_empty_var("AWS_SNS_SENDER_ID"),
        }
    }
}

/// Deployment settings for the Glacier façade.
///
/// Carried for callers through `ArchiveService::settings`; no vault or
/// archive operation reads them.
#[derive(Debug, Clone, Default)]
pub struct GlacierSettings {
    pub is_prod: Option<String>,
    pub bucket_name: Option<String>,
}

impl GlacierSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            is_prod: non_empty_var("IS_PRODUCTION"),
            bucket_name: non_empty_var("AWS_GLACIER_BUCKET_NAME"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
