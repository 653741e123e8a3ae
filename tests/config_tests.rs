use std::env;

use delegated_aws::core::config::{GlacierSettings, ServiceUserConfig, SmsDefaults};
use serial_test::serial;

const KEYS: &[&str] = &[
    "AWS_SECRETMANAGER_SECRET_NAME",
    "AWS_IAM_SERVICEUSER_ACCESS_KEY_ID",
    "AWS_IAM_SERVICEUSER_SECRET_ACCESS_KEY",
    "TERRAFORM_SERVICE_ROLE_NAME",
    "AWS_PARTITION",
    "APP_NAME",
    "IS_PRODUCTION",
    "AWS_SNS_TOLL_FREE_NUMBER",
    "AWS_SNS_DEFAULT_NUMBER",
    "AWS_SNS_SENDER_ID",
    "AWS_GLACIER_BUCKET_NAME",
];

fn clear_env() {
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_service_user_from_env() {
    clear_env();
    unsafe {
        env::set_var("AWS_SECRETMANAGER_SECRET_NAME", "app/prod");
        env::set_var("AWS_IAM_SERVICEUSER_ACCESS_KEY_ID", "AKIA123");
        env::set_var("AWS_IAM_SERVICEUSER_SECRET_ACCESS_KEY", "secret");
        env::set_var("TERRAFORM_SERVICE_ROLE_NAME", "serviceAccount");
        env::set_var("AWS_PARTITION", "   ");
    }

    let config = ServiceUserConfig::from_env();
    assert_eq!(config.secret_name.as_deref(), Some("app/prod"));
    assert_eq!(config.access_key_id.as_deref(), Some("AKIA123"));
    assert_eq!(config.secret_access_key.as_deref(), Some("secret"));
    assert_eq!(config.role_name.as_deref(), Some("serviceAccount"));
    assert_eq!(config.partition, None);
    assert_eq!(config.partition(), "aws");

    clear_env();
}

#[test]
#[serial]
fn test_sms_defaults_from_env() {
    clear_env();
    unsafe {
        env::set_var("APP_NAME", "Acme");
        env::set_var("IS_PRODUCTION", "true");
        env::set_var("AWS_SNS_TOLL_FREE_NUMBER", "+18005550100");
    }

    let defaults = SmsDefaults::from_env();
    assert_eq!(defaults.app_name.as_deref(), Some("Acme"));
    assert_eq!(defaults.is_prod.as_deref(), Some("true"));
    assert_eq!(defaults.toll_free_number.as_deref(), Some("+18005550100"));
    assert_eq!(defaults.default_number, None);
    assert_eq!(defaults.sender_id, None);

    clear_env();
}

#[test]
#[serial]
fn test_glacier_settings_from_env() {
    clear_env();
    unsafe {
        env::set_var("AWS_GLACIER_BUCKET_NAME", "cold-archive");
    }

    let settings = GlacierSettings::from_env();
    assert_eq!(settings.bucket_name.as_deref(), Some("cold-archive"));
    assert_eq!(settings.is_prod, None);

    clear_env();
}
