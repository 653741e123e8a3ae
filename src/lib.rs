/// Delegated AWS - thin wrappers around SNS and Glacier that run on
/// short-lived, role-scoped credentials.
///
/// Every operation performs the same bootstrap before touching the service:
/// 1. Assume the service role through STS with the long-lived service user keys
/// 2. Resolve the application secret from Secrets Manager
/// 3. Merge caller overrides with secret values and validate them
/// 4. Build a client in `us-east-2` with the assumed-role credentials
///
/// # Architecture
///
/// - `sts` and `secrets` hold the credential delegator and secret resolver
/// - `bootstrap` combines them into ready-to-use service sessions
/// - `sms` and `archive` expose one method per SNS or Glacier operation
/// - `clients` holds the traits each AWS service sits behind, plus SDK implementations
///
/// # Example
///
/// ```no_run
/// use delegated_aws::core::models::{PhoneNumberRequest, SendOtpRequest};
/// use delegated_aws::sms::SmsService;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     delegated_aws::setup_logging();
///
///     let sms = SmsService::from_env();
///
///     let sent = sms
///         .send_otp(SendOtpRequest {
///             recipient: "+15551234567".to_string(),
///             use_generated_otp_message: true,
///             message: String::new(),
///         })
///         .await?;
///     println!("Sent code {} ({})", sent.otp, sent.message);
///
///     let status = sms
///         .check_opt_out_status(PhoneNumberRequest::new("+15551234567"))
///         .await?;
///     println!("Opted out: {}", status.is_opted_out);
///
///     Ok(())
/// }
/// ```
pub mod archive;
pub mod bootstrap;
pub mod clients;
pub mod core;
pub mod errors;
pub mod secrets;
pub mod sms;
pub mod sts;
pub mod utils;

pub use errors::{AwsWrapperError, ErrorDetails, StatusCodeCategory};

/// Configure structured JSON logging.
///
/// Honours `RUST_LOG` and falls back to `info`. Safe to call more than once;
/// only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// delegated_aws::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
