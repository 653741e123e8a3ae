//! AWS service clients used by the façades.

pub mod glacier_client;
pub mod sns_client;

pub use glacier_client::{GlacierApi, GlacierClient, GlacierConnector, SdkGlacierConnector};
pub use sns_client::{SdkSnsConnector, SnsApi, SnsClient, SnsConnector};
