use rand::Rng;

pub const OTP_MIN: u16 = 1000;
pub const OTP_MAX: u16 = 9999;

/// Four-digit one-time passcode.
#[must_use]
pub fn generate_otp() -> u16 {
    rand::rng().random_range(OTP_MIN..=OTP_MAX)
}

#[must_use]
pub fn otp_message(app_name: &str, otp: u16) -> String {
    format!(
        "Your {app_name} verification code is {otp}. For security reasons do not use this code \
         outside of the {app_name} app. Do not share this code with anyone."
    )
}

#[must_use]
pub fn bulk_message(app_name: &str, message: &str) -> String {
    format!("{app_name} here. {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_stays_in_range() {
        for _ in 0..1_000 {
            let otp = generate_otp();
            assert!((OTP_MIN..=OTP_MAX).contains(&otp));
        }
    }

    #[test]
    fn test_otp_message_mentions_app_and_code() {
        let msg = otp_message("Acme", 4821);
        assert!(msg.starts_with("Your Acme verification code is 4821."));
        assert!(msg.contains("outside of the Acme app"));
    }

    #[test]
    fn test_bulk_message_prefix() {
        assert_eq!(bulk_message("Acme", "New release!"), "Acme here. New release!");
    }
}
