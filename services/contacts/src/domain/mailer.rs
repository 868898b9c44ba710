use async_trait::async_trait;

/// Subject line of the one-time code email.
pub const OTP_SUBJECT: &str = "Your OTP Code";

/// Plaintext body of the one-time code email.
pub fn otp_body(code: &str) -> String {
    format!("Your OTP code is: {code}\n\nThis code will expire in a few minutes.")
}

/// Outbound email delivery for one-time codes.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, code: &str) -> anyhow::Result<()>;
}
