use std::str::FromStr;

/// Contacts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ContactsConfig {
    /// Database connection URL.
    pub database_url: String,
    /// HMAC secret for access and OTP tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `CONTACTS_PORT`.
    pub contacts_port: u16,
    /// Outbound mail relay. `None` when `SMTP_HOST` is unset; OTP emails are then only logged.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub encryption: SmtpEncryption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpEncryption {
    /// Implicit TLS from the first byte.
    Tls,
    StartTls,
    None,
}

impl FromStr for SmtpEncryption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tls" => Ok(Self::Tls),
            "starttls" => Ok(Self::StartTls),
            "none" => Ok(Self::None),
            other => Err(format!(
                "invalid SMTP_ENCRYPTION `{other}`, expected tls, starttls or none"
            )),
        }
    }
}

impl ContactsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            contacts_port: std::env::var("CONTACTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            smtp: std::env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
                host,
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(587),
                username: std::env::var("SMTP_USERNAME").ok(),
                password: std::env::var("SMTP_PASSWORD").ok(),
                from: std::env::var("SMTP_FROM")
                    .unwrap_or_else(|_| "no-reply@rolodex.local".to_owned()),
                encryption: std::env::var("SMTP_ENCRYPTION")
                    .map(|v| v.parse().expect("SMTP_ENCRYPTION"))
                    .unwrap_or(SmtpEncryption::StartTls),
            }),
        }
    }
}
