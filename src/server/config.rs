use std::path::PathBuf;

use crate::server::{
    error::config::ConfigError,
    model::app::{DEFAULT_PERMISSION_ERROR_LOG_SIZE, DEFAULT_UPLOAD_PUBLIC_URL},
    service::identity::AdminCredential,
};

/// Directory uploads are written to when `UPLOAD_DIR` is unset.
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";

pub struct Config {
    pub database_url: String,
    pub identity_token_secret: String,
    pub upload_dir: PathBuf,
    pub upload_public_url: String,
    pub permission_error_log_size: usize,
    /// Credential for admin sign-in, disabled when `ADMIN_EMAIL` and `ADMIN_PASSWORD` are unset.
    pub admin_credential: Option<AdminCredential>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };

        let permission_error_log_size = match lookup("PERMISSION_ERROR_LOG_SIZE") {
            Some(value) => value
                .parse()
                .map_err(|err: std::num::ParseIntError| ConfigError::InvalidEnvValue {
                    var: "PERMISSION_ERROR_LOG_SIZE".to_string(),
                    reason: err.to_string(),
                })?,
            None => DEFAULT_PERMISSION_ERROR_LOG_SIZE,
        };

        let identity_token_secret = required("IDENTITY_TOKEN_SECRET")?;
        if identity_token_secret.len() < 32 {
            return Err(ConfigError::InvalidEnvValue {
                var: "IDENTITY_TOKEN_SECRET".to_string(),
                reason: "must be at least 32 bytes long".to_string(),
            });
        }

        let optional = |var: &str| lookup(var).filter(|value| !value.is_empty());
        let admin_credential = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminCredential { email, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "ADMIN_PASSWORD".to_string(),
                    reason: "must be set together with ADMIN_EMAIL".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "ADMIN_EMAIL".to_string(),
                    reason: "must be set together with ADMIN_PASSWORD".to_string(),
                })
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            identity_token_secret,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            upload_public_url: lookup("UPLOAD_PUBLIC_URL")
                .unwrap_or_else(|| DEFAULT_UPLOAD_PUBLIC_URL.to_string()),
            permission_error_log_size,
            admin_credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        move |var| vars.get(var).cloned()
    }

    /// Expect optional variables to fall back to their defaults
    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("IDENTITY_TOKEN_SECRET", SECRET),
        ]))
        .unwrap();

        assert_eq!(config.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
        assert_eq!(config.upload_public_url, DEFAULT_UPLOAD_PUBLIC_URL);
        assert_eq!(
            config.permission_error_log_size,
            DEFAULT_PERMISSION_ERROR_LOG_SIZE
        );
        assert!(config.admin_credential.is_none());
    }

    /// Expect the admin credential only when both of its variables are set
    #[test]
    fn reads_admin_credential() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("IDENTITY_TOKEN_SECRET", SECRET),
            ("ADMIN_EMAIL", "oficina@transportes.example"),
            ("ADMIN_PASSWORD", "horario-2025"),
        ]))
        .unwrap();
        let half = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("IDENTITY_TOKEN_SECRET", SECRET),
            ("ADMIN_EMAIL", "oficina@transportes.example"),
        ]));

        assert_eq!(
            config.admin_credential,
            Some(AdminCredential {
                email: "oficina@transportes.example".to_string(),
                password: "horario-2025".to_string(),
            })
        );
        assert!(matches!(
            half,
            Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == "ADMIN_PASSWORD"
        ));
    }

    /// Expect a missing required variable to be named in the error
    #[test]
    fn reports_missing_variable() {
        let result = Config::from_lookup(lookup(&[("IDENTITY_TOKEN_SECRET", SECRET)]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref var)) if var == "DATABASE_URL"
        ));
    }

    /// Expect unparsable or too-short values to be rejected
    #[test]
    fn rejects_invalid_values() {
        let bad_size = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("IDENTITY_TOKEN_SECRET", SECRET),
            ("PERMISSION_ERROR_LOG_SIZE", "many"),
        ]));
        let short_secret = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/transit"),
            ("IDENTITY_TOKEN_SECRET", "short"),
        ]));

        assert!(matches!(bad_size, Err(ConfigError::InvalidEnvValue { .. })));
        assert!(matches!(short_secret, Err(ConfigError::InvalidEnvValue { .. })));
    }
}
