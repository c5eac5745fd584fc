//! Payment gateway configuration (Razorpay)

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration.
///
/// Two separate secrets are required: the API key secret signs the
/// client-redirect verification payload, the webhook secret signs the raw
/// webhook body. Both come from the environment and are never logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// Gateway key ID (rzp_test_... or rzp_live_...)
    pub key_id: String,

    /// Gateway API key secret (redirect-path signatures)
    pub key_secret: String,

    /// Webhook signing secret (webhook-path signatures)
    pub webhook_secret: String,

    /// Base URL for the gateway REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl GatewayConfig {
    /// Check if using gateway test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using gateway live mode
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_ID"));
        }
        if self.key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_SECRET"));
        }
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_WEBHOOK_SECRET"));
        }

        // Verify key prefix for safety
        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidGatewayKeyId);
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidGatewayBaseUrl);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> GatewayConfig {
        GatewayConfig {
            key_id: "rzp_test_abc123".to_string(),
            key_secret: "secret123".to_string(),
            webhook_secret: "whsec_xyz".to_string(),
            api_base_url: default_api_base_url(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid_config();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = GatewayConfig {
            key_id: "rzp_live_abc123".to_string(),
            ..valid_config()
        };
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_key_id() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_key_secret() {
        let config = GatewayConfig {
            key_secret: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        let config = GatewayConfig {
            webhook_secret: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        let config = GatewayConfig {
            key_id: "sk_test_abc123".to_string(), // Wrong prefix
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = GatewayConfig {
            api_base_url: "ftp://api.razorpay.com".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }
}
