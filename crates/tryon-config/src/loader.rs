use std::path::Path;

use crate::{AllowedOrigins, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a referenced environment
    /// variable is unset, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus the file access
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_gateway()?;
        self.validate_instructions()?;
        self.validate_cors()?;
        Ok(())
    }

    fn validate_gateway(&self) -> anyhow::Result<()> {
        let gateway = &self.gateway;

        if !gateway.path.starts_with('/') {
            anyhow::bail!("gateway.path must start with '/': `{}`", gateway.path);
        }

        if self.server.health.enabled && self.server.health.path == gateway.path {
            anyhow::bail!("gateway.path and server.health.path must differ: `{}`", gateway.path);
        }

        if gateway.model.trim().is_empty() {
            anyhow::bail!("gateway.model must not be empty");
        }

        if gateway.max_payload_bytes == 0 {
            anyhow::bail!("gateway.max_payload_bytes must be greater than 0");
        }

        Ok(())
    }

    fn validate_instructions(&self) -> anyhow::Result<()> {
        for (category, template) in &self.instructions.overrides {
            if template.trim().is_empty() {
                anyhow::bail!("instruction override for '{category}' must not be empty");
            }
        }

        Ok(())
    }

    fn validate_cors(&self) -> anyhow::Result<()> {
        let Some(AllowedOrigins::List(origins)) = self.server.cors.as_ref().map(|c| &c.origins) else {
            return Ok(());
        };

        for origin in origins {
            http::HeaderValue::from_str(origin)
                .map_err(|e| anyhow::anyhow!("invalid CORS origin `{origin}`: {e}"))?;
        }

        Ok(())
    }
}
