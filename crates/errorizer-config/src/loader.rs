use std::path::Path;

use errorizer_core::Definitions;
use errorizer_core::validation::validate_registry;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
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
    /// Returns an error if the health path is malformed or the error
    /// definitions fail registry validation
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health_config()?;
        self.definitions()?;
        Ok(())
    }

    /// Static error definitions from the `[errors]` table
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending code if any definition is
    /// malformed
    pub fn definitions(&self) -> anyhow::Result<Definitions> {
        let definitions = Definitions::from_value(self.errors.clone())
            .and_then(|definitions| validate_registry(&definitions).map(|()| definitions))
            .map_err(|e| anyhow::anyhow!("invalid error definitions: {e}"))?;

        tracing::debug!(count = definitions.len(), "loaded error definitions");

        Ok(definitions)
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        Ok(())
    }
}
