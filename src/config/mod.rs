pub mod models;

pub use models::{Config, Ensure, RecordSpec};

use anyhow::{Context, Result};
use std::{fs::File, io::Read, path::Path};
use validator::Validate;

use crate::api::CloudflareClient;

impl Config {
    pub fn load(config_file: impl AsRef<Path>) -> Result<Self> {
        let config_file = config_file.as_ref();
        let mut file = File::open(config_file)
            .with_context(|| format!("Failed to open config file: {}", config_file.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read config file: {}", config_file.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_file.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", config_file.display()))?;

        Ok(config)
    }

    pub fn client(&self) -> CloudflareClient {
        let client = CloudflareClient::new(self.auth_email.to_string(), self.auth_key.to_string());
        match &self.api_base {
            Some(api_base) => client.with_api_base(api_base.as_str()),
            None => client,
        }
    }
}
