use std::path::{Path, PathBuf};

use crate::commands;
use crate::error::VeilError;
use crate::metrics::EntropyReport;
use crate::pipeline::PipelineConfig;
use crate::result::Result;

pub fn prepare() -> ConcealApi {
    ConcealApi::default()
}

#[derive(Default, Debug)]
pub struct ConcealApi {
    secret: Option<PathBuf>,
    cover: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<String>,
    config: PipelineConfig,
}

impl ConcealApi {
    pub fn with_secret_image<A: AsRef<Path>>(mut self, secret: A) -> Self {
        self.secret = Some(secret.as_ref().to_path_buf());
        self
    }

    pub fn with_cover_image<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn execute(self) -> Result<EntropyReport> {
        let Some(secret) = self.secret else {
            return Err(VeilError::SecretNotSet);
        };
        let Some(cover) = self.cover else {
            return Err(VeilError::CoverNotSet);
        };
        let Some(output) = self.output else {
            return Err(VeilError::TargetNotSet);
        };
        let Some(key) = self.key else {
            return Err(VeilError::KeyNotSet);
        };

        commands::conceal(&secret, &cover, &output, &key, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_reported_in_order() {
        assert!(matches!(
            prepare().execute(),
            Err(VeilError::SecretNotSet)
        ));
        assert!(matches!(
            prepare().with_secret_image("s.png").execute(),
            Err(VeilError::CoverNotSet)
        ));
        assert!(matches!(
            prepare()
                .with_secret_image("s.png")
                .with_cover_image("c.png")
                .execute(),
            Err(VeilError::TargetNotSet)
        ));
        assert!(matches!(
            prepare()
                .with_secret_image("s.png")
                .with_cover_image("c.png")
                .with_output("out.png")
                .execute(),
            Err(VeilError::KeyNotSet)
        ));
    }
}
