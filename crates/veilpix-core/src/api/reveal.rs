use std::path::{Path, PathBuf};

use crate::commands;
use crate::error::VeilError;
use crate::pipeline::PipelineConfig;
use crate::result::Result;

pub fn prepare() -> RevealApi {
    RevealApi::default()
}

#[derive(Default, Debug)]
pub struct RevealApi {
    stego: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<String>,
    config: PipelineConfig,
}

impl RevealApi {
    pub fn with_stego_image<A: AsRef<Path>>(mut self, stego: A) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
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

    pub fn execute(self) -> Result<()> {
        let Some(stego) = self.stego else {
            return Err(VeilError::SecretNotSet);
        };
        let Some(output) = self.output else {
            return Err(VeilError::TargetNotSet);
        };
        let Some(key) = self.key else {
            return Err(VeilError::KeyNotSet);
        };

        commands::reveal(&stego, &output, &key, &self.config)
    }
}
