use std::path::PathBuf;

use clap::Args;
use veilpix_core::PipelineConfig;

use crate::CliResult;

/// Decrypts a sealed container file back into an image
#[derive(Args, Debug)]
pub struct UnsealArgs {
    /// Sealed container file
    #[arg(short = 'i', long = "in", value_name = "container file", required = true)]
    pub container: PathBuf,

    /// Restored image will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output image file", required = true)]
    pub output: PathBuf,

    /// Key the container was sealed with
    #[arg(short = 'k', long = "key", value_name = "key", required = true)]
    pub key: String,
}

impl UnsealArgs {
    pub fn run(self, config: PipelineConfig) -> CliResult<()> {
        veilpix_core::commands::unseal(&self.container, &self.output, &self.key, &config)
    }
}
