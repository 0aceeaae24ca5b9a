use std::path::PathBuf;

use clap::Args;
use veilpix_core::PipelineConfig;

use crate::CliResult;

/// Recovers the secret image hidden in a stego image
#[derive(Args, Debug)]
pub struct RevealArgs {
    /// Stego image that contains the hidden secret
    #[arg(short = 'i', long = "in", value_name = "stego image", required = true)]
    pub stego: PathBuf,

    /// Recovered secret will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output image file", required = true)]
    pub output: PathBuf,

    /// Key the secret was encrypted with
    #[arg(short = 'k', long = "key", value_name = "key", required = true)]
    pub key: String,
}

impl RevealArgs {
    pub fn run(self, config: PipelineConfig) -> CliResult<()> {
        veilpix_core::commands::reveal(&self.stego, &self.output, &self.key, &config)
    }
}
