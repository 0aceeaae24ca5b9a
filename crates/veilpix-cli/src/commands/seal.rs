use std::path::PathBuf;

use clap::Args;
use veilpix_core::PipelineConfig;

use crate::CliResult;

/// Encrypts an image into a standalone container file, without a cover
#[derive(Args, Debug)]
pub struct SealArgs {
    /// Image to seal
    #[arg(short = 'i', long = "in", value_name = "secret image", required = true)]
    pub secret: PathBuf,

    /// Container will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output container file", required = true)]
    pub output: PathBuf,

    /// Key used to encrypt the image
    #[arg(short = 'k', long = "key", value_name = "key", required = true)]
    pub key: String,
}

impl SealArgs {
    pub fn run(self, config: PipelineConfig) -> CliResult<()> {
        let report = veilpix_core::commands::seal(&self.secret, &self.output, &self.key, &config)?;
        super::print_report(&report);

        Ok(())
    }
}
