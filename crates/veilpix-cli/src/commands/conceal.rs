use std::path::PathBuf;

use clap::Args;
use veilpix_core::PipelineConfig;

use crate::CliResult;

/// Hides a secret image inside a cover image
#[derive(Args, Debug)]
pub struct ConcealArgs {
    /// Secret image to hide
    #[arg(short = 's', long = "secret", value_name = "secret image", required = true)]
    pub secret: PathBuf,

    /// Cover image, used readonly
    #[arg(short = 'c', long = "cover", value_name = "cover image", required = true)]
    pub cover: PathBuf,

    /// Stego image will be stored as this file (use a lossless format)
    #[arg(short = 'o', long = "out", value_name = "output image file", required = true)]
    pub output: PathBuf,

    /// Key used to encrypt the secret
    #[arg(short = 'k', long = "key", value_name = "key", required = true)]
    pub key: String,
}

impl ConcealArgs {
    pub fn run(self, config: PipelineConfig) -> CliResult<()> {
        let report =
            veilpix_core::commands::conceal(&self.secret, &self.cover, &self.output, &self.key, &config)?;
        super::print_report(&report);

        Ok(())
    }
}
