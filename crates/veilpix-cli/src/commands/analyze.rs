use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::CliResult;

/// Computes security and quality metrics for an encryption or embedding run
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub target: AnalyzeTarget,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeTarget {
    /// Original image vs sealed container: entropy, NPCR, UACI, correlation
    Encryption {
        /// Original (plaintext) image
        #[arg(short = 'i', long = "in", value_name = "original image")]
        original: PathBuf,

        /// Sealed container file
        #[arg(short = 'e', long = "encrypted", value_name = "container file")]
        container: PathBuf,
    },
    /// Cover image vs stego image: MSE and PSNR
    Steganography {
        /// Cover image the secret was embedded into
        #[arg(short = 'i', long = "in", value_name = "cover image")]
        cover: PathBuf,

        /// Stego image produced by conceal
        #[arg(short = 's', long = "stego", value_name = "stego image")]
        stego: PathBuf,
    },
}

impl AnalyzeArgs {
    pub fn run(self) -> CliResult<()> {
        match self.target {
            AnalyzeTarget::Encryption {
                original,
                container,
            } => {
                let report = veilpix_core::commands::analyze_encryption(&original, &container)?;
                super::print_report(&report);
            }
            AnalyzeTarget::Steganography { cover, stego } => {
                let report = veilpix_core::commands::analyze_steganography(&cover, &stego)?;
                super::print_report(&report);
            }
        }

        Ok(())
    }
}
