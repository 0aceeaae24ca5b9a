use clap::{Parser, Subcommand, ValueEnum};
use veilpix_core::scramble::{ArnoldMap, HenonMap, LogisticMap, TentMap};
use veilpix_core::{PipelineConfig, ScramblerStrategy, SeedMode, SeededShuffle};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Scrambling strategy; everything except `shuffle` is experimental
    #[arg(long, value_enum, default_value_t = Strategy::Shuffle)]
    pub strategy: Strategy,

    /// Fixed scrambling seed, must match between conceal and reveal
    #[arg(long, default_value_t = veilpix_core::DEFAULT_SEED, conflicts_with = "key_bound_seed")]
    pub seed: u64,

    /// Derive the scrambling seed from the key instead of using a fixed one
    #[arg(long)]
    pub key_bound_seed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            strategy: self.strategy.into(),
            seed: if self.key_bound_seed {
                SeedMode::KeyDerived
            } else {
                SeedMode::Fixed(self.seed)
            },
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Strategy {
    Shuffle,
    Logistic,
    Tent,
    Henon,
    Arnold,
}

impl From<Strategy> for ScramblerStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::Shuffle => SeededShuffle.into(),
            Strategy::Logistic => LogisticMap::default().into(),
            Strategy::Tent => TentMap::default().into(),
            Strategy::Henon => HenonMap::default().into(),
            Strategy::Arnold => ArnoldMap::default().into(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Conceal(conceal::ConcealArgs),
    Reveal(reveal::RevealArgs),
    Seal(seal::SealArgs),
    Unseal(unseal::UnsealArgs),
    Analyze(analyze::AnalyzeArgs),
}
