use super::commands;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Protein structure file handed to fpocket
    pub structure: PathBuf,

    /// Pickled weight ensemble
    #[arg(long, default_value = "new_features.pkl")]
    pub weights: PathBuf,

    /// Pickled label set
    #[arg(long, default_value = "data/labels.pkl")]
    pub labels: PathBuf,

    /// Pickled reference feature matrix
    #[arg(long, default_value = "data/2023new_features.pkl")]
    pub reference: PathBuf,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        commands::predict::execute(&self)
    }
}
