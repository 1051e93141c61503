use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cubbyd",
    about = "cubby — HTTP object depot",
    version,
)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, default_value = "cubby.toml")]
    pub config: PathBuf,
}
