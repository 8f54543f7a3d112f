use std::path::PathBuf;

use clap::Parser;

/// Text file consulted for prompts and output templates when no path is given.
pub const DEFAULT_TEXT_PATH: &str = "nickel_plate_text.toml";

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Path of the prompt/template text file.
    #[clap(default_value = DEFAULT_TEXT_PATH)]
    pub text_path: PathBuf,
}
