use std::path::PathBuf;

use clap::Parser;
use colorcmp::{ColorChoice, DEFAULT_CONTEXT_LINES};

#[derive(Parser, Debug)]
#[command(
    name = "colorcmp",
    about = "Show colored, path-aware differences between two JSON documents",
    version,
)]
pub struct Cli {
    /// The left-hand (old) JSON document
    pub left: PathBuf,

    /// The right-hand (new) JSON document
    pub right: PathBuf,

    /// When to color the output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorArg,

    /// Unchanged lines shown around each change in block diffs
    #[arg(short = 'U', long, default_value_t = DEFAULT_CONTEXT_LINES)]
    pub context: usize,

    /// Compare subtrees below this depth as a whole
    #[arg(long)]
    pub max_depth: Option<usize>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}
