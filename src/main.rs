//! gemgrid: headless driver for the match-3 engine.

mod app;
mod input;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use gemgrid::{BoardConfig, LayoutMask, Palette};
use input::SwapRequest;

fn main() -> Result<()> {
    let args = Args::parse();
    gemgrid::logger::init_logger(Some("gemgrid".to_string()), args.verbose);
    let config = board_config(&args)?;
    let mut app = App::new(args, config)?;
    app.run()?;
    Ok(())
}

/// Match-3 board simulator.
#[derive(Debug, Parser)]
#[command(
    name = "gemgrid",
    version,
    about = "Match-3 board simulator: swaps tokens, clears runs and refills the board.",
    long_about = "gemgrid builds a match-free board and plays swaps against it.\n\n\
        Swaps come from --swap (repeatable, X,Y:X,Y with row 0 at the bottom) or, when none \
        are given, from a random driver. Accepted swaps clear their matches, let the columns \
        fall, refill from the top and repeat until the board is stable.\n\n\
        Boards print one row per line, top row first: R B P G Y O are colours, # is blocked."
)]
pub struct Args {
    /// Board width in columns, 1 to 64. Ignored with --layout.
    #[arg(
        long,
        default_value = "8",
        value_name = "COLS",
        value_parser = clap::value_parser!(u16).range(1..=64)
    )]
    pub width: u16,

    /// Board height in rows, 1 to 64. Ignored with --layout.
    #[arg(
        long,
        default_value = "8",
        value_name = "ROWS",
        value_parser = clap::value_parser!(u16).range(1..=64)
    )]
    pub height: u16,

    /// Number of colours, taken in order from R B P G Y O.
    #[arg(
        short,
        long,
        default_value = "5",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub colors: u8,

    /// Layout file: one line per row, top first; '.' free, '#' blocked, ';' comments.
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<std::path::PathBuf>,

    /// RNG seed. Random (and printed) if not set.
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u64>,

    /// Move budget; the game is over when it reaches zero.
    #[arg(short, long, default_value = "20", value_name = "N")]
    pub moves: u32,

    /// Scripted swap X,Y:X,Y. Repeat for several moves.
    #[arg(long = "swap", value_name = "X,Y:X,Y", value_parser = input::parse_swap)]
    pub swaps: Vec<SwapRequest>,

    /// Random driver: number of swap attempts when no --swap is given.
    #[arg(long, default_value = "200", value_name = "N")]
    pub attempts: u32,

    /// Give up building a match-free board after this many tries.
    #[arg(long, default_value = "1000", value_name = "N")]
    pub max_init_attempts: u32,

    /// Do not print boards, only the move log and summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose engine log on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

fn board_config(args: &Args) -> Result<BoardConfig> {
    let config = match &args.layout {
        Some(path) => {
            let layout = LayoutMask::load(path)
                .with_context(|| format!("failed to load layout {}", path.display()))?;
            BoardConfig::with_layout(layout)
        }
        None => BoardConfig::new(usize::from(args.width), usize::from(args.height)),
    };
    let mut config = config.palette(Palette::first(usize::from(args.colors)));
    config.max_init_attempts = args.max_init_attempts;
    config.validate()?;
    Ok(config)
}
