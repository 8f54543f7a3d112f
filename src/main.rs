//! Guides an operator through the fixed sequence of plating measurements and
//! derives the thickness of the plated nickel layer per side of a workpiece.

mod calculator;
mod cli;
mod console;
mod prelude;
mod sequencer;
mod text;

use clap::{Parser, crate_version};

use crate::{
    cli::Args,
    console::StdConsole,
    prelude::*,
    sequencer::Sequencer,
    text::TextSource,
};

fn main() -> Result {
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let text = TextSource::load(&args.text_path)?;
    let mut console = StdConsole;
    Sequencer::new(&text, &mut console).run()
}
