//! bandbox - terminal step sequencer
//!
//! Run with: cargo run
//!
//! Logging goes to stderr; redirect it when the display matters:
//! `RUST_LOG=debug cargo run 2>bandbox.log`

mod app;
mod ui;

use app::Bandbox;
use bandbox::engine::{Engine, EngineConfig};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut engine = Engine::new(EngineConfig::default());
    engine.init()?;

    let mut terminal = ratatui::init();
    let result = Bandbox::new(engine).run(&mut terminal);
    ratatui::restore();
    result
}
