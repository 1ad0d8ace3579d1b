use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use vblackboard::config::{Config, ConfigError};
use vblackboard::draw::font::font_family_available;
use vblackboard::draw::PangoText;
use vblackboard::input::Collaborators;
use vblackboard::persist::writer_for;
use vblackboard::slides::{self, ImageDeck, SlideSource};

mod backend;

#[derive(Parser, Debug)]
#[command(name = "vblackboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VBLACKBOARD_GIT_HASH"), ")"),
    about = "Interactive presentation blackboard for Wayland compositors"
)]
struct Cli {
    /// PDF file, PNG file or directory of PNG pages to present
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor with wlr-layer-shell support.");
        return Err(anyhow::anyhow!(
            "Wayland environment required (WAYLAND_DISPLAY not set)"
        ));
    }

    let config = Config::load().context("Failed to load configuration")?;
    let strings = config
        .load_strings()
        .context("Failed to load menu strings")?;

    if !font_family_available(&config.font.family) {
        return Err(ConfigError::FontUnavailable(config.font.family.clone()).into());
    }

    let splash = config
        .slides
        .splash
        .as_ref()
        .map(|path| vblackboard::util::expand_tilde(&path.to_string_lossy()));
    let deck: Box<dyn SlideSource> = match &cli.document {
        Some(document) => slides::open_document(document, splash)
            .with_context(|| format!("Failed to open {}", document.display()))?,
        None => Box::new(ImageDeck::empty(splash)),
    };
    log::info!("Presenting {} page(s)", deck.page_count());

    let setup = backend::BoardSetup {
        strings,
        pen: config.initial_pen(),
        save_directory: config.save_directory(),
        collaborators: Collaborators {
            slides: deck,
            writer: writer_for(config.save.format),
            text: Box::new(PangoText::new(&config.font_descriptor())),
        },
    };

    backend::run_wayland(setup, config.screen.clone())?;

    log::info!("Blackboard closed.");
    Ok(())
}
