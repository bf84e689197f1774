//! # mdhelp
//!
//! Renders a project's markdown help page in the terminal.
//!
//! ## Usage
//!
//! Render the README in the current directory:
//! ```sh
//! mdhelp help
//! ```
//!
//! Print the heading outline:
//! ```sh
//! mdhelp help --titles
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, HelpArgs, OutputFormat};
use color_eyre::Result;
use mdhelp::config::Config;
use mdhelp::render::image::ImageHint;
use mdhelp::render::style::Palette;
use mdhelp::terminal::{TerminalCapabilities, TerminalSize};
use mdhelp::{Console, get_titles, logging, outline, render_file};
use std::io::{self, Write};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    logging::init(&logging::level_for_verbosity(args.verbose, &config.log.level));
    if let Some(err) = config_error {
        tracing::warn!(%err, "ignoring invalid config file");
    }

    match args.command {
        Command::Help(help) => run_help(&help, &config),
    }
}

fn run_help(args: &HelpArgs, config: &Config) -> Result<()> {
    let (file, root_dir) = args.locate();
    tracing::info!(file = %file.display(), root = %root_dir.display(), "showing help");

    if args.titles {
        let titles = get_titles(&file, &root_dir)?;
        match args.output {
            OutputFormat::Plain => outline::print_titles(&titles)?,
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&titles)?),
        }
        return Ok(());
    }

    let mut console = build_console(args, config, root_dir)?;
    let output = render_file(&file, &mut console)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Flags win over the config file, which wins over detection.
fn build_console(args: &HelpArgs, config: &Config, root_dir: std::path::PathBuf) -> Result<Console> {
    let size = TerminalSize::resolve(args.columns.or(config.render.columns))?;
    let caps = TerminalCapabilities::detect();

    let color = args.color.unwrap_or(config.render.color).resolve(caps.supports_color);
    let images = args
        .images
        .unwrap_or(config.render.images)
        .resolve(caps.inline_images);
    let hint = config
        .render
        .image_size
        .as_deref()
        .map(ImageHint::from_size)
        .unwrap_or_default();

    tracing::debug!(columns = size.columns, color, images, "console settings");

    Ok(Console::new(size, root_dir)
        .with_palette(Palette::new(color))
        .with_inline_images(images)
        .with_image_hint(hint))
}
