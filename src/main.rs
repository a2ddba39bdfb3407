use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardpress::{CardPress, Face, MemoryCatalog, PressConfig, SheetLayout};

#[derive(Parser, Debug)]
#[command(name = "cardpress", version, about = "Render card faces and print sheets")]
struct Cli {
    /// TOML press configuration (defaults are used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON catalog with `types`, `extensions` and `cards`
    #[arg(long, global = true, default_value = "catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one face of a card to PNG
    Render {
        card_id: u32,
        face: Face,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a preview of a card type
    TypeSample {
        type_id: u32,
        face: Face,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build the print sheets and archive for an id range
    Print {
        start: u32,
        end: u32,
        /// `4x4` for a grid, `row:3` for a single row
        #[arg(long)]
        layout: Option<SheetLayout>,
        #[arg(long)]
        batch_size: Option<u32>,
    },
    /// Drop the cached faces of a card
    Invalidate { card_id: u32 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PressConfig::load_from_path(path)?,
        None => PressConfig::default(),
    };
    let catalog = MemoryCatalog::load_json(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let mut press = CardPress::new(config, catalog).context("starting the press")?;

    match cli.command {
        Command::Render { card_id, face, output } => {
            let png = press.render_face(card_id, face)?;
            let out = output.unwrap_or_else(|| PathBuf::from(format!("card_{}_{}.png", card_id, face)));
            fs::write(&out, png).with_context(|| format!("writing {}", out.display()))?;
            println!("{}", out.display());
        }
        Command::TypeSample { type_id, face, output } => {
            let png = press.render_type_sample(type_id, face)?;
            let out = output.unwrap_or_else(|| PathBuf::from(format!("type_{}_{}.png", type_id, face)));
            fs::write(&out, png).with_context(|| format!("writing {}", out.display()))?;
            println!("{}", out.display());
        }
        Command::Print {
            start,
            end,
            layout,
            batch_size,
        } => {
            if layout.is_some() || batch_size.is_some() {
                let layout = layout.unwrap_or(press.config().layout);
                press.set_layout(layout, batch_size)?;
            }
            let archive = press.build_print_run(start, end)?;
            for entry in &archive.entries {
                println!("  {}", entry);
            }
            println!("{} (download as {})", archive.path.display(), archive.download_name);
        }
        Command::Invalidate { card_id } => {
            let removed = press.invalidate(card_id)?;
            println!("removed {} cached face(s) of card {}", removed, card_id);
        }
    }
    Ok(())
}
