use clap::{Parser, Subcommand, ValueEnum};
use folio_behavior::clipboard::MemoryClipboard;
use folio_behavior::dialog::{CardContext, DialogKind, DialogPresenter};
use folio_behavior::page::Page;
use folio_behavior::{catalog, config, output, page, render, replay};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "folio-behavior")]
#[command(about = "Carousel, lightbox and dialog behavior for portfolio sites")]
#[command(long_about = "\
Carousel, lightbox and dialog behavior for portfolio sites

The site directory may contain:

  site/
  ├── config.toml     # Autoplay period, copy feedback, dialog fallbacks
  ├── catalog.toml    # [project.<id>] and [highlight.<id>] records
  └── layout.json     # Carousels, lightbox presence, copy chips

Every file is optional: missing config uses stock defaults, a missing
catalog uses the embedded one, a missing layout is an empty page.

Run 'folio-behavior gen-config' to print a documented config.toml.")]
#[command(version = env!("FOLIO_BUILD_VERSION"))]
struct Cli {
    /// Site directory holding config.toml, catalog.toml and layout.json
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Log state transitions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Project,
    Highlight,
}

impl From<KindArg> for DialogKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Project => DialogKind::Project,
            KindArg::Highlight => DialogKind::Highlight,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate site files and list carousels and catalog entries
    Check,
    /// Print the rendered dialog for a catalog record
    Dialog {
        #[arg(value_enum)]
        kind: KindArg,
        id: String,
        /// Card `data-repo` value used when the record has no repo link
        #[arg(long)]
        card_repo: Option<String>,
    },
    /// Replay a timed event script against the assembled page
    Replay {
        script: PathBuf,
        /// Print the final page markup after the step log
        #[arg(long)]
        html: bool,
        /// Print step snapshots as JSON instead of the step log
        #[arg(long, conflicts_with = "html")]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Check => {
            let behavior = config::load_config(&cli.site)?;
            let catalogs = catalog::load_catalogs(&cli.site)?;
            let layout = page::load_layout(&cli.site)?;
            println!("==> Checking {}", cli.site.display());
            output::print_check_output(&layout, &catalogs);
            println!();
            println!(
                "==> Site is valid (autoplay every {} ms)",
                behavior.carousel.autoplay_ms
            );
        }
        Command::Dialog {
            kind,
            id,
            card_repo,
        } => {
            let behavior = config::load_config(&cli.site)?;
            let catalogs = catalog::load_catalogs(&cli.site)?;
            let kind = DialogKind::from(kind);
            let source = match kind {
                DialogKind::Project => catalogs.project,
                DialogKind::Highlight => catalogs.highlight,
            };
            let mut dialog = DialogPresenter::new(kind, source, behavior.dialog);
            let card = CardContext {
                repo: card_repo,
                ..CardContext::default()
            };
            if !dialog.open(&id, &card) {
                return Err(format!("no {} record '{}'", kind.label(), id).into());
            }
            println!("{}", render::render_dialog(&dialog).into_string());
        }
        Command::Replay { script, html, json } => {
            let behavior = config::load_config(&cli.site)?;
            let catalogs = catalog::load_catalogs(&cli.site)?;
            let layout = page::load_layout(&cli.site)?;
            let script = replay::load_script(&script)?;
            let mut page = Page::assemble(
                &layout,
                catalogs,
                behavior,
                Box::new(MemoryClipboard::secure()),
                0,
            );
            let reports = replay::replay(&mut page, &script)?;
            if json {
                let snapshots: Vec<_> = reports.iter().map(|r| &r.snapshot).collect();
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else {
                output::print_replay_output(&reports);
                if html {
                    println!();
                    println!("{}", render::render_page(&page).into_string());
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
