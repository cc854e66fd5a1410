use clap::{Parser, Subcommand};
use folio::{config, content, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for single-page photography portfolios")]
#[command(long_about = "\
Static site generator for single-page photography portfolios

One JSON document holds the content. Folio renders it into a single page
with a filterable gallery, a lightbox, testimonials, recent events and an
about section, plus pre-filtered and per-image pages that work without
JavaScript.

Content structure:

  content/
  ├── config.toml            # Site config (optional)
  ├── about.md               # About section text (optional)
  ├── assets/                # Images and other files → copied to output
  │   ├── hero.jpg
  │   └── gallery/01.jpg
  └── data/
      └── portfolio.json     # Gallery, testimonials, events, social proof

Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=folio=debug) or pass -v.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config and content document without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            println!(
                "==> Building {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(&cli.source, &cli.output, &site_config)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let data_path = cli.source.join(&site_config.site.data_path);
            let document = content::load_document(&data_path)
                .inspect_err(|e| tracing::error!(error = %e, path = %data_path.display(), "content check failed"))?;
            output::print_check_output(&document);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays the build report.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags pick the level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "folio=warn",
        1 => "folio=debug",
        _ => "folio=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
