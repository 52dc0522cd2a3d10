use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use versebook::config::{self, Overrides};
use versebook::document::Document;
use versebook::generate::{self, GenerateError};
use versebook::output;

#[derive(Parser)]
#[command(name = "versebook")]
#[command(about = "Static site generator for verse works")]
#[command(long_about = "\
Static site generator for verse works

Reads one JSON document (title, standalone pages, chapters of numbered
verses) and writes a cross-linked HTML site with sitemap.xml and robots.txt.

Output structure:

  dist/
  ├── robots.txt                 # Sitemap: <prefix>/sitemap.xml
  ├── sitemap.xml                # One <url> per generated page
  ├── index.html                 # Title, page links, chapter list
  ├── introduction.html          # One per standalone page (lowercased title)
  ├── chapter-1/
  │   ├── index.html             # Verse list + previous/next chapter
  │   ├── 1.html                 # One per verse, named by verse number
  │   └── 2-3.html
  └── chapter-2/
      └── ...

Settings are read from versebook.toml when present; flags override them.
Run 'versebook gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults when absent)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Source document
    #[arg(long, global = true)]
    document: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Canonical URL prefix without trailing slash, e.g. https://example.com
    #[arg(long)]
    url_prefix: Option<String>,

    /// Timestamp for every sitemap <lastmod>, e.g. 2024-01-01T12:00:00.000Z
    #[arg(long)]
    lastmod: Option<String>,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site
    Build(BuildArgs),
    /// Validate the document and list what would be generated
    Check,
    /// Print a stock versebook.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), GenerateError> {
    match cli.command {
        Command::Build(args) => {
            let config = config::load_config(&cli.config)?.with_overrides(Overrides {
                url_prefix: args.url_prefix,
                lastmod: args.lastmod,
                document: cli.document,
                output_dir: args.output,
            })?;

            println!("==> Building {} → {}", config.document, config.output_dir);
            let summary = generate::build(&config, output::print_generate_event)?;
            output::print_generate_summary(&summary, Path::new(&config.output_dir));
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?.with_overrides(Overrides {
                document: cli.document,
                ..Overrides::default()
            })?;

            println!("==> Checking {}", config.document);
            let document = Document::load(Path::new(&config.document))?;
            document.validate()?;
            output::print_check_output(&document);
            println!("==> Document is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
