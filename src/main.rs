use clap::{Args, Parser, Subcommand};
use document_meta::config;
use document_meta::context::Request;
use document_meta::output::{self, Preview};
use document_meta::service::DocumentService;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docmeta")]
#[command(about = "Preview per-request document metadata")]
#[command(long_about = "\
Preview per-request document metadata

Site-wide defaults live in document.toml. `preview` seeds a document from
them, finalizes it for one simulated request and shows what a template would
write into <head>: every meta tag exactly once.

Config layout:

  document.toml
  ├── public = false        # false forces robots: noindex, nofollow
  ├── [document]            # title, description, author, keywords, id
  ├── [theme]               # color, scheme, name
  ├── [robots]              # bot = [\"rule, rule\"]
  ├── [body]                # <body> attributes
  └── [[assets]]            # type = stylesheet | script | link

Run 'docmeta gen-config' to generate a documented document.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing document.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Log finalize steps to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct PreviewArgs {
    /// Request path, used for the default body id
    #[arg(long, default_value = "/")]
    path: String,

    /// Request host, used as the fallback title
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Mark the document public, whatever the config says
    #[arg(long)]
    public: bool,

    /// Print the preview as JSON
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Print the preview as an HTML page
    #[arg(long)]
    html: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Finalize a document for one request and show its metadata
    Preview(PreviewArgs),
    /// Validate document.toml without rendering
    Check,
    /// Print a stock document.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Preview(args) => {
            let site_config = config::load_config(&cli.config)?;
            debug!(config = %cli.config.display(), "loaded document config");
            let mut request = Request::new(args.path, args.host);
            let mut service = DocumentService::new(&mut request);
            service.configure(&site_config);
            if args.public {
                service.public(true);
            }
            let mut document = service.finalize();
            let preview = Preview::capture(&mut document, &request.headers);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else if args.html {
                println!("{}", output::render_page(&preview).into_string());
            } else {
                output::print_preview(&preview);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join(config::CONFIG_FILE).display());
            let site_config = config::load_config(&cli.config)?;
            output::print_check_output(&site_config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
