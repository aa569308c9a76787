//! oxide-pages CLI
//!
//! Command-line tool for inspecting a pages directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_pages::{PageRouter, PagesConfig, RouteError};

/// File-system based page routing.
#[derive(Parser)]
#[command(name = "oxide-pages")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pages directory.
    #[arg(short, long, env = "OXIDE_PAGES_DIR")]
    pages_dir: Option<PathBuf>,

    /// Page file extension (without the dot).
    #[arg(short, long)]
    extension: Option<String>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all routes.
    Routes {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a request path to its route.
    Resolve {
        /// Request path, e.g. `/blog/hello-world`.
        path: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Build the route tree and report every error.
    Check,
}

impl Cli {
    fn pages_config(&self) -> anyhow::Result<PagesConfig> {
        let mut config = match &self.config {
            Some(path) => PagesConfig::from_json_file(path)?,
            None => PagesConfig::default(),
        };
        if let Some(dir) = &self.pages_dir {
            config.pages_dir.clone_from(dir);
        }
        if let Some(ext) = &self.extension {
            config.extension.clone_from(ext);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if run(cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Runs a command. Returns `false` when routes have errors or a path does
/// not resolve.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.pages_config()?;

    match cli.command {
        Commands::Check => match PageRouter::from_config(&config) {
            Ok(router) => {
                info!("{} routes, no errors.", router.len());
                Ok(true)
            }
            Err(e @ (RouteError::PagesDirNotFound(_) | RouteError::Walk(_))) => Err(e.into()),
            Err(e) => {
                let errors = e.into_vec();
                for err in &errors {
                    error!("{err}");
                }
                info!("{} errors found.", errors.len());
                Ok(false)
            }
        },

        Commands::Routes { json } => {
            let router = PageRouter::from_config(&config)?;
            let mut routes: Vec<_> = router.routes().collect();
            routes.sort_by(|a, b| a.pattern().cmp(b.pattern()));

            if json {
                let listing: Vec<_> = routes
                    .iter()
                    .map(|route| {
                        json!({
                            "pattern": route.pattern(),
                            "parameters": route.parameters(),
                            "catch_all": route.catch_all(),
                            "source": router.source(route.pattern()),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else if routes.is_empty() {
                info!("No pages found in {}.", config.pages_dir.display());
            } else {
                println!("\nRoutes:");
                println!("{:-<60}", "");
                for route in &routes {
                    let source = router
                        .source(route.pattern())
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    println!(" {:<30} {}", route.pattern(), source);
                }
                println!();
            }
            Ok(true)
        }

        Commands::Resolve { path, json } => {
            let router = PageRouter::from_config(&config)?;
            let Some(found) = router.resolve(&path) else {
                if json {
                    println!("null");
                } else {
                    info!("No route matches {path}.");
                }
                return Ok(false);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("{}", found.pattern());
                for (name, value) in found.params.iter() {
                    println!("  {name} = {value}");
                }
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("oxide-pages").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("Failed to parse {args:?}: {e}"))
    }

    fn pages(paths: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for path in paths {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, "").unwrap();
        }
        dir
    }

    fn dir_arg(dir: &Path) -> &str {
        dir.to_str().unwrap()
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pages.json");
        fs::write(
            &file,
            r#"{"pages_dir": "from-file", "extension": "go", "index_name": "_index"}"#,
        )
        .unwrap();
        let file = dir_arg(&file);

        let config = cli(&["--config", file, "--pages-dir", "site", "check"])
            .pages_config()
            .unwrap();
        assert_eq!(config.pages_dir, Path::new("site"));
        assert_eq!(config.extension, "go");
        assert_eq!(config.index_name, "_index");

        let config = cli(&["--config", file, "--pages-dir", "site", "--extension", "md", "check"])
            .pages_config()
            .unwrap();
        assert_eq!(config.extension, "md");
        assert_eq!(config.index_name, "_index");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = cli(&["--config", "/definitely/not/pages.json", "check"]).pages_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_routes() {
        let dir = pages(&["index.rs", "blog/[slug].rs"]);
        assert!(run(cli(&["--pages-dir", dir_arg(dir.path()), "routes"])).unwrap());
        assert!(run(cli(&["--pages-dir", dir_arg(dir.path()), "routes", "--json"])).unwrap());
    }

    #[test]
    fn test_resolve_reports_no_match() {
        let dir = pages(&["index.rs", "blog/[slug].rs"]);
        let dir = dir_arg(dir.path());
        assert!(run(cli(&["--pages-dir", dir, "resolve", "/blog/hello"])).unwrap());
        assert!(run(cli(&["--pages-dir", dir, "resolve", "/blog/hello", "--json"])).unwrap());
        assert!(!run(cli(&["--pages-dir", dir, "resolve", "/nope/a/b"])).unwrap());
        assert!(!run(cli(&["--pages-dir", dir, "resolve", "/nope/a/b", "--json"])).unwrap());
    }

    #[test]
    fn test_check() {
        let clean = pages(&["index.rs", "blog/[slug].rs"]);
        assert!(run(cli(&["--pages-dir", dir_arg(clean.path()), "check"])).unwrap());

        let conflicting = pages(&["blog/[slug].rs", "blog/[id].rs"]);
        assert!(!run(cli(&["--pages-dir", dir_arg(conflicting.path()), "check"])).unwrap());

        assert!(run(cli(&["--pages-dir", "/definitely/not/pages", "check"])).is_err());
    }
}
