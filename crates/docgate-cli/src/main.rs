//! docgate - terminal front end for a gated document repository

mod commands;
mod render;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::{parse, Command as Typed};
use docgate_core::{Controller, ViewerConfig};
use docgate_fetch::SiteFetcher;
use render::TerminalRenderer;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("docgate")
        .version(docgate_core::VERSION)
        .about("Browse a document repository unlocked by a service number")
        .arg(
            Arg::new("site")
                .long("site")
                .required(true)
                .help("Site root: an http(s) URL or a local directory"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("docs-root")
                .long("docs-root")
                .help("Directory holding the documents, relative to the site"),
        )
        .arg(
            Arg::new("notice-ttl-ms")
                .long("notice-ttl-ms")
                .value_parser(value_parser!(u64))
                .help("How long gate notices stay visible"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_parser(value_parser!(u64))
                .help("HTTP request timeout"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More logging on stderr (repeatable)"),
        )
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ArgMatches) -> anyhow::Result<ViewerConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ViewerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ViewerConfig::new(),
    };
    if let Some(root) = args.get_one::<String>("docs-root") {
        config = config.with_docs_root(root.as_str());
    }
    if let Some(ms) = args.get_one::<u64>("notice-ttl-ms") {
        config = config.with_notice_ttl(Duration::from_millis(*ms));
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli().get_matches();
    init_tracing(args.get_count("verbose"));

    let config = load_config(&args)?;
    let site = args
        .get_one::<String>("site")
        .context("--site is required")?;
    let timeout = args.get_one::<u64>("timeout-secs").map(|s| Duration::from_secs(*s));
    let fetcher = SiteFetcher::open(site, timeout)?;
    tracing::info!("Opening site {}", fetcher.describe());

    let mut controller = Controller::bootstrap(fetcher, config)
        .await
        .with_observer(TerminalRenderer::new(std::io::stdout()));
    controller.render();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line, controller.state().view()) {
            Typed::Quit => break,
            Typed::Unknown(text) => eprintln!("unknown command: {text} (type help)"),
            Typed::Dispatch(actions) => {
                for action in actions {
                    if let Err(e) = controller.dispatch(action).await {
                        eprintln!("{e}");
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args = cli().get_matches_from([
            "docgate",
            "--site",
            "./site",
            "--docs-root",
            "papers",
            "--notice-ttl-ms",
            "1000",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.document_path("a.html"), "papers/a.html");
        assert_eq!(config.notice_ttl(), Duration::from_millis(1000));
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgate.toml");
        std::fs::write(&path, "docs_root = \"library\"\n").unwrap();

        let args = cli().get_matches_from([
            "docgate",
            "--site",
            "./site",
            "--config",
            path.to_str().unwrap(),
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.document_path("a.html"), "library/a.html");
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgate.toml");
        std::fs::write(&path, "colour = \"red\"\n").unwrap();

        let args = cli().get_matches_from([
            "docgate",
            "--site",
            "./site",
            "--config",
            path.to_str().unwrap(),
        ]);
        assert!(load_config(&args).is_err());
    }
}
