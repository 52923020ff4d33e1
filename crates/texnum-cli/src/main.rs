use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use texnum_core::config::{LintConfig, CONFIG_FILE_NAME};
use texnum_core::source::{strip_comments, IdentityMap};
use texnum_core::{Advisory, Document, Linter};

#[derive(Parser)]
#[command(name = "texnum")]
#[command(about = "Checks numerals in LaTeX sources", long_about = None)]
struct Cli {
    /// LaTeX files to check
    #[arg(value_name = "FILE", required_unless_present = "list_rules")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Configuration file (defaults to ./.texnum.json when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only run the rules with these ids
    #[arg(long = "rule", value_name = "ID")]
    rules: Vec<String>,

    /// List the available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Exit with status 0 even when advisories are reported
    #[arg(long)]
    no_fail: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<LintConfig> {
    if let Some(path) = explicit {
        return LintConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()));
    }
    let default_path = Path::new(CONFIG_FILE_NAME);
    if default_path.exists() {
        log::debug!("using configuration from {}", default_path.display());
        return LintConfig::load(default_path)
            .with_context(|| format!("loading configuration from {}", default_path.display()));
    }
    Ok(LintConfig::default())
}

fn check_file(linter: &Linter, path: &Path) -> anyhow::Result<Vec<Advisory>> {
    let original =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let working = strip_comments(&original);
    let document =
        Document::with_working_text(path.display().to_string(), original, working, IdentityMap);
    Ok(linter.check(&document))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(cli.config.as_deref())?;
    let mut linter = Linter::from_config(&config);
    if !cli.rules.is_empty() {
        linter.retain_ids(cli.rules.as_slice());
    }

    if cli.list_rules {
        for rule in linter.rules() {
            println!("{}\t{}", rule.id(), rule.description());
        }
        return Ok(());
    }

    let mut advisories = Vec::new();
    for path in &cli.files {
        let found = check_file(&linter, path)?;
        log::debug!("{}: {} advisories", path.display(), found.len());
        advisories.extend(found);
    }

    match cli.format {
        Format::Text => {
            for advisory in &advisories {
                println!("{}\n", advisory.render());
            }
            if !advisories.is_empty() {
                eprintln!("{} advisories", advisories.len());
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&advisories)?),
    }

    if !advisories.is_empty() && !cli.no_fail {
        std::process::exit(1);
    }
    Ok(())
}
