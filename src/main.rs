use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wordhunt::index::build::{remove_index, FileIndexer};
use wordhunt::index::detect::TextFileTypeDetector;
use wordhunt::index::stats::show_stats;
use wordhunt::matcher::{SearchConfig, SearchTerms};
use wordhunt::output::ConsoleSink;
use wordhunt::search;
use wordhunt::utils::AppConfig;

#[derive(Parser)]
#[command(name = "wordhunt", version)]
#[command(about = "Find files by words in their name, path or content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose diagnostics and full error causes
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or recreate) the index for a directory
    Index {
        dir: PathBuf,

        #[command(flatten)]
        index: IndexPathArg,
    },
    /// Search a directory, using its index when one exists
    Find(FindArgs),
    /// Delete the index of a directory
    Remove {
        dir: PathBuf,

        #[command(flatten)]
        index: IndexPathArg,
    },
    /// Show index statistics
    Stats {
        dir: PathBuf,

        #[command(flatten)]
        index: IndexPathArg,
    },
}

#[derive(Args)]
struct IndexPathArg {
    /// Index file location (default: DIR/index.dat)
    #[arg(long = "index-path", value_name = "PATH")]
    index_path: Option<PathBuf>,
}

#[derive(Args)]
struct FindArgs {
    dir: PathBuf,

    /// Clean path listing, useful for further processing
    #[arg(long, alias = "brief")]
    list: bool,

    /// Report matching directories too
    #[arg(long)]
    include_dirs: bool,

    #[command(flatten)]
    index: IndexPathArg,

    #[arg(long)]
    case_sensitive: bool,

    /// Do not split words at camel-case boundaries
    #[arg(long)]
    no_case_split: bool,

    /// Words that must appear in the relative path
    #[arg(long, value_name = "WORDS")]
    inpath: Vec<String>,

    /// Words that must appear in the file name
    #[arg(long, value_name = "WORDS")]
    inname: Vec<String>,

    /// Words that must appear in the file's text
    #[arg(long, value_name = "WORDS")]
    incontent: Vec<String>,

    /// Words that must appear in the path or in the text
    #[arg(long, value_name = "WORDS")]
    anywhere: Vec<String>,

    /// Same as --anywhere
    #[arg(trailing_var_arg = true)]
    words: Vec<String>,
}

impl FindArgs {
    fn terms(&self) -> SearchTerms {
        let mut builder = SearchTerms::builder();
        let any: Vec<&String> = self.anywhere.iter().chain(&self.words).collect();
        if !any.is_empty() {
            builder = builder.any(any.into_iter().cloned());
        }
        if !self.inname.is_empty() {
            builder = builder.file(self.inname.iter().cloned());
        }
        if !self.inpath.is_empty() {
            builder = builder.path(self.inpath.iter().cloned());
        }
        if !self.incontent.is_empty() {
            builder = builder.content(self.incontent.iter().cloned());
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.debug {
                eprintln!("Error: {:?}", e);
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "warn,wordhunt=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    let defaults = AppConfig::load().context("Failed to load configuration")?;

    match command {
        Commands::Index { dir, index } => {
            let config = search_config(&dir, &index, &defaults)?;
            println!("Performing 'index' in dir [{}]", dir.display());

            let detector = TextFileTypeDetector::new();
            let mut sink = ConsoleSink::new(false, true);
            FileIndexer::new(&config.root_dir, &config.index_path, &detector)?
                .rebuild_index(&mut sink)
                .context("Failed to build index")?;
        }
        Commands::Find(args) => {
            let mut config = search_config(&args.dir, &args.index, &defaults)?;
            config.brief |= args.list;
            config.include_dirs |= args.include_dirs;
            config.case_sensitive |= args.case_sensitive;
            if args.no_case_split {
                config.case_word_split = false;
            }

            let mut sink = ConsoleSink::new(config.brief, true);
            search::find(&config, &args.terms(), &mut sink)?;
        }
        Commands::Remove { dir, index } => {
            let config = search_config(&dir, &index, &defaults)?;
            if remove_index(&config.index_path)? {
                println!("Removed index: {}", config.index_path.display());
            } else {
                println!("No index at: {}", config.index_path.display());
            }
        }
        Commands::Stats { dir, index } => {
            let config = search_config(&dir, &index, &defaults)?;
            show_stats(&config.index_path)?;
        }
    }

    Ok(())
}

fn search_config(dir: &Path, index: &IndexPathArg, defaults: &AppConfig) -> Result<SearchConfig> {
    let config = SearchConfig::with_defaults(dir, defaults)?;
    Ok(match &index.index_path {
        Some(path) => config.index_path(path),
        None => config,
    })
}
