use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info, LevelFilter};
use std::io;

use ditree::{DockerSource, NerdctlSource, TreeOptions, TreeProcessor};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Engine {
    Docker,
    Nerdctl,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        help = "Print all images, including untagged intermediate images"
    )]
    all: bool,

    #[arg(short, long, help = "Print image size")]
    size: bool,

    #[arg(short, long, help = "Print image created time")]
    created: bool,

    #[arg(long, help = "Do not print the column header line")]
    no_header: bool,

    #[arg(
        short,
        long,
        value_enum,
        default_value = "docker",
        help = "Container engine to use"
    )]
    engine: Engine,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbose mode (-v for info, -vv for debug, -vvv for trace)"
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, the tree to stdout
    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_env(Env::default())
        .filter_level(log_level)
        .init();

    let options = TreeOptions {
        include_intermediate: cli.all,
        show_size: cli.size,
        show_created: cli.created,
        show_header: !cli.no_header,
    };

    info!("Starting ditree");
    debug!("Engine: {:?}", cli.engine);
    debug!("Options: {:?}", options);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.engine {
        Engine::Docker => {
            debug!("Initializing Docker source");
            let source = DockerSource::new()
                .map_err(|e| anyhow!("Failed to initialize Docker source: {}", e))?;
            TreeProcessor::new(source).print(&options, &mut out)?;
        }
        Engine::Nerdctl => {
            debug!("Initializing nerdctl source");
            let source = NerdctlSource::new()
                .map_err(|e| anyhow!("Failed to initialize nerdctl source: {}", e))?;
            TreeProcessor::new(source).print(&options, &mut out)?;
        }
    }

    Ok(())
}
