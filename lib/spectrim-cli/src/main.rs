#![allow(missing_docs)]
use std::path::PathBuf;

use anyhow::{Context, Result};
use spectrim_core::{SpecSource, TagFilter, write_pretty};
use tracing::{info, warn};

const HELP: &str = "\
spectrim — trim an OpenAPI document to a tagged subset

USAGE:
  spectrim [OPTIONS] <INPUT>

ARGS:
  <INPUT>  Path or http(s) URL of the source OpenAPI document

OPTIONS:
  -t, --tag <NAME>     Tag to keep; repeat for several (defaults to the built-in set)
  -o, --output <PATH>  Where to write the filtered document [default: filtered.openapi.json]
      --help           Print this help
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().pretty().init();

    let AppArgs {
        input,
        output,
        tags,
    } = AppArgs::parse().context("parsing arguments")?;

    let source = SpecSource::parse(&input).context("interpreting the input argument")?;
    let document = source.load().await.context("loading the source document")?;

    let filter = if tags.is_empty() {
        TagFilter::default()
    } else {
        TagFilter::new(tags)
    };
    info!(tags = ?filter.desired_tags(), "filtering document");
    let filtered = filter.filter(&document);

    write_pretty(&output, &filtered).context("writing the filtered document")?;

    info!("Bye!");
    Ok(())
}

#[derive(Debug)]
struct AppArgs {
    input: String,
    output: PathBuf,
    tags: Vec<String>,
}

impl AppArgs {
    fn parse() -> Result<Self> {
        let mut pargs = pico_args::Arguments::from_env();

        if pargs.contains("--help") {
            print!("{HELP}");
            std::process::exit(0);
        }

        let tags = pargs
            .values_from_str(["-t", "--tag"])
            .context("parsing tag arguments")?;

        let output = pargs
            .opt_value_from_str(["-o", "--output"])
            .context("parsing output argument")?
            .unwrap_or_else(|| PathBuf::from("filtered.openapi.json"));

        let input = pargs
            .free_from_str()
            .context("reading the input document argument")?;

        let result = Self {
            input,
            output,
            tags,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            warn!(?remaining, "Warning: unused arguments left");
        }
        Ok(result)
    }
}
