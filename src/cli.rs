use crate::logging::init_logging;
use crate::runtime::build_runtime;
use crate::tools::clean::split_addresses;
use crate::{BatchOptions, BatchRequest, Coordinator, TextMode};
use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, Read};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "qrawl-text",
    version,
    about = "Fetch many pages concurrently and print their visible text (JSON only)"
)]
pub struct Cli {
    /// Addresses to fetch; each argument may itself be comma-separated.
    urls: Vec<String>,

    /// Read a JSON request (`{"urls": ...}`) or a comma/line separated list from stdin.
    #[arg(long)]
    stdin: bool,

    /// Maximum number of fetches in flight.
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Overall batch deadline in milliseconds.
    #[arg(long)]
    deadline_ms: Option<u64>,

    #[arg(long)]
    max_redirects: Option<usize>,

    #[arg(long)]
    user_agent: Option<String>,

    /// Largest response body accepted, in bytes.
    #[arg(long)]
    max_body_bytes: Option<usize>,

    /// Clean each text node and drop blank ones.
    #[arg(long)]
    compact: bool,

    /// Extra attempts after network errors or timeouts.
    #[arg(long)]
    retries: Option<u32>,

    /// Print the flat `{url: text}` map, "No data for this website." for anything without text.
    #[arg(long)]
    legacy: bool,

    #[arg(long)]
    pretty: bool,

    /// More logging on stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer flags over `options`.
    fn apply(&self, mut options: BatchOptions) -> BatchOptions {
        if let Some(concurrency) = self.concurrency {
            options.max_concurrency = concurrency;
        }
        if let Some(ms) = self.timeout_ms {
            options.per_request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.deadline_ms {
            options.overall_deadline = Duration::from_millis(ms);
        }
        if let Some(max_redirects) = self.max_redirects {
            options.max_redirects = max_redirects;
        }
        if let Some(user_agent) = &self.user_agent {
            options.user_agent = user_agent.clone();
        }
        if let Some(max_body_bytes) = self.max_body_bytes {
            options.max_body_bytes = max_body_bytes;
        }
        if self.compact {
            options.text_mode = TextMode::Compact;
        }
        if let Some(retries) = self.retries {
            options.retries = retries;
        }
        options
    }

    fn addresses(&self, stdin: Option<&str>) -> anyhow::Result<Vec<String>> {
        let mut addresses: Vec<String> = self.urls.iter().flat_map(|u| split_addresses(u)).collect();
        if let Some(input) = stdin {
            addresses.extend(parse_stdin(input)?);
        }
        Ok(addresses)
    }
}

/// A JSON object is a `BatchRequest`; anything else is a separated list.
fn parse_stdin(input: &str) -> anyhow::Result<Vec<String>> {
    if input.trim_start().starts_with('{') {
        let request = BatchRequest::from_json(input).context("reading request from stdin")?;
        Ok(request.addresses())
    } else {
        Ok(split_addresses(input))
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.apply(BatchOptions::from_env());
    options.validate()?;

    let stdin = if cli.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Some(buf)
    } else {
        None
    };

    let addresses = cli.addresses(stdin.as_deref())?;
    if addresses.iter().all(|a| a.trim().is_empty()) {
        bail!("no addresses given (pass URLs as arguments or use --stdin)");
    }

    let coordinator = Coordinator::new(options)?;
    let runtime = build_runtime().context("starting async runtime")?;
    let report = runtime.block_on(coordinator.run(&addresses));

    let json = match (cli.legacy, cli.pretty) {
        (true, true) => serde_json::to_string_pretty(&report.legacy())?,
        (true, false) => serde_json::to_string(&report.legacy())?,
        (false, true) => serde_json::to_string_pretty(&report)?,
        (false, false) => serde_json::to_string(&report)?,
    };
    println!("{json}");
    Ok(())
}
