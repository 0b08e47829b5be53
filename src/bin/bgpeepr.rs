//! bgpeepr: look up the ASNs and IP prefixes of a company by name.

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use bgpeepr::output::{csv, json};
use bgpeepr::{collapse, Console, IpVersion, LookupConfig, Matcher, PrefixSet, Report};

#[derive(Parser)]
#[command(name = "bgpeepr")]
#[command(version)]
#[command(about = "Search the IPtoASN dataset for ASNs and prefixes by company name", long_about = None)]
struct Cli {
    /// Company or organization name (case-insensitive regular expression)
    company: String,

    /// Use a local IPv4 dataset instead of downloading it (plain or .gz)
    #[arg(short, long, value_name = "FILE")]
    local: Option<PathBuf>,

    /// Use a local IPv6 dataset instead of downloading it (plain or .gz)
    #[arg(long, value_name = "FILE")]
    local6: Option<PathBuf>,

    /// Display the IPv4 prefixes announced by each matched ASN
    #[arg(short, long)]
    prefixes: bool,

    /// Also display IPv6 prefixes (requires --prefixes)
    #[arg(short = '6', long, requires = "prefixes")]
    ipv6: bool,

    /// Write results to a JSON file
    #[arg(short = 'J', long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write results to a CSV file
    #[arg(short = 'C', long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// IPv4 dataset URL
    #[arg(long, value_name = "URL", default_value = bgpeepr::config::DEFAULT_V4_URL)]
    v4_url: String,

    /// IPv6 dataset URL
    #[arg(long, value_name = "URL", default_value = bgpeepr::config::DEFAULT_V6_URL)]
    v6_url: String,

    /// Download timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    timeout: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> LookupConfig {
        LookupConfig::new()
            .with_v4_url(&self.v4_url)
            .with_v6_url(&self.v6_url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_color(!self.no_color && std::io::stdout().is_terminal())
    }
}

/// How a run ended when no error occurred.
enum Outcome {
    Found,
    NotFound,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = cli.config();
    let console = Console::new(config.color);

    match run(&cli, &config, &console) {
        Ok(Outcome::Found) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", console.error(&format!("Error: {}", e)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &LookupConfig, console: &Console) -> bgpeepr::Result<Outcome> {
    let matcher = Matcher::new(&cli.company)?;

    let v4_dataset = load(IpVersion::V4, cli.local.as_deref(), config, console)?;
    let matches = matcher.find(&v4_dataset);
    if matches.is_empty() {
        println!(
            "{}",
            console.error(&format!("No ASNs found for company '{}'.", cli.company))
        );
        return Ok(Outcome::NotFound);
    }

    println!("{}", console.banner(&format!("Matched ASNs for '{}'", cli.company)));
    println!("{}", console.matches(&matches));

    let mut v4_prefixes: Option<PrefixSet> = None;
    let mut v6_prefixes: Option<PrefixSet> = None;

    if cli.prefixes {
        let prefixes = collapse(&v4_dataset, matches.asns());
        print_prefixes(IpVersion::V4, cli, console, &matches, &prefixes);
        v4_prefixes = Some(prefixes);
    }
    drop(v4_dataset);

    if cli.prefixes && cli.ipv6 {
        let v6_dataset = load(IpVersion::V6, cli.local6.as_deref(), config, console)?;
        let prefixes = collapse(&v6_dataset, matches.asns());
        print_prefixes(IpVersion::V6, cli, console, &matches, &prefixes);
        v6_prefixes = Some(prefixes);
    }

    let mut report = Report::new(&matches);
    if let Some(prefixes) = &v4_prefixes {
        report = report.with_v4(prefixes);
    }
    if let Some(prefixes) = &v6_prefixes {
        report = report.with_v6(prefixes);
    }

    if let Some(path) = &cli.json {
        json::save_json(path, &report)?;
        println!(
            "\n{}",
            console.notice(&format!("JSON output saved to {}", path.display()))
        );
    }

    if let Some(path) = &cli.csv {
        csv::save_csv(path, &report)?;
        println!(
            "\n{}",
            console.notice(&format!("CSV output saved to {}", path.display()))
        );
    }

    Ok(Outcome::Found)
}

fn load(
    version: IpVersion,
    local: Option<&std::path::Path>,
    config: &LookupConfig,
    console: &Console,
) -> bgpeepr::Result<bgpeepr::Dataset> {
    let source = config.source(version, local);
    if source.is_remote() {
        println!(
            "{}",
            console.notice(&format!("Downloading IPtoASN {} data...", version))
        );
    }
    source.load()
}

fn print_prefixes(
    version: IpVersion,
    cli: &Cli,
    console: &Console,
    matches: &bgpeepr::AsnMatches,
    prefixes: &PrefixSet,
) {
    println!(
        "{}",
        console.banner(&format!("Matched {} Prefixes for '{}'", version, cli.company))
    );
    print!("{}", console.prefixes(version, matches, prefixes));
}
