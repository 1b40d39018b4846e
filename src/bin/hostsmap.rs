use clap::{ArgGroup, Parser, Subcommand};
use hostsmap::{
    config::HostsConfig, parse, tokenizer::host::is_valid_host, Entry, EntryFilter, Error, Hosts,
    HostsResult,
};
use std::{
    net::Ipv4Addr,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to hosts file to target
    #[arg(long, env = "HOSTSMAP_HOSTS", global = true)]
    hosts: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "HOSTSMAP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all entries
    List,

    /// Print the hosts file as it is on disk
    Dump,

    /// Add an entry
    Add(AddArgs),

    /// Remove entries matching the given filters. Filters are stacked.
    Remove(RemoveArgs),

    /// Open the hosts file in the configured editor
    Open,
}

#[derive(Parser)]
struct AddArgs {
    /// IPv4 address of the entry
    ip: Ipv4Addr,

    /// Host name, as defined in RFC 5891
    #[arg(value_parser = parse_host_name)]
    host: String,

    /// Trailing comment, starting with '#'
    #[arg(long)]
    comment: Option<String>,
}

#[derive(Parser)]
#[command(group(
    ArgGroup::new("filters")
        .required(true)
        .multiple(true)
        .args(["ip", "host", "comment", "no_comment", "duplicates_only"])
))]
struct RemoveArgs {
    /// Remove entries with matching IP
    #[arg(long)]
    ip: Vec<Ipv4Addr>,

    /// Remove entries with matching host name
    #[arg(long)]
    host: Vec<String>,

    /// Remove entries with matching comment, including the leading '#'
    #[arg(long)]
    comment: Vec<String>,

    /// Remove entries without comments
    #[arg(long)]
    no_comment: bool,

    /// Remove duplicates of entries matching the filters. Without other filters, remove any duplicate.
    #[arg(long)]
    duplicates_only: bool,

    /// Print which entries would be removed without writing the file
    #[arg(long)]
    dry: bool,
}

impl RemoveArgs {
    fn filter(&self) -> EntryFilter {
        let mut filter = EntryFilter::new()
            .with_addresses(self.ip.iter().copied())
            .with_hostnames(self.host.iter().cloned())
            .with_comments(self.comment.iter().cloned());
        if self.no_comment {
            filter = filter.with_no_comment();
        }
        if self.duplicates_only && filter.is_empty() {
            filter = filter.with_match_all();
        }
        filter
    }
}

fn parse_host_name(host: &str) -> Result<String, String> {
    idna::domain_to_ascii(host)
        .map_err(|_| "invalid host name format, expected format as defined in RFC 5891".to_string())?;
    if !is_valid_host(host) {
        return Err(format!("host name {:?} contains unsupported characters", host));
    }
    Ok(host.to_string())
}

async fn read_hosts(path: &Path) -> HostsResult<Hosts> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    Ok(parse(&content)?)
}

async fn write_hosts(path: &Path, hosts: &Hosts) -> HostsResult<()> {
    tokio::fs::write(path, hosts.serialize())
        .await
        .map_err(|e| Error::io(path, e))?;
    info!(entries = hosts.len(), "hosts file written");
    Ok(())
}

async fn list(path: &Path) -> HostsResult<()> {
    let hosts = read_hosts(path).await?;
    print!("{}", hosts);
    Ok(())
}

async fn dump(path: &Path) -> HostsResult<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    print!("{}", content);
    Ok(())
}

async fn add(path: &Path, args: &AddArgs) -> HostsResult<()> {
    let mut hosts = read_hosts(path).await?;

    let mut entry = Entry::new(args.ip, args.host.as_str())?;
    if let Some(comment) = &args.comment {
        entry = entry.with_comment(comment.as_str())?;
    }
    debug!("adding entry: {}", entry);
    hosts.append(entry);

    write_hosts(path, &hosts).await?;
    print!("{}", hosts);
    Ok(())
}

async fn remove(path: &Path, args: &RemoveArgs) -> HostsResult<()> {
    let mut hosts = read_hosts(path).await?;

    let filter = args.filter();
    debug!("filter: {:?}", filter);
    let removed = hosts.remove_matching(&filter, args.duplicates_only);

    if !args.dry {
        write_hosts(path, &hosts).await?;
    }

    print!("Updated:\n{}\nRemoved:\n{}", hosts, Hosts::from(removed));
    Ok(())
}

async fn open(path: &Path, config: &HostsConfig) -> HostsResult<()> {
    let mut parts = config.editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::internal("No editor configured"))?;

    let mut editor = tokio::process::Command::new(program);
    editor.args(parts).arg(path).kill_on_drop(true);

    // Dropping the status future on Ctrl-C kills the editor
    let status = tokio::select! {
        status = editor.status() => status.map_err(|e| Error::io(program, e))?,
        interrupted = tokio::signal::ctrl_c() => {
            interrupted.map_err(|e| Error::internal(format!("Failed to listen for Ctrl-C: {}", e)))?;
            info!("editor interrupted");
            return Err(Error::Interrupted);
        }
    };

    if !status.success() {
        return Err(Error::internal(format!("Failed to open: {} exited with {}", program, status)));
    }
    Ok(())
}

async fn run(cli: &Cli) -> HostsResult<()> {
    let config = HostsConfig::load(cli.config.as_deref())?;
    debug!("config: {:?}", config);

    let hosts_path = cli.hosts.clone().unwrap_or_else(|| config.hosts_path.clone());
    debug!("hosts file: {:?}", hosts_path);

    match &cli.command {
        Commands::List => list(&hosts_path).await,
        Commands::Dump => dump(&hosts_path).await,
        Commands::Add(args) => add(&hosts_path, args).await,
        Commands::Remove(args) => remove(&hosts_path, args).await,
        Commands::Open => open(&hosts_path, &config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(()) => {}
        Err(Error::Interrupted) => std::process::exit(130),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
