// # dnsmigrate - DNS Migration CLI
//
// Command-line interface over the migration engine. The binary is a thin
// integration layer: it parses arguments, loads credentials, wires the
// adapters through the registry, and prints what the engine reports. All
// migration logic lives in dnsmigrate-core.
//
// ## Configuration
//
// Credentials and defaults come from flags or environment variables:
//
// ### Registrar (GoDaddy)
// - `DNSMIGRATE_GODADDY_API_KEY`: GoDaddy API key
// - `DNSMIGRATE_GODADDY_API_SECRET`: GoDaddy API secret
//
// ### DNS Provider (Cloudflare)
// - `DNSMIGRATE_CLOUDFLARE_API_TOKEN`: scoped API token (preferred)
// - `DNSMIGRATE_CLOUDFLARE_API_KEY`: legacy global key (requires email)
// - `DNSMIGRATE_CLOUDFLARE_EMAIL`: account email for legacy key auth
// - `DNSMIGRATE_CLOUDFLARE_ACCOUNT_ID`: account ID (optional)
//
// ### Store
// - `DNSMIGRATE_STORE_PATH`: path to the JSON domain store
//
// ### Engine
// - `DNSMIGRATE_MAX_RETRIES`: attempts per retried adapter call
// - `DNSMIGRATE_CONFIRM_NS_UPDATE`: prompt before nameserver rewrites
// - `DNSMIGRATE_AUTO_UPDATE_NS`: rewrite nameservers during migrate (default true)
// - `DNSMIGRATE_NS_VERIFICATION_DELAY_SECS`: settle delay after the cutover
// - `DNSMIGRATE_GODADDY_CLIENT`: GoDaddy transport variant (new|legacy)
// - `DNSMIGRATE_TARGET_IP`: default target IP for baseline A records
// - `DNSMIGRATE_SSL_MODE`: default TLS mode (off|flexible|full|strict)
// - `DNSMIGRATE_LOG_LEVEL`: trace|debug|info|warn|error
//
// ## Example
//
// ```bash
// export DNSMIGRATE_GODADDY_API_KEY=key
// export DNSMIGRATE_GODADDY_API_SECRET=secret
// export DNSMIGRATE_CLOUDFLARE_API_TOKEN=token
// export DNSMIGRATE_STORE_PATH=/var/lib/dnsmigrate/domains.json
//
// dnsmigrate migrate example.com --target-ip 203.0.113.9 --ssl-mode full
// dnsmigrate sync --dry-run
// dnsmigrate refresh
// dnsmigrate delete-dns example.com --types A,CNAME --dry-run
// ```

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dnsmigrate_core::config::{ClientVariant, DnsProviderConfig, RegistrarConfig, StoreConfig};
use dnsmigrate_core::domain::{MigrationStatus, RegistrarKind, TlsMode};
use dnsmigrate_core::engine::{DeleteOptions, MigrationReport, RefreshOutcome};
use dnsmigrate_core::reconciler::{SyncOptions, SyncOutcome};
use dnsmigrate_core::traits::ConfirmationGate;
use dnsmigrate_core::{
    AdapterRegistry, EngineConfig, Error, MigrateOptions, MigrationDisposition, MigrationEngine,
    registry::register_builtin_stores,
};

/// Exit codes for different termination scenarios
///
/// - 0: Success (including a clean dry-run)
/// - 1: Configuration or startup error
/// - 2: At least one domain migration failed
#[derive(Debug, Clone, Copy)]
enum CliExitCode {
    Success = 0,
    ConfigError = 1,
    MigrationFailed = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser)]
#[command(
    name = "dnsmigrate",
    version,
    about = "Migrate domains from a registrar's DNS to a DNS provider"
)]
struct Cli {
    #[command(flatten)]
    globals: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalOpts {
    /// GoDaddy API key
    #[arg(long, env = "DNSMIGRATE_GODADDY_API_KEY", hide_env_values = true, global = true)]
    godaddy_api_key: Option<String>,

    /// GoDaddy API secret
    #[arg(long, env = "DNSMIGRATE_GODADDY_API_SECRET", hide_env_values = true, global = true)]
    godaddy_api_secret: Option<String>,

    /// Cloudflare API token (preferred)
    #[arg(long, env = "DNSMIGRATE_CLOUDFLARE_API_TOKEN", hide_env_values = true, global = true)]
    cloudflare_api_token: Option<String>,

    /// Cloudflare legacy global API key (requires --cloudflare-email)
    #[arg(long, env = "DNSMIGRATE_CLOUDFLARE_API_KEY", hide_env_values = true, global = true)]
    cloudflare_api_key: Option<String>,

    /// Cloudflare account email for legacy key auth
    #[arg(long, env = "DNSMIGRATE_CLOUDFLARE_EMAIL", global = true)]
    cloudflare_email: Option<String>,

    /// Cloudflare account ID
    #[arg(long, env = "DNSMIGRATE_CLOUDFLARE_ACCOUNT_ID", global = true)]
    cloudflare_account_id: Option<String>,

    /// Path to the JSON domain store
    #[arg(
        long,
        env = "DNSMIGRATE_STORE_PATH",
        default_value = "dnsmigrate-domains.json",
        global = true
    )]
    store_path: String,

    /// Attempts per retried adapter call
    #[arg(long, env = "DNSMIGRATE_MAX_RETRIES", global = true)]
    max_retries: Option<usize>,

    /// Prompt before rewriting registrar nameservers
    #[arg(long, env = "DNSMIGRATE_CONFIRM_NS_UPDATE", global = true)]
    confirm_ns_update: bool,

    /// Whether migrations rewrite registrar nameservers automatically;
    /// when false, migrate halts after zone-add until update-ns is run
    #[arg(long, env = "DNSMIGRATE_AUTO_UPDATE_NS", global = true)]
    auto_update_ns: Option<bool>,

    /// Settle delay after the nameserver write, in seconds
    #[arg(long, env = "DNSMIGRATE_NS_VERIFICATION_DELAY_SECS", global = true)]
    ns_verification_delay_secs: Option<u64>,

    /// GoDaddy transport variant (new|legacy)
    #[arg(long, env = "DNSMIGRATE_GODADDY_CLIENT", default_value = "new", global = true)]
    godaddy_client: String,

    /// Default target IP for baseline A records
    #[arg(long, env = "DNSMIGRATE_TARGET_IP", global = true)]
    default_target_ip: Option<IpAddr>,

    /// Default TLS mode (off|flexible|full|strict)
    #[arg(long, env = "DNSMIGRATE_SSL_MODE", global = true)]
    default_ssl_mode: Option<TlsMode>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "DNSMIGRATE_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,
}

impl GlobalOpts {
    /// Validate the assembled configuration
    ///
    /// Credential shape and enumerated values are checked here, before any
    /// adapter is constructed, so a misconfiguration fails with a pointer
    /// to the flag or environment variable to set.
    fn validate(&self) -> anyhow::Result<()> {
        if self.godaddy_api_key.as_deref().is_none_or(str::is_empty) {
            anyhow::bail!(
                "GoDaddy API key is required. \
                Set it via --godaddy-api-key or DNSMIGRATE_GODADDY_API_KEY"
            );
        }
        if self.godaddy_api_secret.as_deref().is_none_or(str::is_empty) {
            anyhow::bail!(
                "GoDaddy API secret is required. \
                Set it via --godaddy-api-secret or DNSMIGRATE_GODADDY_API_SECRET"
            );
        }

        let has_token = self
            .cloudflare_api_token
            .as_deref()
            .is_some_and(|t| !t.is_empty());
        let has_key = self
            .cloudflare_api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty());
        let has_email = self
            .cloudflare_email
            .as_deref()
            .is_some_and(|e| !e.is_empty());

        if !has_token && !has_key {
            anyhow::bail!(
                "Cloudflare credentials are required. \
                Set DNSMIGRATE_CLOUDFLARE_API_TOKEN, or \
                DNSMIGRATE_CLOUDFLARE_API_KEY plus DNSMIGRATE_CLOUDFLARE_EMAIL"
            );
        }
        if !has_token && has_key && !has_email {
            anyhow::bail!(
                "The legacy Cloudflare API key needs an account email. \
                Set it via --cloudflare-email or DNSMIGRATE_CLOUDFLARE_EMAIL"
            );
        }

        match self.godaddy_client.as_str() {
            "new" | "legacy" => {}
            other => anyhow::bail!(
                "GoDaddy client variant '{other}' is not supported. \
                Supported variants: new, legacy"
            ),
        }

        Ok(())
    }
}

#[derive(Subcommand)]
enum Command {
    /// Migrate a domain end to end, resuming at the first unfinished phase
    Migrate {
        /// Domain to migrate
        domain: String,

        /// Target IP for baseline A records; without one, apex CNAME
        /// records are provisioned instead
        #[arg(long)]
        target_ip: Option<IpAddr>,

        /// TLS mode to apply in the final phase
        #[arg(long = "ssl-mode")]
        ssl_mode: Option<TlsMode>,

        /// Skip the nameserver confirmation prompt
        #[arg(long)]
        no_confirm: bool,
    },

    /// Show per-phase progress for a tracked domain
    MigrationStatus {
        /// Domain to inspect
        domain: String,
    },

    /// Reconcile every domain not yet fully migrated
    Sync {
        /// Plan only: list the phases each domain would run, without
        /// calling any API or mutating the store
        #[arg(long)]
        dry_run: bool,

        /// Rewrite registrar nameservers during this run even when
        /// auto-update is disabled
        #[arg(long)]
        update_ns: bool,

        /// Skip the nameserver confirmation prompt
        #[arg(long)]
        no_confirm_ns: bool,
    },

    /// Run the nameserver cutover for one domain (or all of them)
    UpdateNs {
        /// Domain to cut over
        domain: Option<String>,

        /// Cut over every tracked domain with a zone
        #[arg(long, conflicts_with = "domain")]
        all: bool,

        /// Re-run the cutover even when nameservers were already updated
        #[arg(long)]
        force: bool,

        /// Skip the nameserver confirmation prompt
        #[arg(long)]
        no_confirm: bool,
    },

    /// Track a new domain without migrating it
    Add {
        /// Domain to track
        domain: String,

        /// Registrar owning the domain
        #[arg(long)]
        registrar: RegistrarKind,
    },

    /// Re-derive every tracked domain's state from the provider
    Refresh {
        /// Plan only: list the domains that would be checked
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete DNS records from one or more domains' zones
    ///
    /// NS, MX, TXT, and SRV records are always preserved.
    DeleteDns {
        /// Domains whose records to delete
        #[arg(required = true)]
        domains: Vec<String>,

        /// Record types to delete, comma separated (default: A,AAAA,CNAME)
        #[arg(long, value_delimiter = ',')]
        types: Option<Vec<String>>,

        /// Preview the deletion plan without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Show the records and TLS mode live at the provider for a domain
    Records {
        /// Domain to inspect
        domain: String,
    },

    /// List tracked domains
    List {
        /// Only show domains at this status
        #[arg(long)]
        status: Option<MigrationStatus>,
    },

    /// Per-status domain counts
    Stats,

    /// Import the registrar's domain list into the store
    Import,

    /// Probe registrar and provider credentials
    ValidateCredentials,
}

/// Gate that blocks on a y/N prompt on stdin
struct StdinGate;

#[async_trait]
impl ConfirmationGate for StdinGate {
    async fn confirm(&self, prompt: &str) -> Result<bool, Error> {
        let prompt = format!("{prompt} [y/N]: ");
        let line = tokio::task::spawn_blocking(move || {
            use std::io::{BufRead, Write};
            let mut stdout = std::io::stdout();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok::<String, std::io::Error>(line)
        })
        .await
        .map_err(|e| Error::Other(format!("Confirmation prompt failed: {e}")))??;

        let answer = line.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.globals.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("Invalid log level: {other}");
            return CliExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return CliExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return CliExitCode::ConfigError.into();
        }
    };

    rt.block_on(async {
        match run(cli).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {e}");
                match e {
                    Error::Config(_) | Error::Authentication(_) | Error::InvalidInput(_) => {
                        CliExitCode::ConfigError
                    }
                    _ => CliExitCode::MigrationFailed,
                }
            }
        }
    })
    .into()
}

async fn run(cli: Cli) -> Result<CliExitCode, Error> {
    if let Err(e) = cli.globals.validate() {
        error!("Configuration error: {e}");
        return Ok(CliExitCode::ConfigError);
    }

    let engine = build_engine(&cli).await?;
    let result = dispatch(&engine, cli.command).await;

    // Flush the store before surfacing any command error
    engine.store().flush().await?;
    result
}

async fn dispatch(engine: &MigrationEngine, command: Command) -> Result<CliExitCode, Error> {
    match command {
        Command::Migrate {
            domain,
            target_ip,
            ssl_mode,
            no_confirm,
        } => {
            let opts = MigrateOptions {
                target_ip,
                tls_mode: ssl_mode,
                skip_confirm: no_confirm,
                update_nameservers: None,
            };
            let outcome = engine.migrate(&domain, &opts).await?;
            print_outcome(&outcome.domain, outcome.status, outcome.disposition, outcome.error.as_deref());
            Ok(exit_for(outcome.disposition))
        }

        Command::MigrationStatus { domain } => {
            let report = engine.migration_status(&domain).await?;
            print_report(&report);
            Ok(CliExitCode::Success)
        }

        Command::Sync {
            dry_run,
            update_ns,
            no_confirm_ns,
        } => {
            let opts = SyncOptions {
                dry_run,
                update_nameservers: update_ns.then_some(true),
                skip_confirm: no_confirm_ns,
                include_completed: false,
            };
            let report = engine.sync_all(&opts).await?;

            if report.entries.is_empty() {
                println!("Nothing to sync: every tracked domain is fully migrated.");
                return Ok(CliExitCode::Success);
            }

            for entry in &report.entries {
                match entry.outcome {
                    SyncOutcome::Planned => {
                        let phases: Vec<&str> =
                            entry.planned_phases.iter().map(|p| p.as_str()).collect();
                        let confirm = if entry.would_confirm {
                            " (would prompt before ns-update)"
                        } else {
                            ""
                        };
                        println!(
                            "{:40} {:18} would run: [{}]{}",
                            entry.domain,
                            entry.status.as_str(),
                            phases.join(", "),
                            confirm
                        );
                    }
                    SyncOutcome::Completed => {
                        println!("{:40} migrated", entry.domain);
                    }
                    SyncOutcome::Halted => {
                        println!("{:40} halted at {}", entry.domain, entry.status.as_str());
                    }
                    SyncOutcome::Failed => {
                        println!(
                            "{:40} FAILED: {}",
                            entry.domain,
                            entry.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                }
            }

            if report.is_clean() {
                Ok(CliExitCode::Success)
            } else {
                Ok(CliExitCode::MigrationFailed)
            }
        }

        Command::UpdateNs {
            domain,
            all,
            force,
            no_confirm,
        } => {
            let targets: Vec<String> = if all {
                engine
                    .list_domains()
                    .await?
                    .into_iter()
                    .filter(|r| r.zone_id.is_some())
                    .map(|r| r.domain)
                    .collect()
            } else {
                let domain = domain.ok_or_else(|| {
                    Error::invalid_input("Provide a domain or pass --all")
                })?;
                vec![domain]
            };

            if targets.is_empty() {
                println!("No domain has a zone yet; run migrate first.");
                return Ok(CliExitCode::Success);
            }

            let mut any_failed = false;
            for target in targets {
                let outcome = engine.update_nameservers(&target, force, no_confirm).await?;
                print_outcome(&outcome.domain, outcome.status, outcome.disposition, outcome.error.as_deref());
                any_failed |= outcome.disposition == MigrationDisposition::Failed;
            }

            if any_failed {
                Ok(CliExitCode::MigrationFailed)
            } else {
                Ok(CliExitCode::Success)
            }
        }

        Command::Add { domain, registrar } => {
            let record = engine.add_domain(&domain, registrar).await?;
            println!("Tracking {} ({}, {})", record.domain, record.registrar, record.status);
            Ok(CliExitCode::Success)
        }

        Command::Refresh { dry_run } => {
            let report = engine.refresh_domains(dry_run).await?;

            if report.entries.is_empty() {
                println!("No tracked domains to refresh.");
                return Ok(CliExitCode::Success);
            }

            for entry in &report.entries {
                let verdict = match entry.outcome {
                    RefreshOutcome::Unchanged => "unchanged".to_string(),
                    RefreshOutcome::Updated => "updated from provider".to_string(),
                    RefreshOutcome::ZoneMissing => "zone missing at provider".to_string(),
                    RefreshOutcome::Failed => format!(
                        "lookup FAILED: {}",
                        entry.error.as_deref().unwrap_or("unknown error")
                    ),
                    RefreshOutcome::Skipped => "would check".to_string(),
                };
                println!("{:40} {:18} {verdict}", entry.domain, entry.status.as_str());
            }
            println!(
                "{} checked, {} updated, {} failed",
                report.entries.len(),
                report.updated_count(),
                report.failed_count()
            );

            if report.failed_count() == 0 {
                Ok(CliExitCode::Success)
            } else {
                Ok(CliExitCode::MigrationFailed)
            }
        }

        Command::DeleteDns {
            domains,
            types,
            dry_run,
            force,
        } => {
            let opts = DeleteOptions {
                record_types: types,
                dry_run,
                skip_confirm: force,
            };

            let mut any_failed = false;
            for domain in domains {
                match engine.delete_dns_records(&domain, &opts).await {
                    Ok(report) if report.dry_run => {
                        println!(
                            "{}: would delete {} of {} record(s)",
                            report.domain,
                            report.planned.len(),
                            report.total_records
                        );
                        for record in &report.planned {
                            println!(
                                "  {:6} {} -> {}",
                                record.record_type, record.name, record.content
                            );
                        }
                    }
                    Ok(report) if report.cancelled => {
                        println!("{}: deletion cancelled", report.domain);
                    }
                    Ok(report) => {
                        println!(
                            "{}: deleted {}, preserved {}, failed {}",
                            report.domain, report.deleted, report.preserved, report.failed
                        );
                        any_failed |= report.failed > 0;
                    }
                    Err(e) => {
                        println!("{domain}: FAILED: {e}");
                        any_failed = true;
                    }
                }
            }

            if any_failed {
                Ok(CliExitCode::MigrationFailed)
            } else {
                Ok(CliExitCode::Success)
            }
        }

        Command::Records { domain } => {
            let details = engine.zone_details(&domain).await?;
            println!("zone {}", details.zone_id);
            println!("tls  {}", details.tls_mode.as_str());
            if details.records.is_empty() {
                println!("No records in the zone.");
                return Ok(CliExitCode::Success);
            }
            println!("{:6} {:40} {:28} {:6} PROXIED", "TYPE", "NAME", "CONTENT", "TTL");
            for record in details.records {
                println!(
                    "{:6} {:40} {:28} {:<6} {}",
                    record.record_type,
                    record.name,
                    record.content,
                    record.ttl.map_or_else(|| "-".to_string(), |t| t.to_string()),
                    record.proxied.map_or("-", |p| if p { "yes" } else { "no" })
                );
            }
            Ok(CliExitCode::Success)
        }

        Command::List { status } => {
            let records = match status {
                Some(status) => engine.store().list_by_status(&[status]).await?,
                None => engine.list_domains().await?,
            };

            if records.is_empty() {
                println!("No tracked domains.");
                return Ok(CliExitCode::Success);
            }

            println!("{:40} {:18} {:10} {}", "DOMAIN", "STATUS", "REGISTRAR", "ZONE");
            for record in records {
                println!(
                    "{:40} {:18} {:10} {}",
                    record.domain,
                    record.status.as_str(),
                    record.registrar.as_str(),
                    record.zone_id.as_deref().unwrap_or("-")
                );
            }
            Ok(CliExitCode::Success)
        }

        Command::Stats => {
            let stats = engine.stats().await?;
            let total: usize = stats.iter().map(|(_, count)| count).sum();
            for (status, count) in stats {
                println!("{:18} {count}", status.as_str());
            }
            println!("{:18} {total}", "total");
            Ok(CliExitCode::Success)
        }

        Command::Import => {
            let summary = engine.import_domains().await?;
            for domain in &summary.imported {
                println!("imported {domain}");
            }
            println!(
                "{} imported, {} already tracked, {} invalid",
                summary.imported.len(),
                summary.already_tracked,
                summary.invalid
            );
            Ok(CliExitCode::Success)
        }

        Command::ValidateCredentials => {
            let checks = engine.validate_credentials().await;
            let mut all_ok = true;
            for check in checks {
                if check.ok {
                    println!("{:12} ok", check.service);
                } else {
                    all_ok = false;
                    println!(
                        "{:12} FAILED: {}",
                        check.service,
                        check.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            if all_ok {
                Ok(CliExitCode::Success)
            } else {
                Ok(CliExitCode::ConfigError)
            }
        }
    }
}

/// Wire the registry, adapters, store, and gate into an engine
async fn build_engine(cli: &Cli) -> Result<MigrationEngine, Error> {
    let globals = &cli.globals;

    let client_variant = match globals.godaddy_client.as_str() {
        "new" => ClientVariant::New,
        "legacy" => ClientVariant::Legacy,
        other => {
            return Err(Error::config(format!(
                "Invalid GoDaddy client variant '{other}', expected new|legacy"
            )));
        }
    };

    let registrar_config = RegistrarConfig::GoDaddy {
        api_key: globals.godaddy_api_key.clone().unwrap_or_default(),
        api_secret: globals.godaddy_api_secret.clone().unwrap_or_default(),
        client_variant,
    };

    let provider_config = DnsProviderConfig::Cloudflare {
        api_token: globals.cloudflare_api_token.clone(),
        api_key: globals.cloudflare_api_key.clone(),
        email: globals.cloudflare_email.clone(),
        account_id: globals.cloudflare_account_id.clone(),
    };

    let store_config = StoreConfig::File {
        path: globals.store_path.clone(),
    };

    let mut engine_config = EngineConfig {
        confirm_ns_update: globals.confirm_ns_update,
        default_target_ip: globals.default_target_ip,
        ..EngineConfig::default()
    };
    if let Some(max_retries) = globals.max_retries {
        engine_config.max_retry_attempts = max_retries;
    }
    if let Some(mode) = globals.default_ssl_mode {
        engine_config.default_tls_mode = mode;
    }
    if let Some(auto) = globals.auto_update_ns {
        engine_config.auto_update_nameservers = auto;
    }
    if let Some(delay) = globals.ns_verification_delay_secs {
        engine_config.ns_verification_delay_secs = delay;
    }

    registrar_config.validate()?;
    provider_config.validate()?;

    let registry = AdapterRegistry::new();
    register_builtin_stores(&registry);

    #[cfg(feature = "godaddy")]
    dnsmigrate_registrar_godaddy::register(&registry);

    #[cfg(feature = "cloudflare")]
    dnsmigrate_provider_cloudflare::register(&registry);

    info!(
        registrars = ?registry.list_registrars(),
        providers = ?registry.list_providers(),
        "Adapters registered"
    );

    let registrar = registry.create_registrar(&registrar_config)?;
    let provider = registry.create_provider(&provider_config)?;
    let store = registry.create_store(&store_config).await?;

    // The engine consults the gate only where confirmation applies (the NS
    // cutover when enabled, record deletion unless forced)
    let gate: Box<dyn ConfirmationGate> = Box::new(StdinGate);

    MigrationEngine::new(registrar, provider, store, gate, engine_config)
}

fn exit_for(disposition: MigrationDisposition) -> CliExitCode {
    match disposition {
        MigrationDisposition::Completed | MigrationDisposition::Halted => CliExitCode::Success,
        MigrationDisposition::Failed => CliExitCode::MigrationFailed,
    }
}

fn print_outcome(
    domain: &str,
    status: MigrationStatus,
    disposition: MigrationDisposition,
    error: Option<&str>,
) {
    match disposition {
        MigrationDisposition::Completed => {
            println!("{domain}: {}", status.as_str());
        }
        MigrationDisposition::Halted => {
            println!("{domain}: halted at {} (no error)", status.as_str());
        }
        MigrationDisposition::Failed => {
            println!(
                "{domain}: FAILED at {} ({})",
                status.as_str(),
                error.unwrap_or("unknown error")
            );
        }
    }
}

fn print_report(report: &MigrationReport) {
    let record = &report.record;
    println!("{} ({})", record.domain, record.status.as_str());
    println!("  registrar: {}", record.registrar);
    println!("  zone:      {}", record.zone_id.as_deref().unwrap_or("-"));

    for (phase, done) in &report.phases {
        let mark = if *done { "done" } else { "pending" };
        println!("  {:14} {mark}", phase.as_str());
    }

    if !record.assigned_nameservers.is_empty() {
        println!("  assigned ns:  {}", record.assigned_nameservers.join(", "));
    }
    if let Some(original) = &record.original_nameservers {
        println!("  original ns:  {}", original.join(", "));
    }
    if let Some(updated) = record.ns_updated_at {
        println!("  ns updated:   {updated}");
    }
    if let Some(err) = &record.last_error {
        println!("  last error:   {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GlobalOpts {
        GlobalOpts {
            godaddy_api_key: Some("gd-key".to_string()),
            godaddy_api_secret: Some("gd-secret".to_string()),
            cloudflare_api_token: Some("cf-token".to_string()),
            cloudflare_api_key: None,
            cloudflare_email: None,
            cloudflare_account_id: None,
            store_path: "domains.json".to_string(),
            max_retries: None,
            confirm_ns_update: false,
            auto_update_ns: None,
            ns_verification_delay_secs: None,
            godaddy_client: "new".to_string(),
            default_target_ip: None,
            default_ssl_mode: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn token_auth_passes_validation() {
        assert!(opts().validate().is_ok());
    }

    #[test]
    fn legacy_key_with_email_passes_validation() {
        let mut opts = opts();
        opts.cloudflare_api_token = None;
        opts.cloudflare_api_key = Some("cf-key".to_string());
        opts.cloudflare_email = Some("ops@example.com".to_string());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn missing_godaddy_key_names_the_env_var() {
        let mut opts = opts();
        opts.godaddy_api_key = None;
        let err = opts.validate().unwrap_err().to_string();
        assert!(err.contains("DNSMIGRATE_GODADDY_API_KEY"));

        // An empty value is as missing as an absent one
        opts.godaddy_api_key = Some(String::new());
        assert!(opts.validate().is_err());
    }

    #[test]
    fn missing_godaddy_secret_is_rejected() {
        let mut opts = opts();
        opts.godaddy_api_secret = None;
        let err = opts.validate().unwrap_err().to_string();
        assert!(err.contains("DNSMIGRATE_GODADDY_API_SECRET"));
    }

    #[test]
    fn cloudflare_needs_a_token_or_a_key() {
        let mut opts = opts();
        opts.cloudflare_api_token = None;
        let err = opts.validate().unwrap_err().to_string();
        assert!(err.contains("DNSMIGRATE_CLOUDFLARE_API_TOKEN"));
    }

    #[test]
    fn legacy_key_without_email_is_rejected() {
        let mut opts = opts();
        opts.cloudflare_api_token = None;
        opts.cloudflare_api_key = Some("cf-key".to_string());
        let err = opts.validate().unwrap_err().to_string();
        assert!(err.contains("DNSMIGRATE_CLOUDFLARE_EMAIL"));
    }

    #[test]
    fn unknown_godaddy_client_variant_is_rejected() {
        let mut opts = opts();
        opts.godaddy_client = "soap".to_string();
        let err = opts.validate().unwrap_err().to_string();
        assert!(err.contains("soap"));
    }
}
