//! Cloudflare Edge CLI
//!
//! Command-line front end for the typed Cloudflare client: DNS records
//! (including upsert and batch), cache purge, IP access rules, and zones.
//!
//! # Usage
//! ```bash
//! # List DNS records
//! cloudflare-edge list-records --zone-id your_zone_id
//!
//! # Ensure an A record exists
//! cloudflare-edge upsert-record --zone-id your_zone_id \
//!     --type A --name app.example.com --content 1.2.3.4
//!
//! # Purge the whole cache
//! cloudflare-edge purge-cache --zone-id your_zone_id --all
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cloudflare_edge::access::{AccessRuleMode, AccessRuleSpec, AccessRuleTarget};
use cloudflare_edge::cache::PurgeRequest;
use cloudflare_edge::dns::{BatchRequest, RecordPatch, RecordSpec};
use cloudflare_edge::zones::ZoneSelector;
use cloudflare_edge::{CloudflareClient, Scope};

#[derive(Parser)]
#[command(name = "cloudflare-edge")]
#[command(about = "Cloudflare DNS, cache, and firewall management", long_about = None)]
#[command(version)]
struct Cli {
    /// Cloudflare API token
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List DNS records in a zone
    ListRecords {
        #[arg(long)]
        zone_id: String,
    },

    /// Fetch a single DNS record
    GetRecord {
        #[arg(long)]
        zone_id: String,
        #[arg(long)]
        record_id: String,
    },

    /// Create a new DNS record
    CreateRecord {
        #[arg(long)]
        zone_id: String,
        /// Record type (A, AAAA, CNAME, TXT, MX)
        #[arg(long, name = "type")]
        record_type: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
        /// TTL in seconds (1 = auto)
        #[arg(long, default_value = "1")]
        ttl: u32,
        /// Proxy through Cloudflare
        #[arg(long)]
        proxied: bool,
    },

    /// Partially update a DNS record; unset flags are left untouched
    UpdateRecord {
        #[arg(long)]
        zone_id: String,
        #[arg(long)]
        record_id: String,
        #[arg(long, name = "type")]
        record_type: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        ttl: Option<u32>,
        #[arg(long)]
        proxied: Option<bool>,
    },

    /// Delete a DNS record
    DeleteRecord {
        #[arg(long)]
        zone_id: String,
        #[arg(long)]
        record_id: String,
    },

    /// Create the record if absent, update it otherwise
    UpsertRecord {
        #[arg(long)]
        zone_id: String,
        #[arg(long, name = "type")]
        record_type: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "1")]
        ttl: u32,
        #[arg(long)]
        proxied: bool,
    },

    /// Submit a batch of record operations from a JSON file
    BatchRecords {
        #[arg(long)]
        zone_id: String,
        /// Path to a JSON file with `creates`, `updates`, and `deletes` lists
        #[arg(long)]
        input: String,
    },

    /// Purge the zone cache
    PurgeCache {
        #[arg(long)]
        zone_id: String,
        /// Purge everything
        #[arg(long)]
        all: bool,
        /// File URL to purge (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,
        /// Cache tag to purge (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Create an IP access rule
    CreateAccessRule {
        #[arg(long)]
        zone_id: Option<String>,
        #[arg(long)]
        account_id: Option<String>,
        /// block, challenge, whitelist, js_challenge, or managed_challenge
        #[arg(long)]
        mode: String,
        /// ip, ip_range, asn, or country
        #[arg(long)]
        target: String,
        #[arg(long)]
        value: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an IP access rule
    DeleteAccessRule {
        #[arg(long)]
        zone_id: Option<String>,
        #[arg(long)]
        account_id: Option<String>,
        #[arg(long)]
        rule_id: String,
    },

    /// List IP access rules
    ListAccessRules {
        #[arg(long)]
        zone_id: Option<String>,
        #[arg(long)]
        account_id: Option<String>,
    },

    /// List zones
    ListZones,

    /// Fetch a zone by id or hostname
    GetZone {
        #[arg(long)]
        zone_id: Option<String>,
        #[arg(long)]
        hostname: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut client = CloudflareClient::new(cli.token)?;
    if let Some(base_url) = cli.base_url {
        client = client.with_base_url(base_url);
    }

    match cli.command {
        Commands::ListRecords { zone_id } => {
            let records = client.list_records(&zone_id).await?;

            println!("{:<36} {:<6} {:<30} {:<40}", "ID", "TYPE", "NAME", "CONTENT");
            println!("{}", "-".repeat(112));
            for record in &records {
                println!(
                    "{:<36} {:<6} {:<30} {:<40}",
                    record.id, record.record_type, record.name, record.content
                );
            }

            info!("Listed {} records", records.len());
        }

        Commands::GetRecord { zone_id, record_id } => {
            let record = client.get_record(&zone_id, &record_id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::CreateRecord {
            zone_id,
            record_type,
            name,
            content,
            ttl,
            proxied,
        } => {
            let spec = RecordSpec {
                record_type,
                name,
                content,
                ttl,
                proxied,
            };
            let record = client.create_record(&zone_id, &spec).await?;
            println!("✅ Created record: {}", record.id);
        }

        Commands::UpdateRecord {
            zone_id,
            record_id,
            record_type,
            name,
            content,
            ttl,
            proxied,
        } => {
            let patch = RecordPatch {
                record_type,
                name,
                content,
                ttl,
                proxied,
            };
            let record = client.update_record(&zone_id, &record_id, &patch).await?;
            println!("✅ Updated record: {}", record.id);
        }

        Commands::DeleteRecord { zone_id, record_id } => {
            warn!("Deleting DNS record: {}", record_id);
            let deleted = client.delete_record(&zone_id, &record_id).await?;
            println!("✅ Deleted record: {}", deleted);
        }

        Commands::UpsertRecord {
            zone_id,
            record_type,
            name,
            content,
            ttl,
            proxied,
        } => {
            let spec = RecordSpec {
                record_type,
                name,
                content,
                ttl,
                proxied,
            };
            let outcome = client.upsert_record(&zone_id, &spec).await?;
            println!("✅ Record {}: {}", outcome.action, outcome.record.id);
        }

        Commands::BatchRecords { zone_id, input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read batch file: {input}"))?;
            let request: BatchRequest =
                serde_json::from_str(&raw).context("failed to parse batch file")?;

            let outcome = client.batch_records(&zone_id, &request).await?;
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            println!("✅ Batch completed");
        }

        Commands::PurgeCache {
            zone_id,
            all,
            files,
            tags,
        } => {
            let request = PurgeRequest {
                purge_all: all,
                files,
                tags,
            };
            let outcome = client.purge_cache(&zone_id, &request).await?;
            println!("✅ Purge submitted: {}", outcome.request_id);
        }

        Commands::CreateAccessRule {
            zone_id,
            account_id,
            mode,
            target,
            value,
            notes,
        } => {
            let scope = Scope::resolve(zone_id, account_id)?;
            let spec = AccessRuleSpec {
                mode: mode.parse::<AccessRuleMode>()?,
                target: target.parse::<AccessRuleTarget>()?,
                value,
                notes,
            };
            let rule = client.create_access_rule(&scope, &spec).await?;
            println!("✅ Created access rule: {}", rule.id);
        }

        Commands::DeleteAccessRule {
            zone_id,
            account_id,
            rule_id,
        } => {
            let scope = Scope::resolve(zone_id, account_id)?;
            let deleted = client.delete_access_rule(&scope, &rule_id).await?;
            println!("✅ Deleted access rule: {}", deleted);
        }

        Commands::ListAccessRules {
            zone_id,
            account_id,
        } => {
            let scope = Scope::resolve(zone_id, account_id)?;
            let rules = client.list_access_rules(&scope).await?;
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }

        Commands::ListZones => {
            let zones = client.list_zones().await?;

            println!("{:<36} {:<30} {:<10}", "ID", "NAME", "STATUS");
            println!("{}", "-".repeat(76));
            for zone in &zones {
                println!("{:<36} {:<30} {:<10}", zone.id, zone.name, zone.status);
            }
        }

        Commands::GetZone { zone_id, hostname } => {
            let selector = ZoneSelector::resolve(zone_id, hostname)?;
            let zone = client.get_zone(&selector).await?;
            println!("{}", serde_json::to_string_pretty(&zone)?);
        }
    }

    Ok(())
}
