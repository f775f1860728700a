use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use ssi_manifest::ManifestStorage;
use ssi_service::{CreateDidRequest, DidRouter, DidService, Service};
use ssi_storage::{MemoryStorage, ServiceStorage, SledStorage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod version;

use config::{AppConfig, LogFormat, StorageBackend};
use version::{git_commit_hash, SSI_VERSION};

#[derive(Parser)]
#[command(name = "ssi-node")]
#[command(about = "Self-sovereign identity service node")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./ssi.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report service status, supported DID methods, and stored record counts
    Status,
    /// Create a new DID and persist its private key
    CreateDid {
        /// DID method to use
        #[arg(short, long, default_value = "key")]
        method: String,
        /// Key type for the new DID
        #[arg(short, long, default_value = "Ed25519")]
        key_type: String,
    },
    /// Fetch a stored DID document
    GetDid {
        #[arg(short, long, default_value = "key")]
        method: String,
        id: String,
    },
    /// List stored DID documents for a method
    ListDids {
        #[arg(short, long, default_value = "key")]
        method: String,
    },
    /// Resolve any DID of a supported method, stored or not
    ResolveDid { did: String },
    /// Delete a stored DID
    DeleteDid {
        #[arg(short, long, default_value = "key")]
        method: String,
        id: String,
    },
    /// List stored credential manifest ids
    ListManifests,
}

/// Storage backend chosen by configuration.
enum Backend {
    Sled(Arc<SledStorage>),
    Memory(Arc<MemoryStorage>),
}

impl Backend {
    fn open(config: &AppConfig) -> Result<Self> {
        match config.storage.backend {
            StorageBackend::Sled => {
                let path = &config.storage.path;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create storage directory {}", parent.display())
                    })?;
                }
                let db = SledStorage::new(path)
                    .with_context(|| format!("failed to open sled storage at {}", path.display()))?;
                info!(path = %path.display(), "opened sled storage");
                Ok(Backend::Sled(Arc::new(db)))
            }
            StorageBackend::Memory => {
                info!("using in-memory storage; nothing will be persisted");
                Ok(Backend::Memory(Arc::new(MemoryStorage::new())))
            }
        }
    }

    fn handle(&self) -> Arc<dyn ServiceStorage> {
        match self {
            Backend::Sled(db) => db.clone(),
            Backend::Memory(db) => db.clone(),
        }
    }

    fn flush(&self) -> Result<()> {
        if let Backend::Sled(db) = self {
            db.flush().context("failed to flush sled storage")?;
            debug!("flushed sled storage");
        }
        Ok(())
    }
}

struct Node {
    backend: Backend,
    router: DidRouter,
    manifests: ManifestStorage,
}

impl Node {
    fn open(config: &AppConfig) -> Result<Self> {
        let backend = Backend::open(config)?;
        let methods = config.did.methods().context("invalid did.methods")?;

        let did_service = DidService::new(&methods, backend.handle())
            .context("failed to build DID service")?;
        let service: Arc<dyn Service> = Arc::new(did_service);
        let router = DidRouter::new(Some(service)).context("failed to build DID router")?;
        let manifests = ManifestStorage::new(backend.handle());

        Ok(Self {
            backend,
            router,
            manifests,
        })
    }

    fn run(&self, command: Commands) -> Result<Value> {
        let output = match command {
            Commands::Status => {
                let methods: Vec<&str> = self
                    .router
                    .supported_methods()
                    .iter()
                    .map(|m| m.as_str())
                    .collect();
                json!({
                    "version": SSI_VERSION,
                    "commit": git_commit_hash(),
                    "status": self.router.status(),
                    "methods": methods,
                    "records": {
                        "manifests": self.manifests.get_manifests()?.len(),
                        "applications": self.manifests.get_applications()?.len(),
                        "responses": self.manifests.get_responses()?.len(),
                    },
                })
            }
            Commands::CreateDid { method, key_type } => {
                let created = self
                    .router
                    .create_did(&method, CreateDidRequest::new(key_type))?;
                info!(did = %created.did.id, "created DID");
                serde_json::to_value(created)?
            }
            Commands::GetDid { method, id } => serde_json::to_value(self.router.get_did(&method, &id)?)?,
            Commands::ListDids { method } => serde_json::to_value(self.router.get_dids(&method)?)?,
            Commands::ResolveDid { did } => serde_json::to_value(self.router.resolve_did(&did)?)?,
            Commands::DeleteDid { method, id } => {
                self.router.delete_did(&method, &id)?;
                json!({ "deleted": id })
            }
            Commands::ListManifests => {
                let ids: Vec<String> = self
                    .manifests
                    .get_manifests()?
                    .into_iter()
                    .map(|m| m.manifest.id)
                    .collect();
                json!({ "manifests": ids })
            }
        };
        Ok(output)
    }

    fn shutdown(&self) -> Result<()> {
        self.backend.flush()
    }
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // stdout carries command output, so logs go to stderr.
    match config.log_format {
        LogFormat::Plain => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config)?;

    info!(
        version = SSI_VERSION,
        commit = git_commit_hash(),
        backend = ?config.storage.backend,
        "starting ssi-node"
    );

    let node = Node::open(&config)?;
    let result = node.run(cli.command);
    node.shutdown()?;

    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}
