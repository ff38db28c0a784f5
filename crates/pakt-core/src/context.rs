use pakt_config::{AppPaths, Config};
use pakt_error::Result;
use pakt_registry::PackageRegistry;
use pakt_repository::RepositoryStore;
use pakt_shim::ShimManager;
use pakt_store::{DownloadCache, PackageStore};
use pakt_transport::{HttpTransport, Transport};

/// Everything one command invocation works with: where state lives, the
/// loaded configuration and the network transport. Managers borrow it instead
/// of reaching for globals.
pub struct Context {
    pub paths: AppPaths,
    pub config: Config,
    transport: Box<dyn Transport>,
}

impl Context {
    #[must_use]
    pub fn new(paths: AppPaths, config: Config, transport: Box<dyn Transport>) -> Self {
        Self {
            paths,
            config,
            transport,
        }
    }

    /// Creates the state directories and default config if needed, then loads
    /// the config and builds an HTTP transport with its timeout.
    pub fn load(paths: AppPaths) -> Result<Self> {
        paths.ensure_directories()?;
        let config = Config::load_or_create(&paths.config_file)?;
        let transport = Box::new(HttpTransport::new(config.settings.download_timeout));
        Ok(Self::new(paths, config, transport))
    }

    pub fn from_env() -> Result<Self> {
        Self::load(AppPaths::from_env()?)
    }

    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.paths.config_file)
    }

    #[must_use]
    pub fn registry(&self) -> PackageRegistry {
        PackageRegistry::new(&self.paths.registry_file)
    }

    #[must_use]
    pub fn repositories(&self) -> RepositoryStore {
        RepositoryStore::open(&self.config, &self.paths.repos_dir)
    }

    #[must_use]
    pub fn packages(&self) -> PackageStore {
        PackageStore::new(&self.paths.install_dir)
    }

    #[must_use]
    pub fn cache(&self) -> DownloadCache {
        DownloadCache::new(&self.paths.cache_dir)
    }

    #[must_use]
    pub fn shims(&self) -> ShimManager {
        ShimManager::new(&self.paths.shims_dir)
    }
}
