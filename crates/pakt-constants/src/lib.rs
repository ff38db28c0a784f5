pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "A small local package manager with repository manifests and command shims";
pub const REPOSITORY_URL: &str = "https://github.com/pakt-pm/pakt";
pub const BIN_NAME: &str = "pakt";
pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    (
        "install",
        "Installs a package and its dependencies",
        &["i", "add"],
    ),
    ("uninstall", "Uninstalls a package", &["rm", "remove"]),
    (
        "list",
        "Lists installed packages (or repositories with --repo)",
        &["ls"],
    ),
    (
        "search",
        "Searches package names and descriptions",
        &["s"],
    ),
    (
        "update",
        "Refreshes repositories and reports updates, or updates one package",
        &["up", "upgrade"],
    ),
    ("repo", "Manages repositories (add, list, remove)", &[]),
    ("cleanup", "Deletes downloaded archives from the cache", &["clean"]),
    (
        "help",
        "Shows help information for pakt or a specific command",
        &[],
    ),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("pakt update", "Refresh repositories and list available updates"),
    ("pakt install ripgrep", "Install a package"),
    ("pakt install python --repo main", "Install from a specific repository"),
    ("pakt search py", "Search for packages"),
    ("pakt uninstall ripgrep", "Uninstall a package"),
    ("pakt repo add tools https://example.com/tools/", "Add a repository"),
    ("pakt cleanup", "Clear the download cache"),
];

pub const USER_AGENT: &str = concat!("pakt/", env!("CARGO_PKG_VERSION"));
pub const MAX_ATTEMPTS: u32 = 3;
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

pub const HOME_ENV_VAR: &str = "PAKT_HOME";
pub const APP_DIR_NAME: &str = "pakt";
pub const CONFIG_FILE: &str = "config.json";
pub const REGISTRY_FILE: &str = "packages.json";
pub const MANIFEST_FILE: &str = "repository.json";
pub const CACHE_DIR: &str = "cache";
pub const REPOSITORIES_DIR: &str = "repositories";
pub const PACKAGES_DIR: &str = "packages";
pub const SHIMS_DIR: &str = "shims";

pub const DEFAULT_PACKAGE_VERSION: &str = "1.0.0";
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "zip";
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PARALLEL_DOWNLOADS: u32 = 3;
pub const DEFAULT_REPOSITORIES: &[(&str, &str, u32)] = &[
    (
        "main",
        "https://raw.githubusercontent.com/pakt-pm/pakt-main/main/",
        1,
    ),
    (
        "extras",
        "https://raw.githubusercontent.com/pakt-pm/pakt-extras/main/",
        2,
    ),
];
