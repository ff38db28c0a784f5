//! In-memory network and throwaway state directories for manager tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pakt_config::{AppPaths, Config, RepositoryConfig};
use pakt_error::{PackageManagerError, Result};
use pakt_transport::{ProgressFn, Transport};
use zip::write::SimpleFileOptions;

use crate::context::Context;

/// Serves fixed manifests and archive bytes, recording every download.
struct FixtureTransport {
    pages: HashMap<String, String>,
    archives: HashMap<String, Vec<u8>>,
    downloads: Rc<RefCell<Vec<String>>>,
}

impl Transport for FixtureTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PackageManagerError::NetworkError(format!("HTTP 404 for {url}")))
    }

    fn download(&self, url: &str, dest: &Path, progress: &mut ProgressFn<'_>) -> Result<u64> {
        self.downloads.borrow_mut().push(url.to_string());
        let bytes = self.archives.get(url).ok_or_else(|| {
            PackageManagerError::DownloadFailed(url.to_string(), "HTTP 404".to_string())
        })?;
        fs::write(dest, bytes)?;
        let len = bytes.len() as u64;
        progress(len, Some(len));
        Ok(len)
    }
}

pub struct FixtureBuilder {
    repositories: Vec<(String, u32, Option<String>)>,
    pages: HashMap<String, String>,
    archives: HashMap<String, Vec<u8>>,
    auto_update: bool,
}

impl FixtureBuilder {
    /// Adds a repository at `https://<name>.example/`, optionally with an
    /// already cached manifest.
    pub fn repository(mut self, name: &str, priority: u32, manifest: Option<&str>) -> Self {
        self.repositories
            .push((name.to_string(), priority, manifest.map(str::to_string)));
        self
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn archive(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), bytes);
        self
    }

    pub const fn auto_update(mut self, enabled: bool) -> Self {
        self.auto_update = enabled;
        self
    }

    pub fn build(self) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(&dir.path().join("pakt"));
        paths.ensure_directories().unwrap();

        let mut config = Config::default();
        config.repositories.clear();
        config.settings.auto_update_repos = self.auto_update;
        for (name, priority, manifest) in &self.repositories {
            config.repositories.insert(
                name.clone(),
                RepositoryConfig {
                    url: format!("https://{name}.example/"),
                    priority: *priority,
                },
            );
            if let Some(body) = manifest {
                fs::write(paths.manifest_file(name), body).unwrap();
            }
        }
        config.save(&paths.config_file).unwrap();

        let downloads = Rc::new(RefCell::new(Vec::new()));
        let transport = FixtureTransport {
            pages: self.pages,
            archives: self.archives,
            downloads: Rc::clone(&downloads),
        };

        Fixture {
            ctx: Context::new(paths, config, Box::new(transport)),
            downloads,
            _dir: dir,
        }
    }
}

pub struct Fixture {
    pub ctx: Context,
    downloads: Rc<RefCell<Vec<String>>>,
    _dir: tempfile::TempDir,
}

impl Fixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder {
            repositories: Vec::new(),
            pages: HashMap::new(),
            archives: HashMap::new(),
            auto_update: false,
        }
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.borrow().clone()
    }

    /// Every path under the data root with the contents of each file.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        let mut entries = BTreeMap::new();
        walk(&self.ctx.paths.root, &mut entries);
        entries
    }
}

fn walk(dir: &Path, entries: &mut BTreeMap<PathBuf, Option<Vec<u8>>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            entries.insert(path.clone(), None);
            walk(&path, entries);
        } else {
            entries.insert(path.clone(), Some(fs::read(&path).unwrap()));
        }
    }
}

/// A zip holding an executable named `name` and a readme.
pub fn package_zip(name: &str) -> Vec<u8> {
    package_zip_with(name, &format!("#!/bin/sh\necho {name}\n"))
}

pub fn package_zip_with(name: &str, script: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file(name, options).unwrap();
    writer.write_all(script.as_bytes()).unwrap();
    writer.start_file("README.txt", options).unwrap();
    writer.write_all(name.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
