use crate::config::DiscoveryConfig;
use crate::errors::MigrateError;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Enumerates route handler files below dynamic route segments.
pub struct RouteWalker {
    root: PathBuf,
    routes_dir: PathBuf,
    route_file: String,
    ignore_patterns: Vec<glob::Pattern>,
}

impl RouteWalker {
    pub fn new(root: PathBuf) -> Self {
        let defaults = DiscoveryConfig::default();
        Self {
            root,
            routes_dir: defaults.routes_dir,
            route_file: defaults.route_file,
            ignore_patterns: vec![],
        }
    }

    pub fn with_routes_dir(mut self, routes_dir: PathBuf) -> Self {
        self.routes_dir = routes_dir;
        self
    }

    pub fn with_route_file(mut self, route_file: String) -> Self {
        self.route_file = route_file;
        self
    }

    /// Invalid patterns are logged and dropped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring invalid ignore pattern {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();
        self
    }

    /// Directory the walk starts from.
    pub fn base(&self) -> PathBuf {
        self.root.join(&self.routes_dir)
    }

    /// Returns candidate files sorted by path.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::Discovery` when the routes directory is
    /// missing, is not a directory, or any part of it cannot be read.
    pub fn walk(&self) -> Result<Vec<PathBuf>, MigrateError> {
        let base = self.base();
        let metadata = fs::metadata(&base).map_err(|e| MigrateError::discovery(&base, e))?;
        if !metadata.is_dir() {
            return Err(MigrateError::discovery(
                &base,
                io::Error::other("not a directory"),
            ));
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&base)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                let source = e.into_io_error().unwrap_or_else(|| io::Error::other(message));
                MigrateError::discovery(&base, source)
            })?;
            let path = entry.path();

            if entry.file_type().is_some_and(|t| t.is_file()) && self.should_process(&base, path)
            {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        log::debug!("Found {} route file(s) under {}", files.len(), base.display());
        Ok(files)
    }

    fn should_process(&self, base: &Path, path: &Path) -> bool {
        if path.file_name().and_then(|n| n.to_str()) != Some(self.route_file.as_str()) {
            return false;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            return false;
        };
        let under_dynamic_segment = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|component| match component {
                Component::Normal(name) => name.to_str().is_some_and(is_dynamic_segment),
                _ => false,
            });
        if !under_dynamic_segment {
            return false;
        }

        let from_root = path.strip_prefix(&self.root).unwrap_or(path);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(from_root))
    }
}

/// `[id]`, `[...slug]` and `[[...slug]]` style directory names.
pub fn is_dynamic_segment(name: &str) -> bool {
    name.len() > 2 && name.starts_with('[') && name.ends_with(']')
}

pub fn find_route_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>, MigrateError> {
    RouteWalker::new(root.to_path_buf())
        .with_routes_dir(config.routes_dir.clone())
        .with_route_file(config.route_file.clone())
        .with_ignore_patterns(&config.ignore)
        .walk()
}
