use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure, read from `.params-migrate.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MigrateConfig {
    /// Where route files are looked for
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// How signatures are rewritten and statements injected
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Routing source subtree, relative to the project root
    #[serde(default = "default_routes_dir")]
    pub routes_dir: PathBuf,

    /// File name of route handler modules
    #[serde(default = "default_route_file")]
    pub route_file: String,

    /// Glob patterns of paths to leave alone
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            route_file: default_route_file(),
            ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteConfig {
    /// Lines after a declaration searched for the opening `try {`
    #[serde(default = "default_block_lookahead")]
    pub block_lookahead: usize,

    /// Added to the `try {` line's indentation for the injected statement
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            block_lookahead: default_block_lookahead(),
            indent_unit: default_indent_unit(),
        }
    }
}

impl RewriteConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.block_lookahead == 0 {
            return Err("rewrite.block_lookahead must be at least 1".to_string());
        }
        if !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Err("rewrite.indent_unit may only contain spaces and tabs".to_string());
        }
        Ok(())
    }
}

pub fn default_routes_dir() -> PathBuf {
    PathBuf::from("app/api")
}

pub fn default_route_file() -> String {
    "route.ts".to_string()
}

pub fn default_block_lookahead() -> usize {
    3
}

pub fn default_indent_unit() -> String {
    "  ".to_string()
}
