//! Configuration for discovery and rewriting.
//!
//! Every value has a default, so the tool runs without any config file.
//! CLI flags are applied on top of whatever is loaded here.

mod core;
mod loader;

pub use self::core::{
    default_block_lookahead, default_indent_unit, default_route_file, default_routes_dir,
    DiscoveryConfig, MigrateConfig, RewriteConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
