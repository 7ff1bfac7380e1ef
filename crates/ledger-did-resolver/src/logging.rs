//! Tracing setup for processes embedding the resolver.

use std::env;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    Registry, layer::SubscriberExt, reload, reload::Handle, util::SubscriberInitExt,
};

use crate::errors::ResolverError;

/// Install a global subscriber with a reloadable level filter.
///
/// The returned handle is what [`crate::config::init`] uses to apply the configured
/// `log_level`. ANSI colours are only used when `LOCAL` is set.
pub fn init_logging(level: LevelFilter) -> Result<Handle<LevelFilter, Registry>, ResolverError> {
    let (filter, reload_handle) = reload::Layer::new(level);
    let ansi = env::var("LOCAL").is_ok();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(ansi))
        .try_init()
        .map_err(|err| ResolverError::Config(format!("Could not initialise logging: {err}")))?;

    Ok(reload_handle)
}

/// Default level used before any configuration is read
pub fn default_level() -> LevelFilter {
    LevelFilter::INFO
}
