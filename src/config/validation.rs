//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check cross-field constraints (upstream deadline < request deadline)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("upstream.address must not be empty")]
    EmptyUpstreamAddress,

    #[error("upstream.path_prefix '{0}' must start with '/'")]
    PrefixMissingSlash(String),

    #[error("upstream.timeout_secs ({upstream}) must be less than listener.request_timeout_secs ({request})")]
    UpstreamTimeoutTooLarge { upstream: u64, request: u64 },

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroUpstreamTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.upstream.address.is_empty() {
        errors.push(ValidationError::EmptyUpstreamAddress);
    }
    if !config.upstream.path_prefix.starts_with('/') {
        errors.push(ValidationError::PrefixMissingSlash(
            config.upstream.path_prefix.clone(),
        ));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroUpstreamTimeout);
    } else if config.upstream.timeout_secs >= config.listener.request_timeout_secs
        && config.listener.request_timeout_secs > 0
    {
        errors.push(ValidationError::UpstreamTimeoutTooLarge {
            upstream: config.upstream.timeout_secs,
            request: config.listener.request_timeout_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
