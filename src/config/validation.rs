//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{IdBotError, Result};
use super::settings::POLLING_TIMEOUT_SECONDS;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;
    validate_broadcast_config(&settings.broadcast)?;
    validate_lookup_config(&settings.lookup)?;
    validate_converter_config(&settings.converter)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(IdBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.operator_id == 0 {
        return Err(IdBotError::Config(
            "Operator ID must be configured".to_string()
        ));
    }

    if config.request_timeout_seconds <= POLLING_TIMEOUT_SECONDS {
        return Err(IdBotError::Config(format!(
            "Request timeout must be greater than the {}s polling timeout",
            POLLING_TIMEOUT_SECONDS
        )));
    }

    Ok(())
}

/// Validate registry storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.registry_path.trim().is_empty() {
        return Err(IdBotError::Config(
            "Registry path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate broadcast configuration
fn validate_broadcast_config(config: &super::BroadcastConfig) -> Result<()> {
    if config.relay_timeout_seconds == 0 {
        return Err(IdBotError::Config(
            "Relay timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate lookup configuration
fn validate_lookup_config(config: &super::LookupConfig) -> Result<()> {
    if config.timeout_seconds == 0 {
        return Err(IdBotError::Config(
            "Lookup timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate converter configuration
fn validate_converter_config(config: &super::ConverterConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.ffmpeg_path.is_empty() {
        return Err(IdBotError::Config(
            "ffmpeg path is required when conversion is enabled".to_string()
        ));
    }

    if config.max_file_size_bytes == 0 {
        return Err(IdBotError::Config(
            "Maximum file size must be greater than 0".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(IdBotError::Config(
            "Conversion timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(IdBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(IdBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
