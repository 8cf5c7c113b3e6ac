use crate::config::types::{Config, CrawlerConfig, EndpointConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_keywords(&config.keywords)?;
    validate_crawler_config(&config.crawler)?;
    validate_endpoint_config(&config.endpoints)?;
    Ok(())
}

/// Validates the keyword list
fn validate_keywords(keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Validation(
            "at least one keyword is required".to_string(),
        ));
    }

    for keyword in keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keywords must not be empty or whitespace".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_request_errors < 1 {
        return Err(ConfigError::Validation(format!(
            "max_request_errors must be >= 1, got {}",
            config.max_request_errors
        )));
    }

    Ok(())
}

/// Validates endpoint templates
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    if !config.search_url.contains("{keyword}") {
        return Err(ConfigError::Validation(
            "search_url must contain the {keyword} placeholder".to_string(),
        ));
    }

    // The template itself must be a fetchable URL once the placeholder is
    // substituted
    let probe = config.search_url.replace("{keyword}", "probe");
    Url::parse(&probe).map_err(|_| ConfigError::InvalidUrl(config.search_url.clone()))?;

    Url::parse(&config.detail_url_prefix)
        .map_err(|_| ConfigError::InvalidUrl(config.detail_url_prefix.clone()))?;

    if !config.listing_path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "listing_path_prefix must start with '/', got '{}'",
            config.listing_path_prefix
        )));
    }

    if !config.next_page_payload.contains("{token}") {
        return Err(ConfigError::Validation(
            "next_page_payload must contain the {token} placeholder".to_string(),
        ));
    }

    if config.accept_language.is_empty() {
        return Err(ConfigError::Validation(
            "accept_language cannot be empty".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
