//! Company contact lookup via the Hunter.io domain-search API.
//!
//! Transport and response-shape problems are folded into
//! `ContactLookup::Unavailable` so the pipeline can still show the user why
//! no contacts were found. Only a missing API key is a hard error.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const HUNTER_API_URL: &str = "https://api.hunter.io";
const DOMAIN_SEARCH_PATH: &str = "/v2/domain-search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Hunter.io API key not found. Please set HUNTER_API_KEY as an environment variable.")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result of a company contact lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactLookup {
    Found { emails: Vec<String>, domain: String },
    Unavailable { error: String },
}

impl ContactLookup {
    pub fn emails(&self) -> &[String] {
        match self {
            Self::Found { emails, .. } => emails,
            Self::Unavailable { .. } => &[],
        }
    }
}

#[derive(Clone)]
pub struct HunterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl HunterClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Result<Self, ContactError> {
        Self::with_timeout(api_key, base_url, REQUEST_TIMEOUT)
    }

    fn with_timeout(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ContactError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks up the company's domain and any public email addresses.
    pub async fn find_company_contacts(
        &self,
        company_name: &str,
    ) -> Result<ContactLookup, ContactError> {
        let api_key = self.api_key.as_deref().ok_or(ContactError::MissingApiKey)?;
        let url = format!("{}{DOMAIN_SEARCH_PATH}", self.base_url);

        debug!("Hunter domain search for company '{company_name}'");

        let response = self
            .client
            .get(&url)
            .query(&[("company", company_name), ("api_key", api_key)])
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match response {
            Ok(r) => r.json::<Value>().await,
            Err(e) => return Ok(unavailable_from_transport(e)),
        };

        let lookup = match body {
            Ok(body) => parse_domain_search(&body),
            Err(e) => unavailable_from_transport(e),
        };

        if let ContactLookup::Unavailable { error } = &lookup {
            warn!("Contact lookup for '{company_name}' came back empty: {error}");
        }
        Ok(lookup)
    }
}

/// Interprets a domain-search response body.
fn parse_domain_search(body: &Value) -> ContactLookup {
    if !body.is_object() {
        return ContactLookup::Unavailable {
            error: "Invalid API response format.".to_string(),
        };
    }

    let data = body.get("data");
    let domain = data
        .and_then(|d| d.get("domain"))
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty());

    match domain {
        Some(domain) => {
            let emails = data
                .and_then(|d| d.get("emails"))
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(|e| e.get("value").and_then(Value::as_str))
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();
            ContactLookup::Found {
                emails,
                domain: domain.to_string(),
            }
        }
        None => ContactLookup::Unavailable {
            error: "Organization details not found!".to_string(),
        },
    }
}

fn unavailable_from_transport(e: reqwest::Error) -> ContactLookup {
    let error = if e.is_timeout() {
        "Request timed out. Please try again later.".to_string()
    } else if let Some(status) = e.status() {
        format!("HTTP error occurred: {status}")
    } else if e.is_connect() {
        "Network connection error. Please check your internet connection.".to_string()
    } else if e.is_decode() {
        "Invalid API response format.".to_string()
    } else {
        format!("Request failed: {e}")
    };
    ContactLookup::Unavailable { error }
}
