//! Text sources for the character database

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where to read database text from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// Remote text fetched over HTTP(S)
    Url(String),
    /// Local file
    File(PathBuf),
}

impl TextSource {
    /// Interpret a command-line argument: `http://` and `https://` are URLs,
    /// anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            TextSource::Url(arg.to_string())
        } else {
            TextSource::File(PathBuf::from(arg))
        }
    }

    /// Read the full text of this source
    pub fn load(&self) -> Result<String> {
        match self {
            TextSource::Url(url) => fetch_url(url),
            TextSource::File(path) => fs::read_to_string(path).map_err(|e| Error::FileRead {
                path: path.clone(),
                source: e,
            }),
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Url(url) => write!(f, "{}", url),
            TextSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str) -> Result<String> {
    let fetch_err = |message: String| Error::Fetch {
        url: url.to_string(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("HTTP {}", status)));
    }

    response.text().map_err(|e| fetch_err(e.to_string()))
}

/// Try each source in order and return the first that loads
pub fn load_first(sources: &[TextSource]) -> Result<(TextSource, String)> {
    for source in sources {
        match source.load() {
            Ok(text) => {
                debug!(source = %source, bytes = text.len(), "loaded text source");
                return Ok((source.clone(), text));
            }
            Err(e) => warn!(source = %source, error = %e, "text source failed, trying next"),
        }
    }

    Err(Error::NoSource)
}
