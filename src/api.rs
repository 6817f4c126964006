// API client module: contains a small blocking HTTP client that talks to a
// deposition-hosting service (a Zenodo-style API). Two calls, always in this
// order: push a local file's bytes into a storage bucket, then create a
// deposition record carrying the metadata. There are no retries; a failed
// call surfaces its status and response text and aborts the run.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::Config;

/// Blocking client holding the deposition API base URL and the access
/// token. The token authorizes every call as an `access_token` query
/// parameter, which is how the deposition API expects it.
#[derive(Clone)]
pub struct DepositionClient {
    client: Client,
    base_url: String,
    token: String,
}

/// One author of the deposit. `name` follows the service's
/// "Family, Given" convention.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Creator {
    pub name: String,
    pub affiliation: String,
}

/// Metadata describing one deposit. Built once and sent as a single request
/// body, wrapped in `{"metadata": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DepositMetadata {
    pub title: String,
    pub upload_type: String,
    pub description: String,
    pub creators: Vec<Creator>,
}

/// Request wrapper matching the shape the depositions endpoint expects.
#[derive(Serialize, Debug)]
struct NewDeposition<'a> {
    metadata: &'a DepositMetadata,
}

/// Response from the bucket endpoint. We keep `id` as a serde_json::Value
/// because it is not used further and instances disagree on its type.
#[derive(Deserialize, Debug)]
pub struct BucketFile {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default, alias = "key")]
    pub filename: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Response from the depositions endpoint. The backend returns the id as an
/// int but keeping it flexible avoids parsing issues across instances.
#[derive(Deserialize, Debug)]
pub struct Deposition {
    pub id: serde_json::Value,
    #[serde(default)]
    pub state: Option<String>,
}

impl DepositionClient {
    /// Build a client from an already-resolved configuration. The token and
    /// URLs come in explicitly; nothing here reads the environment.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(DepositionClient {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Upload one local file into a storage bucket by POSTing its raw bytes
    /// to `{bucket_url}/{filename}`. The file is read in binary mode and the
    /// bytes go out unchanged. Returns the parsed JSON response.
    pub fn upload_file(&self, bucket_url: &str, path: &Path) -> Result<BucketFile> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .with_context(|| format!("No usable file name in path {}", path.display()))?;
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        let url = format!("{}/{}", bucket_url.trim_end_matches('/'), file_name);
        let res = self
            .client
            .post(&url)
            .query(&[("access_token", self.token.as_str())])
            .body(bytes)
            .send()
            .context("Failed to send upload request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Upload failed: {} - {}", status, txt);
        }
        let file: BucketFile = res.json().context("Parsing bucket response json")?;
        Ok(file)
    }

    /// Create a new deposition record carrying `metadata` by POSTing
    /// `{"metadata": {...}}` with a JSON content type. The previously
    /// uploaded file is not linked to the record here; the service keeps
    /// both independently.
    pub fn create_deposition(&self, metadata: &DepositMetadata) -> Result<Deposition> {
        let url = format!("{}/api/deposit/depositions", &self.base_url);
        let res = self
            .client
            .post(&url)
            .query(&[("access_token", self.token.as_str())])
            .json(&NewDeposition { metadata })
            .send()
            .context("Failed to send deposition request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Creating deposition failed: {} - {}", status, txt);
        }
        let deposition: Deposition = res.json().context("Parsing deposition response json")?;
        Ok(deposition)
    }
}
