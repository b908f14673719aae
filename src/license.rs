//! License text lookup for the generated LICENSE file.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::time::Duration;

const SPDX_TEXT_URL: &str = "https://raw.githubusercontent.com/spdx/license-list-data/main/text";

/// Resolves a license identifier to its full text.
pub trait LicenseLookup {
    fn license_text(&self, id: &str) -> Result<String>;
}

/// Fetches license texts from the SPDX license list.
pub struct SpdxLicenseLookup {
    client: reqwest::blocking::Client,
}

impl SpdxLicenseLookup {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("credlify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::LicenseError(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Accepts SPDX style identifiers such as `MIT` or `GPL-3.0-or-later`.
pub fn is_valid_license_id(id: &str) -> bool {
    !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}

impl LicenseLookup for SpdxLicenseLookup {
    fn license_text(&self, id: &str) -> Result<String> {
        if !is_valid_license_id(id) {
            return Err(Error::LicenseError(format!("'{}' is not a license identifier", id)));
        }

        let url = format!("{}/{}.txt", SPDX_TEXT_URL, id);
        debug!("Fetching license text from {}", url);

        self.client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| Error::LicenseError(e.to_string()))
    }
}

/// Lookup used with `--offline`; never finds anything.
pub struct OfflineLicenseLookup;

impl LicenseLookup for OfflineLicenseLookup {
    fn license_text(&self, id: &str) -> Result<String> {
        Err(Error::LicenseError(format!("offline, cannot fetch '{}'", id)))
    }
}

/// Returns the license text for `id`, or an empty string.
///
/// No identifier yields an empty text silently; a failed lookup yields an
/// empty text and a warning.
pub fn resolve_license_text(lookup: &dyn LicenseLookup, id: &str) -> String {
    if id.trim().is_empty() {
        return String::new();
    }

    match lookup.license_text(id.trim()) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(_) => {
            warn!(
                "No valid license text found for '{}'; an empty license file was generated. \
                 See https://spdx.org/licenses/",
                id
            );
            String::new()
        }
    }
}
