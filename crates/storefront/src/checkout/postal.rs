//! Postal-code lookup for address autofill.
//!
//! Given a 6-digit PIN code, the lookup service returns the post offices
//! registered under it; the first one's district/state pair prefills the
//! city and state fields. Any failure degrades to manual entry - the form
//! is never blocked on this service.

use serde::Deserialize;
use tracing::instrument;
use url::Url;

/// Errors that can occur during a postal lookup.
#[derive(Debug, thiserror::Error)]
pub enum PostalError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A resolved district/state pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    /// District, used as the city value.
    pub district: String,
    /// State name.
    pub state: String,
}

/// One entry of the lookup response array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PincodeEntry {
    status: String,
    #[serde(default)]
    post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostOffice {
    #[serde(default)]
    district: String,
    #[serde(default)]
    state: String,
}

/// Client for the postal-code lookup service.
#[derive(Debug, Clone)]
pub struct PostalClient {
    client: reqwest::Client,
    base_url: Url,
}

impl PostalClient {
    /// Create a new postal lookup client.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up the locality for a 6-digit PIN code.
    ///
    /// Returns `Ok(None)` when the service does not know the code (the
    /// customer fills city/state manually).
    ///
    /// # Errors
    ///
    /// Returns `PostalError` on transport or parse failures; callers treat
    /// this the same as an unknown code, with a different status message.
    #[instrument(skip(self))]
    pub async fn lookup(&self, pin_code: &str) -> Result<Option<Locality>, PostalError> {
        let url = format!(
            "{}/pincode/{pin_code}",
            self.base_url.as_str().trim_end_matches('/')
        );
        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let entries: Vec<PincodeEntry> =
            serde_json::from_str(&text).map_err(|e| PostalError::Parse(e.to_string()))?;
        Ok(resolve(entries))
    }
}

/// Pick the first post office of a successful first entry.
fn resolve(entries: Vec<PincodeEntry>) -> Option<Locality> {
    let first = entries.into_iter().next()?;
    if first.status != "Success" {
        return None;
    }
    let office = first.post_office?.into_iter().next()?;
    Some(Locality {
        district: office.district,
        state: office.state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(entries: &str) -> Option<Locality> {
        resolve(serde_json::from_str(entries).expect("fixture parses"))
    }

    #[test]
    fn test_successful_lookup_takes_first_office() {
        let fixture = r#"[{
            "Message": "Number of pincode(s) found:1",
            "Status": "Success",
            "PostOffice": [
                {"Name": "Fort", "District": "Mumbai", "State": "Maharashtra", "Country": "India"},
                {"Name": "Colaba", "District": "Mumbai City", "State": "Maharashtra"}
            ]
        }]"#;
        assert_eq!(
            parse(fixture),
            Some(Locality {
                district: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_pin_yields_none() {
        let fixture = r#"[{"Message": "No records found", "Status": "Error", "PostOffice": null}]"#;
        assert_eq!(parse(fixture), None);
    }

    #[test]
    fn test_empty_office_list_yields_none() {
        let fixture = r#"[{"Status": "Success", "PostOffice": []}]"#;
        assert_eq!(parse(fixture), None);
    }

    #[test]
    fn test_empty_response_yields_none() {
        assert_eq!(parse("[]"), None);
    }
}
