use super::client::ApiClient;
use super::models::Organization;
use crate::{Error, Result};

impl ApiClient {
    /// Search the organization registry by name
    pub async fn search_organizations(&self, query: &str) -> Result<Vec<Organization>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint("organizations/search")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_json(url).await
    }

    /// Look up one organization; `None` when the registry has no such number
    pub async fn organization(&self, org_number: &str) -> Result<Option<Organization>> {
        let number = normalize_org_number(org_number)?;
        let url = self.endpoint(&format!("organizations/{number}"))?;
        match self.get_json(url).await {
            Ok(org) => Ok(Some(org)),
            Err(Error::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Strip spaces and dashes; the remainder must be nine digits
pub fn normalize_org_number(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Other(format!(
            "Invalid organization number '{}': expected 9 digits",
            raw
        )));
    }
    Ok(digits)
}
