// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External veterinarian search URL builder

use url::Url;

const MAPS_SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/";

/// Build the external maps search URL for finding a veterinarian.
/// Defaults to a nearby search when no query or location is given.
pub fn build_vet_search_url(query: Option<&str>, location: Option<&str>) -> Url {
    let mut terms = query.unwrap_or("veterinario").trim().to_string();
    match location {
        Some(location) if !location.trim().is_empty() => {
            terms.push(' ');
            terms.push_str(location.trim());
        }
        _ => terms.push_str(" vicino a me"),
    }

    // The endpoint is a constant and the query is percent-encoded, so
    // parsing cannot fail
    Url::parse_with_params(MAPS_SEARCH_ENDPOINT, &[("api", "1"), ("query", terms.as_str())])
        .expect("static endpoint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_nearby_search() {
        let url = build_vet_search_url(None, None);
        assert!(url.as_str().starts_with(MAPS_SEARCH_ENDPOINT));
        assert!(url.as_str().contains("veterinario"));
        assert!(url.as_str().contains("vicino"));
    }

    #[test]
    fn test_location_overrides_nearby() {
        let url = build_vet_search_url(Some("pronto soccorso veterinario"), Some("Milano"));
        assert!(url.as_str().contains("Milano"));
        assert!(!url.as_str().contains("vicino"));
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let url = build_vet_search_url(Some("veterinario h24"), None);
        assert!(!url.as_str().contains(' '));
    }
}
