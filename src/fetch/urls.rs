// src/fetch/urls.rs
//! URL construction for the paginated station listing.

use url::Url;

/// The listing endpoint on the Ministry of Health site.
static LISTING_URL: &str =
    "http://www.health.gov.il/Subjects/vaccines/two_drops/Pages/Vaccination_centers.aspx";

/// Build the listing URL for one page of the crawl.
pub fn listing_page_url(page: u32) -> Url {
    let mut url = Url::parse(LISTING_URL).expect("listing URL should be valid");
    url.query_pairs_mut()
        .append_pair("WPID", "WPQ8")
        .append_pair("PN", &page.to_string());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_the_page_number() {
        let url = listing_page_url(67);
        assert_eq!(url.query(), Some("WPID=WPQ8&PN=67"));
        assert!(url.as_str().starts_with("http://www.health.gov.il/"));
    }
}
