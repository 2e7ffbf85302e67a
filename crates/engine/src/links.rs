//! Hypermedia link generation
//!
//! Generated relations (`self`, `parent`, `collection`, `root`, `items`)
//! are rebuilt from the configured base URL on every write; any submitted
//! link with one of those relations is replaced. Other links are kept,
//! with relative hrefs resolved against the base URL.

use geocatalog_core::{Error, Link, Result};
use url::Url;

const GEOJSON: &str = "application/geo+json";
const JSON: &str = "application/json";

/// Relations owned by the catalog
const GENERATED_RELS: &[&str] = &["self", "parent", "collection", "root", "items"];

/// Builds catalog links below one base URL
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// Create a builder for `base`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `base` cannot act as a base URL.
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(Error::invalid_input(format!(
                "'{}' cannot be a base URL",
                base
            )));
        }
        let mut base = base;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Base URL, always ending in `/`
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Links of an item: `self`, `parent`, `collection`, `root`
    pub fn item_links(&self, item_id: &str, collection_id: &str) -> Result<Vec<Link>> {
        let collection = self.join(&format!("collections/{}", collection_id))?;
        Ok(vec![
            Link::new(
                "self",
                self.join(&format!("collections/{}/items/{}", collection_id, item_id))?,
            )
            .with_media_type(GEOJSON),
            Link::new("parent", collection.clone()).with_media_type(JSON),
            Link::new("collection", collection).with_media_type(JSON),
            Link::new("root", self.base.to_string()).with_media_type(JSON),
        ])
    }

    /// Links of a collection: `self`, `parent`, `items`, `root`
    pub fn collection_links(&self, collection_id: &str) -> Result<Vec<Link>> {
        Ok(vec![
            Link::new("self", self.join(&format!("collections/{}", collection_id))?)
                .with_media_type(JSON),
            Link::new("parent", self.base.to_string()).with_media_type(JSON),
            Link::new(
                "items",
                self.join(&format!("collections/{}/items", collection_id))?,
            )
            .with_media_type(GEOJSON),
            Link::new("root", self.base.to_string()).with_media_type(JSON),
        ])
    }

    /// Replace generated links in `submitted` with `generated`
    ///
    /// Kept links come first, in submitted order, followed by the generated
    /// ones.
    pub fn merge(&self, submitted: &[Link], generated: Vec<Link>) -> Vec<Link> {
        let mut links: Vec<Link> = submitted
            .iter()
            .filter(|l| !GENERATED_RELS.contains(&l.rel.as_str()))
            .map(|l| self.resolve(l))
            .collect();
        links.extend(generated);
        links
    }

    fn resolve(&self, link: &Link) -> Link {
        match self.base.join(&link.href) {
            Ok(url) => Link {
                href: url.to_string(),
                ..link.clone()
            },
            Err(_) => link.clone(),
        }
    }

    fn join(&self, path: &str) -> Result<String> {
        self.base
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| Error::invalid_input(format!("cannot build link '{}': {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LinkBuilder {
        LinkBuilder::new(Url::parse("http://localhost:8080/").unwrap()).unwrap()
    }

    fn href<'a>(links: &'a [Link], rel: &str) -> &'a str {
        links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
            .unwrap()
    }

    #[test]
    fn test_item_links() {
        let links = builder().item_links("i1", "c1").unwrap();
        assert_eq!(links.len(), 4);
        assert_eq!(href(&links, "self"), "http://localhost:8080/collections/c1/items/i1");
        assert_eq!(href(&links, "parent"), "http://localhost:8080/collections/c1");
        assert_eq!(href(&links, "collection"), "http://localhost:8080/collections/c1");
        assert_eq!(href(&links, "root"), "http://localhost:8080/");
    }

    #[test]
    fn test_collection_links() {
        let links = builder().collection_links("c1").unwrap();
        assert_eq!(href(&links, "self"), "http://localhost:8080/collections/c1");
        assert_eq!(href(&links, "items"), "http://localhost:8080/collections/c1/items");
        assert_eq!(href(&links, "parent"), "http://localhost:8080/");
    }

    #[test]
    fn test_base_with_path_prefix() {
        let b = LinkBuilder::new(Url::parse("https://example.com/stac").unwrap()).unwrap();
        assert_eq!(b.base().as_str(), "https://example.com/stac/");
        let links = b.collection_links("c1").unwrap();
        assert_eq!(href(&links, "self"), "https://example.com/stac/collections/c1");
    }

    #[test]
    fn test_merge_replaces_generated_and_resolves_relative() {
        let b = builder();
        let submitted = vec![
            Link::new("self", "http://elsewhere/old"),
            Link::new("license", "docs/license.html"),
            Link::new("alternate", "https://mirror.example.com/i1"),
        ];
        let merged = b.merge(&submitted, b.item_links("i1", "c1").unwrap());

        assert_eq!(merged.len(), 6);
        assert_eq!(merged[0].href, "http://localhost:8080/docs/license.html");
        assert_eq!(merged[1].href, "https://mirror.example.com/i1");
        assert_eq!(
            href(&merged, "self"),
            "http://localhost:8080/collections/c1/items/i1"
        );
        assert_eq!(merged.iter().filter(|l| l.rel == "self").count(), 1);
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(LinkBuilder::new(Url::parse("mailto:someone@example.com").unwrap()).is_err());
    }
}
