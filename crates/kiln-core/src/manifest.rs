use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, info, trace};

use crate::{
    document::Scanner,
    error::Error,
    repository::release_index::{ReleaseIndex, ReleaseIndexEntry, ReleaseKind},
};

/// Fetches the release index and sorts its entries into buckets.
#[derive(Debug, Clone)]
pub struct ManifestClient {
    client: Client,
    url: String,
    timeout: Duration,
    scanner: Scanner,
}

impl ManifestClient {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration, scanner: Scanner) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
            scanner,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the index and builds a fresh [`ReleaseIndex`] from it.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_index(&self) -> Result<ReleaseIndex, Error> {
        let body = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|err| Error::network(&self.url, err))?
            .text()
            .await
            .map_err(|err| Error::network(&self.url, err))?;

        let index = parse_index(self.scanner, &body);

        info!(
            "Release index has {} entries (latest release: {:?}, latest snapshot: {:?})",
            index.len(),
            index.latest_release,
            index.latest_snapshot
        );

        Ok(index)
    }
}

/// Builds a [`ReleaseIndex`] from the index document.
///
/// The latest pointers come from the first `release` and `snapshot` scalars.
/// Every object of the `versions` array becomes an entry; objects without an
/// `id` or `url` are skipped.
pub fn parse_index(scanner: Scanner, doc: &str) -> ReleaseIndex {
    let latest_release = scanner.value_of(doc, "release").map(ToOwned::to_owned);
    let latest_snapshot = scanner.value_of(doc, "snapshot").map(ToOwned::to_owned);

    let mut index = ReleaseIndex::new(latest_release, latest_snapshot);

    let Some(versions) = scanner.section_of(doc, &["versions"], '[') else {
        debug!("Release index has no `versions` array");
        return index;
    };

    for object in scanner.objects(versions) {
        let (Some(id), Some(url)) = (scanner.value_of(object, "id"), scanner.value_of(object, "url")) else {
            trace!("Skipping index entry without id or url");
            continue;
        };

        let kind = scanner
            .value_of(object, "type")
            .map_or(ReleaseKind::Other, ReleaseKind::from_type);

        if !index.insert(ReleaseIndexEntry {
            id: id.to_owned(),
            kind,
            descriptor_url: url.to_owned(),
        }) {
            trace!("Duplicate index entry `{id}`");
        }
    }

    index
}
