use std::{collections::HashMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseKind {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
    #[default]
    Other,
}

impl ReleaseKind {
    /// Maps the index's `type` field. Unknown types are [`ReleaseKind::Other`].
    pub fn from_type(value: &str) -> Self {
        match value {
            "release" => ReleaseKind::Release,
            "snapshot" => ReleaseKind::Snapshot,
            "old_beta" => ReleaseKind::OldBeta,
            "old_alpha" => ReleaseKind::OldAlpha,
            _ => ReleaseKind::Other,
        }
    }

    pub fn bucket(self) -> Option<Bucket> {
        match self {
            ReleaseKind::Release => Some(Bucket::Release),
            ReleaseKind::Snapshot => Some(Bucket::Snapshot),
            ReleaseKind::OldBeta => Some(Bucket::OldBeta),
            ReleaseKind::OldAlpha => Some(Bucket::OldAlpha),
            ReleaseKind::Other => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ReleaseIndexEntry {
    pub id: String,
    pub kind: ReleaseKind,
    pub descriptor_url: String,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    LatestRelease,
    LatestSnapshot,
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::LatestRelease,
        Bucket::LatestSnapshot,
        Bucket::Release,
        Bucket::Snapshot,
        Bucket::OldBeta,
        Bucket::OldAlpha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::LatestRelease => "latest-release",
            Bucket::LatestSnapshot => "latest-snapshot",
            Bucket::Release => "release",
            Bucket::Snapshot => "snapshot",
            Bucket::OldBeta => "old-beta",
            Bucket::OldAlpha => "old-alpha",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Bucket::LatestRelease => "Latest Release",
            Bucket::LatestSnapshot => "Latest Snapshot",
            Bucket::Release => "Release",
            Bucket::Snapshot => "Snapshot",
            Bucket::OldBeta => "Old Beta",
            Bucket::OldAlpha => "Old Alpha",
        }
    }

    fn position(self) -> usize {
        match self {
            Bucket::LatestRelease => 0,
            Bucket::LatestSnapshot => 1,
            Bucket::Release => 2,
            Bucket::Snapshot => 3,
            Bucket::OldBeta => 4,
            Bucket::OldAlpha => 5,
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown bucket `{0}`")]
pub struct UnknownBucket(String);

impl FromStr for Bucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s)
            .ok_or_else(|| UnknownBucket(s.to_owned()))
    }
}

/// Six fixed buckets, always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseBuckets {
    buckets: [Vec<String>; 6],
}

impl ReleaseBuckets {
    pub fn get(&self, bucket: Bucket) -> &[String] {
        &self.buckets[bucket.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        Bucket::ALL.into_iter().map(|bucket| (bucket, self.get(bucket)))
    }

    fn push(&mut self, bucket: Bucket, id: String) {
        self.buckets[bucket.position()].push(id);
    }
}

/// Every release known to the index with its bucket placement.
#[derive(Debug, Clone, Default)]
pub struct ReleaseIndex {
    pub latest_release: Option<String>,
    pub latest_snapshot: Option<String>,
    entries: Vec<ReleaseIndexEntry>,
    positions: HashMap<String, usize>,
    buckets: ReleaseBuckets,
}

impl ReleaseIndex {
    pub fn new(latest_release: Option<String>, latest_snapshot: Option<String>) -> Self {
        Self {
            latest_release,
            latest_snapshot,
            ..Default::default()
        }
    }

    /// Adds an entry and places it into its buckets.
    ///
    /// Returns `false` and leaves the index untouched if the id is already
    /// present.
    pub fn insert(&mut self, entry: ReleaseIndexEntry) -> bool {
        if self.positions.contains_key(&entry.id) {
            return false;
        }

        if self.latest_release.as_ref() == Some(&entry.id) {
            self.buckets.push(Bucket::LatestRelease, entry.id.clone());
        }
        if self.latest_snapshot.as_ref() == Some(&entry.id) {
            self.buckets.push(Bucket::LatestSnapshot, entry.id.clone());
        }
        if let Some(bucket) = entry.kind.bucket() {
            self.buckets.push(bucket, entry.id.clone());
        }

        self.positions.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);

        true
    }

    pub fn entries(&self) -> &[ReleaseIndexEntry] {
        &self.entries
    }

    pub fn buckets(&self) -> &ReleaseBuckets {
        &self.buckets
    }

    pub fn find(&self, id: &str) -> Option<&ReleaseIndexEntry> {
        self.positions.get(id).map(|&position| &self.entries[position])
    }

    pub fn descriptor_url(&self, id: &str) -> Option<&str> {
        self.find(id).map(|entry| entry.descriptor_url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kind: ReleaseKind) -> ReleaseIndexEntry {
        ReleaseIndexEntry {
            id: id.into(),
            kind,
            descriptor_url: format!("https://h/{id}.json"),
        }
    }

    #[test]
    fn duplicate_ids_are_ignored() {
        let mut index = ReleaseIndex::new(None, None);

        assert!(index.insert(entry("a", ReleaseKind::Release)));
        assert!(!index.insert(ReleaseIndexEntry {
            descriptor_url: "https://other".into(),
            ..entry("a", ReleaseKind::Snapshot)
        }));

        assert_eq!(index.len(), 1);
        assert_eq!(index.descriptor_url("a"), Some("https://h/a.json"));
        assert_eq!(index.buckets().get(Bucket::Release), ["a"]);
        assert!(index.buckets().get(Bucket::Snapshot).is_empty());
    }

    #[test]
    fn bucket_names_round_trip() {
        for bucket in Bucket::ALL {
            assert_eq!(bucket.as_str().parse::<Bucket>().unwrap(), bucket);
        }
        assert!("beta".parse::<Bucket>().is_err());
    }
}
