use md5::{Digest, Md5};
use uuid::Uuid;

/// Derives the offline identifier for a display name.
///
/// The MD5 digest of `OfflinePlayer:<name>` with the version nibble set to 3
/// and the variant bits set to `10`, formatted as a hyphenated UUID.
pub fn offline_uuid(display_name: &str) -> String {
    let mut digest = Md5::digest(format!("OfflinePlayer:{display_name}").as_bytes());

    digest[6] = (digest[6] & 0x0f) | 0x30;
    digest[8] = (digest[8] & 0x3f) | 0x80;

    Uuid::from_slice(&digest)
        .unwrap_or_else(|_| Uuid::nil())
        .hyphenated()
        .to_string()
}
