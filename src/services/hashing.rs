//! Hashes substituted into output names.

use sha2::{Digest, Sha256};

use crate::domain::models::asset::SourceAsset;

/// Lower-case hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hash over a set of inputs, independent of the order they are given in.
///
/// Each input contributes its path and length so that moving bytes between
/// files changes the result.
pub fn build_hash<'a>(inputs: impl IntoIterator<Item = &'a SourceAsset>) -> String {
    let mut inputs: Vec<&SourceAsset> = inputs.into_iter().collect();
    inputs.sort_by(|a, b| a.path.cmp(&b.path));

    let mut hasher = Sha256::new();
    for asset in inputs {
        hasher.update(asset.path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(asset.size().to_le_bytes());
        hasher.update(&asset.contents);
    }
    hex::encode(hasher.finalize())
}
