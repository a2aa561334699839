//! Blocking asset retrieval for native hosts.
//!
//! Remote locations go through `ureq` (with the `viewer` feature), local
//! ones through the file system. [`spawn_asset_loader`] runs the fetches
//! on one background thread and reports each outcome over a channel so the
//! frame loop never blocks on the network.

use std::sync::mpsc;

use super::source::{AssetKind, AssetLocation};
use crate::error::GlobeError;

/// Upper bound on a fetched asset body.
#[cfg(feature = "viewer")]
const MAX_ASSET_BYTES: u64 = 64 * 1024 * 1024;

/// One finished fetch.
pub type AssetResult = (AssetKind, Result<Vec<u8>, GlobeError>);

/// Fetch an asset, blocking the calling thread.
pub fn fetch_blocking(location: &AssetLocation) -> Result<Vec<u8>, GlobeError> {
    match location {
        AssetLocation::Remote(url) => fetch_http(url),
        AssetLocation::Local(path) => std::fs::read(path)
            .map_err(|e| GlobeError::Fetch(format!("{path}: {e}"))),
    }
}

#[cfg(feature = "viewer")]
fn fetch_http(url: &str) -> Result<Vec<u8>, GlobeError> {
    log::info!("fetching {url}");
    ureq::get(url)
        .call()
        .map_err(|e| GlobeError::Fetch(format!("{url}: {e}")))?
        .into_body()
        .with_config()
        .limit(MAX_ASSET_BYTES)
        .read_to_vec()
        .map_err(|e| GlobeError::Fetch(format!("{url}: {e}")))
}

#[cfg(not(feature = "viewer"))]
fn fetch_http(url: &str) -> Result<Vec<u8>, GlobeError> {
    Err(GlobeError::Fetch(format!(
        "{url}: HTTP fetching needs the `viewer` feature"
    )))
}

/// Fetch `requests` in order on a background thread.
///
/// Every request produces exactly one message. The thread exits early if
/// the receiver is dropped.
pub fn spawn_asset_loader(
    requests: Vec<(AssetKind, AssetLocation)>,
) -> Result<mpsc::Receiver<AssetResult>, GlobeError> {
    let (tx, rx) = mpsc::channel();
    let _handle = std::thread::Builder::new()
        .name("asset-loader".into())
        .spawn(move || {
            for (kind, location) in requests {
                let result = fetch_blocking(&location);
                if let Err(ref e) = result {
                    log::warn!("{kind} unavailable: {e}");
                }
                if tx.send((kind, result)).is_err() {
                    log::debug!("asset receiver dropped, stopping loader");
                    return;
                }
            }
        })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn reads_local_file() {
        let path = std::env::temp_dir().join("hexglobe_fetch_test.csv");
        std::fs::write(&path, b"lat,lng,pop\n").unwrap();
        let loc = AssetLocation::Local(path.to_string_lossy().into_owned());
        assert_eq!(fetch_blocking(&loc).unwrap(), b"lat,lng,pop\n");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let loc = AssetLocation::Local("/definitely/not/here.csv".into());
        assert!(matches!(fetch_blocking(&loc), Err(GlobeError::Fetch(_))));
    }

    #[test]
    fn loader_reports_every_request() {
        let rx = spawn_asset_loader(vec![
            (AssetKind::Points, AssetLocation::Local("/nope/a.csv".into())),
            (AssetKind::BumpImage, AssetLocation::Local("/nope/b.png".into())),
        ])
        .unwrap();
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.0, AssetKind::Points);
        assert!(first.1.is_err());
        assert_eq!(second.0, AssetKind::BumpImage);
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
