//! Asset locations and load bookkeeping.

use std::fmt;

/// The three assets the globe fetches after mounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// CSV point data for the hexbin layer.
    Points,
    /// Equirectangular color texture.
    GlobeImage,
    /// Equirectangular height texture for bump mapping.
    BumpImage,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => write!(f, "point data"),
            Self::GlobeImage => write!(f, "globe texture"),
            Self::BumpImage => write!(f, "bump texture"),
        }
    }
}

/// Where an asset lives once its configured string is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    /// Fetch over HTTP(S).
    Remote(String),
    /// Read from the local file system (native) or fetch relative to the
    /// page (browser).
    Local(String),
}

impl AssetLocation {
    /// Classify a configured location. Protocol-relative URLs (`//host/x`)
    /// resolve to HTTPS. Returns `None` for an empty string.
    #[must_use]
    pub fn resolve(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(rest) = raw.strip_prefix("//") {
            return Some(Self::Remote(format!("https://{rest}")));
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(Self::Remote(raw.to_owned()))
        } else {
            Some(Self::Local(raw.to_owned()))
        }
    }

    /// The location as a string (URL or path).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote(s) | Self::Local(s) => s,
        }
    }
}

/// Outcome of the point-data fetch as seen by the globe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The fetch has not completed yet.
    #[default]
    Pending,
    /// Points were parsed and binned.
    Loaded {
        /// Rows parsed from the CSV.
        points: usize,
        /// Hex bins built from them.
        bins: usize,
        /// Rows dropped for non-finite coordinates or weight.
        skipped: usize,
    },
    /// The fetch or parse failed; the hex layer stays empty.
    Failed(String),
}

impl LoadState {
    /// Whether the point data arrived and was binned.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Whether the point data failed to arrive.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Loaded {
                points,
                bins,
                skipped,
            } => write!(
                f,
                "loaded {points} points into {bins} bins ({skipped} skipped)"
            ),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_becomes_https() {
        assert_eq!(
            AssetLocation::resolve("//unpkg.com/a.png"),
            Some(AssetLocation::Remote("https://unpkg.com/a.png".into()))
        );
    }

    #[test]
    fn absolute_urls_stay_remote() {
        assert_eq!(
            AssetLocation::resolve("HTTP://example.org/pop.csv"),
            Some(AssetLocation::Remote("HTTP://example.org/pop.csv".into()))
        );
    }

    #[test]
    fn paths_are_local() {
        assert_eq!(
            AssetLocation::resolve(" data/pop.csv "),
            Some(AssetLocation::Local("data/pop.csv".into()))
        );
        assert_eq!(AssetLocation::resolve("   "), None);
    }

    #[test]
    fn load_state_predicates() {
        assert!(!LoadState::Pending.is_loaded());
        assert!(LoadState::Failed("x".into()).is_failed());
        let loaded = LoadState::Loaded {
            points: 3,
            bins: 2,
            skipped: 1,
        };
        assert!(loaded.is_loaded());
        assert_eq!(
            loaded.to_string(),
            "loaded 3 points into 2 bins (1 skipped)"
        );
    }
}
