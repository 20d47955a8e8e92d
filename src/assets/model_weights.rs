use std::collections::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Descriptor of a downloadable pretrained checkpoint.
///
/// Assets are identified by their filename, which is also the name the base
/// framework uses for the file inside its weights cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeightAsset {
    /// Local filename for the checkpoint
    pub filename: &'static str,
    /// Fixed, versioned download location
    pub url: &'static str,
    /// Expected MD5 digest, when one has been published
    pub md5_hash: Option<&'static str>,
}

/// The platform-licensed checkpoints shipped by this package.
///
/// These models are subject to the Platform Model License 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelWeights {
    RfDetrXLarge,
    RfDetrXXLarge,
}

// Order here is the enumeration order reported by `list_all`.
// MD5 hashes are not published yet for either checkpoint.
static ASSETS: [WeightAsset; 2] = [
    WeightAsset {
        filename: "rf-detr-xlarge.pth",
        url: "https://storage.googleapis.com/rfdetr/platform-licensed/rf-detr-xlarge.pth",
        md5_hash: None,
    },
    WeightAsset {
        filename: "rf-detr-xxlarge.pth",
        url: "https://storage.googleapis.com/rfdetr/platform-licensed/rf-detr-xxlarge.pth",
        md5_hash: None,
    },
];

static BY_FILENAME: Lazy<HashMap<&'static str, &'static WeightAsset>> = Lazy::new(|| {
    ASSETS.iter().map(|asset| (asset.filename, asset)).collect()
});

impl ModelWeights {
    /// Every member, in registry order
    pub const ALL: [ModelWeights; 2] = [ModelWeights::RfDetrXLarge, ModelWeights::RfDetrXXLarge];

    /// Returns the descriptor bound to this member.
    pub fn asset(self) -> &'static WeightAsset {
        match self {
            ModelWeights::RfDetrXLarge => &ASSETS[0],
            ModelWeights::RfDetrXXLarge => &ASSETS[1],
        }
    }

    pub fn filename(self) -> &'static str {
        self.asset().filename
    }

    pub fn url(self) -> &'static str {
        self.asset().url
    }

    /// Resolves the member whose asset carries `filename`.
    pub fn from_filename(filename: &str) -> Option<ModelWeights> {
        Self::ALL.into_iter().find(|member| member.filename() == filename)
    }
}

/// Looks up a registered asset by filename.
///
/// An unregistered filename yields `None`.
pub fn lookup(filename: &str) -> Option<&'static WeightAsset> {
    BY_FILENAME.get(filename).copied()
}

/// All registered assets in stable order.
pub fn list_all() -> &'static [WeightAsset] {
    &ASSETS
}

/// Download URL for `filename`, if registered.
pub fn url_for(filename: &str) -> Option<&'static str> {
    lookup(filename).map(|asset| asset.url)
}

/// Expected MD5 digest for `filename`.
///
/// `None` both for unregistered files and for registered files without a
/// published hash.
pub fn md5_for(filename: &str) -> Option<&'static str> {
    lookup(filename).and_then(|asset| asset.md5_hash)
}

/// Filenames of every registered asset
pub fn list_models() -> Vec<&'static str> {
    ASSETS.iter().map(|asset| asset.filename).collect()
}
