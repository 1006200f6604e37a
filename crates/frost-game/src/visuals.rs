//! Sprite swaps for resolved targets

use std::collections::HashSet;

/// Decides what a target looks like once its present has landed
pub trait TargetVisuals {
    /// Replacement asset for `asset`, or `None` to leave the target unchanged
    fn replacement_for(&self, asset: &str) -> Option<String>;
}

/// Swaps `elf@2x.png` for `elf_Holding@2x.png`.
///
/// The suffix goes before the `@` density marker, or before the extension
/// when there is none. With a known-asset set, names outside it map to
/// `None`.
#[derive(Debug, Clone)]
pub struct HoldingVariant {
    suffix: String,
    known: Option<HashSet<String>>,
}

impl Default for HoldingVariant {
    fn default() -> Self {
        Self::new("_Holding")
    }
}

impl HoldingVariant {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            known: None,
        }
    }

    /// Only produce replacements that appear in `assets`
    pub fn with_known_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known = Some(assets.into_iter().map(Into::into).collect());
        self
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn variant_of(&self, asset: &str) -> Option<String> {
        let (stem, tail) = match asset.find('@') {
            Some(at) => asset.split_at(at),
            None => match asset.rfind('.') {
                Some(dot) if dot > 0 => asset.split_at(dot),
                _ => (asset, ""),
            },
        };
        if stem.is_empty() || stem.ends_with(&self.suffix) {
            return None;
        }
        Some(format!("{stem}{}{tail}", self.suffix))
    }
}

impl TargetVisuals for HoldingVariant {
    fn replacement_for(&self, asset: &str) -> Option<String> {
        let variant = self.variant_of(asset)?;
        match &self.known {
            Some(known) if !known.contains(&variant) => None,
            _ => Some(variant),
        }
    }
}
