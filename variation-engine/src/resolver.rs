//! Option label resolution
//!
//! Labels are matched case-insensitively. A matching option is "used" when
//! a model already occupies the full tuple the new model would take.

use shared::models::VariationSnapshot;

/// Outcome of looking up a label in one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionResolution {
    /// Option exists at `index`; `used` if a model already sits at the tuple
    Found { index: u32, used: bool },
    /// No option with this label; it must be appended
    NotFound,
}

/// Case-insensitive label comparison
pub fn labels_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// `base` with the `tier` coordinate replaced by `option`
pub fn with_option(base: &[u32], tier: usize, option: u32) -> Vec<u32> {
    let mut tuple = base.to_vec();
    if let Some(slot) = tuple.get_mut(tier) {
        *slot = option;
    }
    tuple
}

/// Find `label` in `tier` and check whether its tuple is taken
///
/// `base` holds one coordinate per tier; the `tier` entry is ignored.
pub fn resolve_option(
    snapshot: &VariationSnapshot,
    tier: usize,
    label: &str,
    base: &[u32],
) -> OptionResolution {
    let Some(tier_variation) = snapshot.tier(tier) else {
        return OptionResolution::NotFound;
    };

    match tier_variation
        .option_list
        .iter()
        .position(|o| labels_match(&o.option, label))
    {
        Some(pos) => {
            let index = pos as u32;
            let tuple = with_option(base, tier, index);
            OptionResolution::Found {
                index,
                used: snapshot.model_with_index(&tuple).is_some(),
            }
        }
        None => OptionResolution::NotFound,
    }
}
