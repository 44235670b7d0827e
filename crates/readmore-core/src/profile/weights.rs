//! Profile weight maps

use crate::domain::book::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category -> accumulated signed weight
pub type WeightMap = BTreeMap<String, i64>;

/// Publication years strictly below this count as classic
pub const CLASSIC_ERA_CUTOFF: i32 = 1980;

/// Coarse publication era of a work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Classic,
    Modern,
}

impl Era {
    /// Classify a first-publication year
    pub fn from_year(year: i32) -> Self {
        if year < CLASSIC_ERA_CUTOFF {
            Self::Classic
        } else {
            Self::Modern
        }
    }

    /// Key used in the `era` weight map
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
        }
    }
}

/// The user's accumulated preference signal.
///
/// `length` has no producer yet; it is carried through every update untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileWeights {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: WeightMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: WeightMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub length: WeightMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub era: WeightMap,
}

impl ProfileWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no category carries any weight
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.authors.is_empty()
            && self.length.is_empty()
            && self.era.is_empty()
    }

    /// True when there is at least one subject signal to recommend from
    pub fn has_subject_signal(&self) -> bool {
        !self.subjects.is_empty()
    }
}

/// Entries of `map`, strongest first, at most `limit` of them
pub fn top_weights(map: &WeightMap, limit: usize) -> Vec<(&str, i64)> {
    let mut entries: Vec<(&str, i64)> = map.iter().map(|(k, &w)| (k.as_str(), w)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);
    entries
}

/// Add `delta` to the weight stored under `key`, saturating at the `i64` bounds
pub(crate) fn bump(map: &mut WeightMap, key: &str, delta: i64) {
    let weight = map.entry(key.to_string()).or_insert(0);
    *weight = weight.saturating_add(delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_boundary() {
        assert_eq!(Era::from_year(1979), Era::Classic);
        assert_eq!(Era::from_year(1980), Era::Modern);
        assert_eq!(Era::from_year(-500), Era::Classic);
    }

    #[test]
    fn test_decode_missing_and_null_maps() {
        let profile: ProfileWeights = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());

        let profile: ProfileWeights =
            serde_json::from_str(r#"{"subjects": {"fantasy": 2}, "era": null}"#).unwrap();
        assert_eq!(profile.subjects.get("fantasy"), Some(&2));
        assert!(profile.era.is_empty());
    }

    #[test]
    fn test_top_weights_strongest_first() {
        let mut profile = ProfileWeights::new();
        bump(&mut profile.subjects, "horror", -3);
        bump(&mut profile.subjects, "fantasy", 4);
        bump(&mut profile.subjects, "poetry", 1);

        assert_eq!(
            top_weights(&profile.subjects, 2),
            vec![("fantasy", 4), ("poetry", 1)]
        );
        assert_eq!(top_weights(&profile.subjects, 5).last(), Some(&("horror", -3)));
    }

    #[test]
    fn test_bump_saturates() {
        let mut map = WeightMap::new();
        map.insert("fantasy".to_string(), i64::MIN + 1);
        bump(&mut map, "fantasy", -2);
        assert_eq!(map.get("fantasy"), Some(&i64::MIN));
    }
}
