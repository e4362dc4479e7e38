use super::pair::PairRequirementKind;
use crate::core::models::pairs::PairKind;
use phf::{Map, phf_map};

/// Display and persistence metadata of one minimum-pair constraint variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintVariant {
    pub kind: PairRequirementKind,
    /// Tag of the `(tag, value)` wire form.
    pub tag: &'static str,
    pub icon: &'static str,
    pub mission_icon: &'static str,
}

#[rustfmt::skip]
static VARIANTS_BY_TAG: Map<&'static str, ConstraintVariant> = phf_map! {
    "GCMIN" => ConstraintVariant {
        kind: PairRequirementKind::Single(PairKind::Gc),
        tag: "GCMIN", icon: "nova-gc-req", mission_icon: "nova-gc-mission-req",
    },
    "AU" => ConstraintVariant {
        kind: PairRequirementKind::Single(PairKind::Au),
        tag: "AU", icon: "nova-au-req", mission_icon: "nova-au-mission-req",
    },
    "GU" => ConstraintVariant {
        kind: PairRequirementKind::Single(PairKind::Gu),
        tag: "GU", icon: "nova-gu-req", mission_icon: "nova-gu-mission-req",
    },
    "PAIRS" => ConstraintVariant {
        kind: PairRequirementKind::Any,
        tag: "PAIRS", icon: "nova-pairs-req", mission_icon: "nova-pairs-mission-req",
    },
};

/// Looks up a variant by its wire tag. Tags are case-sensitive.
pub fn by_tag(tag: &str) -> Option<&'static ConstraintVariant> {
    VARIANTS_BY_TAG.get(tag)
}

pub(crate) fn tag_of(kind: PairRequirementKind) -> &'static str {
    match kind {
        PairRequirementKind::Single(PairKind::Gc) => "GCMIN",
        PairRequirementKind::Single(PairKind::Au) => "AU",
        PairRequirementKind::Single(PairKind::Gu) => "GU",
        PairRequirementKind::Any => "PAIRS",
    }
}

pub fn all() -> impl Iterator<Item = &'static ConstraintVariant> {
    VARIANTS_BY_TAG.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_reachable_from_its_own_tag() {
        for variant in all() {
            assert_eq!(by_tag(variant.tag), Some(variant));
            assert_eq!(tag_of(variant.kind), variant.tag);
        }
        assert_eq!(all().count(), 4);
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(by_tag("GCMIN").is_some());
        assert!(by_tag("gcmin").is_none());
        assert!(by_tag("GC").is_none());
    }
}
