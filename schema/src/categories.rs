use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Form tags derived from a normalized name's suffixes. A name carries at most
/// one regional tag and, independently, at most one battle-form tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Default,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FormTag {
    RegionalAlola,
    RegionalGalar,
    RegionalHisui,
    RegionalPaldea,
    Mega,
    MegaX,
    MegaY,
    Gigantamax,
    Primal,
    Totem,
    #[default]
    None,
}

impl FormTag {
    pub fn is_regional(self) -> bool {
        matches!(
            self,
            FormTag::RegionalAlola
                | FormTag::RegionalGalar
                | FormTag::RegionalHisui
                | FormTag::RegionalPaldea
        )
    }

    pub fn is_mega(self) -> bool {
        matches!(self, FormTag::Mega | FormTag::MegaX | FormTag::MegaY)
    }

    /// Status label used by the puzzle UI, e.g. `"alolan-form"`.
    pub fn status_label(self) -> Option<&'static str> {
        match self {
            FormTag::RegionalAlola => Some("alolan-form"),
            FormTag::RegionalGalar => Some("galarian-form"),
            FormTag::RegionalHisui => Some("hisuian-form"),
            FormTag::RegionalPaldea => Some("paldean-form"),
            FormTag::Mega | FormTag::MegaX | FormTag::MegaY => Some("mega-evolution"),
            FormTag::Gigantamax => Some("gigantamax"),
            FormTag::Primal => Some("primal-reversion"),
            FormTag::Totem => Some("totem-form"),
            FormTag::None => None,
        }
    }
}

/// Special puzzle categories. `Normal` stands in when nothing else applies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpecialCategory {
    Legendary,
    Mythical,
    Starter,
    Fossil,
    Baby,
    UltraBeast,
    Paradox,
    Normal,
}

/// Position of a species within its evolution chain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Default,
)]
pub enum EvolutionStage {
    #[serde(rename = "Base Stage")]
    #[strum(serialize = "Base Stage")]
    Base,
    #[serde(rename = "Middle Stage")]
    #[strum(serialize = "Middle Stage")]
    Middle,
    #[serde(rename = "Final Stage")]
    #[strum(serialize = "Final Stage")]
    Final,
    #[default]
    Unknown,
}

/// The kinds of row/column criteria a puzzle grid can carry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CriterionKind {
    Type,
    Region,
    Special,
    Stage,
    Evolution,
    #[strum(serialize = "dualtype", serialize = "dual-type", serialize = "dual_type")]
    DualType,
    Legendary,
    Mythical,
    Generation,
}
