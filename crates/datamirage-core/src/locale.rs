use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Locale whose document layout every other locale is validated against.
/// It is also the generation default when no usable locale is given.
pub const REFERENCE_LOCALE: Locale = Locale::TrTr;

/// Supported language/region data sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "tr_TR")]
    TrTr,
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "de_DE")]
    DeDe,
    #[serde(rename = "fr_FR")]
    FrFr,
    #[serde(rename = "es_ES")]
    EsEs,
    #[serde(rename = "it_IT")]
    ItIt,
    #[serde(rename = "ru_RU")]
    RuRu,
}

impl Locale {
    pub const ALL: &'static [Locale] = &[
        Locale::TrTr,
        Locale::EnUs,
        Locale::DeDe,
        Locale::FrFr,
        Locale::EsEs,
        Locale::ItIt,
        Locale::RuRu,
    ];

    /// Case-insensitive lookup by code such as `en_US`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(value))
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::TrTr => "tr_TR",
            Self::EnUs => "en_US",
            Self::DeDe => "de_DE",
            Self::FrFr => "fr_FR",
            Self::EsEs => "es_ES",
            Self::ItIt => "it_IT",
            Self::RuRu => "ru_RU",
        }
    }

    /// Upper-case constant name, e.g. `EN_US`.
    pub fn name(self) -> &'static str {
        match self {
            Self::TrTr => "TR_TR",
            Self::EnUs => "EN_US",
            Self::DeDe => "DE_DE",
            Self::FrFr => "FR_FR",
            Self::EsEs => "ES_ES",
            Self::ItIt => "IT_IT",
            Self::RuRu => "RU_RU",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| Error::UnsupportedLocale(value.to_string()))
    }
}
