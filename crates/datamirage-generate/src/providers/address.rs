use std::sync::Arc;

use datamirage_core::Locale;

use super::ProviderCore;
use crate::errors::GenerationError;
use crate::random::RandomService;
use crate::store::LocaleSession;
use crate::template::Composer;

const CATEGORY: &str = "address";

/// Cities, streets, postal codes and composed addresses.
#[derive(Debug)]
pub struct AddressProvider {
    core: ProviderCore,
}

impl AddressProvider {
    pub fn new(session: LocaleSession, random: Arc<RandomService>) -> Self {
        Self {
            core: ProviderCore::new(session, random),
        }
    }

    pub fn locale(&self) -> Locale {
        self.core.locale()
    }

    pub fn city(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "cities")
    }

    pub fn street_name(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "streets")
    }

    pub fn street_suffix(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "street_suffixes")
    }

    pub fn state(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "states")
    }

    /// Fails with `MissingData` in locales without state abbreviations.
    pub fn state_abbr(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "state_abbrs")
    }

    pub fn has_state_abbr(&self) -> bool {
        self.core.has(CATEGORY, "state_abbrs")
    }

    pub fn country(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "countries")
    }

    pub fn country_code(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "country_codes")
    }

    pub fn district(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "districts")
    }

    pub fn zip_code(&self) -> Result<String, GenerationError> {
        self.core.pick_expanded(CATEGORY, "postal_codes")
    }

    pub fn postal_code(&self) -> Result<String, GenerationError> {
        self.zip_code()
    }

    pub fn building_number(&self) -> Result<String, GenerationError> {
        self.core.pick_expanded(CATEGORY, "building_number")
    }

    pub fn street_number(&self) -> Result<String, GenerationError> {
        Ok(self.core.random().int_in(1, 999)?.to_string())
    }

    pub fn street_address(&self) -> Result<String, GenerationError> {
        let patterns = self.core.values(CATEGORY, "street_patterns")?;
        Composer::new()
            .token("streets", || self.street_name())
            .token("street_suffixes", || self.street_suffix())
            .token("building_number", || self.building_number())
            .token("building", || self.core.pick_expanded(CATEGORY, "building"))
            .token("apartment", || self.core.pick_expanded(CATEGORY, "apartment"))
            .compose(self.core.random(), &patterns)
    }

    pub fn full_address(&self) -> Result<String, GenerationError> {
        let patterns = self.core.values(CATEGORY, "full_patterns")?;
        Composer::new()
            .token("street_patterns", || self.street_address())
            .token("cities", || self.city())
            .token("postal_codes", || self.zip_code())
            .token("countries", || self.country())
            .token("states", || self.state())
            .token("districts", || self.district())
            .compose(self.core.random(), &patterns)
    }

    pub fn latitude(&self) -> Result<String, GenerationError> {
        let value = self.core.random().double_in(-90.0, 90.0)?;
        Ok(format!("{value:.6}"))
    }

    pub fn longitude(&self) -> Result<String, GenerationError> {
        let value = self.core.random().double_in(-180.0, 180.0)?;
        Ok(format!("{value:.6}"))
    }

    pub fn coordinates(&self) -> Result<String, GenerationError> {
        Ok(format!("{}, {}", self.latitude()?, self.longitude()?))
    }
}
