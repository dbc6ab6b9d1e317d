use std::sync::Arc;

use datamirage_core::Locale;

use super::ProviderCore;
use crate::errors::GenerationError;
use crate::random::RandomService;
use crate::store::LocaleSession;

const CATEGORY: &str = "phone";

/// Landline, mobile and international phone numbers from locale formats.
#[derive(Debug)]
pub struct PhoneProvider {
    core: ProviderCore,
}

impl PhoneProvider {
    pub fn new(session: LocaleSession, random: Arc<RandomService>) -> Self {
        Self {
            core: ProviderCore::new(session, random),
        }
    }

    pub fn locale(&self) -> Locale {
        self.core.locale()
    }

    pub fn cell_phone(&self) -> Result<String, GenerationError> {
        self.core.pick_expanded(CATEGORY, "cellPhoneFormats")
    }

    pub fn landline(&self) -> Result<String, GenerationError> {
        self.core.pick_expanded(CATEGORY, "landlineFormats")
    }

    /// Mobile or landline with equal odds. Locales with only one of the two
    /// format lists always use that one.
    pub fn phone_number(&self) -> Result<String, GenerationError> {
        let has_cell = self.core.has(CATEGORY, "cellPhoneFormats");
        let has_landline = self.core.has(CATEGORY, "landlineFormats");
        let use_cell = match (has_cell, has_landline) {
            (true, true) => self.core.random().weighted_bool(0.5)?,
            (true, false) => true,
            (false, _) => false,
        };
        if use_cell {
            self.cell_phone()
        } else {
            self.landline()
        }
    }

    /// National number prefixed with the locale's calling code; a leading
    /// trunk `0` is dropped.
    pub fn international(&self) -> Result<String, GenerationError> {
        let code = self.core.pick(CATEGORY, "country_code")?;
        let number = self.phone_number()?;
        let national = number.strip_prefix('0').unwrap_or(&number);
        Ok(format!("{code} {national}"))
    }
}
