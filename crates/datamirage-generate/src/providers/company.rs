use std::sync::Arc;

use datamirage_core::Locale;

use super::ProviderCore;
use crate::errors::GenerationError;
use crate::random::RandomService;
use crate::store::LocaleSession;
use crate::template::Composer;

const CATEGORY: &str = "company";

/// Company names, legal suffixes, industries and slogans.
#[derive(Debug)]
pub struct CompanyProvider {
    core: ProviderCore,
}

impl CompanyProvider {
    pub fn new(session: LocaleSession, random: Arc<RandomService>) -> Self {
        Self {
            core: ProviderCore::new(session, random),
        }
    }

    pub fn locale(&self) -> Locale {
        self.core.locale()
    }

    pub fn suffix(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "suffixes")
    }

    pub fn industry(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "industries")
    }

    /// Surnames come from the locale's `name` table.
    pub fn name(&self) -> Result<String, GenerationError> {
        let patterns = self.core.values(CATEGORY, "name_patterns")?;
        Composer::new()
            .token("last_names", || self.core.pick("name", "last_names"))
            .token("suffixes", || self.suffix())
            .token("industries", || self.industry())
            .compose(self.core.random(), &patterns)
    }

    pub fn catch_phrase(&self) -> Result<String, GenerationError> {
        let patterns = self.core.values(CATEGORY, "catch_phrase_patterns")?;
        Composer::new()
            .token("adjectives", || self.core.pick(CATEGORY, "adjectives"))
            .token("nouns", || self.core.pick(CATEGORY, "nouns"))
            .token("industries", || self.industry())
            .compose(self.core.random(), &patterns)
    }
}
