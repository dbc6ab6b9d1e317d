use std::sync::Arc;

use datamirage_core::Locale;

use super::{ProviderCore, slugify};
use crate::errors::GenerationError;
use crate::random::RandomService;
use crate::store::LocaleSession;
use crate::template::Composer;

const CATEGORY: &str = "name";

/// Personal names, titles and usernames.
#[derive(Debug)]
pub struct NameProvider {
    core: ProviderCore,
}

impl NameProvider {
    pub fn new(session: LocaleSession, random: Arc<RandomService>) -> Self {
        Self {
            core: ProviderCore::new(session, random),
        }
    }

    pub fn locale(&self) -> Locale {
        self.core.locale()
    }

    pub fn first_name(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "first_names")
    }

    pub fn last_name(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "last_names")
    }

    pub fn prefix(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "prefixes")
    }

    pub fn suffix(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "suffixes")
    }

    pub fn job_title(&self) -> Result<String, GenerationError> {
        self.core.pick(CATEGORY, "job_titles")
    }

    pub fn full_name(&self) -> Result<String, GenerationError> {
        let patterns = self.core.values(CATEGORY, "name_patterns")?;
        Composer::new()
            .token("first_names", || self.first_name())
            .token("last_names", || self.last_name())
            .token("prefixes", || self.prefix())
            .token("suffixes", || self.suffix())
            .compose(self.core.random(), &patterns)
    }

    /// `first.last` plus a two-digit number, lower-cased.
    pub fn username(&self) -> Result<String, GenerationError> {
        let first = slugify(&self.first_name()?);
        let last = slugify(&self.last_name()?);
        let number = self.core.random().int_in(1, 99)?;
        Ok(format!("{first}.{last}{number:02}"))
    }
}
