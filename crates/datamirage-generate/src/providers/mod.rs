//! Category providers: thin façades that name the locale fields they need
//! and combine them with the random service and the template composer.

mod address;
mod code;
mod company;
mod name;
mod phone;

use std::sync::Arc;

use datamirage_core::Locale;

use crate::errors::GenerationError;
use crate::lazy::LazyCache;
use crate::random::RandomService;
use crate::store::LocaleSession;

pub use address::AddressProvider;
pub use code::CodeProvider;
pub use company::CompanyProvider;
pub use name::NameProvider;
pub use phone::PhoneProvider;

/// State shared by every provider: the pinned locale session, the random
/// service, and the provider's own memoised field lists.
#[derive(Debug)]
pub(crate) struct ProviderCore {
    session: LocaleSession,
    random: Arc<RandomService>,
    cache: LazyCache<Arc<[String]>>,
}

impl ProviderCore {
    pub(crate) fn new(session: LocaleSession, random: Arc<RandomService>) -> Self {
        Self {
            session,
            random,
            cache: LazyCache::new(),
        }
    }

    pub(crate) fn locale(&self) -> Locale {
        self.session.current_locale()
    }

    pub(crate) fn random(&self) -> &RandomService {
        &self.random
    }

    /// Probe without failing, for optional locale features.
    pub(crate) fn has(&self, category: &str, field: &str) -> bool {
        self.session.has_field(category, field)
    }

    /// Field values, loaded once per provider.
    pub(crate) fn values(
        &self,
        category: &str,
        field: &str,
    ) -> Result<Arc<[String]>, GenerationError> {
        let key = format!("{category}.{field}");
        self.cache
            .load(&key, || self.session.list_data(category, field))
    }

    pub(crate) fn pick(&self, category: &str, field: &str) -> Result<String, GenerationError> {
        let values = self.values(category, field)?;
        self.random.element(&values).cloned()
    }

    /// Pick a format and fill its `#` digit markers.
    pub(crate) fn pick_expanded(
        &self,
        category: &str,
        field: &str,
    ) -> Result<String, GenerationError> {
        let format = self.pick(category, field)?;
        Ok(self.random.expand_pattern(&format))
    }
}

/// Lower-case alphanumeric form of a name, for usernames and domains.
pub(crate) fn slugify(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
