use std::sync::Arc;

use datamirage_core::{Locale, MirageConfig, REFERENCE_LOCALE};

use crate::providers::{
    AddressProvider, CodeProvider, CompanyProvider, NameProvider, PhoneProvider,
};
use crate::random::RandomService;
use crate::store::{LocaleDataStore, LocaleSession, global_store};

/// Entry point for generating locale-specific fake data.
///
/// Every provider of one `DataMirage` shares its locale, its store and its
/// random service, so a seeded instance is reproducible end to end.
#[derive(Debug)]
pub struct DataMirage {
    locale: Locale,
    random: Arc<RandomService>,
    address: AddressProvider,
    name: NameProvider,
    phone: PhoneProvider,
    company: CompanyProvider,
    code: CodeProvider,
}

impl DataMirage {
    pub fn new(locale: Locale) -> Self {
        Self::builder().locale(locale).build()
    }

    /// Generator for the reference locale.
    pub fn with_default_locale() -> Self {
        Self::new(REFERENCE_LOCALE)
    }

    /// Generator for a locale code; missing or unsupported codes fall back
    /// to the reference locale.
    pub fn from_code(code: Option<&str>) -> Self {
        let locale = match code {
            Some(code) => Locale::parse(code).unwrap_or_else(|| {
                tracing::warn!(
                    event = "unsupported_locale",
                    locale = code,
                    fallback = %REFERENCE_LOCALE
                );
                REFERENCE_LOCALE
            }),
            None => REFERENCE_LOCALE,
        };
        Self::new(locale)
    }

    pub fn from_config(config: &MirageConfig) -> Self {
        let mut builder = Self::builder()
            .locale(config.resolved_locale())
            .store(Arc::new(LocaleDataStore::from_config(config)));
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    pub fn builder() -> DataMirageBuilder {
        DataMirageBuilder::default()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn random(&self) -> &RandomService {
        &self.random
    }

    pub fn address(&self) -> &AddressProvider {
        &self.address
    }

    pub fn name(&self) -> &NameProvider {
        &self.name
    }

    pub fn phone_number(&self) -> &PhoneProvider {
        &self.phone
    }

    pub fn company(&self) -> &CompanyProvider {
        &self.company
    }

    pub fn code(&self) -> &CodeProvider {
        &self.code
    }
}

impl Default for DataMirage {
    fn default() -> Self {
        Self::with_default_locale()
    }
}

/// Configures the locale, store and seed of a [`DataMirage`].
#[derive(Debug, Default)]
pub struct DataMirageBuilder {
    locale: Option<Locale>,
    seed: Option<u64>,
    store: Option<Arc<LocaleDataStore>>,
}

impl DataMirageBuilder {
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a dedicated store instead of the process-wide one.
    pub fn store(mut self, store: Arc<LocaleDataStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> DataMirage {
        let locale = self.locale.unwrap_or(REFERENCE_LOCALE);
        let store = self.store.unwrap_or_else(global_store);
        let random = Arc::new(RandomService::new(self.seed));
        let session = LocaleSession::new(store, locale);

        tracing::debug!(
            event = "generator_created",
            locale = %locale,
            seeded = self.seed.is_some()
        );

        DataMirage {
            locale,
            address: AddressProvider::new(session.clone(), Arc::clone(&random)),
            name: NameProvider::new(session.clone(), Arc::clone(&random)),
            phone: PhoneProvider::new(session.clone(), Arc::clone(&random)),
            company: CompanyProvider::new(session, Arc::clone(&random)),
            code: CodeProvider::new(Arc::clone(&random)),
            random,
        }
    }
}
