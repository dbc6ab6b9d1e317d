//! Locale-aware synthetic data generation for DataMirage.
//!
//! Providers read locale tables through the [`LocaleDataStore`], pick values
//! with the [`RandomService`] and assemble composite values such as full
//! addresses with the template [`Composer`].

pub mod errors;
pub mod lazy;
pub mod mirage;
pub mod providers;
pub mod random;
pub mod registry;
pub mod store;
pub mod template;

pub use errors::{GenerationError, MissingReason};
pub use lazy::LazyCache;
pub use mirage::{DataMirage, DataMirageBuilder};
pub use providers::{
    AddressProvider, CodeProvider, CompanyProvider, NameProvider, PhoneProvider,
};
pub use random::RandomService;
pub use registry::{FIELD_REGISTRY, FieldSample, sample_all};
pub use store::{DataTable, LocaleDataStore, LocaleSession, global_store};
pub use template::Composer;
