use crate::error::Result;
use crate::locale::Locale;
use crate::source::DocumentSource;

macro_rules! document {
    ($locale:literal, $name:literal) => {
        (
            $locale,
            $name,
            include_str!(concat!("../data/", $locale, "/", $name, ".yaml")),
        )
    };
}

/// `(locale code, document name, contents)`.
type PackagedDocument = (&'static str, &'static str, &'static str);

/// Every packaged document.
static DOCUMENTS: &[PackagedDocument] = &[
    document!("tr_TR", "address"),
    document!("tr_TR", "company"),
    document!("tr_TR", "name"),
    document!("tr_TR", "phone"),
    document!("en_US", "address"),
    document!("en_US", "company"),
    document!("en_US", "name"),
    document!("en_US", "phone"),
    document!("de_DE", "address"),
    document!("de_DE", "company"),
    document!("de_DE", "name"),
    document!("de_DE", "phone"),
    document!("fr_FR", "address"),
    document!("fr_FR", "company"),
    document!("fr_FR", "name"),
    document!("fr_FR", "phone"),
    document!("es_ES", "address"),
    document!("es_ES", "company"),
    document!("es_ES", "name"),
    document!("es_ES", "phone"),
    document!("it_IT", "address"),
    document!("it_IT", "company"),
    document!("it_IT", "name"),
    document!("it_IT", "phone"),
    document!("ru_RU", "address"),
    document!("ru_RU", "company"),
    document!("ru_RU", "name"),
    document!("ru_RU", "phone"),
];

/// Locale documents compiled into the binary.
///
/// Used as the fallback layer when a filesystem data directory is absent
/// or does not carry a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    fn entries(locale: Locale) -> impl Iterator<Item = &'static PackagedDocument> {
        DOCUMENTS
            .iter()
            .filter(move |(code, _, _)| *code == locale.code())
    }
}

impl DocumentSource for EmbeddedSource {
    fn read(&self, locale: Locale, name: &str) -> Result<Option<String>> {
        Ok(Self::entries(locale)
            .find(|(_, document, _)| *document == name)
            .map(|(_, _, contents)| (*contents).to_string()))
    }

    fn list(&self, locale: Locale) -> Result<Vec<String>> {
        let mut names: Vec<String> = Self::entries(locale)
            .map(|(_, document, _)| (*document).to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}
