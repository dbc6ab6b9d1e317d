use crate::errors::GenerationError;
use crate::mirage::DataMirage;

/// Generator function for one field of a category.
pub type FieldFn = fn(&DataMirage) -> Result<String, GenerationError>;

/// The generatable fields of one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryFields {
    pub category: &'static str,
    pub fields: &'static [(&'static str, FieldFn)],
}

/// Every field the providers expose, by category.
pub static FIELD_REGISTRY: &[CategoryFields] = &[
    CategoryFields {
        category: "address",
        fields: &[
            ("city", |m| m.address().city()),
            ("street_name", |m| m.address().street_name()),
            ("street_suffix", |m| m.address().street_suffix()),
            ("street_address", |m| m.address().street_address()),
            ("street_number", |m| m.address().street_number()),
            ("building_number", |m| m.address().building_number()),
            ("zip_code", |m| m.address().zip_code()),
            ("postal_code", |m| m.address().postal_code()),
            ("state", |m| m.address().state()),
            ("state_abbr", |m| m.address().state_abbr()),
            ("country", |m| m.address().country()),
            ("country_code", |m| m.address().country_code()),
            ("district", |m| m.address().district()),
            ("full_address", |m| m.address().full_address()),
            ("latitude", |m| m.address().latitude()),
            ("longitude", |m| m.address().longitude()),
            ("coordinates", |m| m.address().coordinates()),
        ],
    },
    CategoryFields {
        category: "name",
        fields: &[
            ("first_name", |m| m.name().first_name()),
            ("last_name", |m| m.name().last_name()),
            ("full_name", |m| m.name().full_name()),
            ("prefix", |m| m.name().prefix()),
            ("suffix", |m| m.name().suffix()),
            ("job_title", |m| m.name().job_title()),
            ("username", |m| m.name().username()),
        ],
    },
    CategoryFields {
        category: "phone",
        fields: &[
            ("phone_number", |m| m.phone_number().phone_number()),
            ("cell_phone", |m| m.phone_number().cell_phone()),
            ("landline", |m| m.phone_number().landline()),
            ("international", |m| m.phone_number().international()),
        ],
    },
    CategoryFields {
        category: "company",
        fields: &[
            ("name", |m| m.company().name()),
            ("suffix", |m| m.company().suffix()),
            ("industry", |m| m.company().industry()),
            ("catch_phrase", |m| m.company().catch_phrase()),
        ],
    },
    CategoryFields {
        category: "code",
        fields: &[
            ("isbn", |m| m.code().isbn()),
            ("ean", |m| m.code().ean()),
            ("issn", |m| m.code().issn()),
            ("asin", |m| m.code().asin()),
        ],
    },
];

/// Look up one field's generator.
pub fn field(category: &str, field: &str) -> Option<FieldFn> {
    FIELD_REGISTRY
        .iter()
        .find(|entry| entry.category == category)?
        .fields
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, generate)| *generate)
}

/// Outcome of running one registered field.
#[derive(Debug)]
pub struct FieldSample {
    pub category: &'static str,
    pub field: &'static str,
    pub outcome: Result<String, GenerationError>,
}

/// Run every registered field, optionally restricted to one category.
///
/// Failures are collected per field so one missing locale table does not
/// hide the rest.
pub fn sample_all(mirage: &DataMirage, category: Option<&str>) -> Vec<FieldSample> {
    FIELD_REGISTRY
        .iter()
        .filter(|entry| category.is_none_or(|wanted| wanted == entry.category))
        .flat_map(|entry| {
            entry.fields.iter().map(move |&(field, generate)| FieldSample {
                category: entry.category,
                field,
                outcome: generate(mirage),
            })
        })
        .collect()
}
