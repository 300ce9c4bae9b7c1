use crate::is_newly_added;
use crate::owner::Owner;
use jobdeck_engine::Facet;
use jobdeck_engine::Record;
use jobdeck_engine::SortMethod;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Fields addressable by `FilterCriteria::search` on companies.
pub const COMPANY_SEARCH_FIELDS: &[&str] = &["name", "location", "industry"];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

/// Company profile as served by the collection API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub size: Option<CompanySize>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub employees: i64,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub market_position: Option<String>,
    #[serde(default)]
    pub market_focus: Option<String>,
    #[serde(default)]
    pub created_by: Option<Owner>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for `POST /companies`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CompanySize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub employees: i64,
    pub technologies: Vec<String>,
}

/// Partial payload for `PUT /companies/edit/{id}`; unset fields stay
/// unchanged.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CompanySize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

impl Record for Company {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn search_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "location" => Some(&self.location),
            "industry" => self.industry.as_deref(),
            _ => None,
        }
    }

    fn range_value(&self) -> Option<i64> {
        Some(self.employees)
    }

    fn compare(method: SortMethod, a: &Self, b: &Self) -> Option<Ordering> {
        match method {
            SortMethod::NameAsc => Some(compare_names(a, b)),
            SortMethod::NameDesc => Some(compare_names(b, a)),
            SortMethod::RatingDesc => Some(b.rating.total_cmp(&a.rating)),
            SortMethod::Newest => Some(b.created_at.cmp(&a.created_at)),
            SortMethod::Oldest => Some(a.created_at.cmp(&b.created_at)),
            SortMethod::SalaryAsc
            | SortMethod::SalaryDesc
            | SortMethod::TitleAsc
            | SortMethod::TitleDesc => None,
        }
    }
}

fn compare_names(a: &Company, b: &Company) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Facet table for the companies listing.
pub static COMPANY_FACETS: &[Facet<Company>] = &[
    Facet::new("top_rated", top_rated),
    Facet::new("newly_added", newly_added),
    Facet::new("small", |company| has_size(company, CompanySize::Small)),
    Facet::new("medium", |company| has_size(company, CompanySize::Medium)),
    Facet::new("large", |company| has_size(company, CompanySize::Large)),
];

fn top_rated(company: &Company) -> bool {
    company.rating >= 4.0
}

fn newly_added(company: &Company) -> bool {
    is_newly_added(company.created_at, OffsetDateTime::now_utc())
}

fn has_size(company: &Company, size: CompanySize) -> bool {
    company.size == Some(size)
}
