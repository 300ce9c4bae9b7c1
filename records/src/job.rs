use crate::is_newly_added;
use crate::owner::Owner;
use jobdeck_engine::Facet;
use jobdeck_engine::Record;
use jobdeck_engine::SortMethod;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Fields addressable by `FilterCriteria::search` on jobs.
pub const JOB_SEARCH_FIELDS: &[&str] = &["title", "location"];

/// Job posting as served by the collection API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub salary: i64,
    #[serde(default)]
    pub salary_type: Option<String>,
    #[serde(default)]
    pub negotiable: bool,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_by: Option<Owner>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for `POST /jobs`. The server owns generated fields such as the id
/// and the creation time.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
}

/// Partial payload for `PUT /jobs/edit/{id}`; unset fields stay unchanged.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl Record for Job {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn search_field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "location" => Some(&self.location),
            _ => None,
        }
    }

    fn range_value(&self) -> Option<i64> {
        Some(self.salary)
    }

    fn compare(method: SortMethod, a: &Self, b: &Self) -> Option<Ordering> {
        match method {
            SortMethod::TitleAsc => Some(compare_titles(a, b)),
            SortMethod::TitleDesc => Some(compare_titles(b, a)),
            SortMethod::SalaryAsc => Some(a.salary.cmp(&b.salary)),
            SortMethod::SalaryDesc => Some(b.salary.cmp(&a.salary)),
            SortMethod::RatingDesc => Some(rating_of(b).total_cmp(&rating_of(a))),
            SortMethod::Newest => Some(b.created_at.cmp(&a.created_at)),
            SortMethod::Oldest => Some(a.created_at.cmp(&b.created_at)),
            SortMethod::NameAsc | SortMethod::NameDesc => None,
        }
    }
}

fn compare_titles(a: &Job, b: &Job) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn rating_of(job: &Job) -> f64 {
    job.rating.unwrap_or(0.0)
}

/// Facet table for the jobs listing, matching the filter panel of the
/// browsing client.
pub static JOB_FACETS: &[Facet<Job>] = &[
    Facet::new("top_rated", top_rated),
    Facet::new("newly_added", newly_added),
    Facet::new("full_time", |job| has_job_type(job, "Full Time")),
    Facet::new("part_time", |job| has_job_type(job, "Part Time")),
    Facet::new("contract", |job| has_job_type(job, "Contract")),
    Facet::new("remote", |job| has_job_type(job, "Remote")),
    Facet::new("full_stack", |job| has_tag(job, "Full Stack")),
    Facet::new("frontend", |job| has_tag(job, "Frontend")),
    Facet::new("backend", |job| has_tag(job, "Backend")),
    Facet::new("dev_ops", |job| has_tag(job, "DevOps")),
    Facet::new("ui_ux", |job| has_tag(job, "UI/UX")),
];

fn top_rated(job: &Job) -> bool {
    rating_of(job) >= 4.0
}

fn newly_added(job: &Job) -> bool {
    is_newly_added(job.created_at, OffsetDateTime::now_utc())
}

fn has_job_type(job: &Job, label: &str) -> bool {
    job.job_type.iter().any(|entry| entry == label)
}

fn has_tag(job: &Job, label: &str) -> bool {
    job.tags.iter().any(|entry| entry == label)
}
