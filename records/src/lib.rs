pub mod company;
pub mod job;
pub mod owner;

pub use company::Company;
pub use company::CompanyDraft;
pub use company::CompanyPatch;
pub use company::CompanySize;
pub use company::COMPANY_FACETS;
pub use company::COMPANY_SEARCH_FIELDS;
pub use job::Job;
pub use job::JobDraft;
pub use job::JobPatch;
pub use job::JOB_FACETS;
pub use job::JOB_SEARCH_FIELDS;
pub use owner::Owner;
pub use owner::OwnerProfile;

use time::Duration;
use time::OffsetDateTime;

/// Window within which a record counts as newly added.
pub(crate) const NEWLY_ADDED_WINDOW: Duration = Duration::days(30);

pub(crate) fn is_newly_added(created_at: OffsetDateTime, now: OffsetDateTime) -> bool {
    now - created_at <= NEWLY_ADDED_WINDOW
}
