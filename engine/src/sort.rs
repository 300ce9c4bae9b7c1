use serde::Deserialize;
use serde::Serialize;

/// Sort methods across both entity kinds. Each entity supplies comparators
/// for the subset that is meaningful for it; the rest keep the stored order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    NameAsc,
    NameDesc,
    RatingDesc,
    Newest,
    Oldest,
    SalaryDesc,
    SalaryAsc,
    TitleAsc,
    TitleDesc,
}

impl Default for SortMethod {
    fn default() -> Self {
        Self::Newest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SortMethod::SalaryDesc).unwrap();
        assert_eq!(json, r#""salary_desc""#);
        let parsed: SortMethod = serde_json::from_str(r#""name_asc""#).unwrap();
        assert_eq!(parsed, SortMethod::NameAsc);
    }
}

