use serde::Deserialize;
use serde::Serialize;

/// Creator reference as the API serves it: a bare user id on freshly created
/// records, or a populated profile on listing responses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Owner {
    Id(String),
    Profile(OwnerProfile),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Owner {
    pub fn id(&self) -> &str {
        match self {
            Owner::Id(id) => id,
            Owner::Profile(profile) => &profile.id,
        }
    }
}
