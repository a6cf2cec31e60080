use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Id,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// One-decimal score as text, e.g. "4.8"
    pub rating: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeamMember {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub rating: String,
    pub skills: Vec<String>,
}

impl NewTeamMember {
    pub fn into_team_member(self, id: Id) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            rating: self.rating,
            skills: self.skills,
        }
    }
}
