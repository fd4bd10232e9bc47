use serde::{Deserialize, Serialize};

use crate::model::ids::ClubId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub groups: Vec<ClubGroup>,
}

/// A training group inside a club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubGroup {
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_load: u32,
    #[serde(default)]
    pub trainers: Vec<String>,
}

impl ClubGroup {
    #[must_use]
    pub fn free_places(&self) -> Option<u32> {
        self.capacity
            .map(|capacity| capacity.saturating_sub(self.current_load))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubMember {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// A club together with its roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubDetail {
    #[serde(flatten)]
    pub club: Club,
    #[serde(default)]
    pub members: Vec<ClubMember>,
}

impl ClubDetail {
    /// Members enrolled in the named group.
    pub fn members_of<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a ClubMember> + 'a {
        self.members
            .iter()
            .filter(move |member| member.group.as_deref() == Some(group))
    }
}
