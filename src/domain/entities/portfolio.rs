//! Portfolio content documents as stored in the headless CMS.
//!
//! Documents arrive with camelCase keys and `_id`/`_ref` system fields; they
//! serialize back out in snake_case. Image references are kept for resolution
//! but never serialized; the resolved `*_url` fields are.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Reference to an image asset: `{ "asset": { "_ref": "image-..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct About {
    pub bio: String,
    pub title: String,
    pub location: String,
    pub social_links: Vec<String>,
    #[serde(skip_serializing)]
    pub profile_picture: Option<ImageRef>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Skill {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub category: String,
    pub skills: Vec<String>,
    pub proficiency: f64,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Experience {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub role: String,
    pub company: String,
    pub start_date: Option<NaiveDate>,
    /// `None` for a current position.
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub technologies: Vec<String>,
    pub remote: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Education {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub percentage: Option<f64>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Project {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Source repository.
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    pub featured: bool,
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub image: Option<ImageRef>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Tool {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub name: String,
    pub description: String,
    pub usage: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct ContactInfo {
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub phone: String,
    pub portfolio_url: String,
}

/// Everything the full portfolio page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Portfolio {
    pub about: Option<About>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub tools: Vec<Tool>,
    pub contact: Option<ContactInfo>,
}

/// Selection applied to the project list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Only featured projects, at most [`ProjectFilter::FEATURED_LIMIT`].
    pub featured_only: bool,
}

impl ProjectFilter {
    pub const FEATURED_LIMIT: usize = 3;

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching = projects.iter().filter(|project| {
            needle
                .as_deref()
                .is_none_or(|needle| project.title.to_lowercase().contains(needle))
        });

        if self.featured_only {
            matching
                .filter(|project| project.featured)
                .take(Self::FEATURED_LIMIT)
                .cloned()
                .collect()
        } else {
            matching.cloned().collect()
        }
    }
}
