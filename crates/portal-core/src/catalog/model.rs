//! Catalog entities and their categorical fields.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Question or topic difficulty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Hard")]
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Engineering branch used to group exam material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Branch {
    Cse,
    Ece,
    Me,
    Ce,
    Eee,
}

impl Branch {
    pub fn label(self) -> &'static str {
        match self {
            Branch::Cse => "Computer Science",
            Branch::Ece => "Electronics and Communication",
            Branch::Me => "Mechanical",
            Branch::Ce => "Civil",
            Branch::Eee => "Electrical and Electronics",
        }
    }
}

/// Kind of exam material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceKind {
    Notes,
    /// Previous-year questions.
    #[serde(alias = "pyqs")]
    #[strum(to_string = "pyq", serialize = "pyqs")]
    Pyq,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Notes => "Notes",
            ResourceKind::Pyq => "Previous Year Questions",
        }
    }
}

/// Placement preparation track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlacementCategory {
    Aptitude,
    Dsa,
    Interview,
}

impl PlacementCategory {
    /// Track a practice topic slug belongs to.
    ///
    /// Unknown slugs fall into the data-structures track, which owns the
    /// open-ended topic list.
    pub fn for_topic(topic: &str) -> Self {
        match topic {
            "lr" | "quantitative" | "verbal" => PlacementCategory::Aptitude,
            "behavioral" | "system-design" | "hr-round" => PlacementCategory::Interview,
            _ => PlacementCategory::Dsa,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlacementCategory::Aptitude => "Aptitude",
            PlacementCategory::Dsa => "Data Structures & Algorithms",
            PlacementCategory::Interview => "Interview Preparation",
        }
    }
}

/// `GET /examprep/branches` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub branch_name: String,
}

/// `GET /examprep/branch/sem/{branch}/{sem}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(alias = "_id")]
    pub id: String,
    pub subject_name: String,
    pub subject_code: String,
}

/// Downloadable exam material (notes or previous-year questions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResource {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    pub branch: Branch,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

/// `GET /placementprep/topics` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTopic {
    #[serde(alias = "_id")]
    pub id: String,
    pub topic_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /placementprep/topics/{topic}/{subtopic}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementQuestion {
    #[serde(alias = "_id")]
    pub id: String,
    pub question: String,
    pub difficulty: Difficulty,
    pub topic: String,
    pub subtopic: String,
    #[serde(default)]
    pub links: Option<Vec<String>>,
}

impl PlacementQuestion {
    pub fn links(&self) -> &[String] {
        self.links.as_deref().unwrap_or_default()
    }

    pub fn category(&self) -> PlacementCategory {
        PlacementCategory::for_topic(&self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn difficulty_accepts_both_spellings() {
        let d: Difficulty = serde_json::from_str(r#""medium""#).unwrap();
        assert_eq!(d, Difficulty::Medium);
        let d: Difficulty = serde_json::from_str(r#""Hard""#).unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn branch_round_trips_through_display() {
        for branch in Branch::iter() {
            assert_eq!(branch.to_string().parse::<Branch>().unwrap(), branch);
        }
        assert_eq!(Branch::Cse.to_string(), "CSE");
    }

    #[test]
    fn resource_kind_accepts_plural_pyq() {
        assert_eq!("pyqs".parse::<ResourceKind>().unwrap(), ResourceKind::Pyq);
        let kind: ResourceKind = serde_json::from_str(r#""pyqs""#).unwrap();
        assert_eq!(kind, ResourceKind::Pyq);
    }

    #[test]
    fn topics_map_to_tracks() {
        assert_eq!(PlacementCategory::for_topic("verbal"), PlacementCategory::Aptitude);
        assert_eq!(PlacementCategory::for_topic("hr-round"), PlacementCategory::Interview);
        assert_eq!(PlacementCategory::for_topic("graphs"), PlacementCategory::Dsa);
    }

    #[test]
    fn missing_links_render_as_empty() {
        let question: PlacementQuestion = serde_json::from_str(
            r#"{"_id":"q1","question":"Two Sum","difficulty":"easy","topic":"arrays","subtopic":"two-pointers"}"#,
        )
        .unwrap();
        assert!(question.links().is_empty());
        assert_eq!(question.category(), PlacementCategory::Dsa);
    }
}
