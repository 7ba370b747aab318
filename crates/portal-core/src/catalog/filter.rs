//! Local search and category predicates over catalog lists.

use std::str::FromStr;

use serde::Serialize;

use super::model::{Branch, Difficulty, ExamResource, PlacementQuestion, ResourceKind};

/// "All" or one specific value of a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// An item without the field only matches `All`.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.trim().parse().map(Selection::Only)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// Case-insensitive substring query. A blank query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: impl AsRef<str>) -> Self {
        Self {
            needle: query.as_ref().trim().to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.is_blank() || text.to_lowercase().contains(&self.needle)
    }

    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_blank() || fields.into_iter().any(|field| self.matches(field))
    }
}

/// An item a [`CatalogFilter`] can be applied to.
pub trait Filterable {
    /// Fields searched by the text query.
    fn text_fields(&self) -> Vec<&str>;

    fn difficulty(&self) -> Option<Difficulty> {
        None
    }

    fn branch(&self) -> Option<Branch> {
        None
    }

    fn resource_kind(&self) -> Option<ResourceKind> {
        None
    }
}

impl Filterable for PlacementQuestion {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.question.as_str(), self.subtopic.as_str()]
    }

    fn difficulty(&self) -> Option<Difficulty> {
        Some(self.difficulty)
    }
}

impl Filterable for ExamResource {
    fn text_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.subject.as_str()];
        if let Some(preview) = &self.preview {
            fields.push(preview.as_str());
        }
        fields
    }

    fn branch(&self) -> Option<Branch> {
        Some(self.branch)
    }

    fn resource_kind(&self) -> Option<ResourceKind> {
        Some(self.kind)
    }
}

/// Conjunction of a text query and categorical selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: TextQuery,
    pub difficulty: Selection<Difficulty>,
    pub branch: Selection<Branch>,
    pub kind: Selection<ResourceKind>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        self.query = TextQuery::new(query);
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<Selection<Difficulty>>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<Selection<Branch>>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<Selection<ResourceKind>>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.difficulty.matches(item.difficulty().as_ref())
            && self.branch.matches(item.branch().as_ref())
            && self.kind.matches(item.resource_kind().as_ref())
            && self.query.matches_any(item.text_fields())
    }
}

/// Items matching `filter`, in their original order.
pub fn filter_items<'a, T: Filterable>(items: &'a [T], filter: &CatalogFilter) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(*item)).collect()
}

/// Per-difficulty counts shown under a filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

pub fn difficulty_breakdown<T: Filterable>(items: &[&T]) -> DifficultyBreakdown {
    items
        .iter()
        .fold(DifficultyBreakdown::default(), |mut acc, item| {
            acc.total += 1;
            match item.difficulty() {
                Some(Difficulty::Easy) => acc.easy += 1,
                Some(Difficulty::Medium) => acc.medium += 1,
                Some(Difficulty::Hard) => acc.hard += 1,
                None => {}
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, text: &str, subtopic: &str, difficulty: Difficulty) -> PlacementQuestion {
        PlacementQuestion {
            id: id.to_string(),
            question: text.to_string(),
            difficulty,
            topic: "arrays".to_string(),
            subtopic: subtopic.to_string(),
            links: None,
        }
    }

    fn resource(id: &str, title: &str, branch: Branch, kind: ResourceKind) -> ExamResource {
        ExamResource {
            id: id.to_string(),
            title: title.to_string(),
            subject: String::new(),
            branch,
            kind,
            download_url: None,
            preview: None,
        }
    }

    fn questions() -> Vec<PlacementQuestion> {
        vec![
            question("1", "Two Sum", "hashing", Difficulty::Easy),
            question("2", "Longest Substring Without Repeats", "sliding-window", Difficulty::Medium),
            question("3", "Median of Two Sorted Arrays", "binary-search", Difficulty::Hard),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_all_text_fields() {
        let items = questions();
        let by_name = filter_items(&items, &CatalogFilter::new().with_query("two SUM"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "1");

        let by_subtopic = filter_items(&items, &CatalogFilter::new().with_query("WINDOW"));
        assert_eq!(by_subtopic.len(), 1);
        assert_eq!(by_subtopic[0].id, "2");
    }

    #[test]
    fn blank_query_and_all_selection_keep_everything() {
        let items = questions();
        let filter = CatalogFilter::new().with_query("   ");
        assert_eq!(filter_items(&items, &filter).len(), 3);
    }

    #[test]
    fn search_and_difficulty_combine() {
        let items = questions();
        let filter = CatalogFilter::new()
            .with_query("two")
            .with_difficulty(Some(Difficulty::Hard));
        let matched = filter_items(&items, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "3");
    }

    #[test]
    fn branch_and_kind_select_exam_material() {
        let items = vec![
            resource("1", "Data Structures Fundamentals", Branch::Cse, ResourceKind::Notes),
            resource("2", "Operating Systems - PYQ 2023", Branch::Cse, ResourceKind::Pyq),
            resource("3", "Thermodynamics", Branch::Me, ResourceKind::Notes),
        ];

        let filter = CatalogFilter::new()
            .with_branch(Selection::All)
            .with_kind(Some(ResourceKind::Notes));
        let ids: Vec<_> = filter_items(&items, &filter).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let filter = CatalogFilter::new()
            .with_branch(Some(Branch::Eee))
            .with_kind(Some(ResourceKind::Notes));
        assert!(filter_items(&items, &filter).is_empty());
    }

    #[test]
    fn category_selection_excludes_items_without_the_field() {
        let items = vec![resource("1", "Notes", Branch::Cse, ResourceKind::Notes)];
        let filter = CatalogFilter::new().with_difficulty(Some(Difficulty::Easy));
        assert!(filter_items(&items, &filter).is_empty());
    }

    #[test]
    fn selection_parses_all() {
        assert_eq!("All".parse::<Selection<Difficulty>>().unwrap(), Selection::All);
        assert_eq!(
            "medium".parse::<Selection<Difficulty>>().unwrap(),
            Selection::Only(Difficulty::Medium)
        );
        assert!("unknown".parse::<Selection<Difficulty>>().is_err());
    }

    #[test]
    fn breakdown_counts_filtered_items() {
        let items = questions();
        let matched = filter_items(&items, &CatalogFilter::new());
        let breakdown = difficulty_breakdown(&matched);
        assert_eq!(
            breakdown,
            DifficultyBreakdown {
                total: 3,
                easy: 1,
                medium: 1,
                hard: 1
            }
        );
    }
}
