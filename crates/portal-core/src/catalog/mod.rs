//! Study catalog: typed categories, the filter predicates content views
//! apply, and the read-only catalog backend contract.

mod filter;
mod model;
mod repository;

pub use filter::{
    CatalogFilter, DifficultyBreakdown, Filterable, Selection, TextQuery, difficulty_breakdown,
    filter_items,
};
pub use model::{
    Branch, BranchEntry, Difficulty, ExamResource, PlacementCategory, PlacementQuestion,
    PlacementTopic, ResourceKind, Subject,
};
pub use repository::CatalogApi;
