//! API endpoint groups.

pub mod catalog;
pub mod characters;
pub mod generation;
pub mod job_sets;

pub use catalog::CatalogApi;
pub use characters::CharactersApi;
pub use generation::GenerationApi;
pub use job_sets::JobSetsApi;
