pub mod aggregate;
pub mod classifier;
pub mod engine;
pub mod fees;
pub mod normalize;
pub mod registry;

pub use crate::domain::model::{ClassifiedPublication, CostSummary, PublicationRecord};
pub use crate::domain::ports::{AuthorDirectory, PublicationSource, Storage};
pub use crate::utils::error::Result;
