//! Hardware asset domain entities.

pub mod model;
pub mod status;

pub use model::{Asset, AssetFilter, CreateAsset, UpdateAsset};
pub use status::AssetStatus;
