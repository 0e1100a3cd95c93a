pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::RankingServiceError;
pub use models::{RankableItem, SortKey, Tier};
pub use services::{
    elite_first_stable_sort, lead_exposure, rank, ExposureReport, RankingStrategy,
    RotationLayer, RotationSeed,
};
pub use state::AppState;
