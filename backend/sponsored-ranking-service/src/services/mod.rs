pub mod exposure;
pub mod rotation;

pub use exposure::{lead_exposure, ExposureReport};
pub use rotation::{
    elite_first_stable_sort, elite_first_stable_sort_by, fair_rotate_by, rank, RankingStrategy,
    RotationLayer, RotationSeed,
};
