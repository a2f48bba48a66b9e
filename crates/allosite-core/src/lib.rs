//! # allosite-core
//!
//! A library for ranking candidate binding pockets on a protein structure
//! and picking the most probable allosteric site.
//!
//! __allosite-core__ provides functionality for:
//! * Loading a pickled weight ensemble and consolidating it into one scoring vector
//! * Normalizing fpocket descriptor features against a fitted reference distribution
//! * Turning linear pocket scores into a probability distribution via a stable softmax
//! * Extracting and persisting the winning pocket's centroid from its vertex records
//!
//! The main entry point is the [`AllositePredictor`] struct, which owns the
//! fitted model state and runs the whole pipeline per structure file.
//!
mod descriptors;
mod error;
mod fpocket;
mod geometry;
mod model;
mod normalize;
mod predictor;
mod scoring;
mod selection;

pub use self::descriptors::{extract_pocket_features, POCKET_FEATURE_COUNT};
pub use self::error::{PredictError, Result};
pub use self::fpocket::PocketDetection;
pub use self::geometry::{centroid, parse_vertex_coordinates, write_site_artifacts};
pub use self::model::ModelStore;
pub use self::normalize::{FeatureInput, FeatureNormalizer};
pub use self::predictor::{AllositePredictor, Prediction};
pub use self::scoring::{score_pockets, softmax};
pub use self::selection::{select_top, SelectedPocket};
