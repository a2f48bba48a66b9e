use crate::descriptors::extract_pocket_features;
use crate::error::Result;
use crate::fpocket::PocketDetection;
use crate::geometry::{centroid, parse_vertex_coordinates, write_site_artifacts};
use crate::model::ModelStore;
use crate::normalize::FeatureNormalizer;
use crate::scoring::{score_pockets, softmax};
use crate::selection::{select_top, SelectedPocket};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one prediction: the winning pocket, its centroid, and the
/// artifacts persisted next to the fpocket output.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub pocket: SelectedPocket,
    pub center: [f64; 3],
    pub site_file: PathBuf,
    pub center_file: PathBuf,
}

/// Ranks fpocket candidate pockets with a pre-trained linear model. The
/// model store and normalizer are loaded once and stay immutable, so one
/// predictor can serve any number of sequential predictions.
pub struct AllositePredictor {
    store: ModelStore,
    normalizer: FeatureNormalizer,
}

impl AllositePredictor {
    pub fn new(weights: &Path, labels: &Path, reference: &Path) -> Result<Self> {
        let store = ModelStore::load(weights, labels, reference)?;
        let normalizer = FeatureNormalizer::fit(store.reference())?;
        Ok(Self { store, normalizer })
    }

    /// Run pocket detection on a structure file, then rank the detected
    /// pockets. Any stage failure aborts the whole prediction.
    pub fn predict(&self, structure: &Path) -> Result<Prediction> {
        let detection = PocketDetection::run(structure)?;
        self.rank_pockets(&detection)
            .inspect_err(|e| error!("prediction failed for {}: {e}", structure.display()))
    }

    /// Rank the pockets of an existing detection output and persist the
    /// winning site and its centroid.
    pub fn rank_pockets(&self, detection: &PocketDetection) -> Result<Prediction> {
        let raw = extract_pocket_features(&detection.read_descriptors()?)?;
        let features = self.normalizer.transform(raw)?;
        let scores = score_pockets(&features, self.store.weights())?;
        let probabilities = softmax(&scores);
        let pocket = select_top(&probabilities)?;
        info!(
            "pocket {} selected with probability {:.4}",
            pocket.index, pocket.confidence
        );

        let vertex_file = detection.vertex_file(pocket.index)?;
        let vertex_contents = fs::read_to_string(&vertex_file)?;
        let center = centroid(&parse_vertex_coordinates(&vertex_contents)?)?;
        let (site_file, center_file) =
            write_site_artifacts(detection.output_dir(), &vertex_file, &vertex_contents, center)?;

        Ok(Prediction {
            pocket,
            center,
            site_file,
            center_file,
        })
    }
}
