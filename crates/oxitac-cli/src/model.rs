use chrono::{DateTime, Utc};
use oxitac_engine::encoding::NetworkEncoding;
use oxitac_network::NeuralNetwork;
use serde::{Deserialize, Serialize};

/// A trained network plus the metadata needed to use it: which game it
/// plays and when it was produced. Only the network's structural state is
/// persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub name: String,
    pub game: String,
    pub trained_at: DateTime<Utc>,
    pub network: NeuralNetwork,
}

impl TrainedModel {
    /// Checks that the stored network matches `G`'s feature encoding before
    /// it is asked to play.
    pub fn network_for<G>(&self) -> anyhow::Result<NeuralNetwork>
    where
        G: NetworkEncoding,
    {
        anyhow::ensure!(
            self.network.input_width() == G::INPUT_WIDTH,
            "model expects {} inputs but the game produces {}",
            self.network.input_width(),
            G::INPUT_WIDTH,
        );
        anyhow::ensure!(
            self.network.output_width() == G::OUTPUT_WIDTH,
            "model produces {} outputs but the game has {} move slots",
            self.network.output_width(),
            G::OUTPUT_WIDTH,
        );
        Ok(self.network.clone())
    }
}
