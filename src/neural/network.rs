use crate::HIDDEN_WIDTH;
use crate::INPUT_WIDTH;
use crate::OUTPUT_WIDTH;
use crate::Signal;
use crate::genetics::GeneSet;
use rand::Rng;

/// Layer widths of a single-hidden-layer network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            inputs: INPUT_WIDTH,
            hidden: HIDDEN_WIDTH,
            outputs: OUTPUT_WIDTH,
        }
    }
}

/// Fully connected feed-forward network with sigmoid activations.
///
/// Each neuron owns one weight per input plus a bias, stored row-major:
/// every hidden row, then every output row. A gene `g` becomes the weight
/// `2g - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layout: Layout,
    weights: Vec<Signal>,
}

impl Network {
    /// Genes needed to wire `layout`.
    pub fn genome_len(layout: Layout) -> usize {
        (layout.inputs + 1) * layout.hidden + (layout.hidden + 1) * layout.outputs
    }
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let layout = Layout::default();
        let ref genes = GeneSet::random(Self::genome_len(layout), rng);
        Self::wire(layout, genes)
    }
    /// Builds a network from the first `genome_len(layout)` genes.
    pub fn new(layout: Layout, genes: &GeneSet) -> anyhow::Result<Self> {
        let needed = Self::genome_len(layout);
        if genes.len() < needed {
            return Err(anyhow::anyhow!(
                "genome too short: {} genes, {} needed",
                genes.len(),
                needed
            ));
        }
        Ok(Self::wire(layout, genes))
    }
    fn wire(layout: Layout, genes: &GeneSet) -> Self {
        let weights = genes
            .genes()
            .iter()
            .take(Self::genome_len(layout))
            .map(|g| 2. * g - 1.)
            .collect();
        Self { layout, weights }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Propagates `inputs` through the network. Missing inputs read as 0,
    /// extra ones are ignored.
    pub fn pulse(&self, inputs: &[Signal]) -> Vec<Signal> {
        let Layout {
            inputs: n,
            hidden: h,
            ..
        } = self.layout;
        let (hidden, output) = self.weights.split_at((n + 1) * h);
        let ref padded = (0..n)
            .map(|i| inputs.get(i).copied().unwrap_or_default())
            .collect::<Vec<_>>();
        let ref activations = layer(hidden, n, padded);
        layer(output, h, activations)
    }
}

/// One dense layer: each row is `width` weights followed by a bias.
fn layer(weights: &[Signal], width: usize, inputs: &[Signal]) -> Vec<Signal> {
    weights
        .chunks_exact(width + 1)
        .map(|row| {
            let (w, bias) = row.split_at(width);
            w.iter().zip(inputs).map(|(w, x)| w * x).sum::<Signal>() + bias[0]
        })
        .map(sigmoid)
        .collect()
}

fn sigmoid(x: Signal) -> Signal {
    1. / (1. + (-x).exp())
}
