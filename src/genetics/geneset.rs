use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// A genome: weights in [0, 1], decoded by [`crate::neural::Network`].
///
/// Construction from raw values checks the range, and so does
/// deserialization, so a loaded snapshot can never hold an invalid gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct GeneSet(Vec<f32>);

impl GeneSet {
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self((0..len).map(|_| rng.random::<f32>()).collect())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn genes(&self) -> &[f32] {
        &self.0
    }

    /// A child as long as the longer parent. Up to the shorter parent's
    /// length each gene comes from either parent with equal odds; the
    /// remainder is fresh.
    pub fn cross<R: Rng>(&self, partner: &Self, rng: &mut R) -> Self {
        let (short, long) = if self.len() < partner.len() {
            (self, partner)
        } else {
            (partner, self)
        };
        let mut child = Self::random(long.len(), rng);
        child
            .0
            .iter_mut()
            .zip(short.0.iter().zip(long.0.iter()))
            .for_each(|(gene, (s, l))| *gene = if rng.random_bool(0.5) { *s } else { *l });
        child
    }

    /// Redraws each gene independently with probability `rate`.
    pub fn mutate<R: Rng>(&mut self, rate: f32, rng: &mut R) {
        let rate = rate.clamp(0., 1.) as f64;
        for gene in self.0.iter_mut() {
            if rng.random_bool(rate) {
                *gene = rng.random::<f32>();
            }
        }
    }
}

/// Vec<f32> isomorphism, checked
impl TryFrom<Vec<f32>> for GeneSet {
    type Error = anyhow::Error;
    fn try_from(genes: Vec<f32>) -> Result<Self, Self::Error> {
        match genes.iter().position(|g| !(0. ..=1.).contains(g)) {
            Some(i) => Err(anyhow::anyhow!("gene {} not within [0,1]: {}", i, genes[i])),
            None => Ok(Self(genes)),
        }
    }
}
impl From<GeneSet> for Vec<f32> {
    fn from(genes: GeneSet) -> Self {
        genes.0
    }
}
