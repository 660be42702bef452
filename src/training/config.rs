use crate::neural::Layout;
use serde::Deserialize;
use serde::Serialize;

/// Parameters of a training run. Defaults come from the crate constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub population: usize,
    pub matches: usize,
    pub generations: usize,
    pub survivors: f32,
    pub mutation: f32,
    pub hidden: usize,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population: crate::POPULATION_SIZE,
            matches: crate::MATCHES_PER_MEMBER,
            generations: crate::GENERATIONS,
            survivors: crate::SURVIVOR_FRACTION,
            mutation: crate::MUTATION_RATE,
            hidden: crate::HIDDEN_WIDTH,
            seed: 0,
        }
    }
}

impl Config {
    pub fn layout(&self) -> Layout {
        Layout {
            hidden: self.hidden,
            ..Layout::default()
        }
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.population < 2 {
            return Err(anyhow::anyhow!("population needs at least 2 members, got {}", self.population));
        }
        if self.matches == 0 {
            return Err(anyhow::anyhow!("each member must play at least one match"));
        }
        if self.hidden == 0 {
            return Err(anyhow::anyhow!("hidden layer needs at least one neuron"));
        }
        if !(0. ..=1.).contains(&self.survivors) || self.survivors == 0. {
            return Err(anyhow::anyhow!("survivor fraction not within (0,1]: {}", self.survivors));
        }
        if !(0. ..=1.).contains(&self.mutation) {
            return Err(anyhow::anyhow!("mutation rate not within [0,1]: {}", self.mutation));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(Config::default().layout(), Layout::default());
    }

    #[test]
    fn rejects_bad_fractions() {
        let config = Config {
            survivors: 0.,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        let config = Config {
            mutation: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        let config = Config {
            population: 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = serde_json::from_str::<Config>(r#"{"population": 8}"#).unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.matches, crate::MATCHES_PER_MEMBER);
    }
}
