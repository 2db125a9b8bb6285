//! YAML run configuration for the workload generator.
//!
//! A run configuration looks like this:
//!
//! ```yaml
//! corpus: dest_ips.txt
//! output: out/ip
//! seed: 42
//! name_policy: random_token
//! policy:
//!   rotation:
//!     rotate_every: 20000
//!     get_every: 2000
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::workload::{NamePolicy, Policy};

/// One generation run, deserialized from YAML.
#[derive(Debug, Deserialize)]
pub struct GenerateConfig {
    /// Plain-text address list, one per line.
    pub corpus: PathBuf,

    /// Output file, or file prefix in rotation mode. Runs without an
    /// output print instructions to stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Fixed RNG seed; drawn from entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Route name assignment for generated PUTs.
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub name_policy: NamePolicy,

    /// Interleaving of PUTs and GETs.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub policy: Policy,
}

impl GenerateConfig {
    /// Rejects parameter combinations under which generation is
    /// undefined, before any file is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_paired_run() {
        let yaml = r#"
corpus: dest_ips.txt
policy:
  paired:
    put_probability: 0.5
    pairs: 20
"#;
        let config: GenerateConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert!(config.output.is_none());
        assert!(matches!(config.name_policy, NamePolicy::Fixed(ref name) if name == "Name"));
        let Policy::Paired {
            get_probability,
            put_probability,
            pairs,
        } = config.policy
        else {
            panic!("expected a paired policy");
        };
        assert_eq!(get_probability, 1.0);
        assert_eq!(put_probability, 0.5);
        assert_eq!(pairs, 20);
    }

    #[test]
    fn parses_a_ratio_filtered_run() {
        let yaml = r#"
corpus: dest_ips_100.txt
output: out.out
name_policy: random_token
policy:
  ratio_filtered:
    write_factor: 10
"#;
        let config: GenerateConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert!(matches!(config.name_policy, NamePolicy::RandomToken));
        assert!(matches!(
            config.policy,
            Policy::RatioFiltered { write_factor: 10 }
        ));
    }

    #[test]
    fn parses_a_rotation_run_with_defaults() {
        let yaml = r#"
corpus: dest_ips.txt
output: ip
seed: 7
name_policy:
  indexed:
    prefix: "IP:"
policy:
  rotation: {}
"#;
        let config: GenerateConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.seed, Some(7));
        assert!(matches!(
            config.policy,
            Policy::Rotation {
                rotate_every: 20_000,
                get_every: 2_000,
            }
        ));
    }

    #[test]
    fn validation_surfaces_bad_parameters() {
        let yaml = r#"
corpus: dest_ips.txt
policy:
  rotation:
    rotate_every: 0
"#;
        let config: GenerateConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRotation)));
    }
}
