use anyhow::{anyhow, Result};
use std::str::FromStr;

/// The recognized option flags. `Medoid` takes no value and switches the
/// mode-seeking variant; `Verbose` takes no value and increments a counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opt {
    Medoid,
    Verbose,
}

impl FromStr for Opt {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("medoid") {
            Ok(Self::Medoid)
        } else if s.eq_ignore_ascii_case("verbose") {
            Ok(Self::Verbose)
        } else {
            Err(())
        }
    }
}

pub struct Parameters {
    pub sigma: f64,
    pub tau: Option<f64>,
    pub medoid: bool,
    pub verbose: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            tau: None,
            medoid: false,
            verbose: 0,
        }
    }
}

impl Parameters {
    /// Tau falls back to three sigma when not explicitly supplied.
    pub fn effective_tau(&self) -> f64 {
        self.tau.unwrap_or(3.0 * self.sigma)
    }

    pub fn mode(&self) -> &'static str {
        if self.medoid {
            "medoid"
        } else {
            "quick"
        }
    }

    pub fn apply_flags<S: AsRef<str>>(&mut self, flags: &[S]) -> Result<()> {
        for flag in flags {
            let opt = Opt::from_str(flag.as_ref())
                .map_err(|()| anyhow!("unknown option {:?}.", flag.as_ref()))?;
            match opt {
                Opt::Medoid => self.medoid = true,
                Opt::Verbose => self.verbose += 1,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tau_defaults_to_three_sigma() {
        let parameters = Parameters {
            sigma: 2.5,
            ..Parameters::default()
        };
        assert_eq!(7.5, parameters.effective_tau());

        let parameters = Parameters {
            sigma: 2.5,
            tau: Some(4.0),
            ..Parameters::default()
        };
        assert_eq!(4.0, parameters.effective_tau());
    }

    #[test]
    fn test_medoid_flag_switches_mode() {
        let mut parameters = Parameters::default();
        assert_eq!("quick", parameters.mode());

        parameters.apply_flags(&["Medoid"]).unwrap();
        assert_eq!("medoid", parameters.mode());
    }

    #[test]
    fn test_verbose_flag_increments() {
        let mut parameters = Parameters::default();
        parameters.apply_flags(&["Verbose", "verbose"]).unwrap();
        assert_eq!(2, parameters.verbose);
        assert!(!parameters.medoid);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let mut parameters = Parameters::default();
        assert!(parameters.apply_flags(&["Fast"]).is_err());
    }
}
