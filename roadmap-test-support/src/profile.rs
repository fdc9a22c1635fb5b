//! Property-test run profile read from the environment.
//!
//! Lets CI raise or lower the number of generated graphs per property without
//! touching the suites themselves.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PBT_CASES_ENV_KEY: &str = "ROADMAP_PBT_CASES";

/// Resolved property-test settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to `default_cases` when the variable is
    /// unset or unparsable.
    ///
    /// # Examples
    /// ```
    /// use roadmap_test_support::profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(PBT_CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    key = PBT_CASES_ENV_KEY,
                    value = raw.as_str(),
                    reason = reason.as_str(),
                    "ignoring invalid property-test override"
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("16", 16)]
    #[case(" 256 ", 256)]
    fn parse_cases_accepts_positive_integers(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_cases(raw), Ok(expected));
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-3")]
    #[case::word("many")]
    fn parse_cases_rejects_invalid_values(#[case] raw: &str) {
        assert!(parse_cases(raw).is_err());
    }
}
