//! TOML profiles overriding the model's prior constants.

use anyhow::{Context, Result};
use povsynth_core::Priors;
use std::fs;
use std::path::Path;

/// Load priors from `profile`, or the built-in defaults when none is given.
///
/// Keys missing from the profile keep their defaults; unknown keys are an
/// error so that typos do not silently fall back.
pub fn load_priors(profile: Option<&Path>) -> Result<Priors> {
    let Some(path) = profile else {
        return Ok(Priors::default());
    };
    let src = fs::read_to_string(path).with_context(|| format!("read profile {}", path.display()))?;
    parse_priors(&src).with_context(|| format!("parse profile {}", path.display()))
}

/// Parse priors from TOML text.
pub fn parse_priors(src: &str) -> Result<Priors> {
    toml::from_str(src).context("parse profile toml")
}
