//! Tuning file loading.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use reef_defence_core::Tuning;

/// Reads and validates the tuning file at `path`, or returns the defaults.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        log::info!("no tuning file given, using built-in defaults");
        return Ok(Tuning::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file at {}", path.display()))?;
    let tuning = parse_tuning(&contents)
        .with_context(|| format!("invalid tuning file at {}", path.display()))?;
    log::info!("loaded tuning from {}", path.display());
    Ok(tuning)
}

fn parse_tuning(contents: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(contents).context("failed to parse tuning toml")?;
    tuning.validate()?;
    Ok(tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_path_yields_defaults() {
        let tuning = load_tuning(None).expect("defaults always load");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn overrides_are_applied_on_top_of_defaults() {
        let tuning = parse_tuning("[economy]\nstarting_food = 99\n").expect("valid tuning");
        assert_eq!(tuning.economy.starting_food, 99);
        assert_eq!(tuning.map, Tuning::default().map);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = parse_tuning("[map]\nrows = 0\n").expect_err("empty grid is invalid");
        assert!(error.to_string().contains("at least one tile"), "{error}");
    }

    #[test]
    fn unreadable_files_name_the_path() {
        let path = PathBuf::from("does/not/exist.toml");
        let error = load_tuning(Some(&path)).expect_err("file is missing");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }

    #[test]
    fn bundled_tuning_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/tuning.toml");
        let tuning = load_tuning(Some(&path)).expect("bundled tuning loads");
        assert_eq!(tuning, Tuning::default());
    }
}
