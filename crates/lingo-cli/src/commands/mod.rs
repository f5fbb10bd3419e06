//! Command implementations

mod init;
mod pull;
mod push;
mod status;

pub use init::run_init;
pub use pull::{PullOptions, run_pull};
pub use push::{PushOptions, run_push};
pub use status::run_status;

use lingo_core::Resource;

use crate::error::{CliError, Result};

/// Resolve the user's resource selection against the configuration.
///
/// Patterns use glob syntax (`myproject.*`). Selection happens here, in
/// declaration order, before any core machinery runs; a pattern matching
/// nothing is a user error.
pub(crate) fn select_resources(
    configured: &[Resource],
    patterns: &[String],
) -> Result<Vec<usize>> {
    if patterns.is_empty() {
        return Ok((0..configured.len()).collect());
    }

    let mut selected = Vec::new();
    for pattern in patterns {
        let glob = globset::Glob::new(pattern)
            .map_err(|e| CliError::user(format!("Invalid resource pattern {pattern:?}: {e}")))?
            .compile_matcher();
        let mut found = false;
        for (index, resource) in configured.iter().enumerate() {
            if glob.is_match(resource.id.to_string()) {
                if !selected.contains(&index) {
                    selected.push(index);
                }
                found = true;
            }
        }
        if !found {
            return Err(CliError::user(format!(
                "Specified resource {pattern:?} does not exist"
            )));
        }
    }
    selected.sort_unstable();
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::ResourceId;
    use std::collections::BTreeMap;

    fn resources(names: &[&str]) -> Vec<Resource> {
        names
            .iter()
            .map(|name| Resource {
                id: ResourceId::parse(name).unwrap(),
                source_lang: "en".to_string(),
                file_filter: None,
                source_file: None,
                trans: BTreeMap::new(),
                minimum_perc: None,
                lang_map: BTreeMap::new(),
            })
            .collect()
    }

    #[test]
    fn empty_selection_means_everything() {
        let configured = resources(&["proj.a", "proj.b"]);
        assert_eq!(select_resources(&configured, &[]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn globs_match_resource_names() {
        let configured = resources(&["proj.core", "proj.help", "other.core"]);
        let selected =
            select_resources(&configured, &["proj.*".to_string()]).unwrap();
        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn unmatched_pattern_is_a_user_error() {
        let configured = resources(&["proj.core"]);
        assert!(select_resources(&configured, &["nope.*".to_string()]).is_err());
    }
}
