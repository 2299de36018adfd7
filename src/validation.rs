use crate::selection::Selection;

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Check the selected entries for values the user still has to provide.
///
/// Nothing here blocks generation; the warnings are advisory.
#[must_use]
pub fn validate_selections(selections: &[Selection]) -> ValidationResult {
    let mut warnings = Vec::new();

    for selection in selections.iter().filter(|selection| selection.selected) {
        validate_required_env(selection, &mut warnings);
        validate_override_keys(selection, &mut warnings);
    }

    ValidationResult { warnings }
}

/// Required variables whose merged value is empty or missing
fn validate_required_env(selection: &Selection, warnings: &mut Vec<String>) {
    let env = selection.merged_env();

    for var in selection.entry.required_env_vars() {
        let missing = env.get(&var.name).map_or(true, String::is_empty);
        if missing {
            warnings.push(format!(
                "'{}' requires {} but no value is set",
                selection.id(),
                var.name
            ));
        }
    }
}

/// Override keys the entry never declared in `env`
fn validate_override_keys(selection: &Selection, warnings: &mut Vec<String>) {
    for key in selection.env_values.keys() {
        if !selection.entry.env.contains_key(key) {
            warnings.push(format!(
                "'{}' does not declare {}; the override is passed through as is",
                selection.id(),
                key
            ));
        }
    }
}
