//! Error display for the CLI.

use colored::Colorize;
use entity_tags::TagError;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<TagError>().map(hint) {
        eprintln!("\n{}", hint.yellow());
    }
}

/// Suggest a fix for a rejected tag.
fn hint(err: &TagError) -> String {
    match err {
        TagError::Format { .. } => {
            "Hint: Tags look like `machine-0` or `unit-mysql-0`.".to_string()
        }
        TagError::UnsupportedKind { .. } => {
            "Hint: Run `tagctl kinds` to list the supported kinds.".to_string()
        }
        TagError::Invalid { kind, .. } => {
            format!("Hint: Check the id against the {kind} grammar (`tagctl kinds`).")
        }
    }
}

#[cfg(test)]
mod tests {
    use entity_tags::parse_tag;

    use super::*;

    #[test]
    fn hint_depends_on_error_variant() {
        let format = parse_tag("bogus").unwrap_err();
        assert!(hint(&format).contains("machine-0"));

        let unsupported = parse_tag("frobnicate-1").unwrap_err();
        assert!(hint(&unsupported).contains("tagctl kinds"));

        let invalid = parse_tag("machine-x").unwrap_err();
        assert!(hint(&invalid).contains("machine grammar"));
    }
}
