//! Localized menu labels, save messages and the accelerator keys derived from them.
//!
//! Strings live in a TOML file:
//!
//! ```toml
//! menu = ["(M)ode", "(L)ine", "(N)ext", "(P)rev", "Erase (A)ll",
//!         "Erase (S)lide", "Erase (T)races", "Sa(v)e", "(Q)uit"]
//!
//! [save]
//! success = "Blackboard saved to %s"
//! failure = "Could not save %s"
//! ```
//!
//! Labels bind to menu commands in order. The character following `(` in a
//! label is that command's accelerator key.

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::{Command, MENU_COMMANDS};

/// Placeholder replaced by the file name in save messages.
pub const FILE_PLACEHOLDER: &str = "%s";

/// Errors raised while loading or validating a strings file.
#[derive(Debug, Error)]
pub enum StringsError {
    #[error("failed to read strings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse strings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("menu has no labels")]
    EmptyMenu,
    #[error("menu has {0} labels but only {max} commands exist", max = MENU_COMMANDS.len())]
    TooManyLabels(usize),
    #[error("menu label '{0}' has no '(X)' accelerator marker")]
    MissingAccelerator(String),
    #[error("accelerator key '{key}' is used by both {first:?} and {second:?}")]
    DuplicateAccelerator {
        key: char,
        first: Command,
        second: Command,
    },
    #[error("save message '{0}' does not contain '%s'")]
    MissingPlaceholder(String),
}

/// A menu label split around its accelerator character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLabel {
    pub before: String,
    pub accelerator: char,
    pub after: String,
}

impl MenuLabel {
    /// Splits `"Erase (A)ll"` into `"Erase "`, `'A'`, `"ll"`.
    pub fn parse(label: &str) -> Result<Self, StringsError> {
        let missing = || StringsError::MissingAccelerator(label.to_string());
        let (before, rest) = label.split_once('(').ok_or_else(missing)?;
        let mut chars = rest.chars();
        let accelerator = chars
            .next()
            .filter(|c| *c != ')' && !c.is_control())
            .ok_or_else(missing)?;
        let after = chars.as_str().strip_prefix(')').ok_or_else(missing)?;
        Ok(Self {
            before: before.to_string(),
            accelerator,
            after: after.to_string(),
        })
    }
}

/// Messages shown after a save attempt.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SaveMessages {
    pub success: String,
    pub failure: String,
}

impl SaveMessages {
    /// Substitutes `file` into the success or failure template.
    pub fn render(&self, succeeded: bool, file: &str) -> String {
        let template = if succeeded {
            &self.success
        } else {
            &self.failure
        };
        template.replacen(FILE_PLACEHOLDER, file, 1)
    }
}

/// Maps accelerator keys (case-insensitive) to commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceleratorTable {
    map: HashMap<char, Command>,
}

impl AcceleratorTable {
    /// Builds the table from labels bound in menu order, rejecting duplicates.
    pub fn build(labels: &[MenuLabel]) -> Result<Self, StringsError> {
        let mut map = HashMap::new();
        for (label, &command) in labels.iter().zip(MENU_COMMANDS.iter()) {
            let key = normalize(label.accelerator);
            if let Some(existing) = map.insert(key, command) {
                return Err(StringsError::DuplicateAccelerator {
                    key: label.accelerator,
                    first: existing,
                    second: command,
                });
            }
        }
        Ok(Self { map })
    }

    pub fn lookup(&self, key: char) -> Option<Command> {
        self.map.get(&normalize(key)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn normalize(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[derive(Debug, Deserialize)]
struct StringsFile {
    menu: Vec<String>,
    save: SaveMessages,
}

/// Validated localization strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    labels: Vec<MenuLabel>,
    save: SaveMessages,
    accelerators: AcceleratorTable,
}

#[cfg(test)]
const DEFAULT_STRINGS: &str = r#"
menu = ["(M)ode", "(L)ine", "(N)ext", "(P)rev", "Erase (A)ll",
        "Erase (S)lide", "Erase (T)races", "Sa(v)e", "(Q)uit"]

[save]
success = "Blackboard saved to %s"
failure = "Could not save %s"
"#;

const DEFAULT_LABELS: [(&str, char, &str); 9] = [
    ("", 'M', "ode"),
    ("", 'L', "ine"),
    ("", 'N', "ext"),
    ("", 'P', "rev"),
    ("Erase ", 'A', "ll"),
    ("Erase ", 'S', "lide"),
    ("Erase ", 'T', "races"),
    ("Sa", 'v', "e"),
    ("", 'Q', "uit"),
];

impl Default for Strings {
    fn default() -> Self {
        let labels: Vec<MenuLabel> = DEFAULT_LABELS
            .iter()
            .map(|&(before, accelerator, after)| MenuLabel {
                before: before.to_string(),
                accelerator,
                after: after.to_string(),
            })
            .collect();
        let map = labels
            .iter()
            .zip(MENU_COMMANDS.iter())
            .map(|(label, &command)| (normalize(label.accelerator), command))
            .collect();
        Self {
            labels,
            save: SaveMessages {
                success: "Blackboard saved to %s".to_string(),
                failure: "Could not save %s".to_string(),
            },
            accelerators: AcceleratorTable { map },
        }
    }
}

impl Strings {
    /// Reads and validates a strings file.
    pub fn load_from(path: &Path) -> Result<Self, StringsError> {
        let content = fs::read_to_string(path).map_err(|source| StringsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let strings = Self::parse(&content, path)?;
        info!("Loaded strings from {}", path.display());
        Ok(strings)
    }

    /// Parses and validates strings from TOML text.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, StringsError> {
        let file: StringsFile = toml::from_str(content).map_err(|source| StringsError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        if file.menu.is_empty() {
            return Err(StringsError::EmptyMenu);
        }
        if file.menu.len() > MENU_COMMANDS.len() {
            return Err(StringsError::TooManyLabels(file.menu.len()));
        }
        for template in [&file.save.success, &file.save.failure] {
            if !template.contains(FILE_PLACEHOLDER) {
                return Err(StringsError::MissingPlaceholder(template.clone()));
            }
        }

        let labels = file
            .menu
            .iter()
            .map(|label| MenuLabel::parse(label))
            .collect::<Result<Vec<_>, _>>()?;
        let accelerators = AcceleratorTable::build(&labels)?;
        debug!("{} menu labels, {} accelerators", labels.len(), accelerators.len());

        Ok(Self {
            labels,
            save: file.save,
            accelerators,
        })
    }

    pub fn labels(&self) -> &[MenuLabel] {
        &self.labels
    }

    pub fn save_messages(&self) -> &SaveMessages {
        &self.save
    }

    pub fn accelerators(&self) -> &AcceleratorTable {
        &self.accelerators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Strings, StringsError> {
        Strings::parse(content, Path::new("test.toml"))
    }

    #[test]
    fn default_strings_cover_every_command() {
        let strings = Strings::default();
        assert_eq!(strings.labels().len(), MENU_COMMANDS.len());
        assert_eq!(strings.accelerators().len(), MENU_COMMANDS.len());
        assert_eq!(strings.accelerators().lookup('m'), Some(Command::ToggleMode));
        assert_eq!(strings.accelerators().lookup('V'), Some(Command::Save));
    }

    #[test]
    fn label_parsing_splits_around_accelerator() {
        let label = MenuLabel::parse("Erase (A)ll").unwrap();
        assert_eq!(label.before, "Erase ");
        assert_eq!(label.accelerator, 'A');
        assert_eq!(label.after, "ll");
    }

    #[test]
    fn accented_accelerators_match_either_case() {
        let strings = parse(
            r#"
menu = ["M(ö)d", "(É)paisseur"]
[save]
success = "ok %s"
failure = "bad %s"
"#,
        )
        .unwrap();
        assert_eq!(strings.accelerators().lookup('Ö'), Some(Command::ToggleMode));
        assert_eq!(strings.accelerators().lookup('é'), Some(Command::LineCharacteristics));
    }

    #[test]
    fn label_without_marker_is_rejected() {
        assert!(matches!(
            MenuLabel::parse("Quit"),
            Err(StringsError::MissingAccelerator(_))
        ));
        assert!(MenuLabel::parse("()uit").is_err());
        assert!(MenuLabel::parse("(Qu)it").is_err());
        assert!(MenuLabel::parse("(\t)ab").is_err());
    }

    #[test]
    fn duplicate_accelerators_are_rejected() {
        let err = parse(
            r#"
menu = ["(M)ode", "(m)enu"]
[save]
success = "ok %s"
failure = "bad %s"
"#,
        )
        .unwrap_err();
        match err {
            StringsError::DuplicateAccelerator { first, second, .. } => {
                assert_eq!(first, Command::ToggleMode);
                assert_eq!(second, Command::LineCharacteristics);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn save_templates_need_placeholder() {
        let err = parse(
            r#"
menu = ["(M)ode"]
[save]
success = "saved"
failure = "bad %s"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, StringsError::MissingPlaceholder(_)));
    }

    #[test]
    fn both_save_templates_are_required() {
        let err = parse(
            r#"
menu = ["(M)ode"]
[save]
success = "saved %s"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, StringsError::Parse { .. }));
    }

    #[test]
    fn too_many_labels_are_rejected() {
        let err = parse(
            r#"
menu = ["(a)", "(b)", "(c)", "(d)", "(e)", "(f)", "(g)", "(h)", "(i)", "(j)"]
[save]
success = "%s"
failure = "%s"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, StringsError::TooManyLabels(10)));
    }

    #[test]
    fn shorter_menus_bind_leading_commands() {
        let strings = parse(
            r#"
menu = ["(D)ibujar", "(C)olor"]
[save]
success = "Guardado %s"
failure = "Error %s"
"#,
        )
        .unwrap();
        assert_eq!(strings.accelerators().lookup('c'), Some(Command::LineCharacteristics));
        assert_eq!(strings.accelerators().lookup('q'), None);
    }

    #[test]
    fn render_substitutes_file_name() {
        let messages = Strings::default().save_messages().clone();
        assert_eq!(
            messages.render(false, "saved_03.pnm"),
            "Could not save saved_03.pnm"
        );
        assert!(messages.render(true, "x").ends_with('x'));
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.toml");
        fs::write(&path, DEFAULT_STRINGS).unwrap();
        assert_eq!(Strings::load_from(&path).unwrap(), Strings::default());
    }
}
