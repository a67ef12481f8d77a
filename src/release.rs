//! Release helpers: version bumping through bumpversion and changelog
//! collation through towncrier.

use clap::ValueEnum;
use indexmap::IndexMap;
use log::debug;
use std::fmt;

use crate::constants::BUMPVERSION_SECTION;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, OutputMode};

/// Which part of the version to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseType::Major => write!(f, "major"),
            ReleaseType::Minor => write!(f, "minor"),
            ReleaseType::Patch => write!(f, "patch"),
        }
    }
}

/// Sections of an INI document, each an ordered map of options.
pub type IniSections = IndexMap<String, IndexMap<String, String>>;

/// Parses INI content the way Python's `configparser` reads bumpversion files.
///
/// Option names are lowercased, `=` and `:` both separate names from values and
/// lines starting with `#` or `;` are comments. A line indented deeper than the
/// option before it continues that option's value; blank lines inside a value
/// are kept, trailing ones dropped.
///
/// # Errors
/// * `Error::ConfigError` for options outside a section, lines without a
///   delimiter and duplicated sections or options
pub fn parse_ini(content: &str) -> Result<IniSections> {
    let mut sections = IniSections::new();
    let mut section: Option<String> = None;
    let mut option: Option<String> = None;
    let mut indent_level = 0;

    for (idx, raw) in content.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.is_empty() {
            if let (Some(sect), Some(opt)) = (&section, &option) {
                if let Some(value) = sections.get_mut(sect).and_then(|s| s.get_mut(opt)) {
                    value.push('\n');
                }
            }
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        if let (true, Some(sect), Some(opt)) = (indent > indent_level, &section, &option) {
            if let Some(value) = sections.get_mut(sect).and_then(|s| s.get_mut(opt)) {
                value.push('\n');
                value.push_str(line);
            }
            continue;
        }
        indent_level = indent;

        if line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].to_string();
            if sections.contains_key(&name) {
                return Err(Error::config(format!("line {lineno}: duplicate section [{name}]")));
            }
            sections.insert(name.clone(), IndexMap::new());
            section = Some(name);
            option = None;
            continue;
        }

        let Some(sect) = &section else {
            return Err(Error::config(format!(
                "line {lineno}: file contains no section headers: {raw:?}"
            )));
        };
        let Some(pos) = line.find(['=', ':']) else {
            return Err(Error::config(format!("line {lineno}: cannot parse {raw:?}")));
        };
        let key = line[..pos].trim().to_lowercase();
        let value = line[pos + 1..].trim().to_string();
        let entries = sections.entry(sect.clone()).or_default();
        if entries.contains_key(&key) {
            return Err(Error::config(format!(
                "line {lineno}: duplicate option '{key}' in section [{sect}]"
            )));
        }
        entries.insert(key.clone(), value);
        option = Some(key);
    }

    for value in sections.values_mut().flat_map(|options| options.values_mut()) {
        value.truncate(value.trim_end().len());
    }
    Ok(sections)
}

/// Parses bumpversion configuration, restoring the `[bumpversion]` header
/// that `--dry-run --list` strips from its output.
pub fn parse_bumpversion_cfg(content: &str) -> Result<IniSections> {
    let header = format!("[{BUMPVERSION_SECTION}]");
    if content.contains(&header) {
        parse_ini(content)
    } else {
        parse_ini(&format!("{header}\n{content}"))
    }
}

/// Extracts `new_version` from the output of a bumpversion dry run.
pub fn parse_new_version(output: &str) -> Result<String> {
    let cfg = parse_bumpversion_cfg(output)?;
    cfg.get(BUMPVERSION_SECTION)
        .and_then(|section| section.get("new_version"))
        .cloned()
        .ok_or_else(|| {
            Error::config(format!("no option 'new_version' in section [{BUMPVERSION_SECTION}]"))
        })
}

/// Builds the bumpversion command line. The release type is always the last word.
pub fn build_bump_command(
    rel_type: ReleaseType,
    new_version: Option<&str>,
    dry_run: bool,
) -> String {
    let mut cmd = vec!["bumpversion".to_string()];
    if let Some(version) = new_version.filter(|v| !v.is_empty()) {
        cmd.push(format!("--new-version {version}"));
    }
    if dry_run {
        cmd.push("--dry-run --list".to_string());
    }
    cmd.push(rel_type.to_string());
    cmd.join(" ")
}

pub fn build_changelog_command(version: &str) -> String {
    format!("towncrier build --yes --version={version}")
}

/// Options of the `bump` command.
#[derive(Debug, Clone)]
pub struct BumpOptions {
    pub rel_type: ReleaseType,
    pub new_version: Option<String>,
    pub dry_run: bool,
    pub commit: bool,
}

/// Runs bumpversion. On a dry run, returns (and prints) the version it would set.
pub fn bump(runner: &dyn CommandRunner, options: &BumpOptions) -> Result<Option<String>> {
    let cmd = build_bump_command(options.rel_type, options.new_version.as_deref(), options.dry_run);
    println!("Running: {cmd}");
    let output = runner.run(&cmd, OutputMode::Echo)?;

    if options.commit {
        debug!("--commit given; committing is not handled by bump.");
    }

    if !options.dry_run {
        return Ok(None);
    }
    let new_version = parse_new_version(&output)?;
    println!("New version: {new_version}");
    Ok(Some(new_version))
}

/// Collates the pending changelog entries for `version`.
pub fn changelog(runner: &dyn CommandRunner, version: &str) -> Result<()> {
    let cmd = build_changelog_command(version);
    println!("Running: {cmd}");
    runner.run(&cmd, OutputMode::Echo)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_display() {
        assert_eq!(ReleaseType::Major.to_string(), "major");
        assert_eq!(ReleaseType::Minor.to_string(), "minor");
        assert_eq!(ReleaseType::Patch.to_string(), "patch");
    }

    #[test]
    fn test_parse_ini_continuation_and_comments() {
        let content = "[bumpversion]\n# comment\nfiles =\n    odoo/VERSION\n    setup.py\nCommit: False\n";
        let cfg = parse_ini(content).unwrap();
        let section = &cfg["bumpversion"];
        assert_eq!(section["files"], "\nodoo/VERSION\nsetup.py");
        assert_eq!(section["commit"], "False");
    }

    #[test]
    fn test_parse_ini_same_indent_is_a_new_option() {
        let cfg = parse_ini("[bumpversion]\n  current_version=1.2.2\n  new_version=1.2.3\n").unwrap();
        assert_eq!(cfg["bumpversion"]["current_version"], "1.2.2");
        assert_eq!(cfg["bumpversion"]["new_version"], "1.2.3");
    }

    #[test]
    fn test_parse_ini_keeps_blank_lines_in_values() {
        let content = "[bumpversion]\nmessage = Bump\n\n  to {new_version}\n\n\nnew_version = 1.2.3\n";
        let cfg = parse_ini(content).unwrap();
        assert_eq!(cfg["bumpversion"]["message"], "Bump\n\nto {new_version}");
        assert_eq!(cfg["bumpversion"]["new_version"], "1.2.3");
    }

    #[test]
    fn test_parse_ini_rejects_duplicates() {
        assert!(parse_ini("[a]\nx = 1\nx = 2\n").is_err());
        assert!(parse_ini("[a]\n[a]\n").is_err());
    }

    #[test]
    fn test_parse_ini_requires_section() {
        assert!(parse_ini("x = 1\n").is_err());
    }
}
