//! YAML helpers: loading, partial updates and migration file inspection.

use indexmap::IndexSet;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Deserializes YAML from `reader` into any deserializable type.
///
/// Use `serde_yaml::Value` to get the untyped document.
pub fn yaml_load<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_yaml::from_reader(reader)?)
}

/// Merges `new_data` into a YAML file and writes it back in place.
///
/// With `main_key`, entries are merged into the mapping found under that
/// top-level key; otherwise into the top-level mapping. Merging is shallow:
/// existing keys are replaced and their position kept, new keys are appended.
///
/// # Errors
/// * `Error::ConfigError` if the document, or the `main_key` entry, is not a mapping
pub fn update_yml_file<P: AsRef<Path>>(
    path: P,
    new_data: serde_yaml::Mapping,
    main_key: Option<&str>,
) -> Result<()> {
    let path = path.as_ref();
    let mut data: serde_yaml::Value = yaml_load(fs::File::open(path)?)?;

    let target = match main_key {
        Some(key) => data.get_mut(key).ok_or_else(|| {
            Error::config(format!("'{}' has no top-level key '{key}'", path.display()))
        })?,
        None => &mut data,
    };
    let mapping = target.as_mapping_mut().ok_or_else(|| {
        Error::config(format!("cannot merge into a non-mapping value in '{}'", path.display()))
    })?;
    for (key, value) in new_data {
        mapping.insert(key, value);
    }

    debug!("Writing '{}'.", path.display());
    fs::write(path, indent_sequences(&serde_yaml::to_string(&data)?))?;
    Ok(())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Column of the content following any `- ` sequence markers of a line.
fn content_column(line: &str) -> usize {
    let mut column = indent_of(line);
    let mut rest = line.trim_start_matches(' ');
    while let Some(next) = rest.strip_prefix("- ") {
        column += 2;
        rest = next;
    }
    column
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

fn opens_block_scalar(content: &str) -> bool {
    ["|", "|-", "|+", ">", ">-", ">+"].iter().any(|marker| content.ends_with(marker))
}

/// Indents block sequences two columns under their parent key.
///
/// serde_yaml writes the dashes of a sequence at the column of the key owning
/// it; project files keep them one level deeper (`mapping=2, sequence=4,
/// offset=2` in ruamel terms).
fn indent_sequences(yaml: &str) -> String {
    // Column of each sequence being shifted.
    let mut shifted: Vec<usize> = Vec::new();
    let mut parent_key: Option<usize> = None;
    let mut scalar_from: Option<usize> = None;
    let mut out = String::with_capacity(yaml.len() + yaml.len() / 8);

    for line in yaml.lines() {
        let content = line.trim_start_matches(' ');
        if content.is_empty() {
            out.push('\n');
            continue;
        }
        let indent = indent_of(line);

        if let Some(column) = scalar_from {
            if indent > column {
                out.push_str(&" ".repeat(2 * shifted.len()));
                out.push_str(line);
                out.push('\n');
                continue;
            }
            scalar_from = None;
        }

        let item = is_sequence_item(content);
        while let Some(&column) = shifted.last() {
            if indent > column || (indent == column && item) {
                break;
            }
            shifted.pop();
        }
        if item && parent_key == Some(indent) {
            shifted.push(indent);
        }

        out.push_str(&" ".repeat(2 * shifted.len()));
        out.push_str(line);
        out.push('\n');

        parent_key = content.ends_with(':').then(|| content_column(line));
        if opens_block_scalar(content) {
            scalar_from = Some(indent);
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct MigrationFile {
    migration: Migration,
}

#[derive(Debug, Deserialize)]
struct Migration {
    versions: Vec<MigrationVersion>,
}

#[derive(Debug, Deserialize)]
struct MigrationVersion {
    #[serde(default)]
    addons: Option<Addons>,
}

#[derive(Debug, Deserialize)]
struct Addons {
    #[serde(default)]
    upgrade: Option<Vec<String>>,
}

/// Reads the migration file and gets the modules to upgrade, across all versions.
///
/// Versions without `addons` or `addons.upgrade` are skipped. Modules are
/// returned once each, in order of first appearance.
pub fn get_migration_file_modules<P: AsRef<Path>>(path: P) -> Result<IndexSet<String>> {
    let content: MigrationFile = yaml_load(fs::File::open(path.as_ref())?)?;
    let modules = content
        .migration
        .versions
        .into_iter()
        .filter_map(|version| version.addons.and_then(|addons| addons.upgrade))
        .flatten()
        .collect();
    Ok(modules)
}
