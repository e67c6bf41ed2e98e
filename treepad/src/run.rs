//! One command line run against an outline file

use crate::args::CliOptions;
use log::debug;
use note_tree::DocumentTree;
use services_notebook::{FsNotebookIo, Notebook, NotebookError, NotebookSettings};
use services_search::{Match, SearchOptions, SearchScope};
use services_settings::persistence::deserialize_overrides;
use services_settings::{create_default_registry, keys, SettingValue, SettingsError};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Run error
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Notebook(#[from] NotebookError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to read settings file {}: {source}", .path.display())]
    SettingsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No node titled {0:?}")]
    NoSuchNode(String),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

/// Run result
pub type RunResult<T> = Result<T, RunError>;

/// Build notebook settings from defaults, the settings file and flags
pub fn load_settings(options: &CliOptions) -> RunResult<NotebookSettings> {
    let mut registry = create_default_registry();

    if let Some(path) = &options.settings {
        let bytes = fs::read(path).map_err(|source| RunError::SettingsFile {
            path: path.clone(),
            source,
        })?;
        deserialize_overrides(&bytes)?.apply_to(&mut registry)?;
        debug!("applied settings from {}", path.display());
    }
    if let Some(label) = &options.encoding {
        registry.set_override(keys::CODEC_ENCODING, SettingValue::String(label.clone()))?;
    }

    Ok(NotebookSettings::from_registry(&registry)?)
}

/// Open the file, then select, search or replace, and dump as requested
pub fn run<W: Write>(options: &CliOptions, out: &mut W) -> RunResult<()> {
    let settings = load_settings(options)?;
    let scope = options.scope.unwrap_or(settings.search_scope);
    let defaults = settings.search_options;
    let search = SearchOptions::new()
        .match_case(defaults.match_case || options.match_case)
        .whole_word(defaults.whole_word || options.whole_word)
        .use_regex(defaults.use_regex || options.use_regex);

    let mut notebook = Notebook::with_io(FsNotebookIo, settings);
    notebook.open(&options.file)?;

    if let Some(title) = &options.select {
        let node = notebook
            .find_by_title(title)
            .ok_or_else(|| RunError::NoSuchNode(title.clone()))?;
        notebook.select(Some(node))?;
    }

    match (&options.find, &options.replace) {
        (Some(query), Some(replacement)) => {
            let count = notebook.replace_all(query, replacement, scope, search)?;
            writeln!(out, "Replaced {} occurrence(s)", count)?;
            if notebook.needs_save_prompt() {
                notebook.save()?;
                writeln!(out, "Saved {}", options.file.display())?;
            }
        }
        (Some(query), None) => list_matches(&mut notebook, query, scope, search, out)?,
        _ => {}
    }

    if options.dump {
        dump(notebook.tree(), out)?;
    }
    Ok(())
}

/// Print successive matches until the search comes back to the first one
fn list_matches<W: Write>(
    notebook: &mut Notebook,
    query: &str,
    scope: SearchScope,
    search: SearchOptions,
    out: &mut W,
) -> RunResult<()> {
    let mut first: Option<Match> = None;
    let mut count = 0;

    while let Some(found) = notebook.find_next(query, scope, search)? {
        if first == Some(found) {
            break;
        }
        first.get_or_insert(found);
        count += 1;

        let tree = notebook.tree();
        let title = tree.title(found.node).unwrap_or_default();
        let content = tree.content(found.node).unwrap_or_default();
        writeln!(
            out,
            "{}:{}: {}",
            title,
            found.offset,
            line_around(content, found.offset)
        )?;
    }

    match count {
        0 => writeln!(out, "No matches")?,
        1 => writeln!(out, "1 match")?,
        n => writeln!(out, "{} matches", n)?,
    }
    Ok(())
}

/// The line of `content` containing byte `offset`, without its terminator
fn line_around(content: &str, offset: usize) -> &str {
    let offset = offset.min(content.len());
    let start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);
    content[start..end].trim_end_matches('\r')
}

/// Print titles in traversal order, two spaces per level
pub fn dump<W: Write>(tree: &DocumentTree, out: &mut W) -> io::Result<()> {
    for node in tree.pre_order() {
        writeln!(out, "{}{}", "  ".repeat(node.depth()), node.title())?;
    }
    Ok(())
}
