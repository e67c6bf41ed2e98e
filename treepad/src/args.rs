//! Command line parsing

use services_search::SearchScope;
use std::path::PathBuf;
use thiserror::Error;

/// Command line error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid scope: {0} (expected node, all or subtree)")]
    InvalidScope(String),

    #[error("Missing outline file")]
    MissingFile,

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("--replace requires --find")]
    ReplaceWithoutFind,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(CliOptions),
}

/// Options for one run against an outline file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub file: PathBuf,
    pub find: Option<String>,
    /// With `find`: replace every match and save
    pub replace: Option<String>,
    /// Falls back to `search.scope` from settings
    pub scope: Option<SearchScope>,
    /// Title of the node to select before searching
    pub select: Option<String>,
    pub match_case: bool,
    pub whole_word: bool,
    pub use_regex: bool,
    /// Overrides `codec.encoding`
    pub encoding: Option<String>,
    /// JSON settings overrides file
    pub settings: Option<PathBuf>,
    pub dump: bool,
}

/// Parse `args` (including the program name at index 0)
pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut options = CliOptions::default();
    let mut file = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--find" | "-f" => {
                options.find = Some(value(args, &mut i, "--find")?);
            }
            "--replace" | "-r" => {
                options.replace = Some(value(args, &mut i, "--replace")?);
            }
            "--scope" => {
                let scope = value(args, &mut i, "--scope")?;
                options.scope = Some(
                    scope
                        .parse()
                        .map_err(|_| CliError::InvalidScope(scope.clone()))?,
                );
            }
            "--select" => {
                options.select = Some(value(args, &mut i, "--select")?);
            }
            "--encoding" => {
                options.encoding = Some(value(args, &mut i, "--encoding")?);
            }
            "--settings" => {
                options.settings = Some(PathBuf::from(value(args, &mut i, "--settings")?));
            }
            "--match-case" => options.match_case = true,
            "--whole-word" => options.whole_word = true,
            "--regex" => options.use_regex = true,
            "--dump" => options.dump = true,
            "--help" | "-h" => return Ok(Invocation::Help),
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if file.is_some() {
                    return Err(CliError::UnexpectedArgument(other.to_string()));
                }
                file = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    if options.replace.is_some() && options.find.is_none() {
        return Err(CliError::ReplaceWithoutFind);
    }
    options.file = file.ok_or(CliError::MissingFile)?;
    Ok(Invocation::Run(options))
}

fn value(args: &[String], i: &mut usize, flag: &'static str) -> Result<String, CliError> {
    *i += 1;
    args.get(*i).cloned().ok_or(CliError::MissingValue(flag))
}

/// Usage text for `program`
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS] <FILE>

Options:
  -f, --find <TEXT>        List every match, starting at the selection
  -r, --replace <TEXT>     With --find: replace all matches and save
  --scope <SCOPE>          node, all or subtree (default from settings)
  --select <TITLE>         Select the first node with this title
  --match-case             Case-sensitive matching
  --whole-word             Match whole words only
  --regex                  Treat the query as a regular expression
  --encoding <LABEL>       File encoding (default utf-8)
  --settings <JSON>        Settings overrides file
  --dump                   Print the outline as indented titles
  -h, --help               Show this help message

Examples:
  {program} notes.hjt --dump
  {program} notes.hjt --find todo --scope all
  {program} notes.hjt --find colour --replace color --scope all"
    )
}
