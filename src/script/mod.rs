//! A line-oriented command language driving a list of JSON values.
//!
//! ```text
//! from [3, 1, 2]
//! push_back 4
//! sort
//! map double
//! print          # 2 -> 4 -> 6 -> 8 -> /
//! ```

use std::cmp::Ordering;
use std::fs;
use std::num::IntErrorKind;
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use thiserror::Error;

use crate::config::{ConfigError, ListConfig};
use crate::error::{ListError, Result};
use crate::json::{self, kind_of};
use crate::list::List;

pub mod callbacks;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// A command failed; `outputs` holds what the earlier lines produced.
    #[error("line {line}: `{command}`: {source}")]
    Command {
        line: usize,
        command: String,
        outputs: Vec<String>,
        #[source]
        source: ListError,
    },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Interpreter state: the current list, settings and the shuffle RNG.
pub struct Session {
    list: List<Value>,
    config: ListConfig,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl Session {
    pub fn new(config: ListConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session {
            list: List::new(),
            config,
            rng,
        }
    }

    pub fn list(&self) -> &List<Value> {
        &self.list
    }

    /// Runs every line, collecting outputs; stops at the first failure.
    pub fn run(&mut self, script: &str) -> std::result::Result<Vec<String>, ScriptError> {
        let mut outputs = Vec::new();
        for (index, line) in script.lines().enumerate() {
            match self.execute(line) {
                Ok(Some(output)) => outputs.push(output),
                Ok(None) => {}
                Err(source) => {
                    return Err(ScriptError::Command {
                        line: index + 1,
                        command: line.trim().to_string(),
                        outputs,
                        source,
                    })
                }
            }
        }
        Ok(outputs)
    }

    pub fn run_file(&mut self, path: &Path) -> std::result::Result<Vec<String>, ScriptError> {
        let script = fs::read_to_string(path)?;
        self.run(&script)
    }

    /// Executes one command. Blank lines and `#` comments yield `None`, as do
    /// commands that only change the list.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>> {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            return Ok(None);
        }
        debug!("executing `{line}`");

        let (command, argument) = split_word(line);
        match command {
            "new" => {
                self.list = List::new();
                Ok(None)
            }
            "from" => {
                let source = parse_json(command, required_value(command, argument)?)?;
                self.list = List::from_json(source)?;
                Ok(None)
            }
            "push_front" => {
                let value = parse_json(command, required_value(command, argument)?)?;
                self.list.push_front(value);
                Ok(None)
            }
            "push_back" => {
                let value = parse_json(command, required_value(command, argument)?)?;
                self.list.push_back(value);
                Ok(None)
            }
            "insert" => {
                let (position, value) = split_word(required_value(command, argument)?);
                let position = self.position(command, position)?;
                let value = parse_json(command, required_value(command, value)?)?;
                self.list.insert_at(value, position)?;
                Ok(None)
            }
            "pop_front" => Ok(Some(self.list.pop_front()?.to_string())),
            "pop_back" => Ok(Some(self.list.pop_back()?.to_string())),
            "remove" => {
                let position = self.position(command, required_value(command, argument)?)?;
                Ok(Some(self.list.remove_at(position)?.to_string()))
            }
            "front" => Ok(Some(self.list.front()?.to_string())),
            "back" => Ok(Some(self.list.back()?.to_string())),
            "at" => {
                let position = self.position(command, required_value(command, argument)?)?;
                Ok(Some(self.list.at(position)?.to_string()))
            }
            "len" => Ok(Some(self.list.len().to_string())),
            "sort" => {
                match argument {
                    None | Some("asc") => self.list.sort_json(),
                    Some("desc") => self
                        .list
                        .sort_by(|left, right| json::compare(left, right) == Some(Ordering::Less)),
                    Some(other) => {
                        return Err(ListError::invalid_argument(
                            command,
                            format!("expected 'asc' or 'desc', got '{other}'"),
                        ))
                    }
                }
                Ok(None)
            }
            "shuffle" => {
                let depth = match argument {
                    Some(text) => text.parse::<usize>().map_err(|err| {
                        ListError::invalid_argument(command, format!("depth '{text}': {err}"))
                    })?,
                    None => self.config.shuffle_depth,
                };
                self.list.shuffle_with(&mut self.rng, depth);
                Ok(None)
            }
            "for_each" => {
                let action = callbacks::action(required_callback(command, argument)?)?;
                let mut lines = Vec::with_capacity(self.list.len());
                let mut failure = None;
                self.list.for_each(|value, index| {
                    if failure.is_none() {
                        match action(value, index) {
                            Ok(line) => lines.push(line),
                            Err(err) => failure = Some(err),
                        }
                    }
                });
                if let Some(err) = failure {
                    return Err(err);
                }
                Ok((!lines.is_empty()).then(|| lines.join("\n")))
            }
            "map" => {
                let transform = callbacks::transform(required_callback(command, argument)?)?;
                self.list = self.list.try_map(|value, _| transform(value))?;
                Ok(None)
            }
            "filter" => {
                let predicate = callbacks::predicate(required_callback(command, argument)?)?;
                self.list = self.list.filter(|value| predicate(value));
                Ok(None)
            }
            "reduce" => {
                let (name, initial) = split_word(required_callback(command, argument)?);
                let reducer = callbacks::reducer(name)?;
                let initial = match initial {
                    Some(text) => parse_json(command, text)?,
                    None => Value::from(0),
                };
                let result = self.list.try_reduce(initial, |acc, value| reducer(acc, value))?;
                Ok(Some(result.to_string()))
            }
            "find" => {
                let predicate = callbacks::predicate(required_callback(command, argument)?)?;
                let found = match self.list.find(|value, _| predicate(value)) {
                    Some((index, value)) => format!("{index}: {value}"),
                    None => "not found".to_string(),
                };
                Ok(Some(found))
            }
            "includes" => {
                let target = parse_json(command, required_value(command, argument)?)?;
                Ok(Some(self.list.includes(&target).to_string()))
            }
            "some" => {
                let predicate = callbacks::predicate(required_callback(command, argument)?)?;
                Ok(Some(self.list.some(|value| predicate(value)).to_string()))
            }
            "every" => {
                let predicate = callbacks::predicate(required_callback(command, argument)?)?;
                Ok(Some(self.list.every(|value| predicate(value)).to_string()))
            }
            "concat" => {
                let other = parse_json(command, required_value(command, argument)?)?;
                if !other.is_array() {
                    return Err(ListError::type_mismatch(command, "an array", kind_of(&other)));
                }
                let other = List::from_json(other)?;
                self.list = self.list.concat(&other);
                Ok(None)
            }
            "reverse" => {
                self.list = self.list.reverse();
                Ok(None)
            }
            "join" => {
                // A JSON string literal or, failing that, the raw text.
                let parsed = argument.map(|text| (text, serde_json::from_str::<Value>(text)));
                let delimiter = match parsed {
                    Some((_, Ok(Value::String(delimiter)))) => delimiter,
                    Some((_, Ok(other))) => {
                        return Err(ListError::type_mismatch(command, "a string", kind_of(&other)))
                    }
                    Some((text, Err(_))) => text.to_string(),
                    None => self.config.delimiter.clone(),
                };
                Ok(Some(self.list.join(&delimiter)?))
            }
            "print" => Ok(Some(self.list.to_arrow_string_with(&self.config.print)?)),
            "show" => Ok(Some(serde_json::to_string(&self.list)?)),
            other => Err(ListError::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }

    /// Parses a position; negative or oversized numbers are reported as out
    /// of range, anything non-numeric as an invalid argument.
    fn position(&self, command: &str, text: &str) -> Result<usize> {
        let out_of_range = |position| ListError::OutOfRange {
            position,
            len: self.list.len(),
        };
        let position = match text.parse::<isize>() {
            Ok(position) => position,
            Err(err) => {
                return Err(match err.kind() {
                    IntErrorKind::PosOverflow => out_of_range(isize::MAX),
                    IntErrorKind::NegOverflow => out_of_range(isize::MIN),
                    _ => ListError::invalid_argument(command, format!("position '{text}': {err}")),
                })
            }
        };
        usize::try_from(position).map_err(|_| out_of_range(position))
    }
}

/// Drops a trailing `#` comment unless the `#` sits inside a JSON string.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

/// First whitespace-separated word and the trimmed remainder, if any.
fn split_word(text: &str) -> (&str, Option<&str>) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => {
            let rest = rest.trim();
            (word, (!rest.is_empty()).then_some(rest))
        }
        None => (text, None),
    }
}

fn required_value<'a>(command: &str, argument: Option<&'a str>) -> Result<&'a str> {
    argument.ok_or_else(|| ListError::missing_value(command))
}

fn required_callback<'a>(command: &str, argument: Option<&'a str>) -> Result<&'a str> {
    argument.ok_or_else(|| ListError::missing_callback(command))
}

fn parse_json(command: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|err| {
        ListError::invalid_argument(command, format!("'{text}' is not valid JSON: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seeded() -> Session {
        Session::new(ListConfig {
            seed: Some(7),
            ..ListConfig::default()
        })
    }

    fn run(script: &str) -> Vec<String> {
        seeded().run(script).unwrap()
    }

    fn failure(script: &str) -> ListError {
        match seeded().run(script).unwrap_err() {
            ScriptError::Command { source, .. } => source,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_word() {
        assert_eq!(split_word("insert 1 {\"a\": 1}"), ("insert", Some("1 {\"a\": 1}")));
        assert_eq!(split_word("  len  "), ("len", None));
    }

    #[test]
    fn test_strip_comment_respects_strings() {
        assert_eq!(strip_comment("print # show it"), "print ");
        assert_eq!(strip_comment(r##"push_back "#tag""##), r##"push_back "#tag""##);
        assert_eq!(strip_comment(r##"push_back "a\"#" # c"##), r##"push_back "a\"#" "##);
    }

    #[test]
    fn test_playlist_scenario() {
        let output = run(r#"
            push_back {"name": "Demons", "duration": 2.20}
            push_front {"name": "Boat", "duration": 2.44}
            insert 1 {"name": "Koala", "duration": 3.14}
            len
            join ";"
        "#);
        assert_eq!(output[0], "3");
        assert_eq!(
            output[1],
            concat!(
                r#"{"name":"Boat","duration":2.44};"#,
                r#"{"name":"Koala","duration":3.14};"#,
                r#"{"name":"Demons","duration":2.2}"#,
            )
        );
    }

    #[test]
    fn test_positional_commands() {
        let output = run(
            "from [1, 2, 3]\npop_front\npop_back\nremove 0\nlen\npush_back 5\nfront\nback\nat 0",
        );
        assert_eq!(output, vec!["1", "3", "2", "0", "5", "5", "5"]);
    }

    #[test]
    fn test_transforms_and_queries() {
        let output = run(
            "from [1, 2, 3, 4]\n\
             map double\n\
             print\n\
             filter positive\n\
             reduce sum\n\
             reduce sum 100\n\
             find even\n\
             includes 6\n\
             includes 0\n\
             some odd\n\
             every even",
        );
        assert_eq!(
            output,
            vec!["2 -> 4 -> 6 -> 8 -> /", "20", "120", "0: 2", "true", "false", "false", "true"]
        );
    }

    #[test]
    fn test_sort_reverse_concat() {
        let output = run(
            "from [3, 1, 2]\nsort\nshow\nsort desc\nshow\nreverse\nconcat [9]\nshow",
        );
        assert_eq!(output, vec!["[1,2,3]", "[3,2,1]", "[1,2,3,9]"]);
    }

    #[test]
    fn test_from_object_and_records() {
        let output = run(r#"
            from {"b": 1, "a": 2}
            map key
            join "-"
        "#);
        assert_eq!(output, vec![r#""b"-"a""#]);
    }

    #[test]
    fn test_for_each_actions() {
        let output = run("from [\"x\", 5]\nfor_each index\nfor_each print");
        assert_eq!(output, vec!["0: \"x\"\n1: 5", "x\n5"]);
        assert!(run("new\nfor_each index").is_empty());
    }

    #[test]
    fn test_shuffle_keeps_values() {
        let mut session = seeded();
        session.run("from [1, 2, 3, 4, 5]\nshuffle\nshuffle 2").unwrap();
        let mut values: Vec<i64> = session.list().iter().filter_map(Value::as_i64).collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seeded_sessions_shuffle_alike() {
        let script = "from [1, 2, 3, 4, 5, 6]\nshuffle\nshow";
        assert_eq!(run(script), run(script));
    }

    #[test]
    fn test_includes_zero_and_empty_string() {
        let output = run("from [0, \"\", null]\nincludes 0\nincludes \"\"\nincludes null");
        assert_eq!(output, vec!["true", "true", "true"]);
    }

    #[test]
    fn test_missing_callback() {
        for command in ["map", "filter", "reduce", "find", "some", "every", "for_each"] {
            let err = failure(&format!("from [1]\n{command}"));
            assert!(matches!(err, ListError::MissingCallback { .. }), "{command}");
        }
    }

    #[test]
    fn test_missing_value() {
        for command in ["includes", "push_back", "from", "concat", "at"] {
            let err = failure(command);
            assert!(matches!(err, ListError::MissingValue { .. }), "{command}");
        }
    }

    #[test]
    fn test_type_mismatch() {
        assert!(matches!(failure("join 5"), ListError::TypeMismatch { .. }));
        assert!(matches!(
            failure("from [1]\nconcat {\"a\": 1}"),
            ListError::TypeMismatch { .. }
        ));
        assert!(matches!(
            failure("from [\"a\"]\nmap double"),
            ListError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_unsupported_source() {
        assert!(matches!(failure("from 42"), ListError::UnsupportedSource { .. }));
    }

    #[test]
    fn test_out_of_range_and_empty() {
        assert!(matches!(
            failure("from [1]\ninsert -1 0"),
            ListError::OutOfRange { position: -1, len: 1 }
        ));
        assert!(matches!(
            failure("from [1]\ninsert 2 0"),
            ListError::OutOfRange { position: 2, len: 1 }
        ));
        assert!(matches!(failure("from [1]\nat 1"), ListError::OutOfRange { .. }));
        assert!(matches!(failure("pop_front"), ListError::EmptyContainer));
        assert!(matches!(failure("back"), ListError::EmptyContainer));
    }

    #[test]
    fn test_failed_command_leaves_list_unchanged() {
        let mut session = seeded();
        session.run("from [1, 2]").unwrap();
        assert!(session.run("insert 5 3").is_err());
        assert!(session.run("map double\nmap key").is_err());
        assert_eq!(session.run("show").unwrap(), vec!["[2,4]"]);
    }

    #[test]
    fn test_unknown_command_and_callback() {
        assert!(matches!(failure("explode"), ListError::UnknownCommand { .. }));
        assert!(matches!(failure("map triple"), ListError::UnknownCallback { .. }));
        assert!(matches!(failure("sort sideways"), ListError::InvalidArgument { .. }));
        assert!(matches!(failure("push_back {oops"), ListError::InvalidArgument { .. }));
    }

    #[test]
    fn test_error_reports_line() {
        let err = seeded().run("# header\nfrom [1]\n\npop_front\npop_front").unwrap_err();
        match err {
            ScriptError::Command { line, command, .. } => {
                assert_eq!(line, 5);
                assert_eq!(command, "pop_front");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_keeps_earlier_outputs() {
        let err = Session::default()
            .run("from [1]\nlen\nfront\npop_front\npop_front")
            .unwrap_err();
        match err {
            ScriptError::Command {
                line,
                outputs,
                source,
                ..
            } => {
                assert_eq!(line, 5);
                assert_eq!(outputs, vec!["1", "1", "1"]);
                assert!(matches!(source, ListError::EmptyContainer));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_positions_are_out_of_range() {
        assert!(matches!(
            failure("from [1]\nat 99999999999999999999"),
            ListError::OutOfRange {
                position: isize::MAX,
                len: 1
            }
        ));
        assert!(matches!(
            failure("from [1]\nremove -99999999999999999999"),
            ListError::OutOfRange {
                position: isize::MIN,
                len: 1
            }
        ));
        assert!(matches!(
            failure("from [1]\nat first"),
            ListError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_join_accepts_raw_delimiters() {
        let output = run("from [1, 2, 3]\njoin -\njoin \"+\"\njoin ::");
        assert_eq!(output, vec!["1-2-3", "1+2+3", "1::2::3"]);
    }

    #[test]
    fn test_config_drives_defaults() {
        let config = ListConfig::from_toml_str(
            "delimiter = \" + \"\n[print]\narrow = \", \"\nterminator = \"END\"",
        )
        .unwrap();
        let mut session = Session::new(config);
        let output = session.run("from [1, 2]\njoin\nprint").unwrap();
        assert_eq!(output, vec!["1 + 2", "1, 2, END"]);
    }

    #[test]
    fn test_run_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from [4, 5]").unwrap();
        writeln!(file, "reduce product 1").unwrap();
        let output = seeded().run_file(file.path()).unwrap();
        assert_eq!(output, vec!["20"]);
    }
}
