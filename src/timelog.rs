// ADJBENCH TIMING LOG
// APPEND-ONLY UTF-8 TEXT, ONE RECORD PER RUN:
//
//   Command: <full command line>
//   Time: <seconds, 2 decimals> seconds
//   <blank line>
//
// CR/LF INSIDE THE COMMAND TEXT ARE WRITTEN AS LITERAL \r / \n SO EVERY
// RECORD STAYS THREE LINES.
//
// WRITES ARE STRICTLY SEQUENTIAL FROM ONE CONTROL FLOW; NO LOCKING.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::LogError;

#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub command: String,
    pub elapsed_secs: f64,
}

impl LogRecord {
    pub fn render(&self) -> String {
        let command = self.command.replace('\r', "\\r").replace('\n', "\\n");
        format!("Command: {}\nTime: {:.2} seconds\n\n", command, self.elapsed_secs)
    }
}

// CREATES THE PARENT DIRECTORY ON FIRST USE.
pub fn append(path: &Path, record: &LogRecord) -> Result<(), LogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LogError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let to_err = |source| LogError::Append {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)?;
    // ONE write_all PER RECORD SO A RECORD IS NEVER SPLIT ACROSS CALLS
    file.write_all(record.render().as_bytes()).map_err(to_err)?;
    Ok(())
}

fn record_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^Command: (.*)\r?\nTime: ([0-9]+(?:\.[0-9]+)?) seconds\r?$")
            .expect("record regex is valid")
    })
}

// PARSE EVERY WELL-FORMED RECORD. UNRECOGNISED LINES ARE SKIPPED.
pub fn parse(text: &str) -> Vec<LogRecord> {
    record_re()
        .captures_iter(text)
        .filter_map(|cap| {
            let elapsed_secs = cap[2].parse().ok()?;
            Some(LogRecord {
                command: cap[1].to_string(),
                elapsed_secs,
            })
        })
        .collect()
}

pub fn read_log(path: &Path) -> Result<Vec<LogRecord>, LogError> {
    let text = fs::read_to_string(path).map_err(|source| LogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_two_decimals() {
        let r = LogRecord {
            command: "./Pthreads/matrix ../in/large.txt 1000000 1 2 4".to_string(),
            elapsed_secs: 3.14159,
        };
        assert_eq!(
            r.render(),
            "Command: ./Pthreads/matrix ../in/large.txt 1000000 1 2 4\nTime: 3.14 seconds\n\n"
        );
    }

    #[test]
    fn append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.txt");
        let a = LogRecord { command: "a".to_string(), elapsed_secs: 0.5 };
        let b = LogRecord { command: "b --x".to_string(), elapsed_secs: 12.0 };
        append(&path, &a).unwrap();
        append(&path, &b).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Command: a\nTime: 0.50 seconds\n\nCommand: b --x\nTime: 12.00 seconds\n\n");
        assert_eq!(parse(&text), vec![a, b]);
    }

    #[test]
    fn parse_skips_noise() {
        let text = "garbage\nCommand: make -f mpi_makefile\nTime: 0.07 seconds\n\nTime: 9 seconds\n";
        let got = parse(text);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].command, "make -f mpi_makefile");
        assert_eq!(got[0].elapsed_secs, 0.07);
    }

    #[test]
    fn newline_in_command_stays_one_record() {
        let r = LogRecord { command: "sh -c a\nb\r".to_string(), elapsed_secs: 1.0 };
        assert_eq!(r.render(), "Command: sh -c a\\nb\\r\nTime: 1.00 seconds\n\n");
        let got = parse(&r.render());
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].command, "sh -c a\\nb\\r");
    }

    #[test]
    fn append_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/times.txt");
        append(&path, &LogRecord { command: "x".to_string(), elapsed_secs: 0.0 }).unwrap();
        assert_eq!(read_log(&path).unwrap().len(), 1);
    }

    #[test]
    fn append_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let record = LogRecord { command: "x".to_string(), elapsed_secs: 0.0 };
        let err = append(&blocker.join("times.txt"), &record).unwrap_err();
        assert!(matches!(err, LogError::CreateDir { .. }));
    }

    #[test]
    fn read_log_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_log(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LogError::Read { .. }));
    }
}
