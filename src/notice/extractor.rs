use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::trace;

use crate::models::{Notice, SeenSet};
use crate::notice::rules::{classify_line, LineKind};

const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Comment and markup markers removed wherever they appear.
/// Longer markers come first so `<!--` is not split by `-`.
const MARKERS: &[&str] = &["<!--", "-->", "//", "/*", "*/", "#", "*"];

/// Single-character markers kept only when they join two word characters,
/// so `2019-2021` and `foo+bar@example.org` survive cleaning.
const JOINERS: &[char] = &['+', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Collecting,
}

/// What ended the notice currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Blank,
    Suppressed,
    EndOfInput,
}

/// Line-driven state machine that turns one file's lines into notices.
///
/// Deduplication is scoped to the extractor: each instance owns its
/// [`SeenSet`] and drops it with [`finish`](Self::finish).
#[derive(Debug)]
pub struct NoticeExtractor {
    state: State,
    buffer: Vec<String>,
    seen: SeenSet,
    notices: Vec<Notice>,
}

impl NoticeExtractor {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: Vec::new(),
            seen: SeenSet::new(),
            notices: Vec::new(),
        }
    }

    /// Feed one raw line (line terminator optional).
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        match classify_line(line) {
            LineKind::Blank => self.flush(Boundary::Blank),
            LineKind::Suppressed => self.flush(Boundary::Suppressed),
            LineKind::CopyrightSignal => {
                self.state = State::Collecting;
                self.buffer.push(line.to_string());
            }
            LineKind::Other => {
                if self.state == State::Collecting {
                    self.buffer.push(line.to_string());
                }
            }
        }
    }

    /// Close any pending notice and return this file's notices in order.
    pub fn finish(mut self) -> Vec<Notice> {
        self.flush(Boundary::EndOfInput);
        self.notices
    }

    fn flush(&mut self, boundary: Boundary) {
        if self.state == State::Idle {
            return;
        }

        if !self.buffer.is_empty() {
            let cleaned = clean_notice(&self.buffer.join(" "));
            trace!("{:?} closed notice {:?}", boundary, cleaned);
            if !cleaned.is_empty() {
                let notice = Notice::new(cleaned);
                if self.seen.insert(notice.key()) {
                    self.notices.push(notice);
                }
            }
            self.buffer.clear();
        }

        self.state = State::Idle;
    }
}

impl Default for NoticeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip comment/markup markers and collapse whitespace until nothing changes.
pub fn clean_notice(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = current.trim().to_string();
        for marker in MARKERS {
            next = next.replace(marker, " ");
        }
        next = strip_loose_joiners(&next);
        next = next.split_whitespace().collect::<Vec<_>>().join(" ");

        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_loose_joiners(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if !JOINERS.contains(&c) {
                return c;
            }
            let joined = i > 0
                && chars[i - 1].is_alphanumeric()
                && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
            if joined {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Run the extractor over a buffered reader, one line at a time.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
pub fn extract_from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Vec<Notice>> {
    let mut extractor = NoticeExtractor::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        extractor.feed(&String::from_utf8_lossy(&buf));
    }

    Ok(extractor.finish())
}

/// Extract the deduplicated notices of a single file.
pub fn extract_file(path: &Path) -> Result<Vec<Notice>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    extract_from_reader(reader).with_context(|| format!("failed to read {}", path.display()))
}
