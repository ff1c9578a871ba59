use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::{Document, Task};
use crate::util::html::html_to_text;

/// Which field of a list or task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    /// Name of the list the task belongs to
    Name,
    Title,
    /// Task content, matched against its plain-text form
    Content,
}

/// Match spans (byte ranges) within one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// A task that matched the query, located by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub list_index: usize,
    pub task_index: usize,
    pub list_name: String,
    pub matches: Vec<FieldMatch>,
}

impl SearchHit {
    pub fn matched(&self, field: MatchField) -> bool {
        self.matches.iter().any(|m| m.field == field)
    }

    /// Spans for `field`, empty when it did not match
    pub fn spans(&self, field: MatchField) -> &[Range<usize>] {
        self.matches
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.spans.as_slice())
            .unwrap_or(&[])
    }
}

/// Compile a user query: case-insensitive, `^`/`$` match at line breaks.
///
/// Returns `None` for a blank query. A query that is not a valid regex is
/// matched literally instead.
pub fn build_regex(query: &str) -> Option<Regex> {
    if query.trim().is_empty() {
        return None;
    }
    let compile = |pattern: &str| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
    };
    compile(query)
        .or_else(|_| compile(&regex::escape(query)))
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Scan every task of every list for `query`. Blank queries yield no hits.
pub fn search(doc: &Document, query: &str) -> Vec<SearchHit> {
    match build_regex(query) {
        Some(re) => search_with(doc, &re),
        None => Vec::new(),
    }
}

/// Scan every task of every list with a compiled regex.
///
/// A task is a hit when its list name, title or content matches. Hits come
/// back in document order.
pub fn search_with(doc: &Document, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for (list_index, list) in doc.lists.iter().enumerate() {
        let name_spans = find_matches(re, &list.name);
        for (task_index, task) in list.tasks.iter().enumerate() {
            let mut matches = Vec::new();
            if !name_spans.is_empty() {
                matches.push(FieldMatch {
                    field: MatchField::Name,
                    spans: name_spans.clone(),
                });
            }
            search_task(re, task, &mut matches);
            if !matches.is_empty() {
                hits.push(SearchHit {
                    list_index,
                    task_index,
                    list_name: list.name.clone(),
                    matches,
                });
            }
        }
    }

    hits
}

fn search_task(re: &Regex, task: &Task, matches: &mut Vec<FieldMatch>) {
    let spans = find_matches(re, &task.title);
    if !spans.is_empty() {
        matches.push(FieldMatch {
            field: MatchField::Title,
            spans,
        });
    }

    if !task.content.is_empty() {
        let text = html_to_text(&task.content);
        let spans = find_matches(re, &text);
        if !spans.is_empty() {
            matches.push(FieldMatch {
                field: MatchField::Content,
                spans,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
