// src/resume/scanner.rs
//! Line-oriented recovery of category/value rows from the resume's
//! two-column table markup.
//!
//! The scanner is a small state machine over a line cursor. A row starts at
//! a line containing one of the row-start markers; the category cell sits
//! `category_offset` lines after it and the value cell on the line after
//! that. An empty value cell may be continued on the next line, and the
//! multi-line categories greedily take every following line up to the next
//! row.

use super::categories::SkillTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Lexical markers of the table layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowMarkup {
    pub row_start: Vec<String>,
    pub category_open: String,
    pub value_open: String,
    pub cell_close: String,
    pub row_open: String,
    pub row_close: String,
    pub line_break: String,
    pub table_close: Vec<String>,
    pub category_offset: usize,
}

impl Default for RowMarkup {
    fn default() -> Self {
        Self {
            row_start: vec!["<tr class=odd>".to_string(), "<tr class=even>".to_string()],
            category_open: "<td class=c1>".to_string(),
            value_open: "<td class=c2>".to_string(),
            cell_close: "</td>".to_string(),
            row_open: "<tr".to_string(),
            row_close: "</tr".to_string(),
            line_break: "<br>".to_string(),
            table_close: vec!["</tbody".to_string(), "</table".to_string()],
            category_offset: 1,
        }
    }
}

impl RowMarkup {
    fn is_row_start(&self, line: &str) -> bool {
        self.row_start.iter().any(|marker| line.contains(marker.as_str()))
    }

    fn opens_or_closes_row(&self, line: &str) -> bool {
        line.starts_with(self.row_open.as_str()) || line.starts_with(self.row_close.as_str())
    }

    fn closes_table(&self, line: &str) -> bool {
        self.table_close
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    fn strip_cell(&self, line: &str, open: &str) -> String {
        line.replace(open, "")
            .replace(self.cell_close.as_str(), "")
            .trim()
            .to_string()
    }
}

/// One recovered category/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub category: String,
    pub value: String,
}

#[derive(Debug)]
enum ScanState {
    SeekingRowStart,
    ReadingCategory {
        marker: usize,
    },
    ReadingValue {
        marker: usize,
        category: String,
    },
    ReadingContinuation {
        category: String,
        value_line: usize,
    },
}

pub struct RowScanner<'a> {
    markup: &'a RowMarkup,
    table: &'a SkillTable,
}

impl<'a> RowScanner<'a> {
    pub fn new(markup: &'a RowMarkup, table: &'a SkillTable) -> Self {
        Self { markup, table }
    }

    /// Scan the document lines into rows, in document order. Malformed or
    /// truncated rows are skipped.
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Row> {
        let lines: Vec<&str> = lines.iter().map(|line| line.as_ref().trim()).collect();
        let mut rows = Vec::new();
        let mut cursor = 0;
        let mut state = ScanState::SeekingRowStart;

        loop {
            state = match state {
                ScanState::SeekingRowStart => {
                    let Some(offset) = lines[cursor.min(lines.len())..]
                        .iter()
                        .position(|line| self.markup.is_row_start(line))
                    else {
                        break;
                    };
                    ScanState::ReadingCategory {
                        marker: cursor + offset,
                    }
                }

                ScanState::ReadingCategory { marker } => {
                    let category_line = marker + self.markup.category_offset;
                    if category_line + 1 >= lines.len() {
                        trace!(line = marker, "Row start too close to end of document");
                        cursor = marker + 1;
                        ScanState::SeekingRowStart
                    } else if lines[category_line].contains(self.markup.category_open.as_str()) {
                        let category = self
                            .markup
                            .strip_cell(lines[category_line], &self.markup.category_open);
                        ScanState::ReadingValue { marker, category }
                    } else {
                        cursor = marker + 1;
                        ScanState::SeekingRowStart
                    }
                }

                ScanState::ReadingValue { marker, category } => {
                    let value_line = marker + self.markup.category_offset + 1;
                    let line = lines[value_line];
                    if !line.contains(self.markup.value_open.as_str()) {
                        cursor = marker + 1;
                        ScanState::SeekingRowStart
                    } else {
                        let value = self.markup.strip_cell(line, &self.markup.value_open);
                        if value.is_empty() {
                            ScanState::ReadingContinuation {
                                category,
                                value_line,
                            }
                        } else {
                            cursor = self.finish_row(
                                &lines,
                                category,
                                value,
                                value_line,
                                value_line + 1,
                                &mut rows,
                            );
                            ScanState::SeekingRowStart
                        }
                    }
                }

                ScanState::ReadingContinuation {
                    category,
                    value_line,
                } => {
                    let next = value_line + 1;
                    let (value, resume_at) = match lines.get(next) {
                        Some(line) if !self.markup.opens_or_closes_row(line) => (
                            self.markup
                                .strip_cell(line, &self.markup.value_open)
                                .replace(self.markup.line_break.as_str(), " ")
                                .trim()
                                .to_string(),
                            next + 1,
                        ),
                        _ => (String::new(), next),
                    };
                    cursor =
                        self.finish_row(&lines, category, value, value_line, resume_at, &mut rows);
                    ScanState::SeekingRowStart
                }
            };
        }

        debug!(rows = rows.len(), lines = lines.len(), "Scanned resume rows");
        rows
    }

    /// Emit the row, swapping in the greedy multi-line body where the
    /// category needs it. Returns the cursor to resume scanning from.
    fn finish_row(
        &self,
        lines: &[&str],
        category: String,
        value: String,
        value_line: usize,
        resume_at: usize,
        rows: &mut Vec<Row>,
    ) -> usize {
        if !value.is_empty() && self.table.is_multiline(&category) {
            let (body, stop) = self.collect_multiline(lines, value_line);
            rows.push(Row {
                category,
                value: body,
            });
            return stop.max(resume_at);
        }

        rows.push(Row { category, value });
        resume_at
    }

    /// Accumulate value lines from `start` until the next row, a blank line
    /// or the end of the table. Row-close lines are dropped.
    fn collect_multiline(&self, lines: &[&str], start: usize) -> (String, usize) {
        let mut parts = Vec::new();
        let mut index = start;

        while let Some(line) = lines.get(index) {
            if line.is_empty()
                || self.markup.is_row_start(line)
                || line.starts_with(self.markup.row_open.as_str())
                || self.markup.closes_table(line)
            {
                break;
            }
            index += 1;

            if line.starts_with(self.markup.row_close.as_str()) {
                continue;
            }
            let content = self.markup.strip_cell(line, &self.markup.value_open);
            if !content.is_empty() {
                parts.push(content);
            }
        }

        (parts.join(" "), index)
    }
}
