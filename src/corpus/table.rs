//! Tabular corpus file codec.
//!
//! The corpus is persisted as a comma-separated table with the fixed header
//! `Query,Response,neg,neu,pos,compound`. Fields containing commas, quotes,
//! or newlines are double-quoted with embedded quotes doubled, the dialect
//! the corpus files were produced with.

use crate::error::{RecallChatError, Result};
use crate::models::{CorpusEntry, SentimentScores};

/// Header row every corpus file starts with
pub const CORPUS_HEADER: &str = "Query,Response,neg,neu,pos,compound";

const EXPECTED_COLUMNS: [&str; 6] = ["Query", "Response", "neg", "neu", "pos", "compound"];
const FIELD_COUNT: usize = 6;

/// Decode corpus file contents into entries.
///
/// Fails on a missing or mismatched header, wrong field counts, or
/// unparseable sentiment values. Blank records are skipped. Entries come
/// back normalized through the `CorpusEntry` constructor.
pub fn parse_table(content: &str) -> Result<Vec<CorpusEntry>> {
    let records = split_records(content)?;
    let mut records = records.into_iter().enumerate();

    let (_, header) = records
        .next()
        .ok_or_else(|| RecallChatError::corpus_load("corpus file is empty"))?;
    validate_header(&header)?;

    let mut entries = Vec::new();
    for (index, record) in records {
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != FIELD_COUNT {
            return Err(RecallChatError::corpus_load(format!(
                "record {}: expected {} fields, found {}",
                index + 1,
                FIELD_COUNT,
                record.len()
            )));
        }

        let sentiment = SentimentScores::new(
            parse_score(&record[2], "neg", index + 1)?,
            parse_score(&record[3], "neu", index + 1)?,
            parse_score(&record[4], "pos", index + 1)?,
            parse_compound(&record[5], index + 1)?,
        );
        entries.push(CorpusEntry::new(&record[0], &record[1], sentiment));
    }

    Ok(entries)
}

/// Encode entries as corpus file contents, header included.
pub fn format_table(entries: &[CorpusEntry]) -> String {
    let mut out = String::with_capacity(64 * (entries.len() + 1));
    out.push_str(CORPUS_HEADER);
    out.push('\n');

    for entry in entries {
        out.push_str(&escape_field(&entry.query));
        out.push(',');
        out.push_str(&escape_field(&entry.response));
        out.push(',');
        out.push_str(&format!(
            "{},{},{},{}\n",
            entry.sentiment.negative,
            entry.sentiment.neutral,
            entry.sentiment.positive,
            entry.sentiment.compound
        ));
    }

    out
}

fn validate_header(fields: &[String]) -> Result<()> {
    let matches = fields.len() == FIELD_COUNT
        && fields
            .iter()
            .zip(EXPECTED_COLUMNS.iter())
            .all(|(field, expected)| field.trim() == *expected);

    if !matches {
        return Err(RecallChatError::corpus_load(format!(
            "unexpected header: expected \"{}\", found \"{}\"",
            CORPUS_HEADER,
            fields.join(",")
        )));
    }

    Ok(())
}

fn parse_score(field: &str, column: &str, record: usize) -> Result<f32> {
    let value: f32 = field.trim().parse().map_err(|_| {
        RecallChatError::corpus_load(format!(
            "record {}: invalid {} value: \"{}\"",
            record, column, field
        ))
    })?;

    if !value.is_finite() {
        return Err(RecallChatError::corpus_load(format!(
            "record {}: non-finite {} value",
            record, column
        )));
    }

    Ok(value)
}

fn parse_compound(field: &str, record: usize) -> Result<f32> {
    let value = parse_score(field, "compound", record)?;

    if !(-1.0..=1.0).contains(&value) {
        return Err(RecallChatError::corpus_load(format!(
            "record {}: compound value {} outside [-1, 1]",
            record, value
        )));
    }

    Ok(value)
}

/// Split file contents into records of unescaped fields. Quoted fields may
/// contain commas, doubled quotes, and newlines; CRLF line endings are
/// accepted.
fn split_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(RecallChatError::corpus_load(
            "unterminated quoted field at end of file",
        ));
    }

    // Final record when the file has no trailing newline
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    Ok(records)
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
