//! Bulk import from a tabular source
//!
//! Builds the initial collection from CSV rows with `Name`, `Type1` and
//! `Type2` columns. Ids come from an explicit [`SequenceGenerator`]; every
//! row consumes one id, so ids stay aligned with the image assets even
//! when rows are skipped.

use std::path::PathBuf;

use crate::core::{DexError, DexResult};
use crate::observability::Logger;
use crate::record::{CollectionDocument, Record};
use crate::schema::{CandidateRecord, RecordValidator};
use crate::storage::RecordStore;

use super::csv::CsvTable;

/// Hands out sequential ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceGenerator {
    next: u64,
}

impl SequenceGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Where generated image URLs point and where assets are checked
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub public_base_url: String,
    pub images_dir: PathBuf,
}

impl ImportOptions {
    pub fn image_url(&self, id: u64) -> String {
        format!(
            "{}/images/{}.png",
            self.public_base_url.trim_end_matches('/'),
            id
        )
    }

    fn has_image(&self, id: u64) -> bool {
        self.images_dir.join(format!("{}.png", id)).is_file()
    }
}

/// Outcome counters of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped_missing_image: usize,
    pub skipped_invalid: usize,
}

/// Lower-cases `raw` word by word, the way seed names are normalized.
///
/// Apostrophes are dropped and Latin-1 letters deburred first. Words then
/// split on anything that is not a letter or digit, at lower-to-upper
/// changes, before the last capital of an acronym run followed by a
/// lower-case letter, and between letters and digits. Words are joined
/// by single spaces: `"Mr. Mime"` becomes `"mr mime"`, `"Porygon2"`
/// becomes `"porygon 2"`.
pub fn lower_case_words(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')) {
        match deburr(c) {
            Some(plain) => cleaned.push_str(plain),
            None if is_combining_mark(c) => {}
            None => cleaned.push(c),
        }
    }

    let mut words: Vec<String> = Vec::new();
    for run in cleaned.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && is_word_break(chars[i - 1], c, chars.get(i + 1).copied()) {
                words.push(std::mem::take(&mut current));
            }
            current.extend(c.to_lowercase());
        }
        if !current.is_empty() {
            words.push(current);
        }
    }

    words.join(" ")
}

fn is_word_break(prev: char, cur: char, next: Option<char>) -> bool {
    if prev.is_numeric() != cur.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && cur.is_uppercase() {
        return true;
    }
    // "HTMLParser": the P starts a new word
    prev.is_uppercase() && cur.is_uppercase() && next.map_or(false, char::is_lowercase)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// ASCII spelling of a Latin-1 letter with diacritics
fn deburr(c: char) -> Option<&'static str> {
    let plain = match c {
        'À'..='Å' => "A",
        'à'..='å' => "a",
        'Ç' => "C",
        'ç' => "c",
        'Ð' => "D",
        'ð' => "d",
        'È'..='Ë' => "E",
        'è'..='ë' => "e",
        'Ì'..='Ï' => "I",
        'ì'..='ï' => "i",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò'..='Ö' | 'Ø' => "O",
        'ò'..='ö' | 'ø' => "o",
        'Ù'..='Ü' => "U",
        'ù'..='ü' => "u",
        'Ý' => "Y",
        'ý' | 'ÿ' => "y",
        'Æ' => "Ae",
        'æ' => "ae",
        'Þ' => "Th",
        'þ' => "th",
        'ß' => "ss",
        _ => return None,
    };
    Some(plain)
}

/// Turns table rows into validated records.
///
/// Rows without an image asset are dropped silently; rows that fail
/// record validation are dropped with a warning.
pub fn build_records(
    table: &CsvTable,
    sequence: &mut SequenceGenerator,
    options: &ImportOptions,
) -> DexResult<(Vec<Record>, ImportReport)> {
    let name_col = table
        .column("Name")
        .ok_or_else(|| DexError::missing_field("Name column"))?;
    let type1_col = table.column("Type1");
    let type2_col = table.column("Type2");

    let mut accepted = CollectionDocument::default();
    let mut report = ImportReport::default();

    for row in &table.rows {
        let id = sequence.next_id();

        if !options.has_image(id) {
            report.skipped_missing_image += 1;
            continue;
        }

        let types: Vec<String> = [type1_col, type2_col]
            .iter()
            .flatten()
            .map(|col| lower_case_words(table.cell(row, *col)))
            .collect();

        let candidate = CandidateRecord {
            id: Some(id),
            name: Some(lower_case_words(table.cell(row, name_col))).filter(|n| !n.is_empty()),
            types,
            image_url: Some(options.image_url(id)),
        };

        match RecordValidator::new(&accepted).validate_insert(&candidate) {
            Ok(record) => {
                accepted.data.push(record);
                report.imported += 1;
            }
            Err(e) => {
                let id = id.to_string();
                let reason = e.to_string();
                Logger::warn(
                    "IMPORT_ROW_SKIPPED",
                    &[("id", id.as_str()), ("kind", e.code()), ("reason", reason.as_str())],
                );
                report.skipped_invalid += 1;
            }
        }
    }

    Ok((accepted.data, report))
}

/// Imports `csv_text` into `store`, replacing every existing record.
pub fn run_import(
    store: &RecordStore,
    csv_text: &str,
    sequence: &mut SequenceGenerator,
    options: &ImportOptions,
) -> DexResult<ImportReport> {
    let table = CsvTable::parse(csv_text);
    let (records, report) = build_records(&table, sequence, options)?;
    let doc = store.replace_all(records)?;

    let total = doc.total_records.to_string();
    let skipped = (report.skipped_missing_image + report.skipped_invalid).to_string();
    Logger::info(
        "IMPORT_COMPLETE",
        &[("skipped", skipped.as_str()), ("total_records", total.as_str())],
    );

    Ok(report)
}
