// crates/gazetteer-core/src/loader/common_io.rs
use crate::common::DiscardReason;
use crate::error::{GazetteerError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

/// Opens a source dump, buffers it, and unwraps gzip when the path ends in
/// `.gz`. The returned reader owns the file handle; dropping it closes the
/// file.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|source| GazetteerError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(file);

    if !is_gzip_path(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(BufReader::new(GzDecoder::new(reader))))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GazetteerError::InvalidData(format!(
            "{} is gzip compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Whether lines beginning with `#` are comments in a given format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comments {
    Skip,
    Keep,
}

/// One source line, split on tabs.
///
/// Whitespace (tabs included) around the whole line is stripped before the
/// split, so blank trailing columns do not count towards the field total.
#[derive(Debug)]
pub struct Row<'a> {
    /// 1-based line number in the source.
    pub line: u64,
    pub fields: Vec<&'a str>,
}

/// Streams every line of a tab-delimited source through `visit`.
///
/// Lines that cannot be decoded are handed to `visit` as
/// `Err(DiscardReason::InvalidEncoding)`; an I/O failure of the underlying
/// reader ends the scan with an error.
pub fn for_each_row<R, F>(reader: R, comments: Comments, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(std::result::Result<Row<'_>, DiscardReason>),
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .comment(match comments {
            Comments::Skip => Some(b'#'),
            Comments::Keep => None,
        })
        .from_reader(reader);

    let mut record = StringRecord::new();
    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {
                let line = record.position().map_or(0, |p| p.line());
                visit(Ok(Row {
                    line,
                    fields: stripped_fields(&record),
                }));
            }
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping undecodable line: {e}");
                visit(Err(DiscardReason::InvalidEncoding));
            }
        }
    }
    Ok(())
}

/// Fields of `record` as if the raw line had been whitespace-stripped before
/// splitting on tabs.
fn stripped_fields(record: &StringRecord) -> Vec<&str> {
    let mut fields: Vec<&str> = record.iter().collect();

    while fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    let leading = fields.iter().take_while(|f| f.trim().is_empty()).count();
    fields.drain(..leading);

    if let Some(first) = fields.first_mut() {
        *first = first.trim_start();
    }
    if let Some(last) = fields.last_mut() {
        *last = last.trim_end();
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str, comments: Comments) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for_each_row(input.as_bytes(), comments, |row| {
            if let Ok(row) = row {
                rows.push(row.fields.iter().map(|s| s.to_string()).collect());
            }
        })
        .unwrap();
        rows
    }

    #[test]
    fn splits_on_tabs_without_quoting() {
        let rows = collect("1\t\"quoted\tname\n", Comments::Keep);
        assert_eq!(rows, vec![vec!["1", "\"quoted", "name"]]);
    }

    #[test]
    fn strips_surrounding_whitespace_of_the_line() {
        let rows = collect("  a\tb\t\t\n", Comments::Keep);
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn keeps_inner_empty_fields() {
        let rows = collect("a\t\tc\r\n", Comments::Keep);
        assert_eq!(rows, vec![vec!["a", "", "c"]]);
    }

    #[test]
    fn comment_lines_are_skipped_only_when_asked() {
        let input = "#ISO\tName\nIR\tIran\n";
        assert_eq!(collect(input, Comments::Skip).len(), 1);
        assert_eq!(collect(input, Comments::Keep).len(), 2);
    }

    #[test]
    fn reports_line_numbers() {
        let mut lines = Vec::new();
        for_each_row("a\nb\nc\n".as_bytes(), Comments::Keep, |row| {
            lines.push(row.unwrap().line);
        })
        .unwrap();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn undecodable_line_is_a_discard_not_an_error() {
        let input: &[u8] = b"ok\tline\n\xff\xfe\tbad\nnext\tline\n";
        let mut good = 0;
        let mut bad = 0;
        for_each_row(input, Comments::Keep, |row| match row {
            Ok(_) => good += 1,
            Err(reason) => {
                assert_eq!(reason, DiscardReason::InvalidEncoding);
                bad += 1;
            }
        })
        .unwrap();
        assert_eq!((good, bad), (2, 1));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = open_stream(Path::new("does/not/exist.txt")).err().unwrap();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
