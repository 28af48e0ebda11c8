use crate::{domain::models::Table, inbound::file::Reader};
use anyhow::Context;
use csv::ReaderBuilder;
use std::path::Path;

pub trait Csv {
    fn try_csv_to_table(path: &Path) -> anyhow::Result<Table>;
}

impl Csv for Reader {
    fn try_csv_to_table(path: &Path) -> anyhow::Result<Table> {
        let file_name = Self::display_name(path);
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open csv file: {}", path.display()))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("failed to read header row of csv file: {}", file_name))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record.with_context(|| {
                format!("failed to read row {} in csv file: {}", idx + 1, file_name)
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Table::new(headers, rows).with_context(|| format!("malformed csv file: {}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_header_and_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "symbol,shortname,date\nAAPL,\"Apple, Inc.\",2024-01-02\nMSFT,Microsoft\n"
        )
        .unwrap();
        let table = Reader::try_csv_to_table(temp_file.path()).unwrap();
        assert_eq!(table.headers(), ["symbol", "shortname", "date"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][1], "Apple, Inc.");
        assert_eq!(table.rows()[1][2], "");
    }

    #[test]
    fn keeps_repeated_headers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "a,b,a\n1,2,3\n").unwrap();
        let table = Reader::try_csv_to_table(temp_file.path()).unwrap();
        assert_eq!(table.headers(), ["a", "b", "a"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Reader::try_csv_to_table(&dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn overlong_row_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "a,b\n1,2,3\n").unwrap();
        assert!(Reader::try_csv_to_table(temp_file.path()).is_err());
    }
}
