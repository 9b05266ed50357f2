//! Append-only CSV output, one file per listing page.

use crate::error::ScrapeError;
use crate::store::models::Product;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes product batches to `<dir>/<destination>.csv`.
///
/// Files are opened in append mode; the header row is written only when the
/// destination is new or empty, so repeated runs accumulate rows under a
/// single header. A failure mid-write leaves a partial file behind; there
/// are no transactional guarantees.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Appends a batch of records, writing the header first if needed.
    /// An empty batch still creates the file and its header.
    pub fn append(&self, destination: &str, products: &[Product]) -> Result<PathBuf, ScrapeError> {
        let path = self.dir.join(format!("{destination}.csv"));

        let needs_header = match std::fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Header handling is ours, not the serializer's: serde-driven
        // headers would reappear on every append.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            writer.write_record(Product::FIELDS)?;
        }

        for product in products {
            writer.serialize(product)?;
        }

        writer.flush().map_err(ScrapeError::Io)?;
        debug!("Appended {} records to {}", products.len(), path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_product(title: &str, price: f64) -> Product {
        Product {
            title: title.to_string(),
            description: "14\", 8GB, 256GB SSD".to_string(),
            price,
            rating: 4,
            num_of_reviews: 7,
        }
    }

    #[test]
    fn test_fresh_destination_gets_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path());

        let path = sink.append("laptops", &[make_product("Acer Swift 3", 790.5)]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "title,description,price,rating,num_of_reviews");
        assert_eq!(lines[1], "Acer Swift 3,\"14\"\", 8GB, 256GB SSD\",790.5,4,7");
    }

    #[test]
    fn test_two_batches_share_one_header() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path());

        sink.append("tablets", &[make_product("First", 1.0), make_product("Second", 2.0)])
            .unwrap();
        let path = sink.append("tablets", &[make_product("Third", 3.0)]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "title,description,price,rating,num_of_reviews");
        assert!(lines[1].starts_with("First,"));
        assert!(lines[2].starts_with("Second,"));
        assert!(lines[3].starts_with("Third,"));
    }

    #[test]
    fn test_empty_batch_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path());

        let path = sink.append("touch", &[]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "title,description,price,rating,num_of_reviews\n");
    }

    #[test]
    fn test_empty_existing_file_gets_header_on_append() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("phones.csv"), "").unwrap();

        let sink = CsvSink::new(dir.path());
        let path = sink.append("phones", &[make_product("Nokia", 99.99)]).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("title,description,price,rating,num_of_reviews\n"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let sink = CsvSink::new("/nonexistent/output/dir");
        let result = sink.append("home", &[make_product("X", 1.0)]);
        assert!(matches!(result, Err(ScrapeError::Io(_))));
    }

    #[test]
    fn test_utf8_description_round_trips() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path());

        let mut product = make_product("Galaxy", 93.99);
        product.description = "5 mpx. Android 5.0 Lollipop, Ätherisch".to_string();

        let path = sink.append("touch", &[product]).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("Ätherisch"));
    }
}
