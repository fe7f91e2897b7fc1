//! The ledger store: an ordered, position-addressed collection of
//! transactions backed by a CSV file.
//!
//! The ledger is loaded once at start-up and held in memory. Every mutation
//! rewrites the whole backing file, so after any successful operation the
//! file matches the in-memory sequence exactly. There is no file locking:
//! if two processes share one ledger file, the last full rewrite wins.

use std::{fs, path::PathBuf};

use crate::{Error, transaction::codec};

use super::Transaction;

/// The column header row of the ledger file.
pub const LEDGER_HEADER: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// An ordered sequence of transactions persisted to a CSV file.
///
/// A transaction's position in the sequence is its only identifier. Removing
/// a transaction shifts every following position down by one, so positions
/// are not stable across deletions and callers must re-read the sequence
/// after mutating it.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Load the ledger from the CSV file at `path`, or create an empty
    /// ledger if no file exists there yet.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UnrecognizedSchema] if the file exists but its header row is
    ///   not `Date,Description,Category,Amount`,
    /// - or [Error::MalformedRecord] if a row cannot be parsed as a transaction,
    /// - or [Error::Io] if the file cannot be read.
    ///
    /// A load failure is surfaced rather than masked with an empty ledger so
    /// that a corrupt file is never silently overwritten on the next mutation.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                transactions: Vec::new(),
            });
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|error| Error::Io(error.to_string()))?;

        let header = reader
            .headers()
            .map_err(|error| Error::Io(error.to_string()))?;

        if header.iter().ne(LEDGER_HEADER) {
            return Err(Error::UnrecognizedSchema {
                found: header.iter().collect::<Vec<_>>().join(","),
                want: LEDGER_HEADER.join(","),
            });
        }

        let mut transactions = Vec::new();

        for (row_index, record) in reader.records().enumerate() {
            // The header occupies line 1.
            let line = row_index + 2;

            let record = record.map_err(|error| Error::MalformedRecord {
                line,
                message: error.to_string(),
            })?;

            if record.len() != LEDGER_HEADER.len() {
                return Err(Error::MalformedRecord {
                    line,
                    message: format!(
                        "want {} fields, got {}",
                        LEDGER_HEADER.len(),
                        record.len()
                    ),
                });
            }

            let transaction = codec::parse(&record[0], &record[1], &record[2], &record[3])
                .map_err(|error| Error::MalformedRecord {
                    line,
                    message: error.to_string(),
                })?;

            transactions.push(transaction);
        }

        Ok(Self { path, transactions })
    }

    /// The current sequence of transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The transaction at `position`, if it is in range.
    pub fn get(&self, position: usize) -> Option<&Transaction> {
        self.transactions.get(position)
    }

    /// The number of transactions in the ledger.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Append `transaction` to the end of the sequence and persist.
    ///
    /// The new transaction's position is `self.len() - 1` afterwards.
    ///
    /// # Errors
    /// This function will return an [Error::Io] if the ledger file cannot be
    /// written, in which case the in-memory sequence is left unchanged.
    pub fn add(&mut self, transaction: Transaction) -> Result<(), Error> {
        self.transactions.push(transaction);

        if let Err(error) = self.persist() {
            self.transactions.pop();
            return Err(error);
        }

        Ok(())
    }

    /// Replace the transaction at `position` with `transaction` and persist.
    ///
    /// No reordering takes place; every other position is untouched.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::PositionOutOfRange] if `position` is not in `[0, len)`,
    /// - or [Error::Io] if the ledger file cannot be written.
    ///
    /// On error the in-memory sequence is left unchanged.
    pub fn update(&mut self, position: usize, transaction: Transaction) -> Result<(), Error> {
        self.check_position(position)?;

        let previous = std::mem::replace(&mut self.transactions[position], transaction);

        if let Err(error) = self.persist() {
            self.transactions[position] = previous;
            return Err(error);
        }

        Ok(())
    }

    /// Remove the transaction at `position` and persist.
    ///
    /// Every transaction after `position` shifts down by one.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::PositionOutOfRange] if `position` is not in `[0, len)`,
    /// - or [Error::Io] if the ledger file cannot be written.
    ///
    /// On error the in-memory sequence is left unchanged.
    pub fn remove(&mut self, position: usize) -> Result<(), Error> {
        self.check_position(position)?;

        let removed = self.transactions.remove(position);

        if let Err(error) = self.persist() {
            self.transactions.insert(position, removed);
            return Err(error);
        }

        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), Error> {
        if position >= self.transactions.len() {
            return Err(Error::PositionOutOfRange {
                position,
                length: self.transactions.len(),
            });
        }

        Ok(())
    }

    /// Write the whole sequence to the backing file, replacing its contents.
    ///
    /// The rows are serialized in memory first so a serialization failure
    /// cannot leave a partially written file behind.
    fn persist(&self) -> Result<(), Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(LEDGER_HEADER)
            .map_err(|error| Error::Io(error.to_string()))?;

        for transaction in &self.transactions {
            writer
                .write_record(codec::serialize(transaction))
                .map_err(|error| Error::Io(error.to_string()))?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|error| Error::Io(error.to_string()))?;

        fs::write(&self.path, buffer).map_err(|error| Error::Io(error.to_string()))
    }
}


#[cfg(test)]
mod mutation_tests {
    use time::macros::date;

    use crate::{Error, transaction::Transaction};

    use super::Ledger;

    fn transaction(description: &str, amount: f64) -> Transaction {
        Transaction {
            date: date!(2024 - 01 - 05),
            description: description.to_owned(),
            category: "Expense".to_owned(),
            amount,
        }
    }

    fn ledger_with(transactions: &[Transaction]) -> (tempfile::TempDir, Ledger) {
        let directory = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::load(directory.path().join("finance_data.csv")).unwrap();

        for transaction in transactions {
            ledger.add(transaction.clone()).unwrap();
        }

        (directory, ledger)
    }

    #[test]
    fn add_appends_at_the_end() {
        let (_directory, mut ledger) = ledger_with(&[transaction("a", 1.0)]);

        ledger.add(transaction("b", 2.0)).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(ledger.len() - 1).unwrap().description, "b");
    }

    #[test]
    fn update_changes_only_the_addressed_position() {
        let original = [
            transaction("a", 1.0),
            transaction("b", 2.0),
            transaction("c", 3.0),
        ];
        let (_directory, mut ledger) = ledger_with(&original);

        ledger.update(1, transaction("replaced", -2.0)).unwrap();

        assert_eq!(ledger.get(0), Some(&original[0]));
        assert_eq!(ledger.get(1).unwrap().description, "replaced");
        assert_eq!(ledger.get(2), Some(&original[2]));
    }

    #[test]
    fn remove_compacts_following_positions() {
        let original = [
            transaction("a", 1.0),
            transaction("b", 2.0),
            transaction("c", 3.0),
        ];
        let (_directory, mut ledger) = ledger_with(&original);

        ledger.remove(1).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0), Some(&original[0]));
        assert_eq!(ledger.get(1), Some(&original[2]));
    }

    #[test]
    fn update_out_of_range_is_a_no_op() {
        let (_directory, mut ledger) = ledger_with(&[transaction("a", 1.0)]);

        let result = ledger.update(1, transaction("b", 2.0));

        assert_eq!(
            result,
            Err(Error::PositionOutOfRange {
                position: 1,
                length: 1
            })
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().description, "a");
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let (_directory, mut ledger) = ledger_with(&[transaction("a", 1.0)]);

        let result = ledger.remove(7);

        assert_eq!(
            result,
            Err(Error::PositionOutOfRange {
                position: 7,
                length: 1
            })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn failed_write_leaves_the_sequence_unchanged() {
        let (directory, mut ledger) = ledger_with(&[transaction("a", 1.0)]);

        // Replacing the backing file with a directory makes every write fail.
        let path = directory.path().join("finance_data.csv");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let add_result = ledger.add(transaction("b", 2.0));
        assert!(
            matches!(add_result, Err(Error::Io(_))),
            "want Io error from add, got {add_result:?}"
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().description, "a");

        let update_result = ledger.update(0, transaction("c", 3.0));
        assert!(
            matches!(update_result, Err(Error::Io(_))),
            "want Io error from update, got {update_result:?}"
        );
        assert_eq!(ledger.get(0).unwrap().description, "a");

        let remove_result = ledger.remove(0);
        assert!(
            matches!(remove_result, Err(Error::Io(_))),
            "want Io error from remove, got {remove_result:?}"
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().description, "a");
    }

    #[test]
    fn remove_on_empty_ledger_fails() {
        let (_directory, mut ledger) = ledger_with(&[]);

        let result = ledger.remove(0);

        assert_eq!(
            result,
            Err(Error::PositionOutOfRange {
                position: 0,
                length: 0
            })
        );
    }
}
