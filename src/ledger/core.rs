//! Defines the transaction model and the in-memory store backing the app.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, category::Category, ledger::storage::LedgerFile};

/// The ID of a transaction.
pub type TransactionId = i64;

/// A single income or expense record.
///
/// The sign of `amount` is the sole discriminator between the two: positive
/// amounts are income, negative amounts are expenses. There is no separate
/// type field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, minted from the creation time. Immutable
    /// after creation.
    pub id: TransactionId,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: f64,
    /// The category the transaction is filed under.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
}

/// The user-supplied fields of a transaction, before validation.
///
/// `category` stays optional here so the ledger can reject drafts without
/// one. Description and amount are stored as given; the surrounding
/// whitespace of the description is trimmed on the way in.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// A text description of what the transaction is for.
    pub description: String,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: f64,
    /// The category to file the transaction under, if one was chosen.
    pub category: Option<Category>,
    /// When the transaction happened.
    pub date: Date,
}

/// The in-memory transaction collection, mirrored to a [LedgerFile].
///
/// The collection keeps insertion order. Every mutation rewrites the whole
/// file through the storage adapter before returning; there is no batching
/// and no partial persistence.
#[derive(Debug)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    file: LedgerFile,
}

impl Ledger {
    /// Open the ledger backed by `file`, loading whatever collection is
    /// persisted there. An absent or unreadable file starts the ledger
    /// empty.
    pub fn open(file: LedgerFile) -> Self {
        let transactions = file.load();

        Self { transactions, file }
    }

    /// Add a new transaction from `draft`.
    ///
    /// On success the new record is appended to the collection, the whole
    /// collection is persisted, and the record is returned with its freshly
    /// minted id.
    ///
    /// # Errors
    /// Returns [Error::MissingCategory] when the draft has no category, or
    /// [Error::LedgerWrite] when the collection could not be persisted. On
    /// a missing category nothing is mutated and no write is attempted.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let category = draft.category.ok_or(Error::MissingCategory)?;

        let transaction = Transaction {
            id: self.mint_id(),
            description: draft.description.trim().to_owned(),
            amount: draft.amount,
            category,
            date: draft.date,
        };

        self.transactions.push(transaction.clone());
        self.persist()?;

        Ok(transaction)
    }

    /// Replace the non-id fields of the transaction with `id` using `draft`.
    ///
    /// # Errors
    /// Returns [Error::MissingCategory] when the draft has no category,
    /// [Error::NotFound] when no transaction has `id`, or
    /// [Error::LedgerWrite] when the collection could not be persisted. On
    /// the first two nothing is mutated and no write is attempted.
    pub fn update(
        &mut self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction, Error> {
        let category = draft.category.ok_or(Error::MissingCategory)?;

        let Some(transaction) = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        else {
            return Err(Error::NotFound);
        };

        transaction.description = draft.description.trim().to_owned();
        transaction.amount = draft.amount;
        transaction.category = category;
        transaction.date = draft.date;
        let updated = transaction.clone();

        self.persist()?;

        Ok(updated)
    }

    /// Remove the transaction with `id`.
    ///
    /// Removing an id that is not in the collection is a no-op, not an
    /// error, so repeated deletes are harmless. The resulting collection is
    /// persisted either way.
    ///
    /// # Errors
    /// Returns [Error::LedgerWrite] when the resulting collection could not
    /// be persisted.
    pub fn remove(&mut self, id: TransactionId) -> Result<(), Error> {
        self.transactions.retain(|transaction| transaction.id != id);

        self.persist()
    }

    /// Look up a transaction by its id.
    ///
    /// A linear scan: the ledger holds personal-use data volumes, not
    /// performance-critical ones.
    pub fn find_by_id(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The current collection, in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mint the next transaction id.
    ///
    /// Ids come from the wall clock (Unix milliseconds) so they keep
    /// increasing across sessions. Same-millisecond inserts fall back to
    /// bumping the current maximum so ids stay unique and monotonic.
    fn mint_id(&self) -> TransactionId {
        let now_millis =
            (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as TransactionId;

        match self.transactions.iter().map(|transaction| transaction.id).max() {
            Some(newest) if now_millis <= newest => newest + 1,
            _ => now_millis,
        }
    }

    fn persist(&self) -> Result<(), Error> {
        self.file.save(&self.transactions)
    }
}
