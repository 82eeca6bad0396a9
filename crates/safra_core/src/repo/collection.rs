//! Generic collection manager.
//!
//! # Invariants
//! - `update` never changes `id` or `created_at`; patches cannot express them.
//! - `update` on a missing id leaves the store untouched.
//! - `delete` never physically removes a kind that has a retirement flag.
//! - Under [`PersistencePolicy::BestEffort`] a failed write is logged and the
//!   operation still returns its in-memory result; the caller is not
//!   guaranteed the mutation persisted.

use crate::model::clock::{Clock, SystemClock};
use crate::model::dates::{format_date, parse_date};
use crate::model::record::{new_record_id, Activatable, ListOrder, Record};
use crate::search::text::search_records;
use crate::store::{SharedBackend, Store, StoreError};
use log::{info, warn};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Collection manager error.
#[derive(Debug)]
pub enum RepoError {
    /// No record of `kind` carries `id`.
    NotFound { kind: &'static str, id: String },
    /// Store could not be read or written (strict policy only).
    Persistence(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl RepoError {
    pub fn not_found<T: Record>(id: &str) -> Self {
        Self::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// How mutating operations treat store failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistencePolicy {
    /// Log and continue. Unreadable slots read as empty.
    #[default]
    BestEffort,
    /// Surface [`RepoError::Persistence`]; an unreadable slot aborts the
    /// mutation instead of being overwritten.
    Strict,
}

impl PersistencePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestEffort => "best_effort",
            Self::Strict => "strict",
        }
    }
}

/// CRUD and query surface over one record kind.
pub struct CollectionManager<T: Record> {
    store: Store<T>,
    clock: Arc<dyn Clock>,
    policy: PersistencePolicy,
}

impl<T: Record> Clone for CollectionManager<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<T: Record> CollectionManager<T> {
    /// Manager bound to the kind's stable slot key on `backend`.
    pub fn new(backend: &SharedBackend) -> Self {
        Self::with_store(Store::new(backend.clone(), T::STORE_KEY))
    }

    pub fn with_store(store: Store<T>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            policy: PersistencePolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Store<T> {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Creates a record with a fresh id and today's `created_at`.
    pub fn create(&self, draft: T::Draft) -> RepoResult<T> {
        let created_at = format_date(self.clock.today());
        let record = T::from_draft(new_record_id(), created_at, draft);

        let inserted = record.clone();
        self.mutate("create", move |records| {
            records.push(inserted);
            Ok(true)
        })?;

        info!(
            "event=record_create module=repo status=ok kind={} id={}",
            T::KIND,
            record.id()
        );
        Ok(record)
    }

    /// Full store contents in the kind's list order.
    pub fn list(&self) -> Vec<T> {
        let mut records = self.store.read();
        sort_records(&mut records);
        records
    }

    pub fn count(&self) -> usize {
        self.store.read().len()
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.store.read().into_iter().find(|record| record.id() == id)
    }

    /// Shallow-merges `patch` onto the record with `id`.
    pub fn update(&self, id: &str, patch: T::Patch) -> RepoResult<T> {
        self.try_update(id, move |_| Ok::<_, RepoError>(patch))
    }

    /// Like [`CollectionManager::update`], but derives the patch from the
    /// current record while holding the slot lock. An `Err` from `derive`
    /// aborts without writing.
    pub fn try_update<E>(
        &self,
        id: &str,
        derive: impl FnOnce(&T) -> Result<T::Patch, E>,
    ) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        let mut updated = None;
        let mut derive_error = None;
        self.mutate("update", |records| {
            let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
                return Err(RepoError::not_found::<T>(id));
            };
            match derive(&*record) {
                Ok(patch) => {
                    record.apply_patch(patch);
                    updated = Some(record.clone());
                    Ok(true)
                }
                Err(err) => {
                    derive_error = Some(err);
                    Ok(false)
                }
            }
        })?;

        if let Some(err) = derive_error {
            return Err(err);
        }
        updated.ok_or_else(|| RepoError::not_found::<T>(id).into())
    }

    /// Applies a derived patch to every record matching `select`, in one
    /// write. Returns the updated records.
    pub fn update_where(
        &self,
        select: impl Fn(&T) -> bool,
        derive: impl Fn(&T) -> T::Patch,
    ) -> RepoResult<Vec<T>> {
        let mut updated = Vec::new();
        self.mutate("update_where", |records| {
            for record in records.iter_mut().filter(|record| select(&**record)) {
                let patch = derive(&*record);
                record.apply_patch(patch);
                updated.push(record.clone());
            }
            Ok(!updated.is_empty())
        })?;
        Ok(updated)
    }

    /// Removes the record with `id`, or clears its flag for kinds with a
    /// [`Record::retirement_flag`]. Missing ids and already retired records
    /// are a no-op; returns whether anything changed.
    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut outcome = None;
        self.mutate("delete", |records| {
            let Some(index) = records.iter().position(|record| record.id() == id) else {
                return Ok(false);
            };
            outcome = match records[index].retirement_flag() {
                Some(active) if *active => {
                    *active = false;
                    Some("retired")
                }
                Some(_) => None,
                None => {
                    records.remove(index);
                    Some("removed")
                }
            };
            Ok(outcome.is_some())
        })?;

        if let Some(outcome) = outcome {
            info!(
                "event=record_delete module=repo status=ok kind={} id={} outcome={}",
                T::KIND,
                id,
                outcome
            );
        }
        Ok(outcome.is_some())
    }

    /// Text search over the kind's search fields. Blank terms return the
    /// full list.
    pub fn search(&self, term: &str) -> Vec<T> {
        search_records(self.list(), term)
    }

    /// Replaces the whole slot, e.g. when restoring an export.
    pub fn replace_all(&self, records: Vec<T>) -> RepoResult<()> {
        self.mutate("replace_all", move |current| {
            *current = records;
            Ok(true)
        })
    }

    /// Loads the list under the slot lock, lets `apply` change it, and
    /// persists when `apply` reports a change.
    fn mutate(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Vec<T>) -> RepoResult<bool>,
    ) -> RepoResult<()> {
        let lock = self.store.slot_lock();
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = match self.policy {
            PersistencePolicy::BestEffort => self.store.read(),
            PersistencePolicy::Strict => self.store.try_read()?,
        };

        if !apply(&mut records)? {
            return Ok(());
        }

        match self.policy {
            PersistencePolicy::BestEffort => {
                if !self.store.write(&records) {
                    warn!(
                        "event=record_{} module=repo status=degraded kind={} policy=best_effort",
                        operation,
                        T::KIND
                    );
                }
                Ok(())
            }
            PersistencePolicy::Strict => self.store.try_write(&records).map_err(|err| {
                warn!(
                    "event=record_{} module=repo status=error kind={} policy=strict error={}",
                    operation,
                    T::KIND,
                    err
                );
                RepoError::Persistence(err)
            }),
        }
    }
}

impl<T: Activatable> CollectionManager<T> {
    /// Flips the active flag. Activatable kinds are never physically removed
    /// through this path.
    pub fn set_active(&self, id: &str, active: bool) -> RepoResult<T> {
        let mut updated = None;
        self.mutate("set_active", |records| {
            let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
                return Err(RepoError::not_found::<T>(id));
            };
            record.set_active_flag(active);
            updated = Some(record.clone());
            Ok(true)
        })?;
        updated.ok_or_else(|| RepoError::not_found::<T>(id))
    }

    /// Records whose active flag is set, in list order.
    pub fn list_active(&self) -> Vec<T> {
        self.list()
            .into_iter()
            .filter(|record| record.is_active())
            .collect()
    }
}

fn sort_records<T: Record>(records: &mut [T]) {
    match T::LIST_ORDER {
        ListOrder::Storage => {}
        ListOrder::DateAscending => {
            records.sort_by(|a, b| compare_dates(a, b, Ordering::Less));
        }
        ListOrder::DateDescending => {
            records.sort_by(|a, b| compare_dates(a, b, Ordering::Greater));
        }
    }
}

/// Orders by parsed record date; `older` is the ordering an older date gets.
/// Unparseable dates always sort last. Ties keep storage order.
fn compare_dates<T: Record>(a: &T, b: &T, older: Ordering) -> Ordering {
    match (parse_date(a.record_date()), parse_date(b.record_date())) {
        (Some(left), Some(right)) => match left.cmp(&right) {
            Ordering::Less => older,
            Ordering::Greater => older.reverse(),
            Ordering::Equal => Ordering::Equal,
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
