use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::constants::{FATE_AMOUNT_KEY, FATE_PATH_KEY};
use crate::error::PortalResult;

/// The penalty path a device has been sentenced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatePath {
    Quiz,
    Payment,
}

impl FatePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Payment => "payment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiz" => Some(Self::Quiz),
            "payment" => Some(Self::Payment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedFate {
    pub path: Option<FatePath>,
    pub owed_amount: Option<u32>,
}

impl PersistedFate {
    pub fn quiz() -> Self {
        Self { path: Some(FatePath::Quiz), owed_amount: None }
    }

    pub fn payment(amount: u32) -> Self {
        Self { path: Some(FatePath::Payment), owed_amount: Some(amount) }
    }

    /// A payment fate must carry a positive amount and an empty fate carries none.
    pub fn is_consistent(&self) -> bool {
        match (self.path, self.owed_amount) {
            (Some(FatePath::Payment), Some(amount)) => amount > 0,
            (Some(FatePath::Payment), None) => false,
            (Some(FatePath::Quiz), _) => true,
            (None, amount) => amount.is_none(),
        }
    }
}

/// Minimal string key-value medium the fate is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PortalResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PortalResult<()>;
    fn remove(&self, key: &str) -> PortalResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        (**self).remove(key)
    }
}

/// In-process medium, lost with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Durable record of the pending penalty, kept under two independent keys.
pub struct FateStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn medium(&self) -> &S {
        &self.store
    }

    /// Writes both keys so that a following `load` returns exactly `fate`.
    pub fn save(&self, fate: &PersistedFate) -> PortalResult<()> {
        match fate.path {
            Some(path) => self.save_path(path)?,
            None => self.store.remove(FATE_PATH_KEY)?,
        }
        match fate.owed_amount {
            Some(amount) => self.save_amount(amount),
            None => self.store.remove(FATE_AMOUNT_KEY),
        }
    }

    pub fn save_path(&self, path: FatePath) -> PortalResult<()> {
        self.store.set(FATE_PATH_KEY, path.as_str())
    }

    pub fn save_amount(&self, amount: u32) -> PortalResult<()> {
        self.store.set(FATE_AMOUNT_KEY, &amount.to_string())
    }

    pub fn load(&self) -> PortalResult<Option<PersistedFate>> {
        let raw_path = self.store.get(FATE_PATH_KEY)?;
        let raw_amount = self.store.get(FATE_AMOUNT_KEY)?;

        if raw_path.is_none() && raw_amount.is_none() {
            return Ok(None);
        }

        let path = raw_path.as_deref().and_then(|value| {
            let parsed = FatePath::parse(value);
            if parsed.is_none() {
                log::warn!("Ignoring unknown persisted fate path {:?}", value);
            }
            parsed
        });
        let owed_amount = raw_amount.as_deref().and_then(|value| {
            let parsed = value.trim().parse::<u32>().ok();
            if parsed.is_none() {
                log::warn!("Ignoring unparsable persisted amount {:?}", value);
            }
            parsed
        });

        Ok(Some(PersistedFate { path, owed_amount }))
    }

    /// Removes both keys. Both removals are attempted even if the first fails.
    pub fn clear(&self) -> PortalResult<()> {
        let path = self.store.remove(FATE_PATH_KEY);
        let amount = self.store.remove(FATE_AMOUNT_KEY);
        path.and(amount)
    }
}
