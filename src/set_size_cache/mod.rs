pub(crate) mod file;

use file::SetSizeFile;
use crate::error::FileError;
use crate::provider::SetSizeProvider;
use crate::time::get_server_time_now;
use crate::types::AppId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use futures::future::join_all;
use steamid_ng::SteamID;
use tokio::sync::{Mutex, Semaphore};

/// The default number of set size lookups allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 5;

/// The result of looking up the number of cards in a game's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetSizeLookup {
    /// The number of cards per set. `0` if the game has no trading cards.
    Resolved(u32),
    /// The lookup failed. Failures are not cached.
    Failed,
}

/// A process-wide cache of how many cards make up a set for each game. Entries are added when a
/// game is first looked up and never removed. When backed by a file, the whole table is written
/// out each time new entries are added so that restarts do not repeat lookups.
///
/// The cache is cheap to clone; clones share the same table. Share one cache between every
/// bot's [`InventoryCache`][crate::InventoryCache].
#[derive(Debug, Clone)]
pub struct SetSizeCache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    table: RwLock<HashMap<AppId, u32>>,
    shipping_bot: RwLock<Option<String>>,
    filepath: Option<PathBuf>,
    /// Bounds lookups across every user of the cache.
    permits: Semaphore,
    /// Serializes writes to the file.
    save_lock: Mutex<()>,
}

impl Default for SetSizeCache {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SetSizeCache {
    /// Builder for constructing a [`SetSizeCache`].
    pub fn builder() -> SetSizeCacheBuilder {
        SetSizeCacheBuilder::default()
    }

    /// Creates an empty cache with no backing file.
    pub fn in_memory() -> Self {
        Self::builder().build()
    }

    /// Location of the cache file in the platform's data directory, e.g.
    /// `~/.local/share/steam-card-sets/set_sizes.json` on Linux.
    pub fn default_filepath() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "steam-card-sets")
            .map(|dirs| dirs.data_dir().join("set_sizes.json"))
    }

    /// Gets the cached number of cards per set for a game. Does not perform a lookup.
    pub fn get(&self, appid: AppId) -> Option<u32> {
        self.table().get(&appid).copied()
    }

    /// The number of games in the cache.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Whether the cache has no games.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// A copy of the table.
    pub fn snapshot(&self) -> HashMap<AppId, u32> {
        self.table().clone()
    }

    /// Adds an entry and writes the file if it was added. Returns whether it was added.
    pub async fn insert_and_save(&self, appid: AppId, cards_per_set: u32) -> Result<bool, FileError> {
        if !self.insert(appid, cards_per_set) {
            return Ok(false);
        }

        self.save().await?;
        Ok(true)
    }

    /// Adds an entry if the game is not already cached. Returns whether it was added. Existing
    /// entries are never replaced.
    ///
    /// The file is not written. Call [`save`][Self::save] afterwards, or use
    /// [`insert_and_save`][Self::insert_and_save].
    pub fn insert(&self, appid: AppId, cards_per_set: u32) -> bool {
        let mut table = self.table_mut();

        if table.contains_key(&appid) {
            return false;
        }

        table.insert(appid, cards_per_set);
        true
    }

    /// The name of the bot sets are shipped from.
    pub fn shipping_bot(&self) -> Option<String> {
        self.inner.shipping_bot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the name of the bot sets are shipped from and saves the file.
    pub async fn set_shipping_bot(&self, name: Option<String>) -> Result<(), FileError> {
        {
            let mut shipping_bot = self.inner.shipping_bot
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            if *shipping_bot == name {
                return Ok(());
            }

            *shipping_bot = name;
        }

        self.save().await
    }

    /// Looks up the number of cards per set for a game. The cached value is returned if there
    /// is one, otherwise it is fetched from `provider` and cached.
    pub async fn lookup(
        &self,
        provider: &dyn SetSizeProvider,
        steamid: SteamID,
        appid: AppId,
    ) -> SetSizeLookup {
        self.lookup_many(provider, steamid, &[appid]).await
            .pop()
            .unwrap_or(SetSizeLookup::Failed)
    }

    /// Looks up many games at once. Fetches run concurrently, bounded by the cache's permit
    /// pool. Results are in the same order as `appids`. The file is saved once afterwards if
    /// any new entries were added.
    pub async fn lookup_many(
        &self,
        provider: &dyn SetSizeProvider,
        steamid: SteamID,
        appids: &[AppId],
    ) -> Vec<SetSizeLookup> {
        let count = self.len();
        let tasks = appids
            .iter()
            .map(|appid| self.lookup_one(provider, steamid, *appid))
            .collect::<Vec<_>>();
        let results = join_all(tasks).await;

        if self.len() > count {
            if let Err(error) = self.save().await {
                log::warn!("Error saving set sizes: {error}");
            }
        }

        results
    }

    async fn lookup_one(
        &self,
        provider: &dyn SetSizeProvider,
        steamid: SteamID,
        appid: AppId,
    ) -> SetSizeLookup {
        if let Some(cards_per_set) = self.get(appid) {
            return SetSizeLookup::Resolved(cards_per_set);
        }

        let _permit = match self.inner.permits.acquire().await {
            Ok(permit) => permit,
            Err(_error) => {
                log::warn!("Set size permits closed, skipping lookup for {appid}");
                return SetSizeLookup::Failed;
            },
        };

        // Another lookup may have finished while waiting for a permit.
        if let Some(cards_per_set) = self.get(appid) {
            return SetSizeLookup::Resolved(cards_per_set);
        }

        match provider.fetch_set_size(steamid, appid).await {
            Ok(cards_per_set) => {
                log::debug!("Game {appid} has {cards_per_set} cards per set");
                self.insert(appid, cards_per_set);
                SetSizeLookup::Resolved(cards_per_set)
            },
            Err(error) if error.is_transient() => {
                log::debug!("Set size lookup for {appid} failed, will retry: {error}");
                SetSizeLookup::Failed
            },
            Err(error) => {
                log::warn!("Error looking up set size for {appid}: {error}");
                SetSizeLookup::Failed
            },
        }
    }

    /// Writes the table to the backing file. Does nothing if the cache has no file.
    pub async fn save(&self) -> Result<(), FileError> {
        let Some(filepath) = &self.inner.filepath else {
            return Ok(());
        };
        let _guard = self.inner.save_lock.lock().await;
        let file = SetSizeFile {
            shipping_bot: self.shipping_bot(),
            set_sizes: self.table()
                .iter()
                .map(|(appid, cards_per_set)| (*appid, *cards_per_set))
                .collect(),
            updated_at: Some(get_server_time_now()),
        };

        file::save_set_sizes(filepath, &file).await
    }

    fn table(&self) -> RwLockReadGuard<'_, HashMap<AppId, u32>> {
        self.inner.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_mut(&self) -> RwLockWriteGuard<'_, HashMap<AppId, u32>> {
        self.inner.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for constructing a [`SetSizeCache`].
#[derive(Debug, Clone)]
pub struct SetSizeCacheBuilder {
    filepath: Option<PathBuf>,
    max_concurrent_lookups: usize,
}

impl Default for SetSizeCacheBuilder {
    fn default() -> Self {
        Self {
            filepath: None,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }
}

impl SetSizeCacheBuilder {
    /// The file to persist the cache to.
    pub fn filepath<T>(mut self, filepath: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.filepath = Some(filepath.into());
        self
    }

    /// How many lookups may be in flight at once. Default is 5. Values below 1 are raised to 1.
    pub fn max_concurrent_lookups(mut self, max_concurrent_lookups: usize) -> Self {
        self.max_concurrent_lookups = max_concurrent_lookups.max(1);
        self
    }

    /// Builds an empty cache.
    pub fn build(self) -> SetSizeCache {
        self.build_with(SetSizeFile::default())
    }

    /// Builds the cache, loading the contents of the file if there is one.
    pub async fn load(self) -> Result<SetSizeCache, FileError> {
        let file = match &self.filepath {
            Some(filepath) => file::load_set_sizes(filepath).await?,
            None => SetSizeFile::default(),
        };

        Ok(self.build_with(file))
    }

    /// Builds the cache, loading the contents of the file if there is one. A missing or corrupt
    /// file gives an empty cache.
    pub async fn load_or_default(self) -> SetSizeCache {
        let file = match &self.filepath {
            Some(filepath) => match file::load_set_sizes(filepath).await {
                Ok(file) => file,
                Err(FileError::FileSystem(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                    SetSizeFile::default()
                },
                Err(error) => {
                    log::warn!("Error loading set sizes from {}: {error}", filepath.display());
                    SetSizeFile::default()
                },
            },
            None => SetSizeFile::default(),
        };

        self.build_with(file)
    }

    fn build_with(self, file: SetSizeFile) -> SetSizeCache {
        SetSizeCache {
            inner: Arc::new(Inner {
                table: RwLock::new(file.set_sizes.into_iter().collect()),
                shipping_bot: RwLock::new(file.shipping_bot),
                filepath: self.filepath,
                permits: Semaphore::new(self.max_concurrent_lookups),
                save_lock: Mutex::new(()),
            }),
        }
    }
}
