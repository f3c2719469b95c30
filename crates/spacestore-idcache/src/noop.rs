use crate::error::IdCacheResult;
use crate::traits::KvStore;

/// A [`KvStore`] that accepts every write and never returns data.
///
/// Turns the identifier cache off without changing callers: every lookup is
/// a miss.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStore;

impl KvStore for NoopStore {
    fn read(&self, _key: &str) -> IdCacheResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &[u8]) -> IdCacheResult<()> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> IdCacheResult<bool> {
        Ok(false)
    }
}
