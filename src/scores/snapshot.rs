//! Saved 2048 run, so a reload continues where the player left off.

use tracing::warn;

use crate::error::Result;
use crate::games::twenty48::Snapshot2048;

use super::store::KeyValueStore;

/// Key of the saved `{grid, score}` record.
pub const SNAPSHOT_KEY: &str = "game2048_state";

pub fn save_snapshot<K: KeyValueStore + ?Sized>(store: &mut K, snapshot: &Snapshot2048) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    store.set(SNAPSHOT_KEY, &json)
}

/// The saved run, if there is one and it is well formed.
///
/// Unreadable or invalid records are logged and treated as absent.
pub fn load_snapshot<K: KeyValueStore + ?Sized>(store: &K) -> Option<Snapshot2048> {
    let raw = match store.get(SNAPSHOT_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(%err, "could not read saved 2048 run");
            return None;
        }
    };
    match serde_json::from_str::<Snapshot2048>(&raw) {
        Ok(snapshot) if snapshot.is_valid() => Some(snapshot),
        Ok(_) => {
            warn!("saved 2048 run has invalid tiles, discarding");
            None
        }
        Err(err) => {
            warn!(%err, "saved 2048 run is corrupt, discarding");
            None
        }
    }
}

pub fn clear_snapshot<K: KeyValueStore + ?Sized>(store: &mut K) -> Result<()> {
    store.remove(SNAPSHOT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::twenty48::Grid;
    use crate::scores::MemoryStore;

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let snapshot = Snapshot2048 {
            grid: Grid::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]),
            score: 36,
        };
        save_snapshot(&mut store, &snapshot).unwrap();
        assert_eq!(load_snapshot(&store), Some(snapshot));

        clear_snapshot(&mut store).unwrap();
        assert_eq!(load_snapshot(&store), None);
    }

    #[test]
    fn test_invalid_or_corrupt_is_absent() {
        let mut store = MemoryStore::new();
        let bad = Snapshot2048 { grid: Grid::from_rows([[5, 0, 0, 0], [0; 4], [0; 4], [0; 4]]), score: 0 };
        save_snapshot(&mut store, &bad).unwrap();
        assert_eq!(load_snapshot(&store), None);

        store.set(SNAPSHOT_KEY, "{\"grid\":").unwrap();
        assert_eq!(load_snapshot(&store), None);
    }
}
