use crate::error::CollectError;
use crate::model::MemoryReading;
use sysinfo::System;

pub fn collect() -> Result<MemoryReading, CollectError> {
    let mut sys = System::new();
    sys.refresh_memory();

    let total_bytes = sys.total_memory();
    if total_bytes == 0 {
        return Err(CollectError::MemoryUnavailable);
    }
    let used_bytes = total_bytes.saturating_sub(sys.free_memory());

    Ok(MemoryReading {
        total_bytes,
        used_bytes,
    })
}
