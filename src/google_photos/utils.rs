use std::time::{SystemTimeError, UNIX_EPOCH};

pub fn unix_now() -> Result<u64, SystemTimeError> {
    Ok(UNIX_EPOCH.elapsed()?.as_secs())
}
