#[cfg(test)]
pub mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::SystemTime;

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    pub fn temp_dir() -> PathBuf {
        let buf = std::env::temp_dir().join(format!(
            "gym-console-{}-{}",
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap()
                .as_nanos(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir(&buf).unwrap();

        buf
    }
}
