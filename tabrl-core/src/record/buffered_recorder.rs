use super::{Record, Recorder};

/// Keeps every record in memory.
///
/// This is what a presentation layer holds on to for reward curves and per-episode tables.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
}

impl BufferedRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Scalar values of `key`, in the order they were recorded. Records without the key
    /// are skipped.
    pub fn scalars(&self, key: &str) -> Vec<f32> {
        self.buf
            .iter()
            .filter_map(|r| r.get_scalar(key).ok())
            .collect()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn store(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn flush(&mut self, _step: i64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let mut recorder = BufferedRecorder::new();
        recorder.store(Record::from_scalar("episode_return", 1.0));
        recorder.store(Record::from_scalar("eval_return", 7.0));
        recorder.write(Record::from_scalar("episode_return", 2.0));
        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.scalars("episode_return"), vec![1.0, 2.0]);
    }
}
