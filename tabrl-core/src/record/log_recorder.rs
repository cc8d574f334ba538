use super::{Record, RecordStorage, RecordValue, Recorder};
use log::info;

fn format_record(record: &Record) -> String {
    let mut items: Vec<_> = record
        .iter()
        .map(|(k, v)| match v {
            RecordValue::Scalar(v) => format!("{}: {:.3}", k, v),
            RecordValue::Array1(v) => format!("{}: {:?}", k, v),
            RecordValue::String(s) => format!("{}: {}", k, s),
        })
        .collect();
    items.sort();
    items.join(", ")
}

/// Writes records through the `log` facade at info level.
///
/// Stored records are aggregated with [`RecordStorage`] and written on flush.
#[derive(Default)]
pub struct LogRecorder {
    storage: RecordStorage,
}

impl LogRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        info!("{}", format_record(&record));
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let record = self.storage.aggregate();
        info!("[{}] {}", step, format_record(&record));
    }
}
