#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total_samples: u64 },
    SampleFinish { name: String, retained: usize },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards pipeline events to an optional observer. Safe to share across worker threads.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        ProgressReporter::new().report(Progress::BatchFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            let label = match event {
                Progress::BatchStart { total_samples } => format!("start:{total_samples}"),
                Progress::SampleFinish { name, retained } => format!("{name}:{retained}"),
                Progress::BatchFinish => "finish".to_string(),
                Progress::Message(msg) => msg,
            };
            seen.lock().unwrap().push(label);
        }));
        reporter.report(Progress::BatchStart { total_samples: 1 });
        reporter.report(Progress::SampleFinish {
            name: "pos".to_string(),
            retained: 12,
        });
        reporter.report(Progress::BatchFinish);
        drop(reporter);
        assert_eq!(seen.into_inner().unwrap(), vec!["start:1", "pos:12", "finish"]);
    }
}
