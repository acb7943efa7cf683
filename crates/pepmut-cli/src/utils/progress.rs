use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pepmut::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Drives a per-sample progress bar on stderr from batch events.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(Self::bar_style());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total_samples } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_samples);
                    pb_guard.set_position(0);
                    pb_guard.set_message("Parsing samples");
                }
                Progress::SampleFinish { name, retained } => {
                    pb_guard.inc(1);
                    pb_guard.set_message(format!("{} ({} kept)", name, retained));
                }
                Progress::BatchFinish => {
                    let total = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < total {
                        pb_guard.set_position(total);
                    }
                    pb_guard.finish_with_message("Done");
                }
                Progress::Message(msg) => {
                    if pb_guard.is_finished() {
                        pb_guard.set_message(msg);
                    } else {
                        pb_guard.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<30} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = hidden_handler();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_batch_lifecycle() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::BatchStart { total_samples: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::SampleFinish {
            name: "R1_pos".to_string(),
            retained: 42,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
            assert_eq!(pb.message(), "R1_pos (42 kept)");
        }

        callback(Progress::Message("R2_neg: file not found".to_string()));
        callback(Progress::BatchFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.message(), "Done");
        }
    }

    #[test]
    fn message_after_finish_replaces_status() {
        let handler = hidden_handler();
        let callback = handler.get_callback();
        callback(Progress::Message("idle".to_string()));
        assert_eq!(handler.pb.lock().unwrap().message(), "idle");
    }

    #[test]
    fn callback_is_usable_from_worker_threads() {
        let handler = hidden_handler();
        let callback = Arc::new(handler.get_callback());
        callback(Progress::BatchStart { total_samples: 4 });

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let cb = Arc::clone(&callback);
                thread::spawn(move || {
                    cb(Progress::SampleFinish {
                        name: format!("s{}", i),
                        retained: i,
                    })
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(handler.pb.lock().unwrap().position(), 4);
    }
}
