use tracing::warn;
use treeswap_core::{EventSink, TracingSink, WalkEvent};

use crate::diff;

/// Logs every event and, with `--diff`, prints content changes as they happen.
pub struct ConsoleSink {
    inner: TracingSink,
    show_diff: bool,
}

impl ConsoleSink {
    pub fn new(show_diff: bool) -> Self {
        Self {
            inner: TracingSink,
            show_diff,
        }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &WalkEvent<'_>) {
        self.inner.emit(event);

        if !self.show_diff {
            return;
        }
        if let WalkEvent::ContentReplaced { path, original, replaced, .. } = *event {
            match diff::render_diff(path, original, replaced) {
                Ok(Some(rendered)) => println!("{}", rendered),
                Ok(None) => {}
                Err(e) => warn!("Could not render diff for {:?}: {}", path, e),
            }
        }
    }
}
