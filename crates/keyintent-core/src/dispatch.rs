// Keyintent Dispatcher
// One classifier shared by every event source of a window

use std::sync::Arc;

use parking_lot::Mutex;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::sink::IntentSink;
use crate::{ClassificationResult, Classifier, KeyEvent, PlatformProfile};

/// Logical source a key event was delivered from.
///
/// Both sources feed the same classifier, so a navigation started in one
/// can be committed by a release seen in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EventSource {
    /// The page or document surface
    Content,
    /// Browser chrome: address bar, tab strip, controls
    Chrome,
}

struct Inner<S> {
    classifier: Classifier,
    sink: S,
}

/// Serialized classifier plus sink, cloneable across subscriptions.
///
/// Calls are processed in the order they acquire the lock; hosts must still
/// deliver events in input order for de-duplication to be meaningful.
pub struct Dispatcher<S: IntentSink> {
    inner: Arc<Mutex<Inner<S>>>,
}

impl<S: IntentSink> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: IntentSink> Dispatcher<S> {
    pub fn new(classifier: Classifier, sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { classifier, sink })),
        }
    }

    /// Dispatcher with a fresh classifier for `profile`
    pub fn with_profile(profile: PlatformProfile, sink: S) -> Self {
        Self::new(Classifier::configure(profile), sink)
    }

    /// Classify an event from `source` and forward its emissions to the sink
    pub fn dispatch(&self, source: EventSource, event: KeyEvent) -> ClassificationResult {
        let mut inner = self.inner.lock();
        log::trace!("{} event: {}", source, event);

        let result = inner.classifier.process(event);
        for emission in &result {
            inner.sink.emit(*emission);
        }
        result
    }

    /// Reset the shared classifier, e.g. after a focus change
    pub fn reset(&self) {
        self.inner.lock().classifier.reset();
    }

    pub fn can_commit(&self) -> bool {
        self.inner.lock().classifier.can_commit()
    }

    pub fn profile(&self) -> PlatformProfile {
        self.inner.lock().classifier.profile()
    }

    /// Run `f` with exclusive access to the sink
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.lock().sink)
    }
}
