// Keyintent Intent Sinks
// Consumers the classifier writes emissions to

use std::sync::mpsc::Sender;

use crate::Emission;

/// Receives the intents produced by a classifier.
pub trait IntentSink {
    fn emit(&mut self, emission: Emission);
}

impl IntentSink for Vec<Emission> {
    fn emit(&mut self, emission: Emission) {
        self.push(emission);
    }
}

impl<S: IntentSink + ?Sized> IntentSink for &mut S {
    fn emit(&mut self, emission: Emission) {
        (**self).emit(emission);
    }
}

impl<S: IntentSink + ?Sized> IntentSink for Box<S> {
    fn emit(&mut self, emission: Emission) {
        (**self).emit(emission);
    }
}

/// Channel sink. Emissions sent after the receiver is gone are dropped.
impl IntentSink for Sender<Emission> {
    fn emit(&mut self, emission: Emission) {
        if self.send(emission).is_err() {
            log::debug!("intent receiver disconnected, dropping {}", emission);
        }
    }
}

/// Sink wrapping a closure
pub struct FnSink<F>(pub F);

impl<F: FnMut(Emission)> IntentSink for FnSink<F> {
    fn emit(&mut self, emission: Emission) {
        (self.0)(emission);
    }
}
