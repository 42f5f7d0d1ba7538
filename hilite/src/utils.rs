pub mod event_emitter {
    use std::fmt::Debug;

    use crossbeam_channel::Sender;

    /// Shorthand over crossbeam_channel::Sender::send. The receiving end
    /// lives in the embedding host; once the host tears it down, events are
    /// dropped, not panicked on.
    pub trait EventEmitter<T: Debug> {
        fn emit_event(&self, evt: T);
    }

    impl<T: Debug> EventEmitter<T> for Sender<T> {
        fn emit_event(&self, evt: T) {
            if let Err(err) = self.send(evt) {
                log::warn!("Event dropped, receiver is disconnected: {:?}", err.0);
            }
        }
    }
}
