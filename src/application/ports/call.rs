//! Call-state collaborator port interface

/// Port for the external incoming-call state machine.
///
/// Fire-and-forget: nothing here reports back, and audio playback never
/// waits on it.
pub trait CallControl: Send + Sync {
    /// Answer the ringing call
    fn accept(&self);

    /// Reject the ringing call
    fn reject(&self);

    /// Bring the in-call screen forward
    fn show_call_screen(&self) {}
}
