//! Keep-latest delivery of decoded payloads to a pairing session
//!
//! A camera produces frames faster than they can be verified. The feed keeps
//! only the most recent undelivered payload: publishing overwrites, and the
//! consumer never sees intermediate payloads it was too slow for.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::pairing::{PairingSession, Transition};
use crate::ports::{DocumentSource, FrameDecoder};

pub struct ScanFeed;

impl ScanFeed {
    /// Create a connected producer/consumer pair
    pub fn channel() -> (FeedSender, FeedReceiver) {
        let (tx, rx) = watch::channel(None);
        (FeedSender { tx }, FeedReceiver { rx })
    }
}

/// Producer half, owned by the frame source
#[derive(Debug)]
pub struct FeedSender {
    tx: watch::Sender<Option<String>>,
}

impl FeedSender {
    /// Offer a decoded payload, replacing any undelivered one
    pub fn publish(&self, payload: impl Into<String>) {
        self.tx.send_replace(Some(payload.into()));
    }

    /// Decode `frame` and publish its payload
    ///
    /// # Returns
    ///
    /// `false` if the frame held no readable code; nothing is published then
    pub fn publish_frame<F: FrameDecoder>(&self, decoder: &F, frame: &F::Frame) -> bool {
        match decoder.decode(frame) {
            Some(payload) => {
                self.publish(payload);
                true
            }
            None => false,
        }
    }
}

/// Consumer half, owned by the pairing loop
#[derive(Debug)]
pub struct FeedReceiver {
    rx: watch::Receiver<Option<String>>,
}

impl FeedReceiver {
    /// Wait for the next payload
    ///
    /// Returns `None` once the sender is dropped and the last payload has
    /// been delivered.
    pub async fn next(&mut self) -> Option<String> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let latest = self.rx.borrow_and_update().clone();
            if let Some(payload) = latest {
                return Some(payload);
            }
        }
    }
}

/// Drive `session` with payloads from `receiver` until the feed closes
///
/// Each payload is processed to completion before the next one is taken.
/// The session, and any certificate still waiting in its trust slot, is
/// dropped when the feed closes.
///
/// # Returns
///
/// The number of payloads processed
pub async fn run_pairing<D, F>(
    mut session: PairingSession<D>,
    mut receiver: FeedReceiver,
    mut on_transition: F,
) -> usize
where
    D: DocumentSource,
    F: FnMut(&Transition),
{
    let mut processed = 0;
    while let Some(payload) = receiver.next().await {
        let transition = session.process(&payload);
        debug!("Scan {} -> {}", processed, transition);
        on_transition(&transition);
        processed += 1;
    }

    if !session.trust_slot().is_empty() {
        info!("Scan feed closed with an unpaired certificate, discarding it");
    }
    processed
}
