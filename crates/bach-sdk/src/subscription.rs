//! Push payload consumer

use bach_abi::DataChunks;
use tokio::sync::mpsc;

use crate::SdkError;

/// Ordered stream of hex push payloads from a transport.
///
/// The producer closes the channel exactly once, on error or shutdown; after
/// that every read returns `None`.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<String>,
}

impl Subscription {
    /// Wrap the receiving side of a payload channel
    pub fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    /// Next raw payload
    pub async fn next_payload(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Next payload split into 32-byte chunks
    pub async fn next_chunks(&mut self) -> Option<Result<DataChunks, SdkError>> {
        let payload = self.receiver.recv().await?;
        tracing::trace!(len = payload.len(), "push payload");
        Some(DataChunks::from_hex(&payload).map_err(SdkError::from))
    }

    /// Stop accepting payloads; buffered ones can still be read
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bach_primitives::U256;

    #[tokio::test]
    async fn test_payloads_in_order_then_none() {
        let (tx, rx) = mpsc::channel(4);
        let mut sub = Subscription::new(rx);

        tx.send(format!("{:064x}", 1)).await.unwrap();
        tx.send(format!("0x{:064x}", 2)).await.unwrap();
        drop(tx);

        let first = sub.next_chunks().await.unwrap().unwrap();
        assert_eq!(first.decode_uint(0).unwrap(), U256::from(1u64));
        let second = sub.next_chunks().await.unwrap().unwrap();
        assert_eq!(second.decode_uint(0).unwrap(), U256::from(2u64));
        assert!(sub.next_chunks().await.is_none());
    }

    #[tokio::test]
    async fn test_bad_payload_is_an_error_item() {
        let (tx, rx) = mpsc::channel(1);
        let mut sub = Subscription::new(rx);
        tx.send("0xnothex".to_string()).await.unwrap();
        assert!(matches!(sub.next_chunks().await, Some(Err(SdkError::Abi(_)))));
    }

    #[tokio::test]
    async fn test_close_drains_buffer() {
        let (tx, rx) = mpsc::channel(2);
        let mut sub = Subscription::new(rx);
        tx.send("0x".to_string()).await.unwrap();
        sub.close();
        assert!(tx.send("0x".to_string()).await.is_err());
        assert_eq!(sub.next_payload().await.as_deref(), Some("0x"));
        assert!(sub.next_payload().await.is_none());
    }
}
