use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_stream::wrappers::IntervalStream;

pub const LOADING_MESSAGES: [&str; 5] = [
    "Composing the elements...",
    "Applying artistic style...",
    "Adjusting lighting and shadows...",
    "Rendering the final masterpiece...",
    "Almost there...",
];

pub const MESSAGE_INTERVAL: Duration = Duration::from_secs(2);

/// Rotating loading messages shown while a generation is in flight. The first
/// message is yielded immediately, then one every `period`, wrapping around.
pub fn loading_messages(period: Duration) -> impl Stream<Item = &'static str> {
    IntervalStream::new(interval_at(Instant::now(), period))
        .enumerate()
        .map(|(tick, _)| LOADING_MESSAGES[tick % LOADING_MESSAGES.len()])
}
