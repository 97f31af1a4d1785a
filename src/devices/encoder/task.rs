//! Embassy poll-tick runner
//!
//! Drives [`RotaryEncoder::poll`] from a periodic ticker. The entity is
//! shared through [`SharedState`] so application tasks can call
//! `set_value`/`value` between ticks; the decode interrupt itself never
//! goes through this lock, it only touches the atomic decoder state.
//!
//! This module requires the Embassy runtime and is only available with the
//! `embassy` feature.

#![cfg(feature = "embassy")]

use embassy_time::{Duration, Ticker};

use super::RotaryEncoder;
use crate::core::traits::SharedState;
use crate::platform::traits::{InputPinInterface, StorageInterface};

/// Run the encoder poll loop forever.
///
/// Call from an async task after `setup` has succeeded:
///
/// ```ignore
/// static ENCODER: StaticCell<EmbassyState<RotaryEncoder<PinA, PinB, Nvs>>> = StaticCell::new();
///
/// #[embassy_executor::task]
/// async fn encoder_task(shared: &'static EmbassyState<RotaryEncoder<PinA, PinB, Nvs>>) {
///     rotary_sense::devices::encoder::task::run(shared, Duration::from_millis(10)).await;
/// }
/// ```
pub async fn run<A, B, S, St>(shared: &St, period: Duration)
where
    A: InputPinInterface,
    B: InputPinInterface,
    S: StorageInterface,
    St: SharedState<RotaryEncoder<A, B, S>>,
{
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        shared.with_mut(|encoder| encoder.poll());
    }
}
