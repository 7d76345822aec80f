//! System services consumed by the protocol clients.
//!
//! Embedded firmware built on this crate typically runs a single cooperative
//! scheduler (an RTOS task loop, a superloop or an async executor). Protocol
//! code that has to wait for the network never spins; it hands control back
//! through [`Scheduler::yield_tick`] so the TCP stack and other tasks can make
//! progress.
//!
//! ```rust
//! use picohttp::system::Scheduler;
//!
//! struct TickCounter(u32);
//!
//! impl Scheduler for TickCounter {
//!     fn yield_tick(&mut self) {
//!         // e.g. vTaskDelay(1) on FreeRTOS
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut ticks = TickCounter(0);
//! ticks.yield_tick();
//! assert_eq!(ticks.0, 1);
//! ```

#![allow(async_fn_in_trait)]

/// Cooperative delay of one scheduling unit.
///
/// The length of a tick is platform defined; the HTTP client converts
/// millisecond timeouts to ticks using
/// [`Options::tick_ms`](crate::network::application::http::Options::tick_ms).
pub trait Scheduler {
    /// Suspend the calling task for one tick.
    fn yield_tick(&mut self);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn yield_tick(&mut self) {
        (**self).yield_tick()
    }
}

/// Asynchronous counterpart of [`Scheduler`].
#[cfg(feature = "async")]
pub trait AsyncScheduler {
    /// Wait for one tick.
    async fn yield_tick(&mut self);
}
