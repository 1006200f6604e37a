//! Completion handle for a projectile in flight.
//!
//! The system that owns the projectile keeps the [`LandingSignal`] and fires
//! it from its own `update` once the projectile arrives. The controller keeps
//! the [`Landing`] and checks it after each update phase, so the wait never
//! blocks the frame loop and the follow-up runs on the tick thread.

use frost_core::Vec3;
use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Where and when a projectile came down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub point: Vec3,
    /// Seconds between launch and arrival
    pub flight_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingStatus {
    InFlight,
    Landed(Arrival),
    /// The owning system went away before the projectile arrived
    Abandoned,
}

/// Receiving half: resolves once the projectile lands
#[derive(Debug)]
pub struct Landing {
    receiver: oneshot::Receiver<Arrival>,
}

/// Sending half, owned by the projectile's system
#[derive(Debug)]
pub struct LandingSignal {
    sender: oneshot::Sender<Arrival>,
}

/// Create a connected signal/landing pair
pub fn landing() -> (LandingSignal, Landing) {
    let (sender, receiver) = oneshot::channel();
    (LandingSignal { sender }, Landing { receiver })
}

impl LandingSignal {
    /// Fulfil the landing. Returns false if nobody is waiting any more.
    pub fn land(self, arrival: Arrival) -> bool {
        self.sender.send(arrival).is_ok()
    }

    pub fn is_awaited(&self) -> bool {
        !self.sender.is_canceled()
    }
}

impl Landing {
    /// Check without waiting
    pub fn status(&mut self) -> LandingStatus {
        match self.receiver.try_recv() {
            Ok(Some(arrival)) => LandingStatus::Landed(arrival),
            Ok(None) => LandingStatus::InFlight,
            Err(oneshot::Canceled) => LandingStatus::Abandoned,
        }
    }
}

impl Future for Landing {
    /// `None` when the landing was abandoned
    type Output = Option<Arrival>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(Result::ok)
    }
}
