use std::{collections::VecDeque, time::Duration};

use tokio::{
    sync::Mutex,
    time::{Instant, sleep_until},
};

use crate::info;

/// Sliding-log rate limiter shared by every remote call of a run.
///
/// Keeps the timestamps of the calls issued within the trailing window.
/// Callers serialize on the inner mutex, so waiters are released in FIFO
/// order and at most `max_requests` calls fall into any window.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    time_window: Duration,
    requests: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            time_window,
            requests: Mutex::new(VecDeque::with_capacity(max_requests.max(1))),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn time_window(&self) -> Duration {
        self.time_window
    }

    /// Waits until one more call fits into the window, then records it.
    pub async fn acquire(&self) {
        let mut requests = self.requests.lock().await;

        let now = Instant::now();
        self.prune(&mut requests, now);

        if requests.len() >= self.max_requests {
            if let Some(&oldest) = requests.front() {
                let ready_at = oldest + self.time_window;
                if ready_at > now {
                    info!(
                        "Rate limit reached. Waiting {:.2} seconds...",
                        (ready_at - now).as_secs_f64()
                    );
                    sleep_until(ready_at).await;
                }
                self.prune(&mut requests, Instant::now());
            }
        }

        requests.push_back(Instant::now());
    }

    /// Number of calls currently inside the window.
    pub async fn in_window(&self) -> usize {
        let mut requests = self.requests.lock().await;
        self.prune(&mut requests, Instant::now());
        requests.len()
    }

    // An entry ages out once it is a full window old.
    fn prune(&self, requests: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&front) = requests.front() {
            if now.duration_since(front) >= self.time_window {
                requests.pop_front();
            } else {
                break;
            }
        }
    }
}
