//! Background request tracking for the identify panel

use plantid_types::Plant;

/// Lifecycle of the current identification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been made yet
    Idle,
    /// A request is running on a background thread
    InFlight,
    /// The latest request finished with a plant
    Succeeded(Plant),
    /// The latest request failed
    Failed(String),
}

/// Tracks identification requests so only the newest one can publish a result.
///
/// Every request gets a sequence number when it starts, and its completion
/// must echo that number back. A completion whose number no longer matches
/// the latest request is dropped, so a slow response for a previously
/// selected image cannot overwrite the result of the current one.
#[derive(Debug)]
pub struct RequestTracker {
    state: RequestState,
    latest_seq: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            latest_seq: 0,
        }
    }

    /// Current request state
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether a request is currently running
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, RequestState::InFlight)
    }

    /// Start a new request, superseding any in-flight one. Returns the
    /// sequence number its completion must carry.
    pub fn begin(&mut self) -> u64 {
        self.latest_seq += 1;
        self.state = RequestState::InFlight;
        self.latest_seq
    }

    /// Apply a completion. Only the latest in-flight request can complete;
    /// anything else is ignored.
    pub fn complete(&mut self, seq: u64, result: Result<Plant, String>) {
        if seq != self.latest_seq || !self.is_in_flight() {
            return;
        }
        self.state = match result {
            Ok(plant) => RequestState::Succeeded(plant),
            Err(message) => RequestState::Failed(message),
        };
    }

    /// Mark the current request as failed without a completion, used when
    /// the worker thread goes away.
    pub fn fail(&mut self, message: String) {
        self.state = RequestState::Failed(message);
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(name: &str) -> Plant {
        Plant {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_begin_sets_in_flight() {
        let mut tracker = RequestTracker::new();
        assert_eq!(*tracker.state(), RequestState::Idle);

        let seq = tracker.begin();
        assert_eq!(seq, 1);
        assert!(tracker.is_in_flight());
    }

    #[test]
    fn test_completion_applies_result() {
        let mut tracker = RequestTracker::new();
        let seq = tracker.begin();

        tracker.complete(seq, Ok(plant("Rose")));
        assert_eq!(*tracker.state(), RequestState::Succeeded(plant("Rose")));
    }

    #[test]
    fn test_completion_applies_failure() {
        let mut tracker = RequestTracker::new();
        let seq = tracker.begin();

        tracker.complete(seq, Err("request timed out".to_string()));
        assert_eq!(
            *tracker.state(),
            RequestState::Failed("request timed out".to_string())
        );
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        // The first request finishes after the second one started
        tracker.complete(first, Ok(plant("Rose")));
        assert!(tracker.is_in_flight());

        tracker.complete(second, Ok(plant("Oak")));
        assert_eq!(*tracker.state(), RequestState::Succeeded(plant("Oak")));
    }

    #[test]
    fn test_stale_completion_after_result_is_dropped() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        tracker.complete(second, Ok(plant("Oak")));
        tracker.complete(first, Err("too late".to_string()));
        assert_eq!(*tracker.state(), RequestState::Succeeded(plant("Oak")));
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut tracker = RequestTracker::new();
        assert_eq!(tracker.begin(), 1);
        assert_eq!(tracker.begin(), 2);
        assert_eq!(tracker.begin(), 3);
    }

    #[test]
    fn test_fail_marks_current_request() {
        let mut tracker = RequestTracker::new();
        tracker.begin();

        tracker.fail("worker exited".to_string());
        assert_eq!(
            *tracker.state(),
            RequestState::Failed("worker exited".to_string())
        );
        assert!(!tracker.is_in_flight());
    }
}
