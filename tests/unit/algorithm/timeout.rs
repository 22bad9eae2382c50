//! Tests for deadlines and the timeout guard

#[cfg(test)]
mod tests {
    use hamcycle_adjacency::algorithm::timeout::{Deadline, GuardStatus, Timeout, TimeoutGuard};
    use std::time::{Duration, Instant};

    const HOUR: Duration = Duration::from_secs(3600);

    fn lapsed() -> Deadline {
        let started = Instant::now().checked_sub(Duration::from_secs(1)).unwrap();
        Deadline::new(started, Duration::from_millis(1))
    }

    // Tests a deadline expires once its limit has passed and not before
    // Verified by never reporting expiry
    #[test]
    fn test_deadline_expiry() {
        assert!(lapsed().expired());
        assert!(!Deadline::starting_now(HOUR).expired());
        assert!(!Deadline::new(Instant::now(), HOUR).expired());
    }

    // Tests a deadline is not expired while elapsed time only equals its limit
    // Verified by comparing elapsed time with a non-strict inequality
    #[test]
    fn test_deadline_needs_limit_exceeded() {
        let far_future = Instant::now() + HOUR;
        assert!(!Deadline::new(far_future, Duration::ZERO).expired());

        let started = Instant::now().checked_sub(Duration::from_secs(1)).unwrap();
        assert!(!Deadline::new(started, HOUR).expired());
        assert!(Deadline::new(started, Duration::from_millis(999)).expired());
    }

    // Tests an unbounded guard always continues
    // Verified by treating missing deadlines as expired
    #[test]
    fn test_unbounded_guard() {
        let guard = TimeoutGuard::unbounded();

        assert_eq!(guard.check(), GuardStatus::Continue);
        assert_eq!(guard.check_batch(), GuardStatus::Continue);
        assert_eq!(guard, TimeoutGuard::default());
        assert_eq!(guard, TimeoutGuard::new(None, None));
    }

    // Tests the per-test deadline is reported before the batch deadline
    // Verified by checking the batch deadline first
    #[test]
    fn test_guard_reports_test_deadline_first() {
        let expired = Some(lapsed());
        let pending = Some(Deadline::starting_now(HOUR));

        assert_eq!(
            TimeoutGuard::new(expired, None).check(),
            GuardStatus::SingleTestExceeded
        );
        assert_eq!(
            TimeoutGuard::new(None, expired).check(),
            GuardStatus::AllTestsExceeded
        );
        assert_eq!(
            TimeoutGuard::new(expired, expired).check(),
            GuardStatus::SingleTestExceeded
        );
        assert_eq!(
            TimeoutGuard::new(pending, expired).check(),
            GuardStatus::AllTestsExceeded
        );
        assert_eq!(
            TimeoutGuard::new(expired, pending).check_batch(),
            GuardStatus::Continue
        );
    }

    // Tests guard statuses convert into the matching timeout
    // Verified by swapping the two timeout variants
    #[test]
    fn test_status_into_result() {
        assert_eq!(GuardStatus::Continue.into_result(), Ok(()));
        assert_eq!(
            GuardStatus::SingleTestExceeded.into_result(),
            Err(Timeout::SingleTest)
        );
        assert_eq!(
            GuardStatus::AllTestsExceeded.into_result(),
            Err(Timeout::AllTests)
        );
    }

    // Tests timeout messages
    // Verified by changing the message text
    #[test]
    fn test_timeout_messages() {
        assert_eq!(Timeout::SingleTest.to_string(), "single test timeout exceeded");
        assert_eq!(Timeout::AllTests.to_string(), "all tests timeout exceeded");
    }
}
