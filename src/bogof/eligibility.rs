//! Layered BOGOF eligibility check.
//!
//! Account, email and phone matches are hard blocks, checked in that order
//! and short-circuiting on the first match. IP and device matches only add
//! warnings for manual review; they are looked up concurrently.
//!
//! Any lookup that fails or times out is skipped with a warning. The check
//! itself never fails: infrastructure trouble must not stop a legitimate
//! purchase.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use super::history::{BookingHistory, HistoryError};
use super::models::{BogofIdentity, EligibilityResult, IdentitySignal};

#[derive(Debug, Clone)]
pub struct EligibilityChecker<H> {
    history: H,
    lookup_timeout: Duration,
    warning_limit: i64,
}

impl<H: BookingHistory> EligibilityChecker<H> {
    pub fn new(history: H, lookup_timeout: Duration, warning_limit: i64) -> Self {
        Self {
            history,
            lookup_timeout,
            warning_limit: warning_limit.max(1),
        }
    }

    pub async fn check(&self, identity: &BogofIdentity) -> EligibilityResult {
        let mut warnings = Vec::new();

        for signal in identity.hard_signals() {
            let Some(reason) = signal.denial_reason() else {
                continue;
            };

            match self
                .with_timeout(self.history.latest_paid_bogof(&signal))
                .await
            {
                Ok(Some(booking)) => {
                    info!(
                        reason = ?reason,
                        prior_booking = %booking.id,
                        "BOGOF denied: {} already used",
                        signal.label()
                    );
                    return EligibilityResult::denied(reason, warnings);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("BOGOF {} check skipped: {}", signal.label(), e);
                    warnings.push(incomplete_warning(&signal));
                }
            }
        }

        let (ip_warning, device_warning) = tokio::join!(
            self.soft_layer(identity.ip_signal()),
            self.soft_layer(identity.device_signal()),
        );
        warnings.extend(ip_warning);
        warnings.extend(device_warning);

        EligibilityResult::eligible(warnings)
    }

    async fn soft_layer(&self, signal: Option<IdentitySignal>) -> Option<String> {
        let signal = signal?;

        match self
            .with_timeout(self.history.paid_bogof_bookings(&signal, self.warning_limit))
            .await
        {
            Ok(bookings) if bookings.is_empty() => None,
            Ok(bookings) => {
                let count = if bookings.len() as i64 >= self.warning_limit {
                    format!("At least {}", bookings.len())
                } else {
                    bookings.len().to_string()
                };
                let noun = if bookings.len() == 1 {
                    "booking shares"
                } else {
                    "bookings share"
                };
                let message = format!(
                    "{} previous BOGOF {} this {}; flagged for review",
                    count,
                    noun,
                    signal.label()
                );
                warn!("{}", message);
                Some(message)
            }
            Err(e) => {
                warn!("BOGOF {} check skipped: {}", signal.label(), e);
                Some(incomplete_warning(&signal))
            }
        }
    }

    async fn with_timeout<T, F>(&self, lookup: F) -> Result<T, HistoryError>
    where
        F: Future<Output = Result<T, HistoryError>>,
    {
        tokio::time::timeout(self.lookup_timeout, lookup)
            .await
            .map_err(|_| HistoryError::TimedOut(self.lookup_timeout))?
    }
}

fn incomplete_warning(signal: &IdentitySignal) -> String {
    format!(
        "BOGOF {} check could not be completed; booking allowed pending review",
        signal.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bogof::history::MockBookingHistory;
    use crate::bogof::models::{BookingRef, IneligibleReason};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    const TIMEOUT: Duration = Duration::from_millis(50);

    fn booking() -> BookingRef {
        BookingRef {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn full_identity() -> BogofIdentity {
        BogofIdentity {
            user_id: Some(Uuid::new_v4()),
            email: Some("a@x.com".to_string()),
            phone: Some("07700 900000".to_string()),
            ip_hash: Some("ip-1".to_string()),
            device_fingerprint: Some("dev-1".to_string()),
        }
    }

    fn checker(history: MockBookingHistory) -> EligibilityChecker<MockBookingHistory> {
        EligibilityChecker::new(history, TIMEOUT, 10)
    }

    fn lookup_error() -> HistoryError {
        HistoryError::Lookup(sqlx::Error::PoolTimedOut)
    }

    #[tokio::test]
    async fn test_account_match_short_circuits_other_layers() {
        let mut history = MockBookingHistory::new();
        history
            .expect_latest_paid_bogof()
            .withf(|s| matches!(s, IdentitySignal::UserId(_)))
            .times(1)
            .returning(|_| Ok(Some(booking())));
        history
            .expect_latest_paid_bogof()
            .withf(|s| !matches!(s, IdentitySignal::UserId(_)))
            .times(0);
        history.expect_paid_bogof_bookings().times(0);

        let result = checker(history).check(&full_identity()).await;

        assert!(!result.is_eligible);
        assert_eq!(result.reason, Some(IneligibleReason::AccountAlreadyUsed));
        assert!(result.message.is_some());
    }

    #[tokio::test]
    async fn test_email_match_blocks_after_account_clears() {
        let mut history = MockBookingHistory::new();
        history
            .expect_latest_paid_bogof()
            .withf(|s| matches!(s, IdentitySignal::UserId(_)))
            .times(1)
            .returning(|_| Ok(None));
        history
            .expect_latest_paid_bogof()
            .withf(|s| matches!(s, IdentitySignal::Email(e) if e == "a@x.com"))
            .times(1)
            .returning(|_| Ok(Some(booking())));
        history
            .expect_latest_paid_bogof()
            .withf(|s| matches!(s, IdentitySignal::Phone(_)))
            .times(0);
        history.expect_paid_bogof_bookings().times(0);

        let result = checker(history).check(&full_identity()).await;

        assert_eq!(result.reason, Some(IneligibleReason::EmailAlreadyUsed));
    }

    #[tokio::test]
    async fn test_phone_match_blocks() {
        let mut history = MockBookingHistory::new();
        history.expect_latest_paid_bogof().returning(|s| match s {
            IdentitySignal::Phone(p) if p == "07700900000" => Ok(Some(booking())),
            _ => Ok(None),
        });
        history.expect_paid_bogof_bookings().times(0);

        let result = checker(history).check(&full_identity()).await;

        assert_eq!(result.reason, Some(IneligibleReason::PhoneAlreadyUsed));
    }

    #[tokio::test]
    async fn test_ip_and_device_matches_only_warn() {
        let mut history = MockBookingHistory::new();
        history.expect_latest_paid_bogof().returning(|_| Ok(None));
        history
            .expect_paid_bogof_bookings()
            .withf(|s, limit| matches!(s, IdentitySignal::IpHash(_)) && *limit == 10)
            .times(1)
            .returning(|_, _| Ok(vec![booking(), booking()]));
        history
            .expect_paid_bogof_bookings()
            .withf(|s, _| matches!(s, IdentitySignal::DeviceFingerprint(_)))
            .times(1)
            .returning(|_, _| Ok(vec![booking()]));

        let result = checker(history).check(&full_identity()).await;

        assert!(result.is_eligible);
        assert_eq!(result.reason, None);
        assert_eq!(
            result.warnings,
            vec![
                "2 previous BOGOF bookings share this IP address; flagged for review".to_string(),
                "1 previous BOGOF booking shares this device; flagged for review".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_warning_count_is_capped_at_limit() {
        let mut history = MockBookingHistory::new();
        history.expect_latest_paid_bogof().returning(|_| Ok(None));
        history
            .expect_paid_bogof_bookings()
            .returning(|_, limit| Ok((0..limit).map(|_| booking()).collect()));

        let identity = BogofIdentity {
            ip_hash: Some("shared-office".to_string()),
            ..Default::default()
        };
        let result = EligibilityChecker::new(history, TIMEOUT, 3)
            .check(&identity)
            .await;

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("At least 3 previous"));
    }

    #[tokio::test]
    async fn test_clean_identity_is_eligible_without_warnings() {
        let mut history = MockBookingHistory::new();
        history
            .expect_latest_paid_bogof()
            .times(3)
            .returning(|_| Ok(None));
        history
            .expect_paid_bogof_bookings()
            .times(2)
            .returning(|_, _| Ok(vec![]));

        let result = checker(history).check(&full_identity()).await;

        assert_eq!(result, EligibilityResult::eligible(vec![]));
    }

    #[tokio::test]
    async fn test_lookup_failures_fail_open() {
        let mut history = MockBookingHistory::new();
        history
            .expect_latest_paid_bogof()
            .returning(|_| Err(lookup_error()));
        history
            .expect_paid_bogof_bookings()
            .returning(|_, _| Err(lookup_error()));

        let result = checker(history).check(&full_identity()).await;

        assert!(result.is_eligible);
        assert_eq!(result.warnings.len(), 5);
        assert!(result
            .warnings
            .iter()
            .all(|w| w.contains("could not be completed")));
    }

    #[tokio::test]
    async fn test_failed_layer_does_not_skip_later_hard_blocks() {
        let mut history = MockBookingHistory::new();
        history.expect_latest_paid_bogof().returning(|s| match s {
            IdentitySignal::UserId(_) => Err(lookup_error()),
            IdentitySignal::Email(_) => Ok(Some(booking())),
            _ => Ok(None),
        });

        let result = checker(history).check(&full_identity()).await;

        assert_eq!(result.reason, Some(IneligibleReason::EmailAlreadyUsed));
        assert_eq!(result.warnings.len(), 1);
    }

    /// Never answers within the test timeout
    struct StalledHistory;

    #[async_trait]
    impl BookingHistory for StalledHistory {
        async fn latest_paid_bogof(
            &self,
            _signal: &IdentitySignal,
        ) -> Result<Option<BookingRef>, HistoryError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Some(booking()))
        }

        async fn paid_bogof_bookings(
            &self,
            _signal: &IdentitySignal,
            _limit: i64,
        ) -> Result<Vec<BookingRef>, HistoryError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![booking()])
        }
    }

    #[tokio::test]
    async fn test_timeouts_fail_open() {
        let checker = EligibilityChecker::new(StalledHistory, TIMEOUT, 10);
        let result = checker.check(&full_identity()).await;

        assert!(result.is_eligible);
        assert_eq!(result.warnings.len(), 5);
    }

    /// Paid BOGOF bookings kept in memory, matched the way the database does
    #[derive(Default)]
    struct InMemoryHistory {
        paid: Mutex<Vec<(BogofIdentity, BookingRef)>>,
    }

    impl InMemoryHistory {
        fn record_paid(&self, identity: &BogofIdentity) {
            self.paid
                .lock()
                .unwrap()
                .push((identity.clone(), booking()));
        }

        fn matching(&self, signal: &IdentitySignal) -> Vec<BookingRef> {
            self.paid
                .lock()
                .unwrap()
                .iter()
                .filter(|(identity, _)| {
                    identity.hard_signals().contains(signal)
                        || identity.ip_signal().as_ref() == Some(signal)
                        || identity.device_signal().as_ref() == Some(signal)
                })
                .map(|(_, booking)| booking.clone())
                .collect()
        }
    }

    #[async_trait]
    impl BookingHistory for InMemoryHistory {
        async fn latest_paid_bogof(
            &self,
            signal: &IdentitySignal,
        ) -> Result<Option<BookingRef>, HistoryError> {
            Ok(self.matching(signal).pop())
        }

        async fn paid_bogof_bookings(
            &self,
            signal: &IdentitySignal,
            limit: i64,
        ) -> Result<Vec<BookingRef>, HistoryError> {
            Ok(self
                .matching(signal)
                .into_iter()
                .take(limit as usize)
                .collect())
        }
    }

    #[tokio::test]
    async fn test_rejection_then_retry_with_new_email() {
        let checker = EligibilityChecker::new(InMemoryHistory::default(), TIMEOUT, 10);

        let first = BogofIdentity {
            email: Some("a@x.com".to_string()),
            device_fingerprint: Some("device-42".to_string()),
            ..Default::default()
        };
        assert_eq!(checker.check(&first).await, EligibilityResult::eligible(vec![]));
        checker.history.record_paid(&first);

        let second = BogofIdentity {
            email: Some("A@X.com".to_string()),
            ..Default::default()
        };
        let result = checker.check(&second).await;
        assert!(!result.is_eligible);
        assert_eq!(result.reason, Some(IneligibleReason::EmailAlreadyUsed));

        let third = BogofIdentity {
            email: Some("b@y.com".to_string()),
            device_fingerprint: Some("device-42".to_string()),
            ..Default::default()
        };
        let result = checker.check(&third).await;
        assert!(result.is_eligible);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("device"));
    }
}
