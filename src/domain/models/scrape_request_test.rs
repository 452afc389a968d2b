use super::*;
use serde_json::json;

fn new_request() -> ScrapeRequest {
    ScrapeRequest::new(
        Uuid::new_v4(),
        "https://example.com/p/1".to_string(),
        Platform::Amazon,
        vec!["title".to_string()],
        None,
    )
}

#[test]
fn test_new_request_starts_processing() {
    let request = new_request();

    assert_eq!(request.status, ScrapeStatus::Processing);
    assert!(request.request_id.starts_with("req_"));
    assert!(request.result_data.is_none());
    assert!(request.error_message.is_none());
    assert!(request.completed_at.is_none());
    assert_eq!(request.result_count, 0);
}

#[test]
fn test_complete_sets_result_fields() {
    let request = new_request()
        .complete(json!({"url": "https://example.com/p/1"}), 1)
        .unwrap();

    assert_eq!(request.status, ScrapeStatus::Completed);
    assert!(request.result_data.is_some());
    assert!(request.completed_at.is_some());
    assert!(request.error_message.is_none());
    assert_eq!(request.result_count, 1);
}

#[test]
fn test_terminal_states_reject_further_transitions() {
    let completed = new_request().complete(json!({}), 1).unwrap();
    assert_eq!(
        completed.clone().complete(json!({}), 1).unwrap_err(),
        DomainError::InvalidStateTransition {
            from: ScrapeStatus::Completed
        }
    );
    assert!(completed.cancel().is_err());

    let failed = new_request().fail("boom").unwrap();
    assert_eq!(
        failed.clone().fail("again").unwrap_err(),
        DomainError::InvalidStateTransition {
            from: ScrapeStatus::Failed
        }
    );
    assert!(failed.complete(json!({}), 1).is_err());
}

#[test]
fn test_cancel_marks_failed_with_message() {
    let cancelled = new_request().cancel().unwrap();

    assert_eq!(cancelled.status, ScrapeStatus::Failed);
    assert_eq!(cancelled.error_message.as_deref(), Some(CANCELLED_BY_USER));
    assert!(cancelled.result_data.is_none());
    assert!(cancelled.completed_at.is_some());
}

#[test]
fn test_pending_can_fail_but_not_complete() {
    let mut pending = new_request();
    pending.status = ScrapeStatus::Pending;

    assert!(pending.clone().complete(json!({}), 1).is_err());
    assert_eq!(pending.cancel().unwrap().status, ScrapeStatus::Failed);
}

#[test]
fn test_platform_parsing_is_case_insensitive() {
    assert_eq!("Amazon".parse::<Platform>().unwrap(), Platform::Amazon);
    assert_eq!("ETSY".parse::<Platform>().unwrap(), Platform::Etsy);

    let err = "bestbuy".parse::<Platform>().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bestbuy"));
    assert!(message.contains("amazon, shopify, ebay, walmart, etsy"));
}

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        ScrapeStatus::Pending,
        ScrapeStatus::Processing,
        ScrapeStatus::Completed,
        ScrapeStatus::Failed,
    ] {
        assert_eq!(status.to_string().parse::<ScrapeStatus>().unwrap(), status);
    }
    assert!("queued".parse::<ScrapeStatus>().is_err());
}
