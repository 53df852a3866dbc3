use super::common::*;
use crate::workflows::intake::service::SubmissionError;
use crate::workflows::intake::validation::IntakeRejection;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn submit_stores_record_after_delay() {
    let (service, sink) = build_service(slow_config());
    let started = tokio::time::Instant::now();

    let record = service
        .submit(form(), CancellationToken::new())
        .await
        .expect("submission succeeds");

    assert!(started.elapsed() >= slow_config().submission_delay);
    assert!(record.id().0.starts_with("app-"));
    assert_eq!(sink.records(), vec![record]);
    assert!(!service.is_pending("ahmed.m@example.com"));
}

#[tokio::test(start_paused = true)]
async fn second_submission_during_delay_is_rejected() {
    let (service, sink) = build_service(slow_config());

    let first = tokio::spawn({
        let service = service.clone();
        async move { service.submit(form(), CancellationToken::new()).await }
    });
    wait_until_pending(&service, "ahmed.m@example.com").await;

    let mut retry = form();
    retry.email = "  AHMED.M@example.com ".to_string();
    match service.submit(retry, CancellationToken::new()).await {
        Err(SubmissionError::AlreadyPending) => {}
        other => panic!("expected pending rejection, got {other:?}"),
    }

    let stored = first.await.expect("task joins").expect("first submission succeeds");
    assert_eq!(sink.records(), vec![stored]);

    let again = service
        .submit(form(), CancellationToken::new())
        .await
        .expect("guard released after completion");
    assert_eq!(sink.records().len(), 2);
    assert_ne!(sink.records()[0].id(), again.id());
}

#[tokio::test(start_paused = true)]
async fn other_applicants_are_not_blocked_by_a_pending_submission() {
    let (service, sink) = build_service(slow_config());

    let first = tokio::spawn({
        let service = service.clone();
        async move { service.submit(form(), CancellationToken::new()).await }
    });
    wait_until_pending(&service, "ahmed.m@example.com").await;

    let mut other = form();
    other.full_name = "Fatima Al-Sayed".to_string();
    other.email = "fatima.a@example.com".to_string();
    service
        .submit(other, CancellationToken::new())
        .await
        .expect("different applicant proceeds");

    first.await.expect("task joins").expect("first submission succeeds");
    assert_eq!(sink.records().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_submission_stores_nothing_and_releases_guard() {
    let (service, sink) = build_service(slow_config());
    let cancel = CancellationToken::new();

    let pending = tokio::spawn({
        let service = service.clone();
        let cancel = cancel.clone();
        async move { service.submit(form(), cancel).await }
    });
    wait_until_pending(&service, "ahmed.m@example.com").await;
    cancel.cancel();

    match pending.await.expect("task joins") {
        Err(SubmissionError::Cancelled) => {}
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(sink.records().is_empty());
    assert!(!service.is_pending("ahmed.m@example.com"));
}

#[tokio::test(start_paused = true)]
async fn shutdown_token_cancels_child_submissions() {
    let (service, sink) = build_service(slow_config());
    let cancel = service.shutdown_token().child_token();

    let pending = tokio::spawn({
        let service = service.clone();
        async move { service.submit(form(), cancel).await }
    });
    wait_until_pending(&service, "ahmed.m@example.com").await;
    service.shutdown_token().cancel();

    assert!(matches!(
        pending.await.expect("task joins"),
        Err(SubmissionError::Cancelled)
    ));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn invalid_form_never_claims_the_guard() {
    let (service, sink) = build_service(instant_config());
    let mut form = form();
    form.phone = "abc".to_string();

    match service.submit(form, CancellationToken::new()).await {
        Err(SubmissionError::Rejected(IntakeRejection::Fields(errors))) => {
            assert_eq!(errors.len(), 1);
        }
        other => panic!("expected field rejection, got {other:?}"),
    }
    assert!(!service.is_pending("ahmed.m@example.com"));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn sink_failures_propagate_and_release_guard() {
    let service = crate::workflows::intake::IntakeService::new(
        std::sync::Arc::new(UnavailableSink),
        instant_config(),
    );

    match service.submit(form(), CancellationToken::new()).await {
        Err(SubmissionError::Sink(_)) => {}
        other => panic!("expected sink failure, got {other:?}"),
    }
    assert!(!service.is_pending("ahmed.m@example.com"));
}

#[tokio::test]
async fn taken_ids_are_skipped_until_a_free_one_is_found() {
    let sink = std::sync::Arc::new(TakenIdsSink::new(3));
    let service = crate::workflows::intake::IntakeService::new(sink.clone(), instant_config());

    let record = service
        .submit(form(), CancellationToken::new())
        .await
        .expect("a free id is eventually drawn");

    assert_eq!(sink.inner.records(), vec![record]);
    assert!(!service.is_pending("ahmed.m@example.com"));
}

#[tokio::test]
async fn persistent_conflicts_still_surface() {
    let service = crate::workflows::intake::IntakeService::new(
        std::sync::Arc::new(ConflictSink),
        instant_config(),
    );

    assert!(matches!(
        service.submit(form(), CancellationToken::new()).await,
        Err(SubmissionError::Sink(crate::workflows::intake::SinkError::Conflict))
    ));
}
