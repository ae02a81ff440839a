use aimaturity_app_lib::config::AppConfig;
use aimaturity_app_lib::db::DbPool;
use aimaturity_app_lib::error::{AppError, AppResult};
use aimaturity_app_lib::models::lead::{
    ConsultationRequestInput, ContactRequestInput, LeadKind, NewsletterSignupInput,
};
use aimaturity_app_lib::services::lead_service::LeadService;
use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn setup_service() -> AppResult<(LeadService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db = DbPool::new(temp_dir.path().join("leads.sqlite"))?;
    Ok((LeadService::new(db, AppConfig::default()), temp_dir))
}

fn in_days(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_newsletter_signup_is_idempotent() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    let first = service.subscribe_newsletter(NewsletterSignupInput {
        email: Some("Reader@Example.com".to_string()),
        name: None,
        source: Some("footer".to_string()),
    })?;
    assert!(first.success);
    assert!(!first.already_registered);
    assert_eq!(first.kind, LeadKind::Newsletter);

    let second = service.subscribe_newsletter(NewsletterSignupInput {
        email: Some("  reader@example.com ".to_string()),
        ..Default::default()
    })?;
    assert!(second.already_registered);
    assert_eq!(second.lead_id, first.lead_id);

    let stored = service.list_leads(LeadKind::Newsletter, None)?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "reader@example.com");
    assert_eq!(stored[0].payload["source"], "footer");

    Ok(())
}

#[test]
fn test_concurrent_newsletter_signups_store_one_row() -> AppResult<()> {
    const SIGNUPS: usize = 16;

    for _ in 0..20 {
        let (service, _temp_dir) = setup_service()?;
        let service = Arc::new(service);
        let barrier = Arc::new(Barrier::new(SIGNUPS));

        let handles: Vec<_> = (0..SIGNUPS)
            .map(|_| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    service.subscribe_newsletter(NewsletterSignupInput {
                        email: Some("same@example.com".to_string()),
                        ..Default::default()
                    })
                })
            })
            .collect();

        let receipts = handles
            .into_iter()
            .map(|handle| handle.join().expect("signup thread panicked"))
            .collect::<AppResult<Vec<_>>>()?;

        let fresh = receipts.iter().filter(|r| !r.already_registered).count();
        assert_eq!(fresh, 1, "exactly one signup should be new");
        let ids: HashSet<_> = receipts.iter().map(|r| r.lead_id.clone()).collect();
        assert_eq!(ids.len(), 1, "every signup should see the same lead");

        let stored = service.list_leads(LeadKind::Newsletter, None)?;
        assert_eq!(stored.len(), 1);
    }

    Ok(())
}

#[test]
fn test_contact_requests_from_same_email_are_all_kept() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    for _ in 0..2 {
        service.submit_contact(ContactRequestInput {
            name: Some("Katherine Johnson".to_string()),
            email: Some("kj@example.com".to_string()),
            message: Some("Following up on our call.".to_string()),
            ..Default::default()
        })?;
    }

    assert_eq!(service.list_leads(LeadKind::Contact, None)?.len(), 2);
    Ok(())
}

#[test]
fn test_newsletter_requires_valid_email() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    let missing = service.subscribe_newsletter(NewsletterSignupInput::default());
    assert!(matches!(missing, Err(AppError::Validation { .. })));

    let malformed = service.subscribe_newsletter(NewsletterSignupInput {
        email: Some("reader.example.com".to_string()),
        ..Default::default()
    });
    assert!(matches!(malformed, Err(AppError::Validation { .. })));

    assert!(service.list_leads(LeadKind::Newsletter, None)?.is_empty());
    Ok(())
}

#[test]
fn test_contact_request_is_stored() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    let receipt = service.submit_contact(ContactRequestInput {
        name: Some("Katherine Johnson".to_string()),
        email: Some("kj@example.com".to_string()),
        company: Some("Orbital Ltd".to_string()),
        phone: None,
        message: Some("We'd like a workshop for our analytics team.".to_string()),
    })?;
    assert_eq!(receipt.kind, LeadKind::Contact);

    let stored = service.list_leads(LeadKind::Contact, Some(10))?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, receipt.lead_id);
    assert_eq!(stored[0].name.as_deref(), Some("Katherine Johnson"));
    assert_eq!(stored[0].payload["company"], "Orbital Ltd");
    assert!(stored[0].payload["phone"].is_null());

    // Other kinds stay empty.
    assert!(service.list_leads(LeadKind::Consultation, None)?.is_empty());
    Ok(())
}

#[test]
fn test_contact_request_requires_message() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    let result = service.submit_contact(ContactRequestInput {
        name: Some("Katherine Johnson".to_string()),
        email: Some("kj@example.com".to_string()),
        message: Some("   ".to_string()),
        ..Default::default()
    });
    assert!(matches!(result, Err(AppError::Validation { .. })));

    let too_long = service.submit_contact(ContactRequestInput {
        name: Some("Katherine Johnson".to_string()),
        email: Some("kj@example.com".to_string()),
        message: Some("x".repeat(5001)),
        ..Default::default()
    });
    assert!(matches!(too_long, Err(AppError::Validation { .. })));

    Ok(())
}

#[test]
fn test_consultation_booking_checks_date() -> AppResult<()> {
    let (service, _temp_dir) = setup_service()?;

    let receipt = service.book_consultation(ConsultationRequestInput {
        name: Some("Dorothy Vaughan".to_string()),
        email: Some("dorothy@example.com".to_string()),
        preferred_date: Some(in_days(7)),
        preferred_time: Some("10:00".to_string()),
        topic: Some("Automation roadmap".to_string()),
        ..Default::default()
    })?;
    assert_eq!(receipt.kind, LeadKind::Consultation);

    let past = service.book_consultation(ConsultationRequestInput {
        name: Some("Dorothy Vaughan".to_string()),
        email: Some("dorothy@example.com".to_string()),
        preferred_date: Some(in_days(-1)),
        ..Default::default()
    });
    assert!(matches!(past, Err(AppError::Validation { .. })));

    let stored = service.list_leads(LeadKind::Consultation, None)?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].payload["preferred_date"], in_days(7));
    assert_eq!(stored[0].payload["preferred_time"], "10:00");

    Ok(())
}
