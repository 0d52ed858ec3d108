use agora_model::{ContactForm, MessageOrigin, RegistrationForm, ValidationError};
use agora_types::RecordId;

// ── Contact form ────────────────────────────────────────────────

#[test]
fn complete_contact_form_validates() {
    let form = ContactForm {
        name: "Fatou".into(),
        email: "fatou@example.org".into(),
        subject: None,
        message: "Bonjour".into(),
    };
    assert!(form.validate().is_ok());
}

#[test]
fn missing_fields_are_all_named() {
    let form = ContactForm::default();
    let err = form.validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingFields(vec![
            "name".into(),
            "email".into(),
            "message".into()
        ])
    );
}

#[test]
fn whitespace_only_counts_as_missing() {
    let form = ContactForm {
        name: "   ".into(),
        email: "a@b.c".into(),
        subject: None,
        message: "x".into(),
    };
    assert_eq!(
        form.validate().unwrap_err(),
        ValidationError::MissingFields(vec!["name".into()])
    );
}

#[test]
fn valid_form_becomes_a_contact_message() {
    let form = ContactForm {
        name: "Ali".into(),
        email: "ali@example.org".into(),
        subject: Some("Question".into()),
        message: "Où se tient la réunion ?".into(),
    };

    let message = form.into_message().unwrap();
    assert_eq!(message.origin, MessageOrigin::Contact);
    assert_eq!(message.name, "Ali");
    assert_eq!(message.subject.as_deref(), Some("Question"));
    assert_eq!(message.body, "Où se tient la réunion ?");
    assert!(!message.read);
    assert!(message.ref_id.is_none());
}

#[test]
fn invalid_form_never_becomes_a_message() {
    let form = ContactForm {
        name: "Ali".into(),
        ..ContactForm::default()
    };
    assert!(form.into_message().is_err());
}

// ── Registration form ───────────────────────────────────────────

#[test]
fn registration_requires_name_and_email() {
    let form = RegistrationForm::default();
    assert_eq!(
        form.validate().unwrap_err(),
        ValidationError::MissingFields(vec!["name".into(), "email".into()])
    );
}

#[test]
fn registration_builds_participant_and_notice() {
    let event_id = RecordId::new("e1");
    let form = RegistrationForm {
        name: "Nadia".into(),
        email: "nadia@example.org".into(),
    };

    let notice = form.into_notice(&event_id);
    assert_eq!(notice.origin, MessageOrigin::Participation);
    assert_eq!(notice.ref_id.as_ref(), Some(&event_id));

    let participant = form.into_participant(&event_id).unwrap();
    assert_eq!(participant.event_id, event_id);
    assert_eq!(participant.name, "Nadia");
    assert!(!participant.confirmed);
}
