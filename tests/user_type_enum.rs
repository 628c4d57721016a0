use cafe::enums::common::PrepStatus;
use cafe::enums::users::UserType;

#[test]
fn user_type_parses_case_insensitively() {
    assert_eq!(
        UserType::get_enum_from_str(Some("Customer")),
        Some(UserType::Customer)
    );
    assert_eq!(
        UserType::get_enum_from_str(Some("employee")),
        Some(UserType::Employee)
    );
    assert_eq!(
        UserType::get_enum_from_str(Some("Manager ")),
        Some(UserType::Manager)
    );
}

#[test]
fn user_type_rejects_unknown_and_none() {
    assert_eq!(UserType::get_enum_from_str(Some("Owner")), None);
    assert_eq!(UserType::get_enum_from_str(Some("")), None);
    assert_eq!(UserType::get_enum_from_str(None), None);
}

#[test]
fn only_employees_and_managers_are_staff() {
    assert!(!UserType::Customer.is_staff());
    assert!(UserType::Employee.is_staff());
    assert!(UserType::Manager.is_staff());
}

#[test]
fn user_type_display_matches_stored_text() {
    for user_type in UserType::ALL {
        assert_eq!(user_type.to_string(), user_type.as_str());
        assert_eq!(
            UserType::get_enum_from_str(Some(user_type.as_str())),
            Some(user_type)
        );
    }
}

#[test]
fn prep_status_parses_human_readable_values() {
    assert_eq!(
        PrepStatus::get_enum_from_str(Some("Hasnt started")),
        Some(PrepStatus::HasntStarted)
    );
    assert_eq!(
        PrepStatus::get_enum_from_str(Some("finished")),
        Some(PrepStatus::Finished)
    );
    assert_eq!(PrepStatus::get_enum_from_str(Some("Done")), None);
    assert_eq!(PrepStatus::get_enum_from_str(None), None);
}

#[test]
fn prep_status_defaults_to_hasnt_started() {
    assert_eq!(PrepStatus::default(), PrepStatus::HasntStarted);
    assert_eq!(PrepStatus::Started.human_readable(), "Started");
}
