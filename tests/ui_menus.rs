use cafe::enums::users::UserType;
use cafe::ui::{role_menu, MenuAction};

#[test]
fn every_role_can_browse_order_and_log_out() {
    for user_type in UserType::ALL {
        let actions = role_menu(user_type);
        assert_eq!(actions[0], MenuAction::BrowseByName);
        assert!(actions.contains(&MenuAction::AddOrder));
        assert!(actions.contains(&MenuAction::OrderStatus));
        assert_eq!(actions.last(), Some(&MenuAction::LogOut));
    }
}

#[test]
fn customers_get_self_service_entries_only() {
    let actions = role_menu(UserType::Customer);

    assert!(actions.contains(&MenuAction::UpdateOrder));
    assert!(actions.contains(&MenuAction::OrderHistory));
    assert!(actions.contains(&MenuAction::UpdateOwnInfo));
    assert!(!actions.contains(&MenuAction::CurrentOrders));
    assert!(!actions.contains(&MenuAction::UpdateMenu));
    assert!(!actions.contains(&MenuAction::UpdateAnyUser));
}

#[test]
fn employees_see_current_orders() {
    let actions = role_menu(UserType::Employee);

    assert!(actions.contains(&MenuAction::EmployeeUpdateOrder));
    assert!(actions.contains(&MenuAction::CurrentOrders));
    assert!(!actions.contains(&MenuAction::OrderHistory));
    assert!(!actions.contains(&MenuAction::UpdateMenu));
}

#[test]
fn only_managers_maintain_menu_and_users() {
    let actions = role_menu(UserType::Manager);

    assert!(actions.contains(&MenuAction::UpdateMenu));
    assert!(actions.contains(&MenuAction::UpdateAnyUser));
    assert!(!actions.contains(&MenuAction::UpdateOwnInfo));
}

#[test]
fn labels_match_console_wording() {
    assert_eq!(MenuAction::BrowseByName.label(), "Browse Menu by ItemName");
    assert_eq!(MenuAction::EmployeeUpdateOrder.label(), "Update Order");
    assert_eq!(MenuAction::UpdateAnyUser.label(), "Update User Info");
    assert_eq!(MenuAction::LogOut.label(), "Log out");
}
