use cafe::enums::common::{OrderDetails, PrepStatus};
use cafe::enums::users::UserType;
use cafe::models::admin::MenuItem;
use cafe::models::common::{ItemStatus, Order};
use cafe::models::user::User;
use cafe::traits::{write_rows, Cell, TableRow};
use cafe::ui::render::write_order_details;
use chrono::NaiveDate;

fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(8, 5, 0))
        .expect("valid timestamp")
}

#[test]
fn cells_render_scalars() {
    assert_eq!(4.5_f64.cell(), "4.50");
    assert_eq!(true.cell(), "t");
    assert_eq!(false.cell(), "f");
    assert_eq!(Option::<String>::None.cell(), "null");
    assert_eq!(Some(12_i32).cell(), "12");
    assert_eq!(timestamp().cell(), "2024-03-09 08:05:00");
    assert_eq!(PrepStatus::HasntStarted.cell(), "Hasnt started");
    assert_eq!(UserType::Manager.cell(), "Manager");
}

#[test]
fn user_headers_use_console_column_names() {
    assert_eq!(
        User::headers(),
        vec!["login", "phonenum", "password", "favitems", "type"]
    );
}

#[test]
fn menu_item_cells_follow_headers() {
    let item = MenuItem {
        item_name: "Latte".to_string(),
        item_type: "Drinks".to_string(),
        price: 4.5,
        description: None,
        image_url: Some("http://img/latte.png".to_string()),
    };

    assert_eq!(
        MenuItem::headers(),
        vec!["itemname", "type", "price", "description", "imageurl"]
    );
    assert_eq!(
        item.cells(),
        vec!["Latte", "Drinks", "4.50", "null", "http://img/latte.png"]
    );
}

#[test]
fn write_rows_prints_header_then_rows() {
    let orders = vec![
        Order {
            order_id: 3,
            login: "alice".to_string(),
            paid: false,
            received_at: timestamp(),
            total: 6.75,
        },
        Order {
            order_id: 4,
            login: "alice".to_string(),
            paid: true,
            received_at: timestamp(),
            total: 0.0,
        },
    ];

    let mut out = Vec::new();
    let count = write_rows(&mut out, &orders).expect("write rows");
    assert_eq!(count, 2);

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(
        text,
        "orderid\tlogin\tpaid\ttimestamprecieved\ttotal\t\n\
         3\talice\tf\t2024-03-09 08:05:00\t6.75\t\n\
         4\talice\tt\t2024-03-09 08:05:00\t0.00\t\n"
    );
}

#[test]
fn write_rows_prints_nothing_for_empty_slice() {
    let mut out = Vec::new();
    let count = write_rows::<ItemStatus>(&mut out, &[]).expect("write rows");

    assert_eq!(count, 0);
    assert!(out.is_empty());
}

#[test]
fn order_details_without_items_say_so() {
    let details = OrderDetails {
        order: Order {
            order_id: 9,
            login: "bob".to_string(),
            paid: false,
            received_at: timestamp(),
            total: 0.0,
        },
        items: vec![],
    };

    let mut out = Vec::new();
    write_order_details(&mut out, &details).expect("write details");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("9\tbob\tf\t"));
    assert!(text.ends_with("\tNo items in this order\n"));
}

#[test]
fn order_details_list_item_status() {
    let details = OrderDetails {
        order: Order {
            order_id: 9,
            login: "bob".to_string(),
            paid: true,
            received_at: timestamp(),
            total: 4.5,
        },
        items: vec![ItemStatus {
            order_id: 9,
            item_name: "Latte".to_string(),
            last_updated: timestamp(),
            status: PrepStatus::Started,
            comments: None,
        }],
    };

    let mut out = Vec::new();
    write_order_details(&mut out, &details).expect("write details");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("orderid\titemname\tlastupdated\tstatus\tcomments\t\n"));
    assert!(text.contains("9\tLatte\t2024-03-09 08:05:00\tStarted\tnull\t\n"));
}
