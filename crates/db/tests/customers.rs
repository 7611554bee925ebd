mod support;

use support::{customer_input, setup_db};

#[test]
fn create_and_fetch_customer() {
    let test_db = setup_db();
    let db = &test_db.db;
    let created = db
        .create_customer(&customer_input("3501010101", "Siti", "siti@example.com", "customer"))
        .expect("create");
    assert!(created.id > 0);

    let by_id = db.get_customer_by_id(created.id).expect("query");
    assert_eq!(by_id.as_ref().map(|c| c.email.as_str()), Some("siti@example.com"));

    let by_email = db.get_customer_by_email("siti@example.com").expect("query");
    assert_eq!(by_email.map(|c| c.id), Some(created.id));

    let by_name = db.get_customer_by_name("Siti").expect("query");
    assert_eq!(by_name.map(|c| c.id), Some(created.id));
}

#[test]
fn missing_customer_is_none() {
    let test_db = setup_db();
    assert!(test_db.db.get_customer_by_id(42).expect("query").is_none());
    assert!(
        test_db
            .db
            .get_customer_by_email("nobody@example.com")
            .expect("query")
            .is_none()
    );
}

#[test]
fn list_and_count_filter_by_role() {
    let test_db = setup_db();
    let db = &test_db.db;
    db.create_customer(&customer_input("1", "Siti", "siti@example.com", "customer"))
        .expect("create");
    db.create_customer(&customer_input("2", "Budi", "budi@example.com", "customer"))
        .expect("create");
    db.create_customer(&customer_input("3", "Admin", "admin@example.com", "admin"))
        .expect("create");

    let customers = db.list_customers(Some("customer")).expect("list");
    assert_eq!(customers.len(), 2);
    assert_eq!(db.count_customers(Some("customer")).expect("count"), 2);
    assert_eq!(db.count_customers(None).expect("count"), 3);
}

#[test]
fn duplicate_email_is_rejected() {
    let test_db = setup_db();
    let db = &test_db.db;
    db.create_customer(&customer_input("1", "Siti", "siti@example.com", "customer"))
        .expect("create");
    let duplicate = db.create_customer(&customer_input("2", "Other", "siti@example.com", "customer"));
    assert!(duplicate.is_err());
}

#[test]
fn update_customer_rewrites_fields() {
    let test_db = setup_db();
    let db = &test_db.db;
    let created = db
        .create_customer(&customer_input("1", "Siti", "siti@example.com", "customer"))
        .expect("create");
    let mut input = customer_input("1", "Siti Rahma", "siti@example.com", "customer");
    input.address = "Jl. Melati 2".to_string();
    let updated = db.update_customer(created.id, &input).expect("update");
    assert_eq!(updated, 1);
    let fetched = db.get_customer_by_id(created.id).expect("query").expect("customer");
    assert_eq!(fetched.name, "Siti Rahma");
    assert_eq!(fetched.address, "Jl. Melati 2");
}
