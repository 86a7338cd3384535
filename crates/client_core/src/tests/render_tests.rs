use super::*;

fn inventory(json: &str) -> Vec<InventoryItem> {
    serde_json::from_str(json).expect("decode inventory")
}

#[test]
fn inventory_rows_carry_stock_status_labels() {
    let items = inventory(
        r#"[
            {"product_id":1,"quantity":0,"min_stock":3,"max_stock":50,"product":{"name":"Tee","sku":"T-1"}},
            {"product_id":2,"quantity":3,"min_stock":3,"max_stock":50,"product":{"name":"Jeans","sku":"J-1"}},
            {"product_id":3,"quantity":9,"min_stock":3,"max_stock":50,"product":{"name":"Dress","sku":"D-1"}}
        ]"#,
    );

    let html = render_inventory(&items).expect("render");

    assert!(html.contains(r#"<span class="stock-out">Out of stock</span>"#));
    assert!(html.contains(r#"<span class="stock-low">Low stock</span>"#));
    assert!(html.contains(r#"<span class="stock-ok">OK</span>"#));
}

#[test]
fn products_render_price_with_two_decimals() {
    let products: Vec<Product> = serde_json::from_str(
        r#"[{"id":7,"sku":"T-1","name":"Tee","category":"Shirts","price":49.9}]"#,
    )
    .expect("decode");

    let html = render_products(&products, &Formatting::default()).expect("render");

    assert!(html.contains("<td>R$ 49.90</td>"));
    assert!(html.contains("<td>T-1</td>"));
}

#[test]
fn tables_carry_no_untriggerable_controls() {
    let products: Vec<Product> = serde_json::from_str(
        r#"[{"id":7,"sku":"T-1","name":"Tee","category":"Shirts","price":1}]"#,
    )
    .expect("decode");
    let items = inventory(
        r#"[{"product_id":1,"quantity":4,"min_stock":1,"max_stock":9,"product":{"name":"Tee","sku":"T-1"}}]"#,
    );

    let products_html = render_products(&products, &Formatting::default()).expect("render");
    let inventory_html = render_inventory(&items).expect("render");

    for html in [products_html, inventory_html] {
        assert!(!html.contains("<button"));
        assert!(!html.contains("Actions"));
    }
}

#[test]
fn markup_in_payload_is_escaped() {
    let products: Vec<Product> = serde_json::from_str(
        r#"[{"id":1,"sku":"X","name":"<script>alert(1)</script>","category":"c","price":1}]"#,
    )
    .expect("decode");

    let html = render_products(&products, &Formatting::default()).expect("render");

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn customers_without_contact_details_show_dash() {
    let customers: Vec<Customer> = serde_json::from_str(
        r#"[{"id":1,"name":"Bea","email":"","cpf":"123","phone":null}]"#,
    )
    .expect("decode");

    let html = render_customers(&customers).expect("render");

    assert_eq!(html.matches("<td>-</td>").count(), 2);
}

#[test]
fn sales_without_customer_name_are_walk_in() {
    let sales: Vec<Sale> = serde_json::from_str(
        r#"[
            {"id":1,"customer":{"name":""},"sale_date":"2024-01-31T10:00:00-03:00","final_amount":100,"status":"pending"},
            {"id":2,"sale_date":"2024-02-01T10:00:00Z","final_amount":5.5,"status":"confirmed"},
            {"id":3,"customer":{"name":"Caio"},"sale_date":"2024-02-02T10:00:00Z","final_amount":1,"status":"cancelled"}
        ]"#,
    )
    .expect("decode");

    let html = render_sales(&sales, &Formatting::new("US$")).expect("render");

    assert_eq!(html.matches(WALK_IN_CUSTOMER).count(), 2);
    assert!(html.contains("Caio"));
    assert!(html.contains("31/01/2024"));
    assert!(html.contains("US$ 5.50"));
    assert!(html.contains(r#"<span class="status-cancelled">cancelled</span>"#));
}

#[test]
fn reports_show_totals_and_optional_breakdowns() {
    let report: SalesReport = serde_json::from_str(
        r#"{"total_sales":12,"total_amount":1234.5,
            "top_products":[{"product_name":"Tee","quantity":8,"revenue":399.2}],
            "sales_by_status":{"pending":2,"delivered":10}}"#,
    )
    .expect("decode");

    let html = render_reports(&report, &Formatting::default()).expect("render");

    assert!(html.contains(r#"<div class="stat-number">12</div>"#));
    assert!(html.contains("R$ 1234.50"));
    assert!(html.contains("R$ 399.20"));
    assert!(html.contains("Sales by status"));
    assert!(!html.contains("Sales by month"));
}

#[test]
fn movements_render_dates_and_reasons() {
    let movements: Vec<InventoryMovement> = serde_json::from_str(
        r#"[{"id":1,"product_id":2,"movement_type":"adjustment","quantity":-3,
             "previous_stock":10,"new_stock":7,"reason":"","created_at":"2024-05-06T08:00:00Z"}]"#,
    )
    .expect("decode");

    let html = render_movements(&movements, &Formatting::default()).expect("render");

    assert!(html.contains("06/05/2024"));
    assert!(html.contains("<td>adjustment</td>"));
    assert!(html.contains("<td>-</td>"));
}
