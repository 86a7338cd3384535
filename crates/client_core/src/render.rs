//! HTML fragments for each back-office resource.
//!
//! Rows are flattened to display strings before they reach the templates, so
//! the templates only loop and escape.

use askama::Template;
use chrono::{DateTime, FixedOffset};
use shared::{
    domain::StockStatus,
    protocol::{Customer, InventoryItem, InventoryMovement, Product, Sale, SalesReport},
};

use crate::error::RenderError;

const WALK_IN_CUSTOMER: &str = "Walk-in customer";
const MISSING_FIELD: &str = "-";

/// Money and date presentation.
#[derive(Debug, Clone)]
pub struct Formatting {
    pub currency_symbol: String,
}

impl Formatting {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{} {amount:.2}", self.currency_symbol)
    }

    /// pt-BR short date, in the offset the backend sent.
    pub fn date(&self, value: &DateTime<FixedOffset>) -> String {
        value.format("%d/%m/%Y").to_string()
    }
}

impl Default for Formatting {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CURRENCY_SYMBOL)
    }
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING_FIELD)
        .to_string()
}

fn render<T: Template>(view: &'static str, template: &T) -> Result<String, RenderError> {
    template
        .render()
        .map_err(|source| RenderError { view, source })
}

struct ProductRow {
    sku: String,
    name: String,
    category: String,
    price: String,
}

#[derive(Template)]
#[template(path = "products.html")]
struct ProductsTable {
    rows: Vec<ProductRow>,
}

pub fn render_products(products: &[Product], fmt: &Formatting) -> Result<String, RenderError> {
    let rows = products
        .iter()
        .map(|product| ProductRow {
            sku: product.sku.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: fmt.money(product.price),
        })
        .collect();
    render("products", &ProductsTable { rows })
}

struct CustomerRow {
    name: String,
    email: String,
    cpf: String,
    phone: String,
}

#[derive(Template)]
#[template(path = "customers.html")]
struct CustomersTable {
    rows: Vec<CustomerRow>,
}

pub fn render_customers(customers: &[Customer]) -> Result<String, RenderError> {
    let rows = customers
        .iter()
        .map(|customer| CustomerRow {
            name: customer.name.clone(),
            email: or_dash(customer.email.as_deref()),
            cpf: customer.cpf.clone(),
            phone: or_dash(customer.phone.as_deref()),
        })
        .collect();
    render("customers", &CustomersTable { rows })
}

struct SaleRow {
    id: i64,
    customer: String,
    date: String,
    total: String,
    status: String,
}

#[derive(Template)]
#[template(path = "sales.html")]
struct SalesTable {
    rows: Vec<SaleRow>,
}

pub fn render_sales(sales: &[Sale], fmt: &Formatting) -> Result<String, RenderError> {
    let rows = sales
        .iter()
        .map(|sale| SaleRow {
            id: sale.id.0,
            customer: sale
                .customer
                .as_ref()
                .and_then(|customer| customer.name.as_deref())
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(WALK_IN_CUSTOMER)
                .to_string(),
            date: fmt.date(&sale.sale_date),
            total: fmt.money(sale.final_amount),
            status: sale.status.clone(),
        })
        .collect();
    render("sales", &SalesTable { rows })
}

struct InventoryRow {
    name: String,
    sku: String,
    quantity: i64,
    min_stock: i64,
    max_stock: i64,
    status_label: &'static str,
    status_class: &'static str,
}

#[derive(Template)]
#[template(path = "inventory.html")]
struct InventoryTable {
    rows: Vec<InventoryRow>,
}

pub fn render_inventory(items: &[InventoryItem]) -> Result<String, RenderError> {
    let rows = items
        .iter()
        .map(|item| {
            let status = StockStatus::classify(item.quantity, item.min_stock);
            InventoryRow {
                name: item.product.name.clone(),
                sku: item.product.sku.clone(),
                quantity: item.quantity,
                min_stock: item.min_stock,
                max_stock: item.max_stock,
                status_label: status.label(),
                status_class: status.css_class(),
            }
        })
        .collect();
    render("inventory", &InventoryTable { rows })
}

struct MovementRow {
    date: String,
    movement_type: String,
    quantity: i64,
    previous_stock: i64,
    new_stock: i64,
    reason: String,
}

#[derive(Template)]
#[template(path = "movements.html")]
struct MovementsTable {
    rows: Vec<MovementRow>,
}

pub fn render_movements(
    movements: &[InventoryMovement],
    fmt: &Formatting,
) -> Result<String, RenderError> {
    let rows = movements
        .iter()
        .map(|movement| MovementRow {
            date: fmt.date(&movement.created_at),
            movement_type: movement.movement_type.clone(),
            quantity: movement.quantity,
            previous_stock: movement.previous_stock,
            new_stock: movement.new_stock,
            reason: or_dash(Some(movement.reason.as_str())),
        })
        .collect();
    render("movements", &MovementsTable { rows })
}

struct TopProductRow {
    name: String,
    quantity: i64,
    revenue: String,
}

struct StatusRow {
    status: String,
    count: i64,
}

struct MonthRow {
    month: String,
    count: i64,
    amount: String,
}

#[derive(Template)]
#[template(path = "reports.html")]
struct ReportsPanel {
    total_sales: i64,
    total_amount: String,
    top_products: Vec<TopProductRow>,
    has_statuses: bool,
    statuses: Vec<StatusRow>,
    has_months: bool,
    months: Vec<MonthRow>,
}

pub fn render_reports(report: &SalesReport, fmt: &Formatting) -> Result<String, RenderError> {
    let top_products = report
        .top_products
        .iter()
        .map(|product| TopProductRow {
            name: product.product_name.clone(),
            quantity: product.quantity,
            revenue: fmt.money(product.revenue),
        })
        .collect();
    let statuses: Vec<StatusRow> = report
        .sales_by_status
        .iter()
        .map(|(status, count)| StatusRow {
            status: status.clone(),
            count: *count,
        })
        .collect();
    let months: Vec<MonthRow> = report
        .sales_by_month
        .iter()
        .map(|month| MonthRow {
            month: month.month.clone(),
            count: month.count,
            amount: fmt.money(month.amount),
        })
        .collect();

    render(
        "reports",
        &ReportsPanel {
            total_sales: report.total_sales,
            total_amount: fmt.money(report.total_amount),
            top_products,
            has_statuses: !statuses.is_empty(),
            statuses,
            has_months: !months.is_empty(),
            months,
        },
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
