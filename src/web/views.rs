use crate::domain::order::StoredOrder;
use crate::utils::html::escape;

// ============================================================================
// Views - view data in, HTML pages out
// ============================================================================

const NONE: &str = "NONE";

/// Fields shown for a single order on confirmation, review and admin pages.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub name: String,
    pub table_num: String,
    pub delivery: String,
    /// Receipt HTML, rendered by the order itself
    pub order_table: String,
}

impl From<StoredOrder> for OrderView {
    fn from(order: StoredOrder) -> Self {
        Self {
            name: order.name,
            table_num: order.table_num.to_string(),
            delivery: order.delivery.to_string(),
            order_table: order.order_table,
        }
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
<body><h1>{title}</h1>{body}<hr><a href=\"/\">HOME</a></body></html>",
        title = escape(title),
        body = body
    )
}

fn order_fields(name: &str, table_num: &str, delivery: &str, order_table: &str) -> String {
    format!(
        "<p><strong>Name: </strong>{}<br><strong>Table Number: </strong>{}<br>\
<strong>Delivery: </strong>{}</p>{}",
        escape(name),
        escape(table_num),
        escape(delivery),
        order_table
    )
}

pub fn index() -> String {
    page(
        "Restaurant",
        "<ul>\
<li><a href=\"/menu\">Menu</a></li>\
<li><a href=\"/order\">Place Order</a></li>\
<li><a href=\"/reviewOrder\">Review Order</a></li>\
<li><a href=\"/adminTotalQuery\">Orders By Total</a></li>\
<li><a href=\"/adminRemove\">Remove All Orders</a></li>\
</ul>",
    )
}

pub fn menu(items_table: &str) -> String {
    page("Menu", items_table)
}

pub fn order_form(items: &str) -> String {
    page(
        "Place Order",
        &format!(
            "<form action=\"/order\" method=\"post\">\
<label>Name: <input type=\"text\" name=\"name\" required></label><br>\
<label>Table Number: <input type=\"text\" name=\"tableNum\" required></label><br>\
<label>Delivery: <select name=\"delivery\">\
<option value=\"dine-in\">Dine In</option><option value=\"delivery\">Delivery</option>\
</select></label><br>\
<label>Items: <select name=\"itemsSelected\" multiple required>{items}</select></label><br>\
<label>Order Information:<br><textarea name=\"orderInformation\"></textarea></label><br>\
<input type=\"submit\" value=\"Submit Order\"></form>"
        ),
    )
}

pub fn confirmation(order: &OrderView) -> String {
    page(
        "Order Confirmation",
        &order_fields(&order.name, &order.table_num, &order.delivery, &order.order_table),
    )
}

pub fn review_form() -> String {
    page(
        "Review Order",
        "<form action=\"/reviewOrder\" method=\"post\">\
<label>Name: <input type=\"text\" name=\"name\"></label><br>\
<label>Table Number: <input type=\"text\" name=\"tableNum\"></label><br>\
<input type=\"submit\" value=\"Find Order\"></form>",
    )
}

/// A missing order shows the `NONE` placeholder in every field.
pub fn review_result(found: Option<&OrderView>) -> String {
    let body = match found {
        Some(order) => order_fields(&order.name, &order.table_num, &order.delivery, &order.order_table),
        None => order_fields(NONE, NONE, NONE, NONE),
    };
    page("Order Found", &body)
}

pub fn total_query_form() -> String {
    page(
        "Orders By Total",
        "<form action=\"/adminTotalQuery\" method=\"post\">\
<label>Minimum Total: <input type=\"number\" name=\"total\" step=\"0.01\" min=\"0\" required></label><br>\
<input type=\"submit\" value=\"Find Orders\"></form>",
    )
}

/// One block per order, concatenated in the order given.
pub fn build_orders_display(orders: &[OrderView]) -> String {
    orders
        .iter()
        .map(|order| {
            format!(
                "<div class=\"order\">{}</div>",
                order_fields(&order.name, &order.table_num, &order.delivery, &order.order_table)
            )
        })
        .collect()
}

pub fn total_query_result(threshold: &str, build_orders_display: &str) -> String {
    let body = if build_orders_display.is_empty() {
        "<p>No orders found.</p>"
    } else {
        build_orders_display
    };
    page(
        &format!("Orders With Total Of At Least {}", threshold),
        body,
    )
}

pub fn remove_form() -> String {
    page(
        "Remove All Orders",
        "<form action=\"/adminRemove\" method=\"post\">\
<p>This permanently deletes every stored order.</p>\
<input type=\"submit\" value=\"Remove All Orders\"></form>",
    )
}

pub fn removed(number_removed: u64) -> String {
    page(
        "Orders Removed",
        &format!("<p>All orders have been removed. Number removed: {}</p>", number_removed),
    )
}

pub fn failure(message: &str) -> String {
    page("Request Failed", &format!("<p>{}</p>", escape(message)))
}
