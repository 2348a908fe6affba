use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use customerhub_core::{ClientError, Customer, CustomerApi, Notifier, ToastKind};

/// Fetch every registered customer once, in server order. A failure is
/// reported through the notifier and returned; it is not retried.
pub async fn load_customers(
    api: &dyn CustomerApi,
    notifier: &dyn Notifier,
) -> Result<Vec<Customer>, ClientError> {
    match api.all_customers().await {
        Ok(customers) => {
            info!(count = customers.len(), "loaded customers");
            Ok(customers)
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch customers");
            notifier.show("Failed to fetch customers", ToastKind::Error);
            Err(e)
        }
    }
}

/// "May 15, 1990". Anything unparseable is shown as-is.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn render_customer(customer: &Customer) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", customer.full_name, customer.device_type));
    out.push_str(&format!("  Email:         {}\n", customer.email));
    out.push_str(&format!("  Phone:         {}\n", customer.phone_number));
    out.push_str(&format!("  Gender:        {}\n", customer.gender));
    out.push_str(&format!("  Date of birth: {}\n", format_date(&customer.date_of_birth)));
    out.push_str(&format!("  Address:       {}\n", customer.address));
    out.push_str(&format!("  Browser:       {}\n", customer.browser));
    out.push_str(&format!("  OS:            {}\n", customer.os));
    out.push_str(&format!("  Registered:    {}\n", format_date(&customer.created_at)));
    out.push_str(&format!("  Location:      {}, {}\n", customer.latitude, customer.longitude));
    out
}

pub fn render_customers(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found\nGet started by registering a new customer.\n".to_string();
    }

    let mut out = format!("Registered Customers ({})\n\n", customers.len());
    for customer in customers {
        out.push_str(&render_customer(customer));
        out.push('\n');
    }
    out
}
