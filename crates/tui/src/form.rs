use chrono::{Days, NaiveDate};

use api_types::contract::ContractNew;
use listview::Money;

pub const GST_RATE_PERCENT: u32 = 18;

/// Coverage window for a freshly created contract.
pub const COVERAGE_DAYS: u64 = 365;

pub const CATEGORIES: &[&str] = &["AC", "Refrigerator", "Washing Machine", "Laptop", "Water Purifier"];
pub const BRANDS: &[&str] = &["Samsung", "LG", "Voltas", "Dell", "Kent"];
pub const PRODUCT_TYPES: &[&str] = &["Electronics", "Appliance"];

const PROOF_FILE_NAME: &str = "purchase_proof.pdf";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Mobile,
    Address,
    Serial,
    Category,
    Brand,
    ProductType,
    Model,
    PurchaseValue,
    Proof,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Mobile,
            Self::Mobile => Self::Address,
            Self::Address => Self::Serial,
            Self::Serial => Self::Category,
            Self::Category => Self::Brand,
            Self::Brand => Self::ProductType,
            Self::ProductType => Self::Model,
            Self::Model => Self::PurchaseValue,
            Self::PurchaseValue => Self::Proof,
            Self::Proof => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Proof,
            Self::Email => Self::Name,
            Self::Mobile => Self::Email,
            Self::Address => Self::Mobile,
            Self::Serial => Self::Address,
            Self::Category => Self::Serial,
            Self::Brand => Self::Category,
            Self::ProductType => Self::Brand,
            Self::Model => Self::ProductType,
            Self::PurchaseValue => Self::Model,
            Self::Proof => Self::PurchaseValue,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Customer Name",
            Self::Email => "Customer Email",
            Self::Mobile => "Customer Mobile",
            Self::Address => "Customer Address",
            Self::Serial => "Serial / IMEI",
            Self::Category => "Category",
            Self::Brand => "Brand",
            Self::ProductType => "Type",
            Self::Model => "Model",
            Self::PurchaseValue => "Purchase Value",
            Self::Proof => "Purchase Proof",
        }
    }

    /// Picker fields cycle through fixed options instead of taking text.
    pub fn is_picker(self) -> bool {
        matches!(self, Self::Category | Self::Brand | Self::ProductType | Self::Proof)
    }
}

/// Local state of the two-section creation form (customer, product).
#[derive(Debug, Default)]
pub struct ContractForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub serial: String,
    pub category: usize,
    pub brand: usize,
    pub product_type: usize,
    pub model: String,
    pub purchase_value: String,
    pub proof: Option<String>,
    pub focus: FormField,
    pub error: Option<String>,
}

impl ContractForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input(&mut self, ch: char) {
        if let Some(field) = self.active_text_mut() {
            field.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_text_mut() {
            field.pop();
        }
    }

    /// Up/Down on a picker cycles its options; on a text field it moves
    /// focus instead.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Category => cycle_index(&mut self.category, CATEGORIES.len(), forward),
            FormField::Brand => cycle_index(&mut self.brand, BRANDS.len(), forward),
            FormField::ProductType => {
                cycle_index(&mut self.product_type, PRODUCT_TYPES.len(), forward)
            }
            FormField::Proof => {
                self.proof = match self.proof {
                    Some(_) => None,
                    None => Some(PROOF_FILE_NAME.to_string()),
                };
            }
            _ => {
                if forward {
                    self.focus_next();
                } else {
                    self.focus_prev();
                }
            }
        }
    }

    pub fn category_label(&self) -> &'static str {
        CATEGORIES[self.category.min(CATEGORIES.len() - 1)]
    }

    pub fn brand_label(&self) -> &'static str {
        BRANDS[self.brand.min(BRANDS.len() - 1)]
    }

    pub fn product_type_label(&self) -> &'static str {
        PRODUCT_TYPES[self.product_type.min(PRODUCT_TYPES.len() - 1)]
    }

    pub fn text_value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Mobile => &self.mobile,
            FormField::Address => &self.address,
            FormField::Serial => &self.serial,
            FormField::Model => &self.model,
            FormField::PurchaseValue => &self.purchase_value,
            _ => "",
        }
    }

    /// `(base, gst, total)` preview while the value field is being typed.
    pub fn totals(&self) -> Option<(Money, Money, Money)> {
        let base: Money = self.purchase_value.trim().parse().ok()?;
        let gst = base.gst(GST_RATE_PERCENT);
        Some((base, gst, base.saturating_add(gst)))
    }

    /// Validates every required field and assembles the request body.
    pub fn build(&self, admin_id: &str, today: NaiveDate) -> Result<ContractNew, String> {
        let name = required(&self.name, "customer name")?;
        let email = required(&self.email, "customer email")?;
        if !email.contains('@') {
            return Err("Enter a valid customer email.".to_string());
        }
        let mobile = required(&self.mobile, "customer mobile")?;
        if mobile.chars().filter(char::is_ascii_digit).count() < 10 {
            return Err("Mobile number needs at least 10 digits.".to_string());
        }
        let address = required(&self.address, "customer address")?;
        let serial = required(&self.serial, "serial / imei")?;
        let model = required(&self.model, "model")?;

        let base: Money = self
            .purchase_value
            .trim()
            .parse()
            .map_err(|_| "Enter a valid purchase value.".to_string())?;
        if !base.is_positive() {
            return Err("Purchase value must be greater than zero.".to_string());
        }
        let gst = base.gst(GST_RATE_PERCENT);
        let total = base.saturating_add(gst);

        let end = today
            .checked_add_days(Days::new(COVERAGE_DAYS))
            .ok_or_else(|| "Coverage window out of range.".to_string())?;

        Ok(ContractNew {
            admin_id: admin_id.to_string(),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            customer_mobile: mobile.to_string(),
            customer_address: address.to_string(),
            serial_number: serial.to_string(),
            purchase_proof: self.proof.clone(),
            category: self.category_label().to_string(),
            brand: self.brand_label().to_string(),
            product_type: self.product_type_label().to_string(),
            model: model.to_string(),
            purchase_value: rupees(base),
            gst_amount: rupees(gst),
            total_amount: rupees(total),
            start_date: today.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
        })
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Mobile => Some(&mut self.mobile),
            FormField::Address => Some(&mut self.address),
            FormField::Serial => Some(&mut self.serial),
            FormField::Model => Some(&mut self.model),
            FormField::PurchaseValue => Some(&mut self.purchase_value),
            _ => None,
        }
    }
}

fn cycle_index(index: &mut usize, len: usize, forward: bool) {
    if forward {
        *index = (*index + 1) % len;
    } else {
        *index = (*index + len - 1) % len;
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Please fill the {what}."));
    }
    Ok(trimmed)
}

fn rupees(amount: Money) -> f64 {
    amount.paise() as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContractForm {
        ContractForm {
            name: "Rohit Rajput".to_string(),
            email: "rohit@example.in".to_string(),
            mobile: "9876543210".to_string(),
            address: "12 MG Road, Indore".to_string(),
            serial: "IMEI-492".to_string(),
            model: "123V DZU".to_string(),
            purchase_value: "2500".to_string(),
            ..ContractForm::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    #[test]
    fn build_computes_the_gst_inclusive_total() {
        let body = filled().build("64fa", today()).unwrap();
        assert_eq!(body.purchase_value, 2500.0);
        assert_eq!(body.gst_amount, 450.0);
        assert_eq!(body.total_amount, 2950.0);
        assert_eq!(body.start_date, "2025-10-15");
        assert_eq!(body.end_date, "2026-10-15");
        assert_eq!(body.category, "AC");
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut form = filled();
        form.name.clear();
        let err = form.build("64fa", today()).unwrap_err();
        assert!(err.contains("customer name"));
    }

    #[test]
    fn mobile_needs_ten_digits() {
        let mut form = filled();
        form.mobile = "12345".to_string();
        assert!(form.build("64fa", today()).is_err());
    }

    #[test]
    fn zero_value_is_rejected() {
        let mut form = filled();
        form.purchase_value = "0".to_string();
        assert!(form.build("64fa", today()).is_err());
    }

    #[test]
    fn pickers_cycle_and_proof_toggles() {
        let mut form = ContractForm {
            focus: FormField::Category,
            ..ContractForm::default()
        };
        form.cycle(true);
        assert_eq!(form.category_label(), "Refrigerator");
        form.cycle(false);
        assert_eq!(form.category_label(), "AC");

        form.focus = FormField::Proof;
        form.cycle(true);
        assert_eq!(form.proof.as_deref(), Some("purchase_proof.pdf"));
        form.cycle(true);
        assert!(form.proof.is_none());
    }
}
