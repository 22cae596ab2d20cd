//! Discount and total arithmetic for visits, analyses and operations.
//!
//! The backend recomputes everything; these checks only keep the forms from
//! submitting something it would reject.

use thiserror::Error;

use super::records::AnalysisItem;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillingError {
    #[error("Montant total invalide")]
    InvalidTotal,
    #[error("Réduction invalide ({0}%)")]
    InvalidDiscount(f64),
    #[error("Le paiement doit être complet. Montant dû: {} FC", format_due(.due))]
    Underpaid { due: f64 },
    #[error("Nom de l'analyse requis")]
    MissingName,
    #[error("Prix invalide")]
    InvalidPrice,
    #[error("Cette analyse est déjà ajoutée")]
    DuplicateItem,
    #[error("Ajoutez au moins une analyse")]
    EmptyCart,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Billing {
    pub total: f64,
    /// 0..=100
    pub discount_percentage: f64,
}

impl Billing {
    pub fn new(total: f64, discount_percentage: f64) -> Self {
        Self {
            total,
            discount_percentage,
        }
    }

    pub fn discount(&self) -> f64 {
        self.total * self.discount_percentage / 100.0
    }

    pub fn final_amount(&self) -> f64 {
        self.total - self.discount()
    }

    pub fn validate(&self) -> Result<(), BillingError> {
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(BillingError::InvalidTotal);
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(BillingError::InvalidDiscount(self.discount_percentage));
        }
        Ok(())
    }

    /// Payment must cover the final amount. Returns the amount to submit,
    /// which is the final amount itself (overpayment is not recorded).
    pub fn settle(&self, paid: f64) -> Result<f64, BillingError> {
        self.validate()?;
        let due = self.final_amount();
        if !paid.is_finite() || paid < due {
            return Err(BillingError::Underpaid { due });
        }
        Ok(due)
    }
}

/// Analyses being prescribed, before submission
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisCart {
    items: Vec<AnalysisItem>,
}

impl AnalysisCart {
    pub fn items(&self) -> &[AnalysisItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item; names are unique ignoring case.
    pub fn add(&mut self, name: &str, price: f64) -> Result<(), BillingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillingError::MissingName);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(BillingError::InvalidPrice);
        }
        if self
            .items
            .iter()
            .any(|i| i.name.to_lowercase() == name.to_lowercase())
        {
            return Err(BillingError::DuplicateItem);
        }
        self.items.push(AnalysisItem {
            name: name.to_string(),
            price,
            result: None,
        });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }

    pub fn billing(&self, discount_percentage: f64) -> Billing {
        Billing::new(self.total(), discount_percentage)
    }

    pub fn into_items(self) -> Result<Vec<AnalysisItem>, BillingError> {
        if self.items.is_empty() {
            return Err(BillingError::EmptyCart);
        }
        Ok(self.items)
    }
}

fn format_due(due: &f64) -> String {
    format_amount(*due)
}

/// Thousands separated by spaces, decimals only when present: `7 500`, `1 234.5`
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    match cents {
        0 => format!("{sign}{grouped}"),
        c if c % 10 == 0 => format!("{sign}{grouped}.{}", c / 10),
        c => format!("{sign}{grouped}.{c:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_off_a_consultation() {
        let billing = Billing::new(7500.0, 10.0);
        assert_eq!(billing.discount(), 750.0);
        assert_eq!(billing.final_amount(), 6750.0);
    }

    #[test]
    fn settle_requires_full_payment() {
        let billing = Billing::new(50_000.0, 20.0);
        assert_eq!(
            billing.settle(39_999.0),
            Err(BillingError::Underpaid { due: 40_000.0 })
        );
        assert_eq!(billing.settle(45_000.0), Ok(40_000.0));
    }

    #[test]
    fn non_numeric_payment_never_settles() {
        let billing = Billing::new(7500.0, 0.0);
        for paid in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                billing.settle(paid),
                Err(BillingError::Underpaid { due: 7500.0 })
            );
        }
    }

    #[test]
    fn underpaid_message_shows_amount_due() {
        let err = Billing::new(7500.0, 0.0).settle(0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Le paiement doit être complet. Montant dû: 7 500 FC"
        );
    }

    #[test]
    fn discount_outside_percentage_range_is_rejected() {
        assert_eq!(
            Billing::new(100.0, 120.0).validate(),
            Err(BillingError::InvalidDiscount(120.0))
        );
        assert_eq!(
            Billing::new(-1.0, 0.0).validate(),
            Err(BillingError::InvalidTotal)
        );
    }

    #[test]
    fn cart_rejects_duplicates_ignoring_case() {
        let mut cart = AnalysisCart::default();
        cart.add("Glycémie", 2000.0).unwrap();
        assert_eq!(cart.add("glycémie", 1500.0), Err(BillingError::DuplicateItem));
        assert_eq!(cart.add("  ", 1500.0), Err(BillingError::MissingName));
        assert_eq!(cart.add("NFS", 0.0), Err(BillingError::InvalidPrice));
        cart.add("NFS", 3500.0).unwrap();
        assert_eq!(cart.total(), 5500.0);
        assert_eq!(cart.billing(10.0).final_amount(), 4950.0);
    }

    #[test]
    fn cart_remove_ignores_out_of_range() {
        let mut cart = AnalysisCart::default();
        cart.add("NFS", 3500.0).unwrap();
        cart.remove(5);
        assert_eq!(cart.items().len(), 1);
        cart.remove(0);
        assert_eq!(cart.into_items(), Err(BillingError::EmptyCart));
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(7500.0), "7 500");
        assert_eq!(format_amount(1_234_567.0), "1 234 567");
        assert_eq!(format_amount(1234.5), "1 234.5");
        assert_eq!(format_amount(-40.25), "-40.25");
    }
}
