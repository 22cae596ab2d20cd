//! Reusable form input components.

use dioxus::prelude::*;

use crate::clinic::{format_amount, Billing};

/// A labeled text input.
#[component]
pub fn TextField(
    /// Input label
    label: &'static str,
    /// Current value
    value: String,
    /// Called with the new value on each keystroke
    on_input: EventHandler<String>,
    #[props(default = "text")] input_type: &'static str,
    #[props(default)] placeholder: &'static str,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        div {
            label { class: "block text-sm font-medium text-gray-700 mb-2",
                "{label}"
                if required {
                    span { class: "text-red-500", " *" }
                }
            }
            input {
                class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500",
                r#type: input_type,
                value: "{value}",
                placeholder: placeholder,
                required: required,
                disabled: disabled,
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// A labeled select. `options` are `(value, label)` pairs.
#[component]
pub fn SelectField(
    label: &'static str,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
    /// Label of an empty first option, if any
    placeholder: Option<&'static str>,
    #[props(default = false)] required: bool,
) -> Element {
    rsx! {
        div {
            label { class: "block text-sm font-medium text-gray-700 mb-2",
                "{label}"
                if required {
                    span { class: "text-red-500", " *" }
                }
            }
            select {
                class: "w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500",
                value: "{value}",
                required: required,
                onchange: move |e| on_change.call(e.value()),
                if let Some(placeholder) = placeholder {
                    option { value: "", "{placeholder}" }
                }
                for (opt_value, opt_label) in options {
                    option { key: "{opt_value}", value: "{opt_value}", selected: opt_value == value, "{opt_label}" }
                }
            }
        }
    }
}

/// Parse a numeric input, treating blanks, garbage, NaN and infinities as zero
pub fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Total, discount and payment inputs with the computed amount due.
#[component]
pub fn BillingFields(
    total: f64,
    discount_percentage: f64,
    paid: f64,
    /// Analyses derive the total from their items
    #[props(default = true)]
    total_editable: bool,
    on_total: EventHandler<f64>,
    on_discount: EventHandler<f64>,
    on_paid: EventHandler<f64>,
) -> Element {
    let billing = Billing::new(total, discount_percentage);
    let discount = format_amount(billing.discount());
    let due = format_amount(billing.final_amount());
    let total_label = format_amount(total);

    rsx! {
        div { class: "bg-gray-50 rounded-lg p-4 space-y-4",
            h3 { class: "font-semibold text-gray-900", "Facturation" }
            div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                if total_editable {
                    TextField {
                        label: "Montant total (FC)",
                        value: total.to_string(),
                        input_type: "number",
                        required: true,
                        on_input: move |v: String| on_total.call(parse_amount(&v)),
                    }
                } else {
                    div {
                        p { class: "text-sm font-medium text-gray-700 mb-2", "Montant total (FC)" }
                        p { class: "text-lg font-semibold", "{total_label} FC" }
                    }
                }
                TextField {
                    label: "Réduction (%)",
                    value: discount_percentage.to_string(),
                    input_type: "number",
                    on_input: move |v: String| on_discount.call(parse_amount(&v)),
                }
                TextField {
                    label: "Montant payé (FC)",
                    value: paid.to_string(),
                    input_type: "number",
                    required: true,
                    on_input: move |v: String| on_paid.call(parse_amount(&v)),
                }
            }
            div { class: "flex justify-between text-sm text-gray-700",
                span { "Réduction: {discount} FC" }
                span { class: "font-semibold text-gray-900", "Montant dû: {due} FC" }
            }
        }
    }
}

/// Owned `(value, label)` pairs for [`SelectField`]
pub fn options(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(v, l)| (v.to_string(), l.to_string()))
        .collect()
}

pub const PAYMENT_METHODS: &[(&str, &str)] =
    &[("especes", "Espèces"), ("mobile_money", "Mobile Money")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_parsing_is_forgiving() {
        assert_eq!(parse_amount("7500"), 7500.0);
        assert_eq!(parse_amount(" 12,5 "), 12.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn options_keep_order() {
        let opts = options(PAYMENT_METHODS);
        assert_eq!(opts[0], ("especes".to_string(), "Espèces".to_string()));
        assert_eq!(opts.len(), 2);
    }
}
