use maud::{Markup, html};
use time::Date;

use crate::{
    category::Category,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    ledger::Transaction,
};

/// The values the transaction form renders with.
///
/// Add mode starts blank with today's date; edit mode copies every field
/// from the stored record via [TransactionFormDefaults::from_transaction].
pub struct TransactionFormDefaults<'a> {
    pub description: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub date: Date,
}

impl<'a> TransactionFormDefaults<'a> {
    /// Blank form defaults for add mode: empty fields, date set to today.
    pub fn add_mode(today: Date) -> Self {
        Self {
            description: None,
            amount: None,
            category: None,
            date: today,
        }
    }

    /// Pre-populate the form from an existing record for edit mode.
    pub fn from_transaction(transaction: &'a Transaction) -> Self {
        Self {
            description: Some(&transaction.description),
            amount: Some(transaction.amount),
            category: Some(transaction.category),
            date: transaction.date,
        }
    }
}

/// Renders the form fields shared by the add and edit forms.
///
/// The category select includes a blank "Select a category" option; picking
/// a category is enforced by the ledger, not the browser, so a submission
/// without one comes back as an alert rather than silently never firing.
pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            p class="mt-1 text-xs text-gray-600 dark:text-gray-400"
            {
                "Positive amounts are income, negative amounts are expenses."
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for category in Category::ALL {
                    @if Some(category) == defaults.category {
                        option value=(category) selected { (category.label()) }
                    } @else {
                        option value=(category) { (category.label()) }
                    }
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
