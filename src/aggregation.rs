//! Pure view computations over the transaction collection.
//!
//! Everything in this module is a stateless function of its input: the
//! filtered list, the income/expense totals and the per-category expense
//! breakdown are recomputed on demand from the ledger's current contents,
//! never cached or mutated in place.

use crate::{category::Category, ledger::Transaction};

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// The sum of all positive amounts.
    pub income: f64,
    /// The sum of the absolute values of all negative amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Keep the transactions matching `search` and `category`.
///
/// Both predicates are conjunctive and an empty predicate passes
/// everything: `search` matches case-insensitively against the description
/// and the category name, `category` must match exactly. Input order is
/// preserved, so a filtered list stays in storage (oldest-first) order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    search: &str,
    category: Option<Category>,
) -> Vec<&'a Transaction> {
    let search = search.trim().to_lowercase();

    transactions
        .iter()
        .filter(|transaction| {
            search.is_empty()
                || transaction.description.to_lowercase().contains(&search)
                || transaction.category.as_str().contains(&search)
        })
        .filter(|transaction| category.is_none_or(|wanted| transaction.category == wanted))
        .collect()
}

/// Total income, total expenses and the resulting balance.
pub fn summarize(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions {
        if transaction.amount > 0.0 {
            income += transaction.amount;
        } else {
            expense += transaction.amount.abs();
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Expense totals per category, over expense transactions only.
///
/// Categories appear in first-appearance order so each chart segment keeps
/// a stable colour as the data changes.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for transaction in transactions.iter().filter(|transaction| transaction.amount < 0.0) {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total += transaction.amount.abs(),
            None => totals.push((transaction.category, transaction.amount.abs())),
        }
    }

    totals
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::date;

    use crate::{category::Category, ledger::Transaction};

    use super::{expenses_by_category, filter_transactions, summarize};

    fn transaction(description: &str, amount: f64, category: Category) -> Transaction {
        Transaction {
            id: 0,
            description: description.to_owned(),
            amount,
            category,
            date: date!(2025 - 11 - 15),
        }
    }

    #[test]
    fn summarize_splits_income_and_expenses() {
        let transactions = [
            transaction("Pay day", 100.0, Category::Salary),
            transaction("Groceries", -40.0, Category::Food),
            transaction("Bus fare", -10.0, Category::Transport),
        ];

        let totals = summarize(&transactions);

        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expense, 50.0);
        assert_eq!(totals.balance, 50.0);
    }

    #[test]
    fn summarize_of_nothing_is_zero() {
        let totals = summarize(&[]);

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn search_matches_descriptions_case_insensitively() {
        let transactions = [
            transaction("Groceries", -42.5, Category::Food),
            transaction("Rent", -900.0, Category::Housing),
        ];

        let matches = filter_transactions(&transactions, "gro", None);

        assert_eq!(matches, [&transactions[0]]);
    }

    #[test]
    fn search_also_matches_category_names() {
        let transactions = [
            transaction("Movie night", -25.0, Category::Entertainment),
            transaction("Rent", -900.0, Category::Housing),
        ];

        let matches = filter_transactions(&transactions, "entertain", None);

        assert_eq!(matches, [&transactions[0]]);
    }

    #[test]
    fn category_filter_keeps_exact_matches_only() {
        let transactions = [
            transaction("Groceries", -42.5, Category::Food),
            transaction("Takeaways", -30.0, Category::Food),
            transaction("Rent", -900.0, Category::Housing),
        ];

        let matches = filter_transactions(&transactions, "", Some(Category::Food));

        assert_eq!(matches, [&transactions[0], &transactions[1]]);
    }

    #[test]
    fn search_and_category_are_conjunctive() {
        let transactions = [
            transaction("Groceries", -42.5, Category::Food),
            transaction("Groceries run", -30.0, Category::Shopping),
        ];

        let matches = filter_transactions(&transactions, "groceries", Some(Category::Shopping));

        assert_eq!(matches, [&transactions[1]]);
    }

    #[test]
    fn empty_filters_pass_everything_in_order() {
        let transactions = [
            transaction("Pay day", 2500.0, Category::Salary),
            transaction("Groceries", -42.5, Category::Food),
        ];

        let matches = filter_transactions(&transactions, "  ", None);

        assert_eq!(matches, [&transactions[0], &transactions[1]]);
    }

    #[test]
    fn breakdown_ignores_income_and_groups_by_category() {
        let transactions = [
            transaction("Groceries", -20.0, Category::Food),
            transaction("Takeaways", -30.0, Category::Food),
            transaction("Pay day", 50.0, Category::Salary),
        ];

        let breakdown = expenses_by_category(&transactions);

        assert_eq!(breakdown, [(Category::Food, 50.0)]);
    }

    #[test]
    fn breakdown_keeps_first_appearance_order() {
        let transactions = [
            transaction("Rent", -900.0, Category::Housing),
            transaction("Groceries", -42.5, Category::Food),
            transaction("Power bill", -120.0, Category::Utilities),
            transaction("Takeaways", -30.0, Category::Food),
        ];

        let breakdown = expenses_by_category(&transactions);

        let categories: Vec<_> = breakdown.iter().map(|(category, _)| *category).collect();
        assert_eq!(
            categories,
            [Category::Housing, Category::Food, Category::Utilities]
        );
    }
}
