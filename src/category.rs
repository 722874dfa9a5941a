//! The fixed set of transaction categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The category a transaction is filed under.
///
/// Categories are a closed vocabulary used for grouping, filtering and
/// chart colouring, not user-managed data. They travel as lowercase strings
/// in the ledger file and form values, and display with a capitalised
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Public transport, fuel and vehicle costs.
    Transport,
    /// Rent and mortgage payments.
    Housing,
    /// Power, water, internet and phone bills.
    Utilities,
    /// Movies, games, hobbies and nights out.
    Entertainment,
    /// Clothing and general retail.
    Shopping,
    /// Medical costs and insurance.
    Health,
    /// Wages and other regular income.
    Salary,
    /// Anything that does not fit the categories above.
    Other,
}

impl Category {
    /// Every category, in the order they appear in form selects.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Salary,
        Category::Other,
    ];

    /// The lowercase wire name, as stored in the ledger file.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Salary => "salary",
            Category::Other => "other",
        }
    }

    /// The capitalised label shown in table rows, selects and the chart
    /// legend.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}
