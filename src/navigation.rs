//! The top navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Render the top navigation bar with the brand and the transactions link.
///
/// The link matching `active_endpoint` is highlighted.
pub fn nav_bar(active_endpoint: &str) -> Markup {
    let transactions_style = if active_endpoint == endpoints::TRANSACTIONS_VIEW {
        "block py-2 px-3 text-emerald-700 font-semibold dark:text-emerald-500"
    } else {
        "block py-2 px-3 text-gray-900 hover:text-emerald-700 \
        dark:text-white dark:hover:text-emerald-500"
    };

    html!(
        nav class="bg-white border-gray-200 dark:bg-gray-800 shadow"
        {
            div class="max-w-4xl flex flex-wrap items-center justify-between mx-auto p-4"
            {
                a
                    href=(endpoints::ROOT)
                    class="text-2xl font-semibold text-gray-900 dark:text-white"
                {
                    "Ledgerly"
                }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(transactions_style)
                {
                    "Transactions"
                }
            }
        }
    )
}
