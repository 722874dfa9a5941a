//! Defines the route handler for the transactions page.
//!
//! The page is the heart of the app: summary cards, the add form, the
//! search/category filter controls, the expense chart and the transaction
//! table all render here from the ledger's current contents.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    aggregation::{Totals, expenses_by_category, filter_transactions, summarize},
    category::Category,
    chart::{ECHARTS_SCRIPT_URL, chart_script, chart_view, expense_chart},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
        format_date,
    },
    ledger::{Ledger, Transaction},
    navigation::nav_bar,
    timezone::get_local_offset,
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The search and category filter, from the page's query string.
///
/// Both fields arrive as raw strings from a plain GET form; an empty or
/// unrecognisable value simply means "no filter", matching the lenient
/// handling of the filter controls everywhere else.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Free-text search over descriptions and category names.
    #[serde(default)]
    pub search: Option<String>,
    /// Keep only transactions in this category.
    #[serde(default)]
    pub category: Option<String>,
}

impl FilterQuery {
    fn search_text(&self) -> &str {
        self.search.as_deref().unwrap_or("").trim()
    }

    fn category_filter(&self) -> Option<Category> {
        self.category.as_deref().and_then(|raw| raw.parse().ok())
    }

    fn is_active(&self) -> bool {
        !self.search_text().is_empty() || self.category_filter().is_some()
    }

    /// Encode the active filters as a query string, e.g. for links that
    /// should land back on the same view.
    fn to_query_string(&self) -> Option<String> {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if !self.search_text().is_empty() {
            pairs.push(("search", self.search_text().to_owned()));
        }
        if let Some(category) = self.category_filter() {
            pairs.push(("category", category.to_string()));
        }

        if pairs.is_empty() {
            return None;
        }

        serde_urlencoded::to_string(pairs).ok()
    }
}

/// Encode `redirect_url` as a `redirect_url=...` query parameter.
pub(crate) fn build_redirect_param(redirect_url: &str) -> Option<String> {
    serde_urlencoded::to_string([("redirect_url", &redirect_url)])
        .inspect_err(|error| {
            tracing::error!(
                "Could not set redirect URL {redirect_url} due to encoding error: {error}"
            )
        })
        .ok()
}

/// Renders one transaction as a table row.
struct TransactionRow {
    description: String,
    category_label: &'static str,
    date: String,
    amount: String,
    is_income: bool,
    edit_url: String,
    delete_url: String,
}

impl TransactionRow {
    fn new_from_transaction(transaction: &Transaction, redirect_param: Option<&str>) -> Self {
        let mut edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
        let mut delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

        if let Some(redirect_param) = redirect_param {
            edit_url = format!("{edit_url}?{redirect_param}");
            delete_url = format!("{delete_url}?{redirect_param}");
        }

        Self {
            description: transaction.description.clone(),
            category_label: transaction.category.label(),
            date: format_date(transaction.date),
            // The sign is carried by colour, not by a +/- prefix.
            amount: format_currency(transaction.amount.abs()),
            is_income: transaction.amount > 0.0,
            edit_url,
            delete_url,
        }
    }
}

/// Render the transactions page.
///
/// Unfiltered, the table shows the most recently added transaction first.
/// With a search or category filter active, the matching transactions keep
/// their storage (oldest-first) order. The summary cards and the chart
/// always cover the whole ledger regardless of the filter.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezone(state.local_timezone).into_response();
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_response();
        }
    };

    let transactions = ledger.all();
    let totals = summarize(transactions);
    let breakdown = expenses_by_category(transactions);

    let redirect_param = query.to_query_string().and_then(|query_string| {
        build_redirect_param(&format!(
            "{}?{query_string}",
            endpoints::TRANSACTIONS_VIEW
        ))
    });

    let rows: Vec<TransactionRow> = if query.is_active() {
        filter_transactions(transactions, query.search_text(), query.category_filter())
            .into_iter()
            .map(|transaction| {
                TransactionRow::new_from_transaction(transaction, redirect_param.as_deref())
            })
            .collect()
    } else {
        transactions
            .iter()
            .rev()
            .map(|transaction| TransactionRow::new_from_transaction(transaction, None))
            .collect()
    };

    drop(ledger);

    transactions_view(today, totals, &breakdown, &rows, &query).into_response()
}

fn transactions_view(
    today: Date,
    totals: Totals,
    breakdown: &[(Category, f64)],
    rows: &[TransactionRow],
    query: &FilterQuery,
) -> Markup {
    let mut head_elements = vec![dollar_input_styles()];

    if !breakdown.is_empty() {
        head_elements.push(HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()));
        head_elements.push(chart_script(&expense_chart(breakdown)));
    }

    let content = html!(
        (nav_bar(endpoints::TRANSACTIONS_VIEW))

        main class=(PAGE_CONTAINER_STYLE)
        {
            (summary_cards(totals))
            (add_transaction_form(today))
            (filter_controls(query))

            @if !breakdown.is_empty() {
                (chart_view())
            }

            (transaction_table(rows, query.is_active()))
        }
    );

    base("Transactions", &head_elements, &content)
}

fn summary_cards(totals: Totals) -> Markup {
    let balance_style = if totals.balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    html!(
        section class="w-full max-w-4xl grid grid-cols-1 sm:grid-cols-3 gap-4 mb-6"
        {
            (summary_card("Balance", totals.balance, balance_style))
            (summary_card("Income", totals.income, "text-green-600 dark:text-green-400"))
            (summary_card("Expenses", totals.expense, "text-red-600 dark:text-red-400"))
        }
    )
}

fn summary_card(title: &str, amount: f64, amount_style: &str) -> Markup {
    html!(
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6"
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 uppercase"
            {
                (title)
            }

            p class=(format!("text-3xl font-bold mt-1 {amount_style}"))
            {
                (format_currency(amount))
            }
        }
    )
}

fn add_transaction_form(today: Date) -> Markup {
    html!(
        section class="w-full max-w-4xl bg-white dark:bg-gray-800 rounded-lg shadow p-6 mb-6"
        {
            h2 class="text-lg font-semibold mb-4" { "Add transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                (transaction_form_fields(&TransactionFormDefaults::add_mode(today)))

                div class="sm:col-span-2"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
                }
            }
        }
    )
}

fn filter_controls(query: &FilterQuery) -> Markup {
    let selected = query.category_filter();

    html!(
        section class="w-full max-w-4xl mb-6"
        {
            form
                method="get"
                action=(endpoints::TRANSACTIONS_VIEW)
                class="flex flex-col sm:flex-row gap-2"
            {
                input
                    type="search"
                    name="search"
                    placeholder="Search transactions"
                    value=(query.search_text())
                    class=(FORM_TEXT_INPUT_STYLE);

                select name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for category in Category::ALL {
                        @if Some(category) == selected {
                            option value=(category) selected { (category.label()) }
                        } @else {
                            option value=(category) { (category.label()) }
                        }
                    }
                }

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }

                @if query.is_active() {
                    a
                        href=(endpoints::TRANSACTIONS_VIEW)
                        class=(format!("{BUTTON_SECONDARY_STYLE} text-center"))
                    {
                        "Clear"
                    }
                }
            }
        }
    )
}

fn transaction_table(rows: &[TransactionRow], filter_active: bool) -> Markup {
    html!(
        section class="w-full max-w-4xl"
        {
            @if rows.is_empty() {
                p class="text-center text-gray-600 dark:text-gray-400 py-8"
                {
                    @if filter_active {
                        "No transactions match the current filter."
                    } @else {
                        "Nothing here yet. Add your first transaction above."
                    }
                }
            } @else {
                table class="w-full text-sm text-left text-gray-600 dark:text-gray-400 shadow rounded overflow-hidden"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Description" }
                            th class=(TABLE_CELL_STYLE) { "Category" }
                            th class=(TABLE_CELL_STYLE) { "Date" }
                            th class=(TABLE_CELL_STYLE) { "Amount" }
                            th class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody {
                        @for row in rows {
                            (transaction_row(row))
                        }
                    }
                }
            }
        }
    )
}

fn transaction_row(row: &TransactionRow) -> Markup {
    let amount_style = if row.is_income {
        "px-6 py-4 font-medium text-green-600 dark:text-green-400"
    } else {
        "px-6 py-4 font-medium text-red-600 dark:text-red-400"
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (row.description) }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (row.category_label) }
            }

            td class=(TABLE_CELL_STYLE) { (row.date) }

            td class=(amount_style) { (row.amount) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-3"
                {
                    a href=(row.edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        hx-delete=(row.delete_url)
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::StatusCode,
        response::Response,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        category::Category,
        endpoints,
        ledger::{Ledger, LedgerFile, TransactionDraft},
    };

    use super::{FilterQuery, TransactionsPageState, get_transactions_page};

    fn test_state() -> (TransactionsPageState, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let ledger = Ledger::open(LedgerFile::new(dir.path().join("transactions.json")));

        (
            TransactionsPageState {
                ledger: Arc::new(Mutex::new(ledger)),
                local_timezone: "Etc/UTC".to_owned(),
            },
            dir,
        )
    }

    fn add_transaction(
        state: &TransactionsPageState,
        description: &str,
        amount: f64,
        category: Category,
    ) {
        state
            .ledger
            .lock()
            .unwrap()
            .add(TransactionDraft {
                description: description.to_owned(),
                amount,
                category: Some(category),
                date: date!(2025 - 11 - 02),
            })
            .expect("could not create test transaction");
    }

    async fn get_page(state: TransactionsPageState, query: FilterQuery) -> Html {
        let response = get_transactions_page(State(state), Query(query)).await;
        assert_eq!(response.status(), StatusCode::OK);

        parse_html(response).await
    }

    fn row_descriptions(document: &Html) -> Vec<String> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        document
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .next()
                    .expect("want a description cell")
                    .text()
                    .collect::<String>()
                    .trim()
                    .to_owned()
            })
            .collect()
    }

    #[tokio::test]
    async fn unfiltered_rows_render_most_recent_first() {
        let (state, _dir) = test_state();
        add_transaction(&state, "Pay day", 2500.0, Category::Salary);
        add_transaction(&state, "Groceries", -42.5, Category::Food);

        let document = get_page(state, FilterQuery::default()).await;

        assert_eq!(row_descriptions(&document), ["Groceries", "Pay day"]);
    }

    #[tokio::test]
    async fn filtered_rows_keep_storage_order() {
        let (state, _dir) = test_state();
        add_transaction(&state, "Groceries", -42.5, Category::Food);
        add_transaction(&state, "Rent", -900.0, Category::Housing);
        add_transaction(&state, "Takeaways", -30.0, Category::Food);

        let query = FilterQuery {
            search: None,
            category: Some("food".to_owned()),
        };
        let document = get_page(state, query).await;

        assert_eq!(row_descriptions(&document), ["Groceries", "Takeaways"]);
    }

    #[tokio::test]
    async fn search_narrows_the_table() {
        let (state, _dir) = test_state();
        add_transaction(&state, "Groceries", -42.5, Category::Food);
        add_transaction(&state, "Rent", -900.0, Category::Housing);

        let query = FilterQuery {
            search: Some("gro".to_owned()),
            category: None,
        };
        let document = get_page(state, query).await;

        assert_eq!(row_descriptions(&document), ["Groceries"]);
    }

    #[tokio::test]
    async fn summary_covers_the_whole_ledger() {
        let (state, _dir) = test_state();
        add_transaction(&state, "Pay day", 100.0, Category::Salary);
        add_transaction(&state, "Groceries", -40.0, Category::Food);
        add_transaction(&state, "Bus fare", -10.0, Category::Transport);

        let document = get_page(state, FilterQuery::default()).await;

        let text = document.html();
        assert!(text.contains("$50.00"), "want balance $50.00 in page");
        assert!(text.contains("$100.00"), "want income $100.00 in page");
    }

    #[tokio::test]
    async fn page_has_the_add_form() {
        let (state, _dir) = test_state();

        let document = get_page(state, FilterQuery::default()).await;

        let form_selector = Selector::parse("form[hx-post]").unwrap();
        let form = document
            .select(&form_selector)
            .next()
            .expect("want a form that posts to the transactions API");
        assert_eq!(
            form.value().attr("hx-post"),
            Some(endpoints::TRANSACTIONS_API)
        );
    }

    #[tokio::test]
    async fn filtered_row_actions_link_back_to_the_filtered_view() {
        let (state, _dir) = test_state();
        add_transaction(&state, "Groceries", -42.5, Category::Food);

        let query = FilterQuery {
            search: None,
            category: Some("food".to_owned()),
        };
        let document = get_page(state, query).await;

        let link_selector = Selector::parse("tbody a").unwrap();
        let edit_url = document
            .select(&link_selector)
            .next()
            .expect("want an edit link")
            .value()
            .attr("href")
            .expect("want an edit href")
            .to_owned();

        assert!(
            edit_url.contains("redirect_url="),
            "want the edit link to carry a redirect back to the filtered view, got {edit_url}"
        );
    }

    #[tokio::test]
    async fn empty_ledger_renders_the_empty_state() {
        let (state, _dir) = test_state();

        let document = get_page(state, FilterQuery::default()).await;

        let text = document.html();
        assert!(text.contains("Nothing here yet"), "want the empty state");
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
