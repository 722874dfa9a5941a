//! The category expense chart.
//!
//! Builds the ECharts doughnut configuration for the per-category expense
//! breakdown, plus the HTML container and initialization script. The chart
//! is rebuilt from scratch on every page render, so it always reflects the
//! ledger's current contents.

use charming::{
    Chart,
    component::Legend,
    element::{Color, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{category::Category, html::HeadElement};

/// The ECharts library the chart script depends on.
pub const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The HTML element ID the chart mounts into.
const CHART_CONTAINER_ID: &str = "expense-chart";

/// The fixed segment palette, indexed by category first-appearance
/// position. Cycles if there are ever more segments than colours.
const SEGMENT_COLORS: [&str; 10] = [
    "#059669", "#047857", "#065f46", "#064e3b", "#022c22", "#16a34a", "#15803d", "#166534",
    "#14532d", "#052e16",
];

/// Renders the HTML container for the expense chart.
pub fn chart_view() -> Markup {
    html!(
        section
            id="chart"
            class="w-full max-w-4xl mx-auto mb-6"
        {
            div
                id=(CHART_CONTAINER_ID)
                class="min-h-[380px] rounded bg-white dark:bg-gray-100 shadow"
            {}
        }
    )
}

/// Generates the JavaScript initialization code for the expense chart.
///
/// A fresh ECharts instance is created on every page load with the options
/// serialized from `chart`, which is the server-rendered equivalent of
/// destroying and recreating the chart on each data change.
pub fn chart_script(chart: &Chart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_CONTAINER_ID}");
            const chart = echarts.init(chartDom);
            chart.setOption({});
            window.addEventListener('resize', chart.resize);
        }});"#,
        chart
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// Build the expense doughnut chart from a category breakdown.
///
/// One segment per category with a nonzero expense total, coloured by the
/// category's position in the breakdown, with currency-formatted tooltips
/// and the legend along the bottom.
pub fn expense_chart(breakdown: &[(Category, f64)]) -> Chart {
    let palette: Vec<Color> = breakdown
        .iter()
        .enumerate()
        .map(|(index, _)| Color::from(SEGMENT_COLORS[index % SEGMENT_COLORS.len()]))
        .collect();

    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|(category, total)| (*total, category.label()))
        .collect();

    Chart::new()
        .color(palette)
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["45%", "70%"])
                .label(Label::new().show(false))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod chart_tests {
    use crate::category::Category;

    use super::expense_chart;

    #[test]
    fn chart_has_a_segment_per_category() {
        let breakdown = [(Category::Food, 50.0), (Category::Housing, 900.0)];

        let options = expense_chart(&breakdown).to_string();

        assert!(options.contains("Food"), "got: {options}");
        assert!(options.contains("Housing"), "got: {options}");
    }

    #[test]
    fn segment_colours_follow_the_fixed_palette() {
        let breakdown = [(Category::Food, 50.0), (Category::Housing, 900.0)];

        let options = expense_chart(&breakdown).to_string();

        assert!(options.contains("#059669"), "got: {options}");
        assert!(options.contains("#047857"), "got: {options}");
    }
}
