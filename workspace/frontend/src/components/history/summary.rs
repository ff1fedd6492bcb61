use common::HistorySummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub summary: HistorySummary,
}

#[function_component(HistorySummaryCards)]
pub fn history_summary_cards(props: &SummaryProps) -> Html {
    let summary = props.summary;

    html! {
        <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
            <div class="stat">
                <div class="stat-figure text-primary"><i class="fas fa-history text-3xl"></i></div>
                <div class="stat-title">{"Total Predictions"}</div>
                <div class="stat-value">{summary.total.to_string()}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-secondary"><i class="fas fa-chart-line text-3xl"></i></div>
                <div class="stat-title">{"Average Risk"}</div>
                <div class="stat-value">{format!("{}%", summary.average_probability_pct)}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-error"><i class="fas fa-heartbeat text-3xl"></i></div>
                <div class="stat-title">{"High Risk Results"}</div>
                <div class="stat-value">{summary.high_risk_count.to_string()}</div>
            </div>
        </div>
    }
}
