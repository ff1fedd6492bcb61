use common::stats::{trend_points, TREND_WINDOW};
use common::HistorySummary;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::history::summary::HistorySummaryCards;
use crate::components::history::table::HistoryTable;
use crate::components::history::trend_chart::{RiskTrendChart, MIN_TREND_POINTS};
use crate::router::Route;
use crate::storage;

#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let history = use_state(|| storage::history_store().get_history());

    let on_update = {
        let history = history.clone();
        Callback::from(move |_| {
            log::trace!("Reloading prediction history");
            history.set(storage::history_store().get_history());
        })
    };

    let summary = HistorySummary::from_records(&history);
    let points = trend_points(&history, TREND_WINDOW);

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap justify-between items-center gap-4">
                <div>
                    <h1 class="text-3xl font-bold">{"Prediction History"}</h1>
                    <p class="text-base-content/70">{"Stored locally in this browser."}</p>
                </div>
                <Link<Route> to={Route::Predict} classes="btn btn-primary">
                    <i class="fas fa-plus"></i>{" New Prediction"}
                </Link<Route>>
            </div>

            if !history.is_empty() {
                <HistorySummaryCards summary={summary} />
            }

            if points.len() >= MIN_TREND_POINTS {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title"><i class="fas fa-chart-line"></i>{" Risk Trend"}</h2>
                        <RiskTrendChart points={points} />
                    </div>
                </div>
            }

            <HistoryTable history={(*history).clone()} on_update={on_update} />
        </div>
    }
}
