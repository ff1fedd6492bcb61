use common::HistorySummary;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::storage;

const HIGHLIGHTS: [(&str, &str, &str); 3] = [
    ("fas fa-brain", "Machine Learning", "A model trained on clinical measurements estimates your risk."),
    ("fas fa-chart-bar", "Metric Analysis", "See how each of your metrics compares to its healthy range."),
    ("fas fa-lock", "Private History", "Past predictions stay in your browser and can be exported as CSV."),
];

#[function_component(Home)]
pub fn home() -> Html {
    let summary = use_memo((), |_| HistorySummary::from_records(&storage::history_store().get_history()));

    html! {
        <div class="space-y-12">
            <div class="hero bg-base-100 rounded-box shadow">
                <div class="hero-content text-center py-16">
                    <div class="max-w-xl">
                        <h1 class="text-5xl font-bold">{"Know Your Diabetes Risk"}</h1>
                        <p class="py-6">
                            {"Enter eight routine health metrics and get an instant risk estimate "}
                            {"with personalised recommendations."}
                        </p>
                        <div class="flex gap-4 justify-center">
                            <Link<Route> to={Route::Predict} classes="btn btn-primary">{"Start Assessment"}</Link<Route>>
                            <Link<Route> to={Route::About} classes="btn btn-outline">{"Learn More"}</Link<Route>>
                        </div>
                    </div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                {for HIGHLIGHTS.iter().map(|(icon, title, text)| html! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center">
                            <i class={classes!(*icon, "text-4xl", "text-primary")}></i>
                            <h3 class="card-title mt-2">{*title}</h3>
                            <p class="text-base-content/70">{*text}</p>
                        </div>
                    </div>
                })}
            </div>

            if summary.total > 0 {
                <div class="alert">
                    <i class="fas fa-history"></i>
                    <span>{format!("You have {} saved prediction(s), averaging {}% risk.", summary.total, summary.average_probability_pct)}</span>
                    <Link<Route> to={Route::History} classes="btn btn-sm">{"View History"}</Link<Route>>
                </div>
            }
        </div>
    }
}
