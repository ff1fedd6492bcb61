use common::prediction::{format_probability, outcome_label};
use common::{PredictionResult, RiskLevel};
use yew::prelude::*;

use super::feature_chart::FeatureChart;
use super::risk_gauge::RiskGauge;

fn risk_style(level: RiskLevel) -> (&'static str, &'static str) {
    match level {
        RiskLevel::Low => ("border-success", "fas fa-check-circle text-success"),
        RiskLevel::Moderate => ("border-warning", "fas fa-exclamation-triangle text-warning"),
        RiskLevel::High => ("border-error", "fas fa-times-circle text-error"),
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultCardProps {
    pub result: PredictionResult,
    pub on_close: Callback<()>,
}

#[function_component(ResultCard)]
pub fn result_card(props: &ResultCardProps) -> Html {
    let result = &props.result;
    let (border, icon) = risk_style(result.risk_level);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="space-y-6">
            <div class={classes!("card", "bg-base-100", "shadow-xl", "border-2", border)}>
                <div class="card-body md:flex-row items-center gap-8">
                    <RiskGauge probability={result.probability} risk_level={result.risk_level} />
                    <div class="flex-1 space-y-4">
                        <h2 class="card-title text-2xl">
                            <i class={icon}></i>{" Prediction Result"}
                        </h2>
                        <p class="text-gray-600">{result.risk_level.message()}</p>
                        <div class="stats stats-vertical sm:stats-horizontal shadow w-full">
                            <div class="stat">
                                <div class="stat-title">{"Prediction"}</div>
                                <div class="stat-value text-2xl">{outcome_label(result.prediction)}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">{"Probability"}</div>
                                <div class="stat-value text-2xl">{format_probability(result.probability)}</div>
                            </div>
                        </div>
                    </div>
                </div>
            </div>

            if !result.feature_analysis.is_empty() {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title"><i class="fas fa-chart-bar text-primary"></i>{" Your Health Metrics Analysis"}</h3>
                        <FeatureChart result={result.clone()} />
                    </div>
                </div>
            }

            if !result.recommendations.is_empty() {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title"><i class="fas fa-lightbulb text-warning"></i>{" Personalized Recommendations"}</h3>
                        <ul class="space-y-3">
                            { for result.recommendations.iter().enumerate().map(|(i, rec)| html! {
                                <li key={i} class="flex items-start gap-3">
                                    <span class="badge badge-primary badge-sm mt-1">{(i + 1).to_string()}</span>
                                    <span>{rec}</span>
                                </li>
                            }) }
                        </ul>
                    </div>
                </div>
            }

            <div class="flex justify-center">
                <button class="btn btn-primary" onclick={on_close}>
                    <i class="fas fa-redo"></i>{" Make Another Prediction"}
                </button>
            </div>
        </div>
    }
}
