use common::{settle_prediction, PredictionInput, PredictionOutcome, PredictionResult};
use yew::prelude::*;

use crate::api_client;
use crate::components::predict::form::PredictionForm;
use crate::components::predict::result_card::ResultCard;
use crate::storage;
use crate::widgets::alert::ErrorBanner;
use crate::widgets::toast::ToastContext;

/// Form, in-flight state and result of one prediction at a time.
#[function_component(PredictPage)]
pub fn predict_page() -> Html {
    let toast = use_context::<ToastContext>();
    let is_loading = use_state(|| false);
    let result = use_state(|| None::<PredictionResult>);
    let error = use_state(|| None::<String>);

    let on_submit = {
        let is_loading = is_loading.clone();
        let result = result.clone();
        let error = error.clone();
        let toast = toast.clone();
        Callback::from(move |input: PredictionInput| {
            if *is_loading {
                log::debug!("Prediction already in flight, ignoring submit");
                return;
            }
            is_loading.set(true);
            error.set(None);

            let is_loading = is_loading.clone();
            let result = result.clone();
            let error = error.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let response = api_client::predict(&input).await;
                match settle_prediction(&storage::history_store(), &input, response) {
                    PredictionOutcome::Success {
                        result: prediction,
                        record,
                        history_warning,
                    } => {
                        if let Some(record) = record {
                            log::debug!("Prediction saved to history as {}", record.id);
                        }
                        if let (Some(warning), Some(toast)) = (history_warning, &toast) {
                            toast.show_warning(warning);
                        }
                        result.set(Some(prediction));
                    }
                    PredictionOutcome::Failure { message } => {
                        error.set(Some(message));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    let on_close = {
        let result = result.clone();
        let error = error.clone();
        Callback::from(move |_| {
            result.set(None);
            error.set(None);
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    html! {
        <div class="space-y-6">
            <div class="text-center">
                <h1 class="text-3xl font-bold">{"Diabetes Risk Assessment"}</h1>
                <p class="text-base-content/70 mt-2">
                    {"Enter your health metrics below to estimate your risk of diabetes."}
                </p>
            </div>

            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} title="Prediction failed" on_dismiss={on_dismiss} />
            }

            if let Some(prediction) = &*result {
                <ResultCard result={prediction.clone()} on_close={on_close} />
            } else {
                <PredictionForm on_submit={on_submit} is_loading={*is_loading} />
            }
        </div>
    }
}
