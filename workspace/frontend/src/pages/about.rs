use common::{FeatureInfoResponse, FormField};
use yew::prelude::*;

use crate::api_client;
use crate::hooks::FetchState;
use crate::widgets::loading::Loading;

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub name: String,
    pub description: String,
    pub range: String,
    pub healthy: Option<String>,
    pub unit: String,
}

fn format_range(min: f64, max: f64) -> String {
    format!("{} to {}", min, max)
}

/// Rows from the service's feature info.
pub fn rows_from_service(info: &FeatureInfoResponse) -> Vec<ReferenceRow> {
    info.ordered()
        .into_iter()
        .map(|(_, feature)| ReferenceRow {
            name: feature.name.clone(),
            description: feature.description.clone(),
            range: format_range(feature.min, feature.max),
            healthy: Some(format_range(feature.healthy_range[0], feature.healthy_range[1])),
            unit: feature.unit.clone(),
        })
        .collect()
}

/// Rows from the form's own field ranges, used when the service is unreachable.
pub fn rows_from_fields() -> Vec<ReferenceRow> {
    FormField::ALL
        .iter()
        .map(|field| {
            let config = field.config();
            ReferenceRow {
                name: config.label.to_string(),
                description: config.tooltip.to_string(),
                range: format_range(config.min, config.max),
                healthy: None,
                unit: config.unit.to_string(),
            }
        })
        .collect()
}

#[function_component(About)]
pub fn about() -> Html {
    let info = use_state(FetchState::<FeatureInfoResponse>::default);

    {
        let info = info.clone();
        use_effect_with((), move |_| {
            info.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                info.set(api_client::get_feature_info().await.into());
            });
            || ()
        });
    }

    let rows = info.data().map(rows_from_service).unwrap_or_else(rows_from_fields);

    html! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-3xl mb-6">{"About This Tool"}</h2>

                <div class="prose max-w-none">
                    <p class="text-lg mb-4">
                        {"This tool estimates the risk of diabetes from eight health measurements using a "}
                        {"machine learning model trained on the Pima Indians Diabetes dataset."}
                    </p>
                    <div class="alert alert-warning mb-6">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>{"Results are informational only and are not a medical diagnosis. Consult a healthcare professional about your health."}</span>
                    </div>

                    <h3 class="text-xl font-semibold mb-3">{"Input Features"}</h3>
                </div>

                {match &*info {
                    FetchState::Loading => html! { <Loading text="Loading feature reference..." /> },
                    FetchState::Error(e) => html! {
                        <p class="text-sm text-base-content/60 mb-2">
                            {format!("Reference ranges from the service are unavailable ({}); showing accepted input ranges.", e)}
                        </p>
                    },
                    _ => html! {},
                }}

                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>{"Feature"}</th>
                                <th>{"Description"}</th>
                                <th>{"Range"}</th>
                                <th>{"Healthy Range"}</th>
                                <th>{"Unit"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for rows.iter().map(|row| html! {
                                <tr>
                                    <td class="font-semibold">{row.name.clone()}</td>
                                    <td>{row.description.clone()}</td>
                                    <td>{row.range.clone()}</td>
                                    <td>{row.healthy.clone().unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{row.unit.clone()}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_rows_follow_form_order() {
        let rows = rows_from_fields();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].name, "Pregnancies");
        assert_eq!(rows[7].range, "21 to 81");
        assert!(rows.iter().all(|r| r.healthy.is_none()));
    }

    #[test]
    fn test_rows_from_service() {
        let info: FeatureInfoResponse = serde_json::from_str(
            r#"{"features": {
                "glucose": {"name": "Glucose", "description": "Plasma glucose", "min": 0, "max": 200, "unit": "mg/dL", "healthy_range": [70, 140]},
                "age": {"name": "Age", "min": 21, "max": 81, "unit": "years", "healthy_range": [21, 81]}
            }, "total_features": 2}"#,
        )
        .unwrap();
        let rows = rows_from_service(&info);
        assert_eq!(rows[0].name, "Glucose");
        assert_eq!(rows[0].healthy.as_deref(), Some("70 to 140"));
        assert_eq!(rows[1].description, "");
    }
}
