use common::{FeatureAnalysis, FeatureStatus, FormField, PredictionResult};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

pub fn status_color(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::Normal => "#10b981",
        FeatureStatus::Low => "#f59e0b",
        FeatureStatus::High => "#ef4444",
        FeatureStatus::Unknown => "#6b7280",
    }
}

/// Short axis label for a feature key.
fn feature_label(key: &str) -> String {
    match FormField::from_key(key) {
        Some(FormField::DiabetesPedigree) => "Pedigree".to_string(),
        Some(field) => field.label().to_string(),
        None => key.to_string(),
    }
}

fn hover_text(analysis: &FeatureAnalysis) -> String {
    let [min, max] = analysis.healthy_range;
    format!(
        "Value: {} {}<br>Healthy: {} - {} {}<br>Status: {}",
        analysis.value,
        analysis.unit,
        min,
        max,
        analysis.unit,
        analysis.status.label()
    )
}

/// Plotly traces: one bar per feature, scored against its healthy range.
pub fn chart_traces(features: &[(&str, &FeatureAnalysis)]) -> Value {
    let names: Vec<String> = features.iter().map(|(k, _)| feature_label(k)).collect();
    let scores: Vec<f64> = features.iter().map(|(_, a)| a.normalized_score()).collect();
    let colors: Vec<&str> = features.iter().map(|(_, a)| status_color(a.status)).collect();
    let hover: Vec<String> = features.iter().map(|(_, a)| hover_text(a)).collect();

    json!([{
        "x": names,
        "y": scores,
        "type": "bar",
        "marker": {"color": colors},
        "text": hover,
        "hoverinfo": "text",
        "textposition": "none"
    }])
}

/// Plain JS object for Plotly; the default serializer would produce `Map`s.
fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn chart_layout() -> Value {
    json!({
        "margin": {"t": 10, "r": 10, "l": 40, "b": 60},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": false, "tickangle": -30},
        "yaxis": {"range": [0, 150], "showgrid": true, "gridcolor": "#eee", "ticksuffix": "%"},
        "showlegend": false,
        "shapes": [{
            "type": "line",
            "xref": "paper",
            "x0": 0,
            "x1": 1,
            "y0": 100,
            "y1": 100,
            "line": {"color": "#94a3b8", "width": 1, "dash": "dash"}
        }]
    })
}

#[derive(Properties, PartialEq)]
pub struct FeatureChartProps {
    pub result: PredictionResult,
}

#[function_component(FeatureChart)]
pub fn feature_chart(props: &FeatureChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with((chart_ref.clone(), props.result.clone()), move |(chart_ref, result)| {
        if let Some(element) = chart_ref.cast::<Element>() {
            let traces = chart_traces(&result.ordered_features());
            let config = json!({"responsive": true, "displayModeBar": false});

            let div_id = element.id();
            match (
                to_js(&traces),
                to_js(&chart_layout()),
                to_js(&config),
            ) {
                (Ok(data), Ok(layout), Ok(config)) if !div_id.is_empty() => {
                    newPlot(&div_id, data, layout, config);
                }
                _ => log::error!("Failed to prepare feature chart"),
            }
        }
        || ()
    });

    html! {
        <div>
            <div ref={chart_ref} id="chart-feature-analysis" class="chart-container" style="height: 320px;"></div>
            <div class="flex flex-wrap justify-center gap-4 text-xs mt-2">
                { for [FeatureStatus::Normal, FeatureStatus::Low, FeatureStatus::High].iter().map(|status| html! {
                    <span class="flex items-center gap-1">
                        <span class="inline-block w-3 h-3 rounded" style={format!("background: {}", status_color(*status))}></span>
                        {status.label()}
                    </span>
                }) }
                <span class="text-gray-400">{"100% = top of healthy range"}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(value: f64, status: FeatureStatus) -> FeatureAnalysis {
        FeatureAnalysis {
            value,
            status,
            healthy_range: [70.0, 140.0],
            unit: "mg/dL".to_string(),
        }
    }

    #[test]
    fn test_chart_traces() {
        let glucose = analysis(175.0, FeatureStatus::High);
        let pedigree = FeatureAnalysis {
            value: 0.3,
            status: FeatureStatus::Normal,
            healthy_range: [0.08, 0.5],
            unit: String::new(),
        };
        let traces = chart_traces(&[("glucose", &glucose), ("diabetes_pedigree", &pedigree)]);

        let trace = &traces[0];
        assert_eq!(trace["x"], json!(["Glucose", "Pedigree"]));
        assert_eq!(trace["y"][0], json!(150.0));
        assert_eq!(trace["marker"]["color"], json!(["#ef4444", "#10b981"]));
    }

    #[test]
    fn test_unknown_feature_keeps_key() {
        assert_eq!(feature_label("cholesterol"), "cholesterol");
        assert_eq!(status_color(FeatureStatus::Unknown), "#6b7280");
    }
}
