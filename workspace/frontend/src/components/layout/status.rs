use yew::prelude::*;
use common::HealthResponse;
use crate::api_client::get_health;
use crate::hooks::FetchState;

/// Badge text and class for the current health check state.
fn badge(state: &FetchState<HealthResponse>) -> (&'static str, &'static str) {
    match state {
        FetchState::NotStarted | FetchState::Loading => ("Checking…", "badge-ghost"),
        FetchState::Success(health) if health.is_healthy() => ("API online", "badge-success"),
        FetchState::Success(_) => ("API degraded", "badge-warning"),
        FetchState::Error(_) => ("API offline", "badge-error"),
    }
}

/// Hover text: service status and version, or the request error.
fn tooltip(state: &FetchState<HealthResponse>) -> String {
    state
        .data()
        .map(|health| format!("{} (v{})", health.status, health.version))
        .or_else(|| state.error().cloned())
        .unwrap_or_default()
}

/// Navbar badge reporting whether the prediction service is reachable.
#[function_component(ServiceStatus)]
pub fn service_status() -> Html {
    let state = use_state(FetchState::<HealthResponse>::default);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            state.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let result = get_health().await;
                if let Err(e) = &result {
                    log::warn!("Prediction service health check failed: {}", e);
                }
                state.set(result.into());
            });
            || ()
        });
    }

    let (text, class) = badge(&state);
    let title = tooltip(&state);

    html! {
        <span class={classes!("badge", "gap-2", class)} title={title}>
            <i class="fas fa-circle text-[0.5rem]"></i>
            {text}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(status: &str, model_loaded: bool) -> HealthResponse {
        HealthResponse {
            status: status.to_string(),
            model_loaded,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn test_badge_states() {
        assert_eq!(badge(&FetchState::Loading).1, "badge-ghost");
        assert_eq!(badge(&FetchState::Success(health("healthy", true))).0, "API online");
        assert_eq!(badge(&FetchState::Success(health("degraded", false))).0, "API degraded");
        assert_eq!(badge(&FetchState::Error("down".to_string())).0, "API offline");
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(tooltip(&FetchState::Loading), "");
        assert_eq!(tooltip(&FetchState::Error("down".to_string())), "down");
        assert!(tooltip(&FetchState::Success(health("healthy", true))).starts_with("healthy (v"));
    }
}
