use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client;
use crate::hooks::FetchState;
use crate::settings::{self, join_endpoint, normalize_api_url, AppSettings, DEFAULT_API_URL};
use crate::widgets::toast::ToastContext;
use common::api::HEALTH_PATH;
use common::HealthResponse;

/// Checks an entered API base before it is stored.
pub fn validate_api_url(value: &str) -> Result<String, String> {
    let url = normalize_api_url(value);
    if url.is_empty() {
        return Err("API URL is required".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("API URL must start with http:// or https://".to_string());
    }
    Ok(url)
}

/// Health endpoint for the URL currently typed in the form.
pub fn health_check_url(entered: &str) -> Result<String, String> {
    validate_api_url(entered).map(|base| join_endpoint(&base, HEALTH_PATH))
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("Failed to reload page: {:?}", e);
        }
    }
}

#[function_component(Settings)]
pub fn settings() -> Html {
    let toast = use_context::<ToastContext>();
    let current = settings::get_settings();
    let api_url = use_state(|| current.api_url.clone());
    let toast_duration = use_state(|| current.toast_duration_ms.to_string());
    let form_error = use_state(|| None::<String>);
    let check = use_state(FetchState::<HealthResponse>::default);
    let checked_url = use_state(|| None::<String>);

    let on_api_url = {
        let api_url = api_url.clone();
        Callback::from(move |e: InputEvent| {
            api_url.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_duration = {
        let toast_duration = toast_duration.clone();
        Callback::from(move |e: InputEvent| {
            toast_duration.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_save = {
        let api_url = api_url.clone();
        let toast_duration = toast_duration.clone();
        let form_error = form_error.clone();
        let toast = toast.clone();
        Callback::from(move |_| {
            let url = match validate_api_url(&api_url) {
                Ok(url) => url,
                Err(e) => {
                    form_error.set(Some(e));
                    return;
                }
            };
            let duration = match toast_duration.trim().parse::<u32>() {
                Ok(d) if d > 0 => d,
                _ => {
                    form_error.set(Some("Notification duration must be a positive number".to_string()));
                    return;
                }
            };
            form_error.set(None);

            let updated = AppSettings {
                api_url: url,
                toast_duration_ms: duration,
                ..settings::get_settings()
            };
            match updated.save_to_storage() {
                Ok(()) => {
                    log::info!("Settings saved, API base is now {}", updated.api_url);
                    settings::update_settings(|s| *s = updated);
                    reload_page();
                }
                Err(e) => {
                    log::error!("Failed to save settings: {:?}", e);
                    if let Some(toast) = &toast {
                        toast.show_error("Failed to save settings".to_string());
                    }
                }
            }
        })
    };

    let on_reset = {
        let toast = toast.clone();
        Callback::from(move |_| match AppSettings::reset_storage() {
            Ok(()) => {
                log::info!("Settings reset to defaults");
                reload_page();
            }
            Err(e) => {
                log::error!("Failed to reset settings: {:?}", e);
                if let Some(toast) = &toast {
                    toast.show_error("Failed to reset settings".to_string());
                }
            }
        })
    };

    let on_check = {
        let api_url = api_url.clone();
        let check = check.clone();
        let checked_url = checked_url.clone();
        Callback::from(move |_| {
            let target = match health_check_url(&api_url) {
                Ok(target) => target,
                Err(e) => {
                    check.set(FetchState::Error(e));
                    checked_url.set(None);
                    return;
                }
            };
            checked_url.set(Some(target));

            let base = normalize_api_url(&api_url);
            let check = check.clone();
            check.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                check.set(api_client::get_health_at(&base).await.into());
            });
        })
    };

    let check_status = match &*check {
        FetchState::NotStarted => html! {},
        FetchState::Loading => html! { <span class="loading loading-spinner loading-sm"></span> },
        FetchState::Success(health) => html! {
            <div class={classes!("alert", if health.is_healthy() { "alert-success" } else { "alert-warning" })}>
                <i class="fas fa-plug"></i>
                <span>{format!("Service {} (model loaded: {}, version {})", health.status, health.model_loaded, health.version)}</span>
            </div>
        },
        FetchState::Error(e) => html! {
            <div class="alert alert-error">
                <i class="fas fa-unlink"></i>
                <span>{e.clone()}</span>
            </div>
        },
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Connection Settings"}</h2>
                    <div class="form-control w-full mt-4">
                        <label class="label"><span class="label-text">{"API Base URL"}</span></label>
                        <input
                            type="text"
                            id="api-url-input"
                            placeholder={DEFAULT_API_URL}
                            class="input input-bordered w-full"
                            value={(*api_url).clone()}
                            oninput={on_api_url}
                        />
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Notification duration (ms)"}</span></label>
                        <input
                            type="number"
                            min="500"
                            step="500"
                            class="input input-bordered w-full"
                            value={(*toast_duration).clone()}
                            oninput={on_duration}
                        />
                    </div>
                    {if let Some(e) = &*form_error {
                        html! { <p class="text-error text-sm mt-2">{e.clone()}</p> }
                    } else {
                        html! {}
                    }}
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-ghost" onclick={on_reset}>{"Reset to Defaults"}</button>
                        <button class="btn btn-primary" onclick={on_save}>{"Save & Reload"}</button>
                    </div>
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Service Status"}</h2>
                    <p class="text-sm text-base-content/70">
                        {format!("Requests go to {}", current.api_base_url())}
                    </p>
                    if let Some(target) = &*checked_url {
                        <p class="text-xs text-base-content/60">{format!("Checked: {}", target)}</p>
                    }
                    <div class="mt-4">{check_status}</div>
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-outline" onclick={on_check} disabled={check.is_loading()}>
                            <i class="fas fa-stethoscope"></i>{" Test Entered URL"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_url() {
        assert_eq!(validate_api_url(" https://api.example.com/ "), Ok("https://api.example.com".to_string()));
        assert!(validate_api_url("").is_err());
        assert!(validate_api_url("localhost:8000").is_err());
    }

    #[test]
    fn test_health_check_targets_entered_url() {
        settings::update_settings(|s| s.api_url = "http://localhost:8000".to_string());

        assert_eq!(
            health_check_url(" https://staging.example.com/ "),
            Ok("https://staging.example.com/health".to_string())
        );
        assert!(health_check_url("not a url").is_err());
    }
}
