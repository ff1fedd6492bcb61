use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    #[prop_or_default]
    pub title: Option<String>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

/// Dismissable error banner shown above a form or page section.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    log::warn!("Displaying error to user: {}", props.message);

    html! {
        <div class="alert alert-error mb-6" role="alert">
            <i class="fas fa-exclamation-circle text-xl"></i>
            <div class="flex flex-col">
                <span class="font-semibold">{props.title.clone().unwrap_or_else(|| "Error".to_string())}</span>
                <span class="text-sm">{&props.message}</span>
            </div>
            {if let Some(on_dismiss) = &props.on_dismiss {
                let on_dismiss = on_dismiss.clone();
                html! {
                    <button
                        class="btn btn-sm btn-ghost btn-circle"
                        aria-label="Dismiss"
                        onclick={Callback::from(move |_| {
                            log::debug!("User dismissed error banner");
                            on_dismiss.emit(());
                        })}
                    >
                        <i class="fas fa-times"></i>
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
